//! Pick a label from a nested list, or type a new one, in a terminal popup.
//!
//! The popup is drawn on stderr; every confirmed selection is printed to
//! stdout as one JSON object per line once the terminal is restored.

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use select_tree::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use select_tree::config::AppConfig;
use select_tree::core::select_tree::{SelectTree, SelectTreeProps, StaleSearchPolicy};
use select_tree::core::tree;
use select_tree::ui::{layout::AppLayout, select_tree_widget::SelectTreeWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Searchable select-tree popup")]
struct Cli {
    /// JSON file with the item tree (`-` for stdin).  Without it the popup
    /// asks for a new label.
    #[arg(long)]
    items: Option<PathBuf>,

    /// Initial text of the input when no items are given.
    #[arg(long)]
    label: Option<String>,

    /// Title shown at the first level.
    #[arg(long)]
    first_title: Option<String>,

    /// Title shown after drilling into a branch.
    #[arg(long)]
    second_title: Option<String>,

    /// Hide the search input.
    #[arg(long)]
    no_search: bool,

    /// Start with the list focused instead of the input.
    #[arg(long)]
    no_autofocus: bool,

    /// `false` offers the search text itself as a selectable row.
    #[arg(long, value_name = "BOOL")]
    exclusive: Option<bool>,

    /// What drilling into a branch does to an active search (keep|clear).
    #[arg(long, value_name = "POLICY")]
    stale_search: Option<StaleSearchPolicy>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/select-tree/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the popup open after a selection.
    #[arg(long)]
    keep_open: bool,
}

impl Cli {
    fn props(&self, items: Vec<tree::TreeNode>, config: &AppConfig) -> SelectTreeProps {
        let mut props = SelectTreeProps::new(items)
            .search_enabled(!self.no_search)
            .auto_focus(!self.no_autofocus)
            .stale_search(self.stale_search.unwrap_or(config.stale_search));
        if let Some(label) = &self.label {
            props = props.label(label.clone());
        }
        if let Some(title) = &self.first_title {
            props = props.first_title(title.clone());
        }
        if let Some(title) = &self.second_title {
            props = props.second_title(title.clone());
        }
        if let Some(exclusive) = self.exclusive {
            props = props.exclusive(exclusive);
        }
        props
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let items = match &cli.items {
        Some(path) => tree::load_items(path)?,
        None => Vec::new(),
    };
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let props = cli.props(items, &config);
    let mut state = AppState::new(SelectTree::new(props), config);
    state.keep_open = cli.keep_open;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    outcome?;

    for node in &state.selections {
        println!("{}", serde_json::to_string(node)?);
    }

    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            state.area = layout.popup_area;

            let widget = SelectTreeWidget::new(&state.tree).input_focused(state.input_active());
            frame.render_stateful_widget(widget, layout.popup_area, &mut state.list_state);

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            frame.render_widget(
                Paragraph::new(status_text).style(Theme::status_bar_style()),
                layout.status_area,
            );
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Paste(text) => handler::handle_paste(state, &text),
            AppEvent::Resize(_, _) => {}
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
