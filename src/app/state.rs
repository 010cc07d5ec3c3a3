//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling a mutation of `&mut AppState`.

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::select_tree::SelectTree;
use crate::core::tree::TreeNode;
use crate::ui::rows::RowListState;

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

pub struct AppState {
    pub tree: SelectTree,
    /// Highlight and scroll of the row list.
    pub list_state: RowListState,
    pub focus: Focus,
    pub config: AppConfig,
    /// Area the popup was last drawn into; mouse clicks are tested against
    /// the layout computed from it.
    pub area: Rect,
    /// Confirmed selections, printed on exit.
    pub selections: Vec<TreeNode>,
    /// Keep running after a leaf is selected or a label saved.
    pub keep_open: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(tree: SelectTree, config: AppConfig) -> Self {
        let props = tree.props();
        let focus = if props.search_enabled && props.auto_focus {
            Focus::Input
        } else {
            Focus::List
        };
        Self {
            tree,
            list_state: RowListState::default(),
            focus,
            config,
            area: Rect::default(),
            selections: Vec::new(),
            keep_open: false,
            should_quit: false,
            status_message: None,
        }
    }

    /// Typed characters go to the search box.
    pub fn input_active(&self) -> bool {
        self.focus == Focus::Input && self.tree.props().search_enabled
    }
}
