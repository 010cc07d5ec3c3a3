//! User configuration — keybindings and the stale-search policy.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/select-tree/config.toml` (default
//! `~/.config/select-tree/config.toml`), or any file passed with `--config`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::select_tree::StaleSearchPolicy;
use crate::error::{Result, SelectTreeError};

// ───────────────────────────────────────── actions ───────────

/// Bindable widget actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Activate,
    Back,
    ToggleFocus,
    Save,
    Close,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Activate,
        Action::Back,
        Action::ToggleFocus,
        Action::Save,
        Action::Close,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Activate => "activate",
            Action::Back => "back",
            Action::ToggleFocus => "toggle_focus",
            Action::Save => "save",
            Action::Close => "close",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// A bare printable key or Backspace; these would swallow typed text,
    /// so they only apply while the list has focus.
    pub fn is_text_key(&self) -> bool {
        matches!(self.code, KeyCode::Char(_) | KeyCode::Backspace)
            && !self
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    /// User-friendly display string (e.g. `"Ctrl+s"`, `"↑"`, `"k"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+s"`, `"Up"`, `"k"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.trim().to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let key_part = key_part.trim();
        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                KeyCode::F(lower[1..].parse().ok()?)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub stale_search: StaleSearchPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            stale_search: StaleSearchPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(
            Activate,
            vec![
                KeyBind::new(Enter, n),
                KeyBind::new(Right, n),
                KeyBind::new(Char('l'), n),
            ],
        );
        m.insert(
            Back,
            vec![
                KeyBind::new(Left, n),
                KeyBind::new(Char('h'), n),
                KeyBind::new(Backspace, n),
            ],
        );
        m.insert(ToggleFocus, vec![KeyBind::new(Tab, n)]);
        m.insert(Save, vec![KeyBind::new(Char('s'), ctrl)]);
        m.insert(Close, vec![KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to `event`.  With `text_input` set, bare
    /// printable keys are left for the input box.
    pub fn match_key(&self, event: KeyEvent, text_input: bool) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if text_input && bind.is_text_key() {
                    continue;
                }
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// First binding of `action`, for hints.
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: move | {}: select | {}: back | {}: focus | {}: close",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::MoveDown),
            self.short_binding(Action::Activate),
            self.short_binding(Action::Back),
            self.short_binding(Action::ToggleFocus),
            self.short_binding(Action::Close),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load the default config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Load an explicitly named config file; a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| SelectTreeError::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!("config line {}: expected `key = value`", lineno + 1);
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if key == "stale_search" {
                match value.parse::<StaleSearchPolicy>() {
                    Ok(policy) => config.stale_search = policy,
                    Err(err) => tracing::warn!("config line {}: {err}", lineno + 1),
                }
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("config line {}: unknown key `{key}`", lineno + 1);
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                match KeyBind::parse(part) {
                    Some(bind) => parsed.push(bind),
                    None => tracing::warn!("config line {}: bad key `{part}`", lineno + 1),
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }
}

/// `$XDG_CONFIG_HOME/select-tree/config.toml`.
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("select-tree").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_arrow_keys() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Down, KeyModifiers::NONE), true),
            Some(Action::MoveDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Esc, KeyModifiers::NONE), true),
            Some(Action::Close)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL), true),
            Some(Action::Save)
        );
    }

    #[test]
    fn text_keys_are_skipped_while_typing() {
        let config = AppConfig::default();
        let j = key(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(config.match_key(j, true), None);
        assert_eq!(config.match_key(j, false), Some(Action::MoveDown));

        let bksp = key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(config.match_key(bksp, true), None);
        assert_eq!(config.match_key(bksp, false), Some(Action::Back));
    }

    #[test]
    fn parse_overrides_bindings_and_policy() {
        let config = AppConfig::parse(
            "# custom\n\
             [keys]\n\
             close = Ctrl+q, \"Esc\"\n\
             stale_search = clear\n\
             bogus = x\n\
             move_up = Ctrl+Nope\n",
        );
        assert_eq!(config.stale_search, StaleSearchPolicy::Clear);
        assert_eq!(
            config.bindings[&Action::Close],
            vec![
                KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Esc, KeyModifiers::NONE),
            ]
        );
        // Unparsable value keeps the default.
        assert_eq!(config.bindings[&Action::MoveUp], AppConfig::default_bindings()[&Action::MoveUp]);
    }

    #[test]
    fn parse_keeps_char_case() {
        let bind = KeyBind::parse("Shift+G").unwrap();
        assert_eq!(bind, KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(KeyBind::parse("F5").unwrap().code, KeyCode::F(5));
        assert!(KeyBind::parse("Hyper+x").is_none());
    }

    #[test]
    fn load_from_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "stale_search = clear\n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().stale_search, StaleSearchPolicy::Clear);

        let err = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SelectTreeError::ReadConfig { .. }));
    }

    #[test]
    fn hint_uses_first_bindings() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("↑/↓: move"));
        assert!(hint.contains("Esc: close"));
    }
}
