//! The select-tree controller: props, widget state, and the transitions
//! that user input drives.
//!
//! Every transition returns the events it produced instead of calling back
//! into the host.  A committed state change always ends with
//! [`SelectTreeEvent::Changed`].

use std::fmt;
use std::str::FromStr;

use crate::error::SelectTreeError;

use super::tree::{NodePath, TreeNode};
use super::visible::{self, VisibleItem};

pub const DEFAULT_FIRST_TITLE: &str = "First Level items";

// ───────────────────────────────────────── props ─────────────

/// What happens to an active search when the user drills into a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleSearchPolicy {
    /// Leave the term in place; the search results keep showing until the
    /// input is edited again.
    #[default]
    Keep,
    /// Clear the term so the drilled level becomes visible.
    Clear,
}

impl StaleSearchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for StaleSearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaleSearchPolicy {
    type Err = SelectTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "clear" => Ok(Self::Clear),
            other => Err(SelectTreeError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Host-supplied configuration.
#[derive(Debug, Clone)]
pub struct SelectTreeProps {
    pub items: Vec<TreeNode>,
    /// Initial text of the input in free-text mode (empty `items`).
    pub label: Option<String>,
    pub first_title: String,
    /// Title used while a branch is drilled into.
    pub second_title: Option<String>,
    pub search_enabled: bool,
    pub auto_focus: bool,
    /// `Some(false)` offers the search term itself as a selectable row.
    pub exclusive: Option<bool>,
    pub stale_search: StaleSearchPolicy,
}

impl SelectTreeProps {
    pub fn new(items: Vec<TreeNode>) -> Self {
        Self {
            items,
            label: None,
            first_title: DEFAULT_FIRST_TITLE.to_string(),
            second_title: None,
            search_enabled: true,
            auto_focus: true,
            exclusive: None,
            stale_search: StaleSearchPolicy::default(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn first_title(mut self, title: impl Into<String>) -> Self {
        self.first_title = title.into();
        self
    }

    pub fn second_title(mut self, title: impl Into<String>) -> Self {
        self.second_title = Some(title.into());
        self
    }

    pub fn search_enabled(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = Some(exclusive);
        self
    }

    pub fn stale_search(mut self, policy: StaleSearchPolicy) -> Self {
        self.stale_search = policy;
        self
    }
}

// ───────────────────────────────────────── events ────────────

/// Notifications for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTreeEvent {
    /// A row was activated (leaf or branch), or a free-text label saved.
    Selected(TreeNode),
    /// The widget state changed; emitted once per committed transition.
    Changed,
    /// The close control was activated.
    ClosePopup,
}

/// Which list the widget currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Root,
    Searching,
    Drilled,
}

// ───────────────────────────────────────── controller ────────

#[derive(Debug)]
pub struct SelectTree {
    props: SelectTreeProps,
    search_term: Option<String>,
    current: Option<NodePath>,
    value: Option<String>,
}

impl SelectTree {
    pub fn new(props: SelectTreeProps) -> Self {
        let search_term = if props.items.is_empty() {
            props.label.clone()
        } else {
            None
        };
        Self {
            props,
            search_term,
            current: None,
            value: None,
        }
    }

    pub fn props(&self) -> &SelectTreeProps {
        &self.props
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn current_path(&self) -> Option<&NodePath> {
        self.current.as_ref()
    }

    /// The drilled-into branch, if any.
    pub fn current_node(&self) -> Option<&TreeNode> {
        self.current
            .as_ref()
            .and_then(|path| path.resolve(&self.props.items))
    }

    /// Last confirmed value.  Leaf selection clears it rather than storing
    /// the selected value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// No items configured: the input is for entering a brand-new label.
    pub fn is_free_text(&self) -> bool {
        self.props.items.is_empty()
    }

    pub fn is_searching(&self) -> bool {
        visible::is_searching(self.search_term())
    }

    pub fn mode(&self) -> Mode {
        if self.is_searching() {
            Mode::Searching
        } else if self.current.is_some() {
            Mode::Drilled
        } else {
            Mode::Root
        }
    }

    pub fn visible_items(&self) -> Vec<VisibleItem<'_>> {
        visible::visible_items(
            &self.props.items,
            self.search_term(),
            self.current.as_ref(),
            self.props.exclusive,
        )
    }

    pub fn row_key(&self, index: usize) -> String {
        visible::row_key(index, self.current_node())
    }

    pub fn title(&self) -> &str {
        match (&self.current, &self.props.second_title) {
            (Some(_), Some(second)) => second,
            _ => &self.props.first_title,
        }
    }

    /// Text shown in the input box.
    pub fn input_text(&self) -> &str {
        self.search_term().unwrap_or("")
    }

    pub fn placeholder(&self) -> &'static str {
        if self.is_free_text() {
            "Enter label"
        } else {
            "Search labels"
        }
    }

    /// Whether the free-text save action is available.  Requires a
    /// non-empty term; an absent `label` counts as empty.
    pub fn can_save(&self) -> bool {
        self.is_free_text() && !self.input_text().is_empty()
    }

    // ── transitions ─────────────────────────────────────────────

    /// Activate the `index`-th visible row.  Out-of-range indices are
    /// ignored.
    pub fn select_row(&mut self, index: usize) -> Vec<SelectTreeEvent> {
        let Some((node, path)) = self
            .visible_items()
            .into_iter()
            .nth(index)
            .map(|row| (row.node.into_owned(), row.path))
        else {
            tracing::debug!("select_row: index {index} out of range");
            return Vec::new();
        };
        self.select_item(node, path)
    }

    fn select_item(&mut self, item: TreeNode, path: Option<NodePath>) -> Vec<SelectTreeEvent> {
        match (&item, path) {
            (TreeNode::Branch { .. }, Some(path)) => {
                tracing::debug!(value = item.value(), "drill into branch");
                self.current = Some(path);
                if self.props.stale_search == StaleSearchPolicy::Clear {
                    self.search_term = None;
                }
            }
            _ => {
                tracing::debug!(value = item.value(), "leaf selected");
                self.search_term = None;
                self.current = None;
                self.value = None;
            }
        }
        vec![SelectTreeEvent::Selected(item), SelectTreeEvent::Changed]
    }

    /// The input text changed to `text`.
    pub fn set_search_term(&mut self, text: impl Into<String>) -> Vec<SelectTreeEvent> {
        let text = text.into();
        tracing::debug!(term = %text, "search term changed");
        self.current = None;
        self.search_term = Some(text);
        vec![SelectTreeEvent::Changed]
    }

    /// Pop back out of the drilled branch.  The search term is untouched.
    pub fn select_breadcrumb(&mut self) -> Vec<SelectTreeEvent> {
        if self.current.is_none() {
            return Vec::new();
        }
        tracing::debug!("breadcrumb: back to root level");
        self.current = None;
        vec![SelectTreeEvent::Changed]
    }

    /// Offer the typed text as a new label.  Only available in free-text
    /// mode with a non-empty input.
    pub fn save_label(&self) -> Vec<SelectTreeEvent> {
        if !self.can_save() {
            return Vec::new();
        }
        let text = self.input_text();
        tracing::debug!(label = text, "free-text label saved");
        vec![SelectTreeEvent::Selected(TreeNode::leaf(text, text))]
    }

    pub fn close(&self) -> Vec<SelectTreeEvent> {
        vec![SelectTreeEvent::ClosePopup]
    }
}
