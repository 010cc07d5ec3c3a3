//! A searchable, drill-down select-tree popup for the terminal.
//!
//! [`core::select_tree::SelectTree`] owns the state machine; the [`ui`]
//! widgets render it with Ratatui and [`app::handler`] feeds it crossterm
//! input.  Transitions report back through
//! [`core::select_tree::SelectTreeEvent`] values.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod ui;

pub use crate::core::select_tree::{SelectTree, SelectTreeEvent, SelectTreeProps};
pub use crate::core::tree::TreeNode;
pub use crate::error::SelectTreeError;
