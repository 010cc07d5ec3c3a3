//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! Widgets here read the controller from [`crate::core`] and never change
//! its state; transitions happen in [`crate::app::handler`].

pub mod breadcrumb;
pub mod header;
pub mod layout;
pub mod rows;
pub mod select_tree_widget;
pub mod theme;
