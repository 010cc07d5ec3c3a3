//! The select-tree model — item tree, filtering, row derivation, and the
//! controller state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod search;
pub mod select_tree;
pub mod tree;
pub mod visible;
