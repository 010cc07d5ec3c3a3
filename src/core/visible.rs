//! Derivation of the rows shown for a given widget state.
//!
//! Pure functions over the item tree.  Rows borrow their nodes from the
//! tree; the only owned row is the synthetic "create this label" entry.

use std::borrow::Cow;

use super::search::filter_items;
use super::tree::{NodePath, TreeNode};

/// One row to render.
#[derive(Debug, Clone)]
pub struct VisibleItem<'a> {
    pub node: Cow<'a, TreeNode>,
    /// Where the node lives in the tree.  `None` for the synthetic row.
    pub path: Option<NodePath>,
}

impl VisibleItem<'_> {
    pub fn is_synthetic(&self) -> bool {
        self.path.is_none()
    }
}

/// Presentation hint for a row's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Leaf,
    Node,
}

impl RowKind {
    /// A row is styled as a leaf only outside of a search and only when the
    /// node has no `items`.
    pub fn of(node: &TreeNode, searching: bool) -> Self {
        if searching || !node.is_leaf() {
            Self::Node
        } else {
            Self::Leaf
        }
    }
}

/// An empty search term behaves like no search at all.
pub fn is_searching(search_term: Option<&str>) -> bool {
    search_term.is_some_and(|term| !term.is_empty())
}

/// Rows for the current state.
///
/// An active search wins over the drilled node; the drilled node wins over
/// the root level.  With `exclusive == Some(false)` a search that has no
/// exact (case-sensitive) label match gets a synthetic leaf prepended whose
/// label and value are the search term.
pub fn visible_items<'a>(
    items: &'a [TreeNode],
    search_term: Option<&str>,
    current: Option<&NodePath>,
    exclusive: Option<bool>,
) -> Vec<VisibleItem<'a>> {
    if let Some(term) = search_term.filter(|t| !t.is_empty()) {
        let hits = filter_items(items, term);
        let has_exact = hits.iter().any(|hit| hit.node.label() == term);

        let mut rows = Vec::with_capacity(hits.len() + 1);
        if exclusive == Some(false) && !has_exact {
            rows.push(VisibleItem {
                node: Cow::Owned(TreeNode::leaf(term, term)),
                path: None,
            });
        }
        rows.extend(hits.into_iter().map(|hit| VisibleItem {
            node: Cow::Borrowed(hit.node),
            path: Some(hit.path()),
        }));
        return rows;
    }

    if let Some(path) = current {
        if let Some(children) = path.resolve(items).and_then(TreeNode::children) {
            return children
                .iter()
                .enumerate()
                .map(|(i, node)| VisibleItem {
                    node: Cow::Borrowed(node),
                    path: Some(path.child(i)),
                })
                .collect();
        }
    }

    items
        .iter()
        .enumerate()
        .map(|(i, node)| VisibleItem {
            node: Cow::Borrowed(node),
            path: Some(NodePath::root(i)),
        })
        .collect()
}

/// Stable key for a row: its index, suffixed with the drilled node's value
/// so keys differ between levels.
pub fn row_key(index: usize, current: Option<&TreeNode>) -> String {
    match current {
        Some(node) => format!("{index}_{}", node.value()),
        None => index.to_string(),
    }
}
