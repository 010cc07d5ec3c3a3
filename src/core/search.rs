//! Label filtering for the search box.
//!
//! Matching is a case-insensitive substring test over one level of
//! flattening: top-level leaves are tested themselves, top-level branches
//! contribute their direct children.

use super::tree::{NodePath, TreeNode};

/// A node matched by [`filter_items`], with its position in the tree.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub node: &'a TreeNode,
    /// `[i]` for a top-level leaf, `[i, j]` for a child of a branch.
    pub indices: (usize, Option<usize>),
}

impl SearchHit<'_> {
    pub fn path(&self) -> NodePath {
        match self.indices {
            (top, None) => NodePath::root(top),
            (top, Some(child)) => NodePath::root(top).child(child),
        }
    }
}

/// Collect every node whose lowercase label contains the lowercase `term`,
/// in tree order.  Branch labels themselves are never tested.
pub fn filter_items<'a>(items: &'a [TreeNode], term: &str) -> Vec<SearchHit<'a>> {
    let needle = term.to_lowercase();
    let matches = |node: &TreeNode| node.label().to_lowercase().contains(&needle);

    let mut hits = Vec::new();
    for (top, item) in items.iter().enumerate() {
        match item.children() {
            Some(children) => {
                for (child, node) in children.iter().enumerate() {
                    if matches(node) {
                        hits.push(SearchHit {
                            node,
                            indices: (top, Some(child)),
                        });
                    }
                }
            }
            None => {
                if matches(item) {
                    hits.push(SearchHit {
                        node: item,
                        indices: (top, None),
                    });
                }
            }
        }
    }
    hits
}
