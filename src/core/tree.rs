//! The item tree shown by the select-tree widget.
//!
//! A [`TreeNode`] is either a leaf or a branch.  In JSON the two are told
//! apart only by the presence of the `items` key, so `{"items": []}` is an
//! (empty) branch while a node without `items` is a leaf.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectTreeError};

// ───────────────────────────────────────── node ──────────────

/// A single selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum TreeNode {
    Leaf {
        label: String,
        value: String,
    },
    Branch {
        label: String,
        value: String,
        items: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn branch(
        label: impl Into<String>,
        value: impl Into<String>,
        items: Vec<TreeNode>,
    ) -> Self {
        Self::Branch {
            label: label.into(),
            value: value.into(),
            items,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Branch { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Leaf { value, .. } | Self::Branch { value, .. } => value,
        }
    }

    /// Children of a branch; `None` for leaves.
    pub fn children(&self) -> Option<&[TreeNode]> {
        match self {
            Self::Leaf { .. } => None,
            Self::Branch { items, .. } => Some(items),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// Wire shape: `{ "label", "value", "items"? }`.
#[derive(Serialize, Deserialize)]
struct RawNode {
    #[serde(default)]
    label: String,
    #[serde(default)]
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<TreeNode>>,
}

impl From<RawNode> for TreeNode {
    fn from(raw: RawNode) -> Self {
        match raw.items {
            Some(items) => Self::Branch {
                label: raw.label,
                value: raw.value,
                items,
            },
            None => Self::Leaf {
                label: raw.label,
                value: raw.value,
            },
        }
    }
}

impl From<TreeNode> for RawNode {
    fn from(node: TreeNode) -> Self {
        match node {
            TreeNode::Leaf { label, value } => Self {
                label,
                value,
                items: None,
            },
            TreeNode::Branch {
                label,
                value,
                items,
            } => Self {
                label,
                value,
                items: Some(items),
            },
        }
    }
}

// ───────────────────────────────────────── paths ─────────────

/// Location of a node as sibling indices from the root level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Look the node up in `items`.  Returns `None` when any step is out of
    /// range or walks through a leaf.
    pub fn resolve<'a>(&self, items: &'a [TreeNode]) -> Option<&'a TreeNode> {
        let (first, rest) = self.0.split_first()?;
        let mut node = items.get(*first)?;
        for &index in rest {
            node = node.children()?.get(index)?;
        }
        Some(node)
    }
}

// ───────────────────────────────────────── loading ───────────

/// Parse a JSON array of nodes.  `origin` only feeds error messages.
pub fn parse_items(json: &str, origin: &Path) -> Result<Vec<TreeNode>> {
    serde_json::from_str(json).map_err(|source| SelectTreeError::ParseItems {
        path: origin.to_path_buf(),
        source,
    })
}

/// Load an item tree from a JSON file, or from stdin when `path` is `-`.
pub fn load_items(path: &Path) -> Result<Vec<TreeNode>> {
    let read_err = |source| SelectTreeError::ReadItems {
        path: path.to_path_buf(),
        source,
    };

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(read_err)?
    };

    let items = parse_items(&contents, path)?;
    tracing::debug!("loaded {} top-level items from {}", items.len(), path.display());
    Ok(items)
}
