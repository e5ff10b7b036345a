//! Conversion of the frequency tree into a layout-ready hierarchy.
//!
//! The hierarchy is the generic named-tree-with-value shape the chart
//! layouts consume: every node carries a name and exactly one of a child
//! list or a terminal count, enforced by construction. Serializes to the
//! conventional `{name, children}` / `{name, value}` JSON.

use crate::aggregator::frequency::FrequencyNode;
use serde::Serialize;
use std::cmp::Reverse;

/// A named tree node with either children or a terminal value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeKind {
    Branch { children: Vec<HierarchyNode> },
    Leaf { value: u64 },
}

impl HierarchyNode {
    /// Convert a frequency tree into a hierarchy rooted at `root_name`
    ///
    /// **Public** - the adapter between aggregation and layout
    ///
    /// Deterministic: the same frequency tree always produces a structurally
    /// identical hierarchy. Never fails on a well-formed tree.
    pub fn from_frequency(tree: &FrequencyNode, root_name: &str) -> Self {
        let kind = match tree {
            FrequencyNode::Leaf(count) => NodeKind::Leaf { value: *count },
            FrequencyNode::Branch(entries) => NodeKind::Branch {
                children: entries
                    .iter()
                    .map(|(label, child)| Self::from_frequency(child, label))
                    .collect(),
            },
        };

        Self {
            name: root_name.to_string(),
            kind,
        }
    }

    /// Aggregate value: leaf value, or the sum of the children's values
    pub fn value(&self) -> u64 {
        match &self.kind {
            NodeKind::Leaf { value } => *value,
            NodeKind::Branch { children } => children.iter().map(HierarchyNode::value).sum(),
        }
    }

    /// Child nodes (empty slice for a leaf)
    pub fn children(&self) -> &[HierarchyNode] {
        match &self.kind {
            NodeKind::Branch { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Re-order every level descending by aggregate value
    pub fn sort_by_value(&mut self) {
        if let NodeKind::Branch { children } = &mut self.kind {
            children.sort_by_key(|child| Reverse(child.value()));
            for child in children {
                child.sort_by_value();
            }
        }
    }

    /// Depth of the deepest node below this one (0 for a leaf)
    pub fn max_depth(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Share of `total` represented by `value`, rounded to one decimal place
pub fn percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((value as f64 / total as f64) * 1000.0).round() / 10.0
}
