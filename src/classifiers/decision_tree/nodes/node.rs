use crate::core::sample_set::SampleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of a fitted tree.
///
/// Both variants keep the samples that reached them during training. Those
/// samples are not part of the serialized model; a deserialized tree predicts
/// from the stored classes alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        #[serde(skip)]
        samples: SampleSet,
        predicted_class: String,
    },
    Split {
        #[serde(skip)]
        samples: SampleSet,
        feature_index: usize,
        /// Majority class of `samples`, answered when a row carries a value
        /// with no matching child.
        fallback_class: String,
        children: BTreeMap<String, Node>,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn samples(&self) -> &SampleSet {
        match self {
            Node::Leaf { samples, .. } | Node::Split { samples, .. } => samples,
        }
    }

    /// The class this node answers with when traversal stops here.
    pub fn class(&self) -> &str {
        match self {
            Node::Leaf {
                predicted_class, ..
            } => predicted_class,
            Node::Split { fallback_class, .. } => fallback_class,
        }
    }

    pub fn split_feature_index(&self) -> Option<usize> {
        match self {
            Node::Leaf { .. } => None,
            Node::Split { feature_index, .. } => Some(*feature_index),
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Split { children, .. } => Some(children),
        }
    }

    pub fn child(&self, value: &str) -> Option<&Node> {
        self.children().and_then(|c| c.get(value))
    }

    /// Walks `row` down to the node whose class answers it.
    ///
    /// Stops at a leaf, or at the first split whose children do not include
    /// the row's value for the split feature. A row too short to hold that
    /// feature also stops at the split.
    pub fn filter_row_to_node<S: AsRef<str>>(&self, row: &[S]) -> &Node {
        let mut current = self;
        while let Node::Split {
            feature_index,
            children,
            ..
        } = current
        {
            let value: Option<&str> = row.get(*feature_index).map(|v| v.as_ref());
            match value.and_then(|v| children.get(v)) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { children, .. } => {
                1 + children.values().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn number_of_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { children, .. } => {
                1 + children.values().map(Node::number_of_nodes).sum::<usize>()
            }
        }
    }

    pub fn number_of_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { children, .. } => children.values().map(Node::number_of_leaves).sum(),
        }
    }
}
