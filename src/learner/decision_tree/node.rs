//! Defines the inner representation
//! of the Decision Tree class.
use serde::{Serialize, Deserialize};

use super::split_rule::*;
use crate::Label;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct LeafNode {
    pub(super) label: Label,
    // Total weight of the training instances reaching this leaf.
    pub(super) total_weight: f64,
}


impl Node {
    /// Construct a leaf node.
    #[inline]
    pub(super) fn leaf(label: Label, total_weight: f64) -> Self {
        Self::Leaf(LeafNode { label, total_weight })
    }


    /// Construct a branch node,
    /// or a leaf if both children are leaves predicting the same label.
    #[inline]
    pub(super) fn branch(
        rule: Splitter,
        left: Node,
        right: Node,
        label: Label,
        total_weight: f64,
    ) -> Self
    {
        if let (Node::Leaf(l), Node::Leaf(r)) = (&left, &right) {
            if l.label == r.label {
                return Self::leaf(label, total_weight);
            }
        }
        Self::Branch(BranchNode {
            rule,
            left: Box::new(left),
            right: Box::new(right),
        })
    }


    /// Returns the label of the leaf `x` falls in.
    pub(super) fn predict(&self, x: &[f64]) -> Label {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.label,
                Node::Branch(branch) => {
                    node = match branch.rule.split(x) {
                        LR::Left => branch.left.as_ref(),
                        LR::Right => branch.right.as_ref(),
                    };
                },
            }
        }
    }


    /// Returns the depth of this sub-tree.
    pub(super) fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(b) => 1 + b.left.depth().max(b.right.depth()),
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub(super) fn leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(b) => b.left.leaves() + b.right.leaves(),
        }
    }


    pub(super) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self {
            Node::Branch(b) => {
                let b_info = format!(
                    "\tnode_{id} [ label = \"x[{feat}] < {thr:.2} ?\" ];\n",
                    feat = b.rule.feature,
                    thr = b.rule.threshold.0
                );

                let (l_info, next_id) = b.left.to_dot_info(id + 1);
                let (mut r_info, ret_id) = b.right.to_dot_info(next_id);

                let mut info = l_info;
                info.push(b_info);
                info.append(&mut r_info);

                let l_edge = format!(
                    "\tnode_{id} -- node_{l_id} [ label = \"Yes\" ];\n",
                    l_id = id + 1
                );
                let r_edge = format!(
                    "\tnode_{id} -- node_{r_id} [ label = \"No\" ];\n",
                    r_id = next_id
                );

                info.push(l_edge);
                info.push(r_edge);

                (info, ret_id)
            },
            Node::Leaf(l) => {
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"{p} ({w:.3})\", \
                     shape = box, \
                     ];\n",
                    p = l.label,
                    w = l.total_weight,
                );

                (vec![info], id + 1)
            }
        }
    }
}
