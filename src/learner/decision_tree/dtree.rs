use super::{
    node::*,
    criterion::*,
    split_rule::*,
    classifier::DecisionTreeClassifier,
};
use crate::learner::majority::weighted_majority;
use crate::{InstanceSet, Learner, LearnerError, Label};

use std::fmt;


/// Generates a `DecisionTreeClassifier` for a weighted sample.
///
/// Instances of weight zero do not take part in the training.
/// This matters for the transfer procedure:
/// a source taken with weight `0` does not change the tree at all.
///
/// Construct it with [`DecisionTreeBuilder`](super::DecisionTreeBuilder).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionTree {
    criterion: Criterion,
    max_depth: usize,
    min_leaf_weight: f64,
}


impl DecisionTree {
    /// Initialize [`DecisionTree`] from its components.
    #[inline]
    pub(super) fn from_components(
        criterion: Criterion,
        max_depth: usize,
        min_leaf_weight: f64,
    ) -> Self
    {
        Self { criterion, max_depth, min_leaf_weight }
    }


    /// Returns the node splitting rule.
    #[inline]
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }


    /// Returns the maximal depth.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }


    /// Grow a tree on `indices` whose depth is at most `depth`.
    fn full_tree(
        &self,
        sample: &InstanceSet,
        indices: Vec<usize>,
        depth: usize,
    ) -> Node
    {
        let total_weight = indices.iter()
            .map(|&i| sample[i].weight())
            .sum::<f64>();

        // Compute the best prediction that minimizes the training error
        // on this node.
        let (pred, loss) = calc_loss_as_leaf(sample, &indices[..]);

        if loss <= 0f64 || depth == 0 {
            return Node::leaf(pred, total_weight);
        }

        let rule = self.criterion
            .best_split(sample, &indices[..], self.min_leaf_weight);
        let Some(rule) = rule else {
            return Node::leaf(pred, total_weight);
        };

        // Split the train data for left/right childrens
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for i in indices.into_iter() {
            match rule.split(sample[i].features()) {
                LR::Left  => { lindices.push(i); },
                LR::Right => { rindices.push(i); },
            }
        }

        // If the split has no meaning, construct a leaf node.
        if lindices.is_empty() || rindices.is_empty() {
            return Node::leaf(pred, total_weight);
        }

        let ltree = self.full_tree(sample, lindices, depth - 1);
        let rtree = self.full_tree(sample, rindices, depth - 1);

        Node::branch(rule, ltree, rtree, pred, total_weight)
    }
}


impl Learner for DecisionTree {
    type Model = DecisionTreeClassifier;
    type Error = LearnerError;


    fn name(&self) -> &str {
        "Decision Tree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Max depth", format!("{}", self.max_depth)),
            ("Split criterion", format!("{}", self.criterion)),
            ("Min. leaf weight", format!("{}", self.min_leaf_weight)),
        ]);
        Some(info)
    }


    /// This method computes as follows;
    /// 1. drop the instances of weight zero,
    /// 2. grow a tree greedily until each leaf is pure,
    ///    the depth limit is reached, or no split lowers the impurity,
    /// 3. collapse the branches whose leaves agree.
    fn fit(&self, sample: &InstanceSet) -> Result<Self::Model, Self::Error> {
        if sample.is_empty() {
            return Err(LearnerError::EmptySample);
        }

        let indices = (0..sample.len())
            .filter(|&i| sample[i].weight() > 0f64)
            .collect::<Vec<usize>>();
        if indices.is_empty() {
            return Err(LearnerError::NoPositiveWeight);
        }

        let root = self.full_tree(sample, indices, self.max_depth);
        Ok(DecisionTreeClassifier::new(root, sample.n_features()))
    }
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "----------\n\
            # Decision Tree Weak Learner\n\n\
            - Max depth: {}\n\
            - Split criterion: {}\n\
            - Min. leaf weight: {}\n\
            ----------",
            self.max_depth,
            self.criterion,
            self.min_leaf_weight,
        )
    }
}


/// This function returns a tuple `(y, e)` where
/// - `y` is the prediction label that minimizes the training loss.
/// - `e` is the weighted training loss when the prediction is `y`.
#[inline]
fn calc_loss_as_leaf(sample: &InstanceSet, indices: &[usize]) -> (Label, f64) {
    let counter = label_weights(sample, indices);
    let total = counter.values().sum::<f64>();

    // `indices` only holds positive-weight instances,
    // so the majority exists.
    let pred = weighted_majority(counter.iter().map(|(&y, &w)| (y, w)))
        .unwrap_or_default();
    let p = counter.get(&pred).copied().unwrap_or(0f64);

    (pred, (total - p).max(0f64))
}
