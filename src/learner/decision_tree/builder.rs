use super::{Criterion, DecisionTree};
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_LEAF_WEIGHT};


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```no_run
/// use twostage_transfer::prelude::*;
///
/// let learner = DecisionTreeBuilder::new()
///     .max_depth(4)
///     .criterion(Criterion::Entropy)
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecisionTreeBuilder {
    max_depth: usize,
    criterion: Criterion,
    min_leaf_weight: f64,
}


impl Default for DecisionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// max_depth: DEFAULT_MAX_DEPTH == 16,
    /// criterion: Criterion::Entropy,
    /// min_leaf_weight: DEFAULT_MIN_LEAF_WEIGHT == 0.0,
    /// ```
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            criterion: Criterion::Entropy,
            min_leaf_weight: DEFAULT_MIN_LEAF_WEIGHT,
        }
    }


    /// Specify the maximal depth of the tree.
    /// A tree of depth `0` is a single leaf.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }


    /// Set the node splitting rule.
    /// Default value is `Criterion::Entropy`.
    /// See [`Criterion`] for other rules.
    #[inline]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }


    /// Set the minimal total weight each child of a split must carry.
    pub fn min_leaf_weight(mut self, weight: f64) -> Self {
        assert!(
            weight.is_finite() && weight >= 0f64,
            "Minimal leaf weight must be a non-negative finite number"
        );
        self.min_leaf_weight = weight;
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::from_components(
            self.criterion, self.max_depth, self.min_leaf_weight
        )
    }
}
