//! The training side of the classifier port and the learners
//! shipped with this crate.
//!
//! The transfer procedure only needs something that trains on
//! a weighted [`InstanceSet`] and returns a [`Classifier`].
//! Higher weights should bias the fit toward those instances;
//! nothing else about the weighting is assumed.

/// Defines the weighted decision tree.
pub mod decision_tree;

/// Defines the weighted majority vote.
pub mod majority;


use crate::{Classifier, InstanceSet};

pub use self::decision_tree::{
    Criterion,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
};
pub use self::majority::{MajorityVote, MajorityClassifier};


/// A trait that trains a fresh [`Classifier`] on a weighted sample.
///
/// `fit` must not keep state between calls:
/// the transfer procedure trains one model per fold and per candidate
/// and relies on each call being independent.
pub trait Learner {
    /// The classifier produced by this learner.
    type Model: Classifier;


    /// The error returned when training fails.
    type Error: std::error::Error + Send + Sync + 'static;


    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the information of the learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Trains a new classifier on `sample`.
    fn fit(&self, sample: &InstanceSet) -> Result<Self::Model, Self::Error>;
}


/// Errors raised by the learners of this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LearnerError {
    /// `fit` got no instance.
    #[error("the training sample is empty")]
    EmptySample,

    /// `fit` got no instance of positive weight.
    #[error("the training sample has no instance with positive weight")]
    NoPositiveWeight,

    /// `predict` got a feature vector of the wrong length.
    #[error("expected {expected} features, got {got}")]
    DimensionMismatch {
        expected: usize,
        got: usize,
    },
}
