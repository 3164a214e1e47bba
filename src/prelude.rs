//! Exports the transfer procedure, the learners and the traits.
//!

pub use crate::transfer::{
    TwoStageTransfer,
    TransferConfig,
    TransferOutcome,
    TransferReport,
    Selection,
};


pub use crate::learner::{
    // Learner trait
    Learner,


    // Decision tree
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    Criterion,


    // Baseline
    MajorityVote,
    MajorityClassifier,
};


pub use crate::hypothesis::Classifier;


pub use crate::sample::{
    InstanceSet,
    SourcePool,
    SampleReader,
    read_pool,
};


pub use crate::research::{
    CrossValidation,
    zero_one_loss,
    accuracy,
};


pub use crate::error::TransferError;
