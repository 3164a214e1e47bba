#![warn(missing_docs)]

//!
//! A crate that blends auxiliary datasets into a small target dataset
//! before training a classifier,
//! following the two-stage instance-weighting transfer of
//! Stone & Rosenfeld.
//!
//! The procedure has two phases.
//!
//! - Ranking
//!     Each source is weighted against the target alone.
//!     For `t = 1, ..., m - 1`, the instances of the source get the weight
//!     `n_target / (n_target + n_source) * (1 - t / (m - 1))`
//!     and the target instances get one minus that weight.
//!     The weight of lowest `k`-fold cross-validated error on the target
//!     is the optimal weight of the source.
//!     The sources are sorted in decreasing order of their optimal weights.
//!
//!
//! - Accumulation
//!     Starting from an empty auxiliary set `F`,
//!     the `b` top-ranked sources are merged one by one.
//!     The weight of each source is re-optimized against `F`
//!     before the source joins `F` with that weight.
//!
//! A final model is trained on the target together with `F`.
//! The learner is any type implementing [`Learner`].
//! This crate ships a weighted [`DecisionTree`]
//! and a weighted [`MajorityVote`].
//!
//! # Example
//! ```no_run
//! use twostage_transfer::prelude::*;
//!
//! let reader = SampleReader::new()
//!     .has_header(true)
//!     .target_feature("class");
//! let target = reader.clone().file("data/target.csv").read().unwrap();
//! let pool = read_pool("data/sources", &reader).unwrap();
//! let eval = reader.clone().file("data/eval.csv").read().unwrap();
//!
//! let tree = DecisionTreeBuilder::new()
//!     .max_depth(8)
//!     .build();
//!
//! let outcome = TwoStageTransfer::init(&target, &pool)
//!     .boosting_iterations(10)
//!     .cv_folds(10)
//!     .max_sources(15)
//!     .run(&tree)
//!     .unwrap();
//!
//! let acc = accuracy(&eval, &outcome.model).unwrap();
//! println!("accuracy: {acc}");
//! ```

pub mod error;
pub mod sample;
pub mod hypothesis;
pub mod learner;
pub mod research;
pub mod transfer;
pub mod prelude;

mod constants;


pub use error::{TransferError, Stage, Result};

pub use sample::{
    Instance,
    Label,
    InstanceSet,
    SourcePool,
    SampleReader,
    read_pool,
};

pub use hypothesis::Classifier;

pub use learner::{
    Learner,
    LearnerError,

    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    Criterion,

    MajorityVote,
    MajorityClassifier,
};

pub use research::{
    CrossValidation,
    zero_one_loss,
    accuracy,
};

pub use transfer::{
    TwoStageTransfer,
    TransferConfig,
    TransferOutcome,
    TransferReport,
    Selection,

    WeightCandidate,
    WeightSearch,
    CandidateError,
    ErrorEstimator,
    weight_candidate,
    weight_schedule,
    estimate_error,
    select_best_weight,
    train_final,

    Phase,
    CandidateRecord,
    SourceRankEntry,
    SelectedSource,
};
