//! The two-stage instance-weighting transfer procedure
//! and its building blocks.

/// Defines the weight schedule.
pub mod schedule;

/// Defines the cross-validated error estimator.
pub mod estimator;

/// Defines the search of the optimal weight of a source.
pub mod selector;

/// Defines the ranking and the greedy accumulation of the sources.
pub mod two_stage;

/// Defines the serializable diagnostics of a run.
pub mod report;

/// Defines the JSON-backed configuration.
pub mod config;


pub use schedule::{WeightCandidate, weight_candidate, weight_schedule};
pub use estimator::{ErrorEstimator, estimate_error};
pub use selector::{CandidateError, WeightSearch, select_best_weight};
pub use two_stage::{
    TwoStageTransfer,
    Selection,
    TransferOutcome,
    train_final,
};
pub use report::{
    Phase,
    CandidateRecord,
    SourceRankEntry,
    SelectedSource,
    TransferReport,
};
pub use config::TransferConfig;
