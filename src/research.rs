//! This directory provides some features for research.
//! - Cross validation over an [`InstanceSet`](crate::InstanceSet)
//! - Loss functions to evaluate a trained model
//! - Printing and CSV logging of the transfer procedure

/// Provides the k-fold splitter.
pub mod cross_validation;

/// Defines the trace writer and the verbose printing.
pub mod logger;

/// Defines loss functions (zero-one loss, accuracy).
pub mod loss_functions;


pub use cross_validation::CrossValidation;

pub use logger::{
    TRACE_HEADER,
    write_trace,
};

pub use loss_functions::{
    zero_one_loss,
    accuracy,
};
