//! Picks the best candidate of the weight schedule for one source.
use log::debug;
use serde::{Serialize, Deserialize};

use super::estimator::ErrorEstimator;
use super::schedule::{weight_schedule, WeightCandidate};
use crate::{InstanceSet, Learner, TransferError};
use crate::error::Result;


/// A weight candidate together with its cross-validated error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateError {
    /// The evaluated candidate.
    pub candidate: WeightCandidate,
    /// Its cross-validated error on the target.
    pub error: f64,
}


/// The outcome of a search over the weight schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSearch {
    /// The candidate of minimal error.
    pub best: WeightCandidate,
    /// The error of `best`.
    pub best_error: f64,
    /// Every evaluated candidate in schedule order.
    pub trace: Vec<CandidateError>,
}


impl WeightSearch {
    /// Returns the weight of each source instance at the optimum.
    #[inline]
    pub fn best_weight(&self) -> f64 {
        self.best.source_weight
    }
}


/// Evaluates every candidate of the `m`-round schedule for `source`
/// given the accumulated `auxiliary` set,
/// and returns the candidate of lowest error.
///
/// A candidate replaces the current best only if its error is
/// strictly lower. Ties thus keep the earliest round,
/// which carries the largest source weight.
pub fn select_best_weight<L>(
    estimator: &ErrorEstimator<'_, L>,
    auxiliary: &InstanceSet,
    source: &InstanceSet,
    m: usize,
) -> Result<WeightSearch>
    where L: Learner + Sync,
{
    let schedule = weight_schedule(m, estimator.target().len(), source.len())?;

    let mut trace = Vec::with_capacity(schedule.len());
    let mut best: Option<CandidateError> = None;
    for candidate in schedule {
        let error = estimator.estimate(
            auxiliary,
            source,
            candidate.target_weight,
            candidate.source_weight,
        )?;
        debug!(
            "round {}: target weight {:.6}, source weight {:.6}, error {:.6}",
            candidate.iteration,
            candidate.target_weight,
            candidate.source_weight,
            error,
        );

        let record = CandidateError { candidate, error };
        if best.map_or(true, |b| error < b.error) {
            best = Some(record);
        }
        trace.push(record);
    }

    let Some(best) = best else {
        let message = "the weight schedule is empty".to_string();
        return Err(TransferError::InvalidConfiguration(message));
    };
    Ok(WeightSearch { best: best.candidate, best_error: best.error, trace })
}
