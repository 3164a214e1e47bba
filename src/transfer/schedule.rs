//! The weight schedule of the transfer procedure.
use serde::{Serialize, Deserialize};

use crate::TransferError;
use crate::error::Result;


/// The relative weights of the target and a source
/// at one round of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightCandidate {
    /// The round `t` in `[1, m - 1]`.
    pub iteration: usize,
    /// Weight of each target instance, in `(0, 1]`.
    pub target_weight: f64,
    /// Weight of each source instance, in `[0, 1)`.
    pub source_weight: f64,
}


/// Returns the `t`'th candidate of a schedule with `m` rounds;
/// ```text
/// source_weight = n_target / (n_target + n_source) * (1 - t / (m - 1))
/// target_weight = 1 - source_weight
/// ```
/// The source weight decreases with `t`
/// and reaches `0` at `t = m - 1`.
pub fn weight_candidate(
    t: usize,
    m: usize,
    n_target: usize,
    n_source: usize,
) -> Result<WeightCandidate>
{
    if m < 2 {
        let message = format!(
            "the number of boosting iterations must be at least 2, got {m}"
        );
        return Err(TransferError::InvalidConfiguration(message));
    }
    if n_target == 0 || n_source == 0 {
        let message = format!(
            "weights need a non-empty target and source, \
             got {n_target} target and {n_source} source instances"
        );
        return Err(TransferError::EmptyInput(message));
    }
    if t == 0 || t > m - 1 {
        let message = format!("round {t} is out of range [1, {}]", m - 1);
        return Err(TransferError::InvalidConfiguration(message));
    }

    let n_target = n_target as f64;
    let n_source = n_source as f64;
    let ratio = n_target / (n_target + n_source);
    let decay = 1f64 - t as f64 / (m - 1) as f64;

    let source_weight = (ratio * decay).max(0f64);
    let target_weight = 1f64 - source_weight;

    Ok(WeightCandidate { iteration: t, target_weight, source_weight })
}


/// Returns the candidates for `t = 1, 2, ..., m - 1` in this order.
pub fn weight_schedule(m: usize, n_target: usize, n_source: usize)
    -> Result<Vec<WeightCandidate>>
{
    if m < 2 {
        // Let `weight_candidate` report the error.
        weight_candidate(1, m, n_target, n_source)?;
    }
    (1..m).map(|t| weight_candidate(t, m, n_target, n_source))
        .collect()
}
