use serde::{Serialize, Deserialize};

use crate::TransferError;
use crate::error::Result;
use crate::constants::*;

use std::fs;
use std::path::Path;


/// Parameters of [`TwoStageTransfer`](super::TwoStageTransfer).
///
/// Missing fields of a JSON document take their default values;
/// ```text
/// boosting_iterations: 10,
/// cv_folds: 10,
/// max_sources: 15,
/// seed: None,
/// shuffle: false,
/// parallel: true,
/// verbose: false,
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Number of rounds `m` of the weight schedule.
    pub boosting_iterations: usize,
    /// Number of folds `k` of the cross validation on the target.
    pub cv_folds: usize,
    /// Maximal number `b` of sources merged into the auxiliary set.
    /// Negative values are rejected by [`TransferConfig::validate`].
    pub max_sources: i64,
    /// Seed of the fold shuffling.
    pub seed: Option<u64>,
    /// Shuffle the target before splitting it into folds.
    pub shuffle: bool,
    /// Rank the sources in parallel.
    pub parallel: bool,
    /// Print the progress.
    pub verbose: bool,
}


impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            boosting_iterations: DEFAULT_BOOSTING_ITERATIONS,
            cv_folds: DEFAULT_CV_FOLDS,
            max_sources: DEFAULT_MAX_SOURCES as i64,
            seed: None,
            shuffle: false,
            parallel: true,
            verbose: false,
        }
    }
}


impl TransferConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }


    /// Read, parse and validate a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }


    /// Serialize `self` as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }


    /// Checks the parameters that do not depend on the data.
    /// The number of folds is checked against the target
    /// when the procedure runs.
    pub fn validate(&self) -> Result<()> {
        if self.boosting_iterations < 2 {
            let message = format!(
                "boosting_iterations must be at least 2, got {}",
                self.boosting_iterations
            );
            return Err(TransferError::InvalidConfiguration(message));
        }
        if self.cv_folds < 2 {
            let message = format!(
                "cv_folds must be at least 2, got {}", self.cv_folds
            );
            return Err(TransferError::InvalidConfiguration(message));
        }
        if self.max_sources < 0 {
            let message = format!(
                "max_sources must be non-negative, got {}", self.max_sources
            );
            return Err(TransferError::InvalidConfiguration(message));
        }
        Ok(())
    }


    /// Returns `max_sources` as a count.
    /// Call [`TransferConfig::validate`] first.
    #[inline]
    pub(crate) fn source_budget(&self) -> usize {
        usize::try_from(self.max_sources).unwrap_or(0)
    }


    /// Returns the seed of the fold shuffling,
    /// or `None` if the folds are contiguous.
    #[inline]
    pub(crate) fn fold_seed(&self) -> Option<u64> {
        if self.shuffle {
            Some(self.seed.unwrap_or(DEFAULT_SEED))
        } else {
            None
        }
    }
}
