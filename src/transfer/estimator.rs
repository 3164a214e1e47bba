//! Cross-validated error of a weighted training set on the target.
use rayon::prelude::*;

use crate::{InstanceSet, Learner, TransferError};
use crate::error::{Result, Stage};
use crate::research::zero_one_loss;
use crate::sample::instance::check_weight;


/// Estimates the error on the target of a learner trained on
/// the target together with a weighted source
/// and the already accumulated auxiliary set.
///
/// The folds of the target are materialized once
/// and reused by every call to [`ErrorEstimator::estimate`].
pub struct ErrorEstimator<'a, L> {
    learner: &'a L,
    target: &'a InstanceSet,
    folds: Vec<(InstanceSet, InstanceSet)>,
    parallel: bool,
}


impl<'a, L> ErrorEstimator<'a, L>
    where L: Learner + Sync,
{
    /// Construct an estimator over `k` contiguous folds of `target`.
    #[inline]
    pub fn new(learner: &'a L, target: &'a InstanceSet, k: usize)
        -> Result<Self>
    {
        Self::seeded(learner, target, k, None)
    }


    /// Construct an estimator over `k` folds of `target`.
    /// If `seed` is `Some(_)`, the target is shuffled with that seed
    /// before the partitioning.
    pub fn seeded(
        learner: &'a L,
        target: &'a InstanceSet,
        k: usize,
        seed: Option<u64>,
    ) -> Result<Self>
    {
        let folds = target.k_fold_split(k, seed)?;
        Ok(Self { learner, target, folds, parallel: false })
    }


    /// Evaluate the folds with `rayon`.
    /// The estimate does not depend on this flag.
    /// Default value is `false`.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Returns the target this estimator evaluates on.
    #[inline]
    pub fn target(&self) -> &InstanceSet {
        self.target
    }


    /// Returns the number of folds.
    #[inline]
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }


    /// Returns the mean error over the folds when each training fold
    /// is built as
    /// ```text
    /// train_fold^{target_weight} ++ source^{source_weight} ++ auxiliary
    /// ```
    /// The auxiliary set keeps the weights it carries.
    pub fn estimate(
        &self,
        auxiliary: &InstanceSet,
        source: &InstanceSet,
        target_weight: f64,
        source_weight: f64,
    ) -> Result<f64>
    {
        check_weight(target_weight)?;
        check_weight(source_weight)?;

        let contribution = source.with_weight(source_weight)?
            .concat(auxiliary)?;

        let errors = if self.parallel {
            self.folds.par_iter()
                .map(|fold| self.fold_error(fold, &contribution, target_weight))
                .collect::<Vec<_>>()
        } else {
            self.folds.iter()
                .map(|fold| self.fold_error(fold, &contribution, target_weight))
                .collect::<Vec<_>>()
        };

        // Sum in fold order so that both paths agree to the last bit.
        let mut total = 0f64;
        for error in errors {
            total += error?;
        }
        Ok(total / self.folds.len() as f64)
    }


    fn fold_error(
        &self,
        (train, test): &(InstanceSet, InstanceSet),
        contribution: &InstanceSet,
        target_weight: f64,
    ) -> Result<f64>
    {
        let train = train.with_weight(target_weight)?.concat(contribution)?;
        let model = self.learner.fit(&train)
            .map_err(|e| TransferError::classifier(Stage::Fit, e))?;

        zero_one_loss(test, &model)
    }
}


/// Returns the `k`-fold cross-validated error of `learner`
/// trained on the weighted target, source and auxiliary set.
/// The folds are contiguous.
/// See [`ErrorEstimator`] to reuse the folds over many calls.
pub fn estimate_error<L>(
    learner: &L,
    target: &InstanceSet,
    auxiliary: &InstanceSet,
    source: &InstanceSet,
    target_weight: f64,
    source_weight: f64,
    k: usize,
) -> Result<f64>
    where L: Learner + Sync,
{
    ErrorEstimator::new(learner, target, k)?
        .estimate(auxiliary, source, target_weight, source_weight)
}
