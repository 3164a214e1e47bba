//! The two-stage transfer procedure.
//!
//! Phase 1 ranks every source by the optimal weight it gets
//! when it is the only source.
//! Phase 2 walks the ranking and merges the sources one by one
//! into an auxiliary set `F`,
//! re-optimizing each weight against the sources already merged.
//! A final model is trained on the target together with `F`.
use fixedbitset::FixedBitSet;
use log::{debug, info};
use rayon::prelude::*;

use super::config::TransferConfig;
use super::estimator::ErrorEstimator;
use super::report::*;
use super::selector::{select_best_weight, WeightSearch};
use crate::{InstanceSet, Learner, SourcePool, TransferError};
use crate::error::{Result, Stage};
use crate::research::logger;


/// The result of the two phases without the final model.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The sources in decreasing order of their Phase 1 weight.
    pub ranking: Vec<SourceRankEntry>,
    /// The sources merged into `auxiliary`, in merge order.
    pub selected: Vec<SelectedSource>,
    /// The weighted union of the selected sources.
    pub auxiliary: InstanceSet,
    /// Every evaluated candidate of both phases.
    pub trace: Vec<CandidateRecord>,
}


/// The result of [`TwoStageTransfer::run`].
#[derive(Debug, Clone)]
pub struct TransferOutcome<M> {
    /// The model trained on the target and the auxiliary set.
    pub model: M,
    /// Diagnostics of the run.
    pub report: TransferReport,
    /// The auxiliary set the model was trained with.
    pub auxiliary: InstanceSet,
}


/// The two-stage instance-weighting transfer procedure.
///
/// # Example
/// ```no_run
/// use twostage_transfer::prelude::*;
///
/// let reader = SampleReader::new().has_header(true);
/// let target = reader.clone().file("target.csv").read().unwrap();
/// let pool = read_pool("sources/", &reader).unwrap();
///
/// let tree = DecisionTreeBuilder::new()
///     .max_depth(8)
///     .criterion(Criterion::Entropy)
///     .build();
///
/// let outcome = TwoStageTransfer::init(&target, &pool)
///     .boosting_iterations(10)
///     .cv_folds(10)
///     .max_sources(5)
///     .verbose(true)
///     .run(&tree)
///     .unwrap();
///
/// println!("selected: {:?}", outcome.report.selected_ids());
/// ```
pub struct TwoStageTransfer<'a> {
    target: &'a InstanceSet,
    pool: &'a SourcePool,
    config: TransferConfig,
}


impl<'a> TwoStageTransfer<'a> {
    /// Initialize the procedure on `target` and `pool`
    /// with the default [`TransferConfig`].
    pub fn init(target: &'a InstanceSet, pool: &'a SourcePool) -> Self {
        Self { target, pool, config: TransferConfig::default() }
    }


    /// Replace all parameters by `config`.
    #[inline]
    pub fn with_config(mut self, config: TransferConfig) -> Self {
        self.config = config;
        self
    }


    /// Set the number of rounds `m` of the weight schedule.
    /// Default value is `10`.
    #[inline]
    pub fn boosting_iterations(mut self, m: usize) -> Self {
        self.config.boosting_iterations = m;
        self
    }


    /// Set the number of folds `k`.
    /// Default value is `10`.
    #[inline]
    pub fn cv_folds(mut self, k: usize) -> Self {
        self.config.cv_folds = k;
        self
    }


    /// Set the maximal number of merged sources `b`.
    /// Default value is `15`.
    #[inline]
    pub fn max_sources(mut self, b: usize) -> Self {
        self.config.max_sources = i64::try_from(b).unwrap_or(i64::MAX);
        self
    }


    /// Set the seed of the fold shuffling.
    /// The seed is used only if `shuffle(true)` is set.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }


    /// Shuffle the target before splitting it into folds.
    /// By default, the folds are contiguous.
    #[inline]
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.config.shuffle = shuffle;
        self
    }


    /// Rank the sources (and evaluate the folds) with `rayon`.
    /// The outcome does not depend on this flag.
    /// Default value is `true`.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }


    /// Print the progress.
    /// Default value is `false`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }


    /// Returns the current parameters.
    #[inline]
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }


    /// Returns the name of the procedure.
    pub fn name(&self) -> &str {
        "Two-Stage Transfer"
    }


    /// Returns the information of the procedure as `String`.
    pub fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_target, n_feature) = self.target.shape();
        let n_source = self.pool.iter()
            .map(|(_, source)| source.len())
            .sum::<usize>();
        let folds = match self.config.fold_seed() {
            Some(seed) => format!("{} (seed {seed})", self.config.cv_folds),
            None => format!("{}", self.config.cv_folds),
        };
        let info = Vec::from([
            ("# of target examples", format!("{n_target}")),
            ("# of features", format!("{n_feature}")),
            ("# of sources", format!("{}", self.pool.len())),
            ("# of source examples", format!("{n_source}")),
            ("Boosting iterations", format!("{}", self.config.boosting_iterations)),
            ("CV folds", folds),
            ("Max sources", format!("{}", self.config.max_sources)),
        ]);
        Some(info)
    }


    /// Runs both phases and returns the ranking, the selection
    /// and the auxiliary set.
    pub fn select<L>(&self, learner: &L) -> Result<Selection>
        where L: Learner + Sync,
    {
        self.config.validate()?;
        self.check_inputs()?;

        let m = self.config.boosting_iterations;
        let estimator = ErrorEstimator::seeded(
            learner,
            self.target,
            self.config.cv_folds,
            self.config.fold_seed(),
        )?
        .parallel(self.config.parallel);

        if self.config.verbose {
            logger::print_stats(
                self.name(), self.info(), learner.name(), learner.info()
            );
            logger::print_log_header();
        }

        let mut trace = Vec::new();

        // -----------------------------------------------------------------
        // Phase 1
        info!("ranking {} sources", self.pool.len());
        let searches = self.rank(&estimator, m)?;

        let mut ranking = Vec::with_capacity(searches.len());
        for ((source_id, source), search) in self.pool.iter().zip(&searches) {
            let records = records(Phase::Ranking, source_id, search);
            if self.config.verbose { records.iter().for_each(logger::print_candidate); }
            trace.extend(records);

            ranking.push(SourceRankEntry {
                source_id: source_id.to_string(),
                best_weight: search.best.source_weight,
                best_error: search.best_error,
                best_iteration: search.best.iteration,
                n_instances: source.len(),
            });
        }

        // Stable, so that ties keep the pool order.
        let mut order = (0..ranking.len()).collect::<Vec<usize>>();
        order.sort_by(|&i, &j| {
            ranking[j].best_weight.total_cmp(&ranking[i].best_weight)
        });
        let ranking = order.iter()
            .map(|&i| ranking[i].clone())
            .collect::<Vec<_>>();
        if self.config.verbose { logger::print_ranking(&ranking); }

        // -----------------------------------------------------------------
        // Phase 2
        let budget = self.config.source_budget();
        info!(
            "accumulating up to {} of {} sources",
            budget.min(self.pool.len()),
            self.pool.len()
        );

        let sources = self.pool.as_slice();
        let mut merged = FixedBitSet::with_capacity(sources.len());
        let mut auxiliary = InstanceSet::empty();
        let mut selected = Vec::new();
        while selected.len() < budget {
            // The best ranked source not merged yet.
            let next = order.iter()
                .enumerate()
                .find(|&(_, &ix)| !merged.contains(ix));
            let Some((rank, &ix)) = next else { break; };

            let (source_id, source) = &sources[ix];
            let search = select_best_weight(&estimator, &auxiliary, source, m)
                .map_err(|e| e.in_source(source_id.as_str()))?;

            let records = records(Phase::Accumulation, source_id, &search);
            if self.config.verbose { records.iter().for_each(logger::print_candidate); }
            trace.extend(records);

            let weight = search.best.source_weight;
            auxiliary = source.with_weight(weight)
                .and_then(|weighted| auxiliary.concat(&weighted))
                .map_err(|e| e.in_source(source_id.as_str()))?;
            merged.insert(ix);

            let entry = SelectedSource {
                rank: rank + 1,
                source_id: source_id.clone(),
                weight,
                error: search.best_error,
                n_instances: source.len(),
                auxiliary_size: auxiliary.len(),
            };
            debug!(
                "merged `{}` with weight {:.6} (error {:.6}, |F| = {})",
                entry.source_id, entry.weight, entry.error, entry.auxiliary_size,
            );
            if self.config.verbose { logger::print_selected(&entry); }
            selected.push(entry);
        }
        info!("merged {} sources, |F| = {}", selected.len(), auxiliary.len());

        Ok(Selection { ranking, selected, auxiliary, trace })
    }


    /// Runs both phases and trains the final model
    /// on the target together with the auxiliary set.
    pub fn run<L>(&self, learner: &L) -> Result<TransferOutcome<L::Model>>
        where L: Learner + Sync,
    {
        let Selection { ranking, selected, auxiliary, trace } =
            self.select(learner)?;

        let model = train_final(learner, self.target, &auxiliary)?;
        info!("trained the final model on {} instances",
            self.target.len() + auxiliary.len());

        let report = TransferReport {
            config: self.config.clone(),
            learner: learner.name().to_string(),
            n_target: self.target.len(),
            ranking,
            selected,
            trace,
        };
        Ok(TransferOutcome { model, report, auxiliary })
    }


    /// Phase 1 searches, one per source, in pool order.
    /// The first failure in pool order is returned.
    fn rank<L>(&self, estimator: &ErrorEstimator<'_, L>, m: usize)
        -> Result<Vec<WeightSearch>>
        where L: Learner + Sync,
    {
        let empty = InstanceSet::empty();
        let search = |(source_id, source): &(String, InstanceSet)| {
            select_best_weight(estimator, &empty, source, m)
                .map_err(|e| e.in_source(source_id.as_str()))
        };

        let sources = self.pool.as_slice();
        let searches = if self.config.parallel {
            sources.par_iter().map(search).collect::<Vec<_>>()
        } else {
            sources.iter().map(search).collect::<Vec<_>>()
        };
        searches.into_iter().collect()
    }


    fn check_inputs(&self) -> Result<()> {
        if self.target.is_empty() {
            let message = "the target set is empty".to_string();
            return Err(TransferError::EmptyInput(message));
        }
        if self.pool.is_empty() {
            let message = "the source pool is empty".to_string();
            return Err(TransferError::EmptyInput(message));
        }

        let n_feature = self.target.n_features();
        for (source_id, source) in self.pool.iter() {
            if source.is_empty() {
                let message = format!("the source `{source_id}` is empty");
                return Err(TransferError::EmptyInput(message));
            }
            if source.n_features() != n_feature {
                return Err(TransferError::DimensionMismatch {
                    expected: n_feature,
                    got: source.n_features(),
                });
            }
        }
        Ok(())
    }
}


/// Trains one model on `target ++ auxiliary`.
/// The target keeps its own weights and no cross validation is done.
pub fn train_final<L>(learner: &L, target: &InstanceSet, auxiliary: &InstanceSet)
    -> Result<L::Model>
    where L: Learner,
{
    if target.is_empty() {
        let message = "the target set is empty".to_string();
        return Err(TransferError::EmptyInput(message));
    }
    let train = target.concat(auxiliary)?;
    learner.fit(&train)
        .map_err(|e| TransferError::classifier(Stage::Fit, e))
}


fn records(phase: Phase, source_id: &str, search: &WeightSearch)
    -> Vec<CandidateRecord>
{
    search.trace.iter()
        .map(|c| CandidateRecord {
            phase,
            source_id: source_id.to_string(),
            iteration: c.candidate.iteration,
            target_weight: c.candidate.target_weight,
            source_weight: c.candidate.source_weight,
            error: c.error,
        })
        .collect()
}
