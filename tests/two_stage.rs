use twostage_transfer::prelude::*;
use twostage_transfer::{
    LearnerError,
    MajorityClassifier,
    Phase,
    Stage,
};


/// Tests for `TwoStageTransfer`.
#[cfg(test)]
pub mod two_stage_tests {
    use super::*;

    // Target: two episodes per label, separable along both features.
    fn target() -> InstanceSet {
        InstanceSet::from_parts(
            vec![
                vec![0.0, 0.0], vec![1.0, 1.0],
                vec![0.1, 0.0], vec![0.9, 1.0],
            ],
            vec![0, 1, 0, 1],
        ).unwrap()
    }

    // A source that contradicts the target at `(1, 1)`.
    fn alpha() -> InstanceSet {
        InstanceSet::from_parts(vec![vec![1.0, 1.0]; 20], vec![0; 20])
            .unwrap()
    }

    // A source that agrees with the target.
    fn beta() -> InstanceSet {
        let mut x = vec![vec![0.0, 0.0]; 10];
        x.extend(vec![vec![1.0, 1.0]; 10]);
        let mut y = vec![0; 10];
        y.extend(vec![1; 10]);
        InstanceSet::from_parts(x, y).unwrap()
    }

    fn pool() -> SourcePool {
        SourcePool::new()
            .with_source("alpha", alpha()).unwrap()
            .with_source("beta", beta()).unwrap()
    }

    fn tree() -> DecisionTree {
        DecisionTreeBuilder::new().build()
    }

    #[test]
    fn agreeing_source_ranks_first() {
        let target = target();
        let pool = pool();
        let selection = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(1)
            .select(&tree())
            .unwrap();

        let ids = selection.ranking.iter()
            .map(|e| e.source_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["beta", "alpha"]);

        let beta = &selection.ranking[0];
        assert!((beta.best_weight - 1.0 / 12.0).abs() < 1e-12);
        assert_eq!(beta.best_error, 0.0);
        assert_eq!(beta.best_iteration, 1);

        let alpha = &selection.ranking[1];
        assert_eq!(alpha.best_weight, 0.0);
        assert_eq!(alpha.best_iteration, 2);

        assert_eq!(selection.selected.len(), 1);
        assert_eq!(selection.selected[0].source_id, "beta");
        assert_eq!(selection.selected[0].rank, 1);
        assert!((selection.selected[0].weight - 1.0 / 12.0).abs() < 1e-12);
        assert_eq!(selection.auxiliary.len(), 20);

        // Two candidates for each of two sources, then two for `beta`.
        assert_eq!(selection.trace.len(), 6);
        assert!(selection.trace[..4].iter().all(|r| r.phase == Phase::Ranking));
        assert!(selection.trace[4..].iter().all(|r| {
            r.phase == Phase::Accumulation && r.source_id == "beta"
        }));
    }

    #[test]
    fn final_model_fits_the_target() {
        let target = target();
        let pool = pool();
        let outcome = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(1)
            .run(&tree())
            .unwrap();

        let loss = zero_one_loss(&target, &outcome.model).unwrap();
        assert_eq!(loss, 0.0);
        assert_eq!(outcome.report.selected_ids(), vec!["beta"]);
        assert_eq!(outcome.report.n_target, 4);
        assert_eq!(outcome.report.learner, "Decision Tree");
        assert_eq!(outcome.auxiliary.len(), 20);
    }

    #[test]
    fn accumulation_reweights_against_the_merged_sources() {
        let target = target();
        let pool = pool();
        let selection = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(2)
            .select(&tree())
            .unwrap();

        let ids = selection.selected.iter()
            .map(|s| s.source_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["beta", "alpha"]);
        assert_eq!(selection.selected[1].weight, 0.0);
        assert_eq!(selection.auxiliary.len(), 40);

        // `alpha` is merged with weight zero.
        let weights = selection.auxiliary.weights();
        assert!(weights[20..].iter().all(|&w| w == 0.0));
    }

    #[test]
    fn zero_budget_skips_accumulation() {
        let target = target();
        let pool = pool();
        let outcome = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(0)
            .run(&tree())
            .unwrap();

        assert!(outcome.report.selected.is_empty());
        assert!(outcome.auxiliary.is_empty());
        assert_eq!(outcome.report.ranking.len(), 2);
        assert!(outcome.report.trace.iter().all(|r| r.phase == Phase::Ranking));

        // The model is the one trained on the target alone.
        let alone = tree().fit(&target).unwrap();
        assert_eq!(outcome.model, alone);
    }

    #[test]
    fn budget_is_capped_by_the_pool_size() {
        let target = target();
        let pool = pool();
        let selection = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(4)
            .cv_folds(2)
            .max_sources(5)
            .select(&tree())
            .unwrap();

        assert_eq!(selection.selected.len(), 2);
        let accumulation = selection.trace.iter()
            .filter(|r| r.phase == Phase::Accumulation)
            .count();
        assert_eq!(accumulation, 2 * 3);

        let sizes = selection.selected.iter()
            .map(|s| s.auxiliary_size)
            .collect::<Vec<_>>();
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*sizes.last().unwrap(), 40);

        // Each step grows the auxiliary set by exactly one source.
        let mut expected = 0;
        for entry in &selection.selected {
            expected += entry.n_instances;
            assert_eq!(entry.auxiliary_size, expected);
        }
    }

    #[test]
    fn ranking_ties_keep_the_pool_order() {
        let target = target();
        let copy = target.concat(&target).unwrap();
        let pool = SourcePool::new()
            .with_source("zeta", copy.clone()).unwrap()
            .with_source("alpha", copy.clone()).unwrap()
            .with_source("mu", copy).unwrap();

        for parallel in [true, false] {
            let selection = TwoStageTransfer::init(&target, &pool)
                .boosting_iterations(4)
                .cv_folds(2)
                .max_sources(3)
                .parallel(parallel)
                .select(&tree())
                .unwrap();

            let ids = selection.ranking.iter()
                .map(|entry| entry.source_id.as_str())
                .collect::<Vec<_>>();
            assert_eq!(ids, vec!["zeta", "alpha", "mu"]);

            let weight = selection.ranking[0].best_weight;
            assert!(selection.ranking.iter().all(|e| e.best_weight == weight));

            let merged = selection.selected.iter()
                .map(|entry| entry.source_id.as_str())
                .collect::<Vec<_>>();
            assert_eq!(merged, vec!["zeta", "alpha", "mu"]);
        }
    }

    #[test]
    fn identical_sources_keep_the_largest_weight() {
        let target = target();
        let copy = target.concat(&target).unwrap();
        let pool = SourcePool::new()
            .with_source("copy", copy).unwrap();

        let selection = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(5)
            .cv_folds(2)
            .select(&tree())
            .unwrap();

        let entry = &selection.ranking[0];
        assert_eq!(entry.best_iteration, 1);
        assert_eq!(entry.best_error, 0.0);
        assert!(entry.best_weight > 0.0);
    }

    #[test]
    fn transfer_never_loses_to_the_target_alone() {
        let target = target();
        let pool = pool();
        let selection = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(2)
            .select(&tree())
            .unwrap();

        // The last round of each search is the target alone.
        let alone = selection.trace.iter()
            .filter(|r| r.source_weight == 0.0 && r.phase == Phase::Ranking)
            .map(|r| r.error)
            .fold(f64::INFINITY, f64::min);
        assert!(selection.ranking.iter().all(|e| e.best_error <= alone));
    }

    #[test]
    fn runs_are_reproducible() {
        let target = target();
        let pool = pool();
        let transfer = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(4)
            .cv_folds(2)
            .max_sources(2);

        let a = transfer.run(&tree()).unwrap();
        let b = transfer.run(&tree()).unwrap();
        assert_eq!(a.report, b.report);
        assert_eq!(a.model, b.model);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let target = target();
        let pool = pool();
        let run = |parallel: bool| {
            TwoStageTransfer::init(&target, &pool)
                .boosting_iterations(4)
                .cv_folds(2)
                .max_sources(2)
                .parallel(parallel)
                .select(&tree())
                .unwrap()
        };
        assert_eq!(run(true), run(false));
    }

    #[test]
    fn shuffled_folds_are_seeded() {
        let target = target().concat(&target()).unwrap();
        let pool = pool();
        let run = |seed: u64| {
            TwoStageTransfer::init(&target, &pool)
                .boosting_iterations(3)
                .cv_folds(4)
                .shuffle(true)
                .seed(seed)
                .select(&MajorityVote)
                .unwrap()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn config_drives_the_builder() {
        let target = target();
        let pool = pool();
        let config = TransferConfig::from_json_str(
            r#"{ "boosting_iterations": 3, "cv_folds": 2, "max_sources": 1 }"#
        ).unwrap();

        let transfer = TwoStageTransfer::init(&target, &pool)
            .with_config(config.clone());
        assert_eq!(transfer.config(), &config);
        let a = transfer.select(&tree()).unwrap();
        let b = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(1)
            .select(&tree())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let target = target();
        let empty_pool = SourcePool::new();
        let result = TwoStageTransfer::init(&target, &empty_pool)
            .select(&tree());
        assert!(matches!(result, Err(TransferError::EmptyInput(_))));

        let with_void = SourcePool::new()
            .with_source("alpha", alpha()).unwrap()
            .with_source("void", InstanceSet::empty()).unwrap();
        let result = TwoStageTransfer::init(&target, &with_void)
            .cv_folds(2)
            .select(&tree());
        match result {
            Err(TransferError::EmptyInput(message)) => {
                assert!(message.contains("void"));
            },
            other => panic!("unexpected result: {other:?}"),
        }

        let empty = InstanceSet::empty();
        let pool = pool();
        let result = TwoStageTransfer::init(&empty, &pool).select(&tree());
        assert!(matches!(result, Err(TransferError::EmptyInput(_))));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let target = target();
        let pool = pool();

        let result = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(1)
            .cv_folds(2)
            .select(&tree());
        assert!(matches!(result, Err(TransferError::InvalidConfiguration(_))));

        // The target has only four instances.
        let result = TwoStageTransfer::init(&target, &pool)
            .cv_folds(5)
            .select(&tree());
        assert!(matches!(result, Err(TransferError::InvalidConfiguration(_))));
    }

    #[test]
    fn mismatched_source_is_rejected() {
        let target = target();
        let narrow = InstanceSet::from_parts(vec![vec![0.0]], vec![0]).unwrap();
        let pool = SourcePool::new()
            .with_source("narrow", narrow).unwrap();

        let result = TwoStageTransfer::init(&target, &pool)
            .cv_folds(2)
            .select(&tree());
        assert!(matches!(
            result,
            Err(TransferError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    // Fails on any training set holding an instance at `x[0] == 99`.
    struct Picky;

    impl Learner for Picky {
        type Model = MajorityClassifier;
        type Error = LearnerError;

        fn name(&self) -> &str {
            "Picky"
        }

        fn fit(&self, sample: &InstanceSet)
            -> std::result::Result<Self::Model, Self::Error>
        {
            if sample.iter().any(|inst| inst.features()[0] == 99.0) {
                return Err(LearnerError::EmptySample);
            }
            MajorityVote.fit(sample)
        }
    }

    #[test]
    fn failing_learner_names_the_source() {
        let target = target();
        let poison = InstanceSet::from_parts(vec![vec![99.0, 0.0]; 3], vec![1; 3])
            .unwrap();
        let pool = SourcePool::new()
            .with_source("alpha", alpha()).unwrap()
            .with_source("poison", poison).unwrap()
            .with_source("beta", beta()).unwrap();

        for parallel in [true, false] {
            let error = TwoStageTransfer::init(&target, &pool)
                .boosting_iterations(3)
                .cv_folds(2)
                .parallel(parallel)
                .select(&Picky)
                .unwrap_err();

            assert_eq!(error.source_id(), Some("poison"));
            match error {
                TransferError::Source { error, .. } => {
                    assert!(matches!(
                        *error,
                        TransferError::Classifier { stage: Stage::Fit, .. }
                    ));
                },
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
