use twostage_transfer::prelude::*;

use std::env;
use std::path::PathBuf;


fn dataset(name: &str) -> PathBuf {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset");
    path.push(name);
    path
}


/// Tests for `SampleReader` and `read_pool`.
#[cfg(test)]
pub mod reader_tests {
    use super::*;

    #[test]
    fn csv_and_arff_agree() {
        let csv = SampleReader::new()
            .file(dataset("target.csv"))
            .has_header(true)
            .target_feature("class")
            .read()
            .unwrap();
        let arff = SampleReader::new()
            .file(dataset("target.arff"))
            .read()
            .unwrap();

        assert_eq!(csv.shape(), (4, 2));
        assert_eq!(csv, arff);
        assert_eq!(csv.labels(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn pool_is_sorted_by_file_name() {
        let reader = SampleReader::new().has_header(true);
        let pool = read_pool(dataset("sources"), &reader).unwrap();

        assert_eq!(pool.ids(), vec!["alpha", "beta"]);
        assert_eq!(pool.get("alpha").unwrap().len(), 20);
        assert_eq!(pool.get("beta").unwrap().unique_labels(), vec![0, 1]);
    }

    #[test]
    fn transfer_from_files() {
        let reader = SampleReader::new()
            .has_header(true)
            .target_feature("class");
        let target = reader.clone().file(dataset("target.csv")).read().unwrap();
        let pool = read_pool(dataset("sources"), &reader).unwrap();

        let tree = DecisionTreeBuilder::new().build();
        let outcome = TwoStageTransfer::init(&target, &pool)
            .boosting_iterations(3)
            .cv_folds(2)
            .max_sources(1)
            .run(&tree)
            .unwrap();
        assert_eq!(outcome.report.selected_ids(), vec!["beta"]);

        let mut json = env::temp_dir();
        json.push("twostage_transfer_report_test.json");
        outcome.report.write_json(&json).unwrap();
        let text = std::fs::read_to_string(&json).unwrap();
        let back: TransferReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.selected_ids(), vec!["beta"]);
        assert_eq!(back.config, outcome.report.config);
        assert_eq!(back.trace.len(), outcome.report.trace.len());
        std::fs::remove_file(&json).unwrap();

        let mut csv = env::temp_dir();
        csv.push("twostage_transfer_trace_test.csv");
        outcome.report.write_trace_csv(&csv).unwrap();
        let text = std::fs::read_to_string(&csv).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Phase,Source,Iteration,TargetWeight,SourceWeight,Error");
        assert_eq!(lines.len(), 1 + outcome.report.trace.len());
        std::fs::remove_file(&csv).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SampleReader::new()
            .file(dataset("does_not_exist.csv"))
            .read();
        assert!(matches!(result, Err(TransferError::Io(_))));
    }
}
