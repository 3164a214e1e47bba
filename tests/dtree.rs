use polars::prelude::{DataFrame, NamedFrom, Series};

use twostage_transfer::prelude::*;

use std::env;
use std::fs;


// Toy example  (o/x are the pos/neg examples)
//
// 15|                     |
//   |                     |
//   |         x           |
//   |                     |   x
// 10|                     |________________________ 8.5
//   |  x                  |
//   |                     |        o
//   |                     |  o
//   |                     |
//  5|                     |
//   |                     |            o
//   |                     |
//   |      x              |
//   |_____________________|____________________
//  0            5         | 10            15
//                         |
//                        9.0
//
fn toy() -> InstanceSet {
    let s1 = Series::new("x", &[10.0, 14.0, 15.0, 5.0, 3.0, 8.0, 12.0]);
    let s2 = Series::new("y", &[5.0, 8.0, 3.0, 1.0, 9.0, 13.0, 11.0]);
    let target = Series::new("class", &[1_i64, 1, 1, -1, -1, -1, -1]);

    let df = DataFrame::new(vec![s1, s2, target]).unwrap();
    InstanceSet::from_dataframe(&df, "class").unwrap()
}


/// Tests for `DecisionTree`.
#[cfg(test)]
pub mod dtree_tests {
    use super::*;

    #[test]
    fn full_binary_tree() {
        let sample = toy();
        for criterion in [Criterion::Entropy, Criterion::Gini] {
            let tree = DecisionTreeBuilder::new()
                .criterion(criterion)
                .build();
            let f = tree.fit(&sample).unwrap();

            assert_eq!(f.predict_all(&sample).unwrap(), sample.labels());
            assert_eq!(f.n_leaves(), 3);
            assert_eq!(f.depth(), 2);
        }
    }

    #[test]
    fn stump_has_two_leaves() {
        let sample = toy();
        let f = DecisionTreeBuilder::new()
            .max_depth(1)
            .build()
            .fit(&sample)
            .unwrap();
        assert_eq!(f.depth(), 1);
        assert_eq!(f.n_leaves(), 2);
    }

    #[test]
    fn weights_move_the_majority() {
        // Two conflicting instances at the same point.
        let x = vec![vec![0.0], vec![0.0]];
        let light = InstanceSet::from_parts(x.clone(), vec![1, 0]).unwrap();
        let heavy = InstanceSet::from_parts(vec![vec![0.0]], vec![1])
            .unwrap()
            .with_weight(0.5)
            .unwrap();

        let tree = DecisionTreeBuilder::new().build();
        // Tie, broken towards the smallest label.
        assert_eq!(tree.fit(&light).unwrap().predict(&[0.0]).unwrap(), 0);
        let both = light.concat(&heavy).unwrap();
        assert_eq!(tree.fit(&both).unwrap().predict(&[0.0]).unwrap(), 1);
    }

    #[test]
    fn min_leaf_weight_blocks_small_leaves() {
        let sample = toy();
        let f = DecisionTreeBuilder::new()
            .min_leaf_weight(4.0)
            .build()
            .fit(&sample)
            .unwrap();
        assert_eq!(f.n_leaves(), 1);
    }

    #[test]
    fn dot_file() {
        let sample = toy();
        let f = DecisionTreeBuilder::new().build().fit(&sample).unwrap();

        let mut path = env::temp_dir();
        path.push("twostage_transfer_dtree_test.dot");
        f.to_dot_file(&path).unwrap();

        let dot = fs::read_to_string(&path).unwrap();
        assert!(dot.starts_with("graph DecisionTree {"));
        assert_eq!(dot.matches("shape = box").count(), f.n_leaves());
        fs::remove_file(&path).unwrap();
    }
}
