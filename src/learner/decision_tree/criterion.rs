//! Splitting criteria of the decision tree.

use rayon::prelude::*;

use std::collections::BTreeMap;
use std::cmp::Ordering;
use std::fmt;

use super::split_rule::*;
use crate::{InstanceSet, Label};


/// Total weight per label.
pub(super) type LabelToWeight = BTreeMap<Label, f64>;


/// Splitting criteria for growing decision tree.
/// * `Criterion::Entropy` minimizes entropic impurity for given weights.
/// * `Criterion::Gini` minimizes Gini impurity for given weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Entropy.
    Entropy,
    /// Gini index.
    Gini,
}


impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Entropy => "Entropy",
            Self::Gini => "Gini index",
        };

        write!(f, "{name}")
    }
}


impl Criterion {
    /// Returns the impurity of the given label weights.
    pub(super) fn impurity(&self, map: &LabelToWeight) -> f64 {
        match self {
            Self::Entropy => entropic_impurity(map),
            Self::Gini => gini_impurity(map),
        }
    }


    /// Returns the best splitting rule and its weighted impurity,
    /// or `None` if no split lowers the impurity of the node.
    ///
    /// Each child must carry at least `min_leaf_weight`
    /// and a positive total weight.
    /// Among equally good splits, the lowest feature index wins.
    pub(super) fn best_split(
        &self,
        sample: &InstanceSet,
        idx: &[usize],
        min_leaf_weight: f64,
    ) -> Option<Splitter>
    {
        let total = label_weights(sample, idx);
        let node_impurity = self.impurity(&total);

        let scores = (0..sample.n_features())
            .into_par_iter()
            .map(|feature| {
                self.split_by_feature(sample, idx, &total, feature, min_leaf_weight)
            })
            .collect::<Vec<_>>();

        let mut best: Option<(usize, f64, f64)> = None;
        for (feature, score) in scores.into_iter().enumerate() {
            let Some((threshold, score)) = score else { continue; };
            let improves = match best {
                Some((_, _, best_score)) => score < best_score,
                None => score < node_impurity,
            };
            if improves {
                best = Some((feature, threshold, score));
            }
        }

        best.map(|(feature, threshold, _)| {
            Splitter::new(feature, Threshold::from(threshold))
        })
    }


    /// Sweeps the sorted values of `feature` and returns
    /// the best `(threshold, score)` pair.
    fn split_by_feature(
        &self,
        sample: &InstanceSet,
        idx: &[usize],
        total: &LabelToWeight,
        feature: usize,
        min_leaf_weight: f64,
    ) -> Option<(f64, f64)>
    {
        let mut pack = idx.iter()
            .map(|&i| {
                let inst = &sample[i];
                (inst.features()[feature], inst.label(), inst.weight())
            })
            .collect::<Vec<_>>();
        pack.sort_by(|a, b| a.0.total_cmp(&b.0));

        let weight_sum = total.values().sum::<f64>();

        let mut left_weight = LabelToWeight::new();
        let mut right_weight = total.clone();
        let mut left_weight_sum = 0f64;

        let mut best: Option<(f64, f64)> = None;
        for j in 0..pack.len().saturating_sub(1) {
            let (x, y, w) = pack[j];
            *left_weight.entry(y).or_insert(0f64) += w;
            if let Some(entry) = right_weight.get_mut(&y) {
                *entry -= w;
            }
            left_weight_sum += w;

            let next = pack[j + 1].0;
            if x.partial_cmp(&next) != Some(Ordering::Less) { continue; }

            let right_weight_sum = weight_sum - left_weight_sum;
            let is_valid = left_weight_sum > 0f64
                && right_weight_sum > 0f64
                && left_weight_sum >= min_leaf_weight
                && right_weight_sum >= min_leaf_weight;
            if !is_valid { continue; }

            let lp = left_weight_sum / weight_sum;
            let rp = (1f64 - lp).max(0f64);
            let score = lp * self.impurity(&left_weight)
                + rp * self.impurity(&right_weight);

            if best.map_or(true, |(_, s)| score < s) {
                best = Some((threshold_between(x, next), score));
            }
        }
        best
    }
}


/// Returns the total weight per label over `idx`.
pub(super) fn label_weights(sample: &InstanceSet, idx: &[usize])
    -> LabelToWeight
{
    let mut map = LabelToWeight::new();
    for &i in idx {
        let inst = &sample[i];
        *map.entry(inst.label()).or_insert(0f64) += inst.weight();
    }
    map
}


/// A threshold `t` with `lo < t <= hi`.
#[inline(always)]
fn threshold_between(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2f64;
    if mid > lo { mid } else { hi }
}


/// Returns the entropic-impurity of the given map.
#[inline(always)]
fn entropic_impurity(map: &LabelToWeight) -> f64 {
    let total = map.values().filter(|&&w| w > 0f64).sum::<f64>();
    if total <= 0f64 { return 0f64; }

    map.values()
        .map(|&w| {
            let r = w / total;
            if r <= 0f64 { 0f64 } else { -r * r.ln() }
        })
        .sum::<f64>()
}


/// Returns the gini-impurity of the given map.
#[inline(always)]
fn gini_impurity(map: &LabelToWeight) -> f64 {
    let total = map.values().filter(|&&w| w > 0f64).sum::<f64>();
    if total <= 0f64 { return 0f64; }

    let correct = map.values()
        .filter(|&&w| w > 0f64)
        .map(|&w| (w / total).powi(2))
        .sum::<f64>();

    (1f64 - correct).max(0f64)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_node_has_no_impurity() {
        let map = LabelToWeight::from([(1, 3.0), (0, 0.0)]);
        assert_eq!(Criterion::Entropy.impurity(&map), 0.0);
        assert_eq!(Criterion::Gini.impurity(&map), 0.0);
    }

    #[test]
    fn balanced_node_is_maximally_impure() {
        let map = LabelToWeight::from([(0, 2.0), (1, 2.0)]);
        let entropy = Criterion::Entropy.impurity(&map);
        assert!((entropy - 2f64.ln()).abs() < 1e-12);
        assert!((Criterion::Gini.impurity(&map) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn threshold_lies_between_values() {
        assert_eq!(threshold_between(1.0, 2.0), 1.5);
        let t = threshold_between(1.0, 1.0 + f64::EPSILON);
        assert!(t > 1.0 && t <= 1.0 + f64::EPSILON);
    }

    #[test]
    fn best_split_separates_labels() {
        let sample = InstanceSet::from_parts(
            vec![
                vec![0.0, 5.0], vec![1.0, 5.0],
                vec![2.0, 5.0], vec![3.0, 5.0],
            ],
            vec![0, 0, 1, 1],
        ).unwrap();
        let idx = vec![0, 1, 2, 3];

        let rule = Criterion::Entropy.best_split(&sample, &idx, 0.0).unwrap();
        assert_eq!(rule.feature, 0);
        assert_eq!(rule.threshold.0, 1.5);
    }
}
