//! Weighted majority vote (ZeroR).
//! Useful as a baseline and as a learner with a predictable error.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use super::{Learner, LearnerError};
use crate::{Classifier, InstanceSet, Label};


/// A learner that ignores the features and predicts
/// the label with the largest total weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote;


/// The classifier produced by [`MajorityVote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorityClassifier {
    label: Label,
    n_feature: usize,
}


impl MajorityClassifier {
    /// Returns the predicted label.
    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }
}


impl Learner for MajorityVote {
    type Model = MajorityClassifier;
    type Error = LearnerError;


    fn name(&self) -> &str {
        "Majority vote"
    }


    fn fit(&self, sample: &InstanceSet) -> Result<Self::Model, Self::Error> {
        if sample.is_empty() {
            return Err(LearnerError::EmptySample);
        }
        let label = weighted_majority(sample.iter().map(|inst| (inst.label(), inst.weight())))
            .ok_or(LearnerError::NoPositiveWeight)?;

        Ok(MajorityClassifier { label, n_feature: sample.n_features() })
    }
}


impl Classifier for MajorityClassifier {
    type Error = LearnerError;

    fn predict(&self, x: &[f64]) -> Result<Label, Self::Error> {
        if x.len() != self.n_feature {
            return Err(LearnerError::DimensionMismatch {
                expected: self.n_feature,
                got: x.len(),
            });
        }
        Ok(self.label)
    }
}


/// Returns the label of maximal total weight.
/// Ties are broken toward the smallest label.
/// Returns `None` if no label has positive weight.
pub(crate) fn weighted_majority<I>(items: I) -> Option<Label>
    where I: IntoIterator<Item = (Label, f64)>,
{
    let mut counter: BTreeMap<Label, f64> = BTreeMap::new();
    for (y, w) in items {
        if w > 0f64 {
            *counter.entry(y).or_insert(0f64) += w;
        }
    }

    let mut best: Option<(Label, f64)> = None;
    for (y, w) in counter {
        match best {
            Some((_, bw)) if w <= bw => {},
            _ => { best = Some((y, w)); },
        }
    }
    best.map(|(y, _)| y)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_decide_the_majority() {
        let sample = InstanceSet::from_parts(
            vec![vec![0.0]; 3],
            vec![0, 1, 1],
        ).unwrap();
        let heavy = InstanceSet::from_parts(vec![vec![0.0]], vec![0])
            .unwrap()
            .with_weight(5.0)
            .unwrap();
        let sample = sample.concat(&heavy).unwrap();

        let f = MajorityVote.fit(&sample).unwrap();
        assert_eq!(f.label(), 0);
    }

    #[test]
    fn ties_go_to_the_smallest_label() {
        assert_eq!(weighted_majority([(3, 1.0), (1, 1.0), (2, 0.5)]), Some(1));
        assert_eq!(weighted_majority([(3, 0.0)]), None);
    }

    #[test]
    fn zero_weight_only_fails() {
        let sample = InstanceSet::from_parts(vec![vec![0.0]], vec![0])
            .unwrap()
            .with_weight(0.0)
            .unwrap();
        assert_eq!(MajorityVote.fit(&sample), Err(LearnerError::NoPositiveWeight));
    }
}
