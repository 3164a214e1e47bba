//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LR {
    Left,
    Right,
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub(super) struct Threshold(pub(super) f64);


impl From<f64> for Threshold {
    #[inline]
    fn from(threshold: f64) -> Self {
        Self(threshold)
    }
}


/// Sends `x` to the left child if `x[feature] < threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct Splitter {
    pub(super) feature: usize,
    pub(super) threshold: Threshold,
}


impl Splitter {
    #[inline]
    pub(super) fn new(feature: usize, threshold: Threshold) -> Self {
        Self { feature, threshold }
    }


    /// Defines the splitting.
    #[inline]
    pub(super) fn split(&self, x: &[f64]) -> LR {
        if x[self.feature] < self.threshold.0 {
            LR::Left
        } else {
            LR::Right
        }
    }
}
