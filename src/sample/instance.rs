use std::sync::Arc;

use crate::error::{Result, TransferError};


/// Categorical label of an instance.
pub type Label = i64;


/// One training example `(x, y, w)`.
///
/// An `Instance` never changes after construction.
/// Re-weighting returns a new value that shares
/// the feature storage of the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    features: Arc<[f64]>,
    label: Label,
    weight: f64,
}


impl Instance {
    /// Construct a new instance of weight `1.0`.
    #[inline]
    pub fn new<X>(features: X, label: Label) -> Self
        where X: Into<Vec<f64>>,
    {
        let features: Vec<f64> = features.into();
        let features = Arc::from(features);
        Self { features, label, weight: 1f64 }
    }


    /// Construct a new instance of weight `weight`.
    /// Returns `Err` if the weight is negative or not finite.
    #[inline]
    pub fn weighted<X>(features: X, label: Label, weight: f64)
        -> Result<Self>
        where X: Into<Vec<f64>>,
    {
        check_weight(weight)?;
        let features: Vec<f64> = features.into();
        let features = Arc::from(features);
        Ok(Self { features, label, weight })
    }


    /// Returns the feature vector.
    #[inline]
    pub fn features(&self) -> &[f64] {
        &self.features[..]
    }


    /// Returns the label.
    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }


    /// Returns the weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }


    /// Returns the number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }


    /// Returns a copy of `self` whose weight is `weight`.
    /// The feature vector is shared, not copied.
    #[inline]
    pub(crate) fn reweighted(&self, weight: f64) -> Self {
        Self {
            features: Arc::clone(&self.features),
            label: self.label,
            weight,
        }
    }
}


/// Weights must be finite and non-negative.
#[inline]
pub(crate) fn check_weight(weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0f64 {
        Ok(())
    } else {
        Err(TransferError::InvalidInput(
            format!("instance weight must be finite and non-negative, got {weight}")
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reweight_shares_features() {
        let x = Instance::new(vec![1.0, 2.0], 3);
        let y = x.reweighted(0.25);

        assert_eq!(x.weight(), 1.0);
        assert_eq!(y.weight(), 0.25);
        assert_eq!(x.label(), y.label());
        assert!(Arc::ptr_eq(&x.features, &y.features));
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(Instance::weighted(vec![0.0], 0, -1.0).is_err());
        assert!(Instance::weighted(vec![0.0], 0, f64::NAN).is_err());
        assert!(Instance::weighted(vec![0.0], 0, 0.0).is_ok());
    }
}
