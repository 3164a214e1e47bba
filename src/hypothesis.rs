//! The prediction side of the classifier port.

use crate::{InstanceSet, Label};


/// A trait that defines the behavor of a trained classifier.
/// You only need to implement `predict` method.
pub trait Classifier {
    /// The error returned when a prediction fails.
    type Error: std::error::Error + Send + Sync + 'static;


    /// Predicts the label of the feature vector `x`.
    fn predict(&self, x: &[f64]) -> Result<Label, Self::Error>;


    /// Predicts the labels of all instances in `sample`.
    fn predict_all(&self, sample: &InstanceSet)
        -> Result<Vec<Label>, Self::Error>
    {
        sample.iter()
            .map(|inst| self.predict(inst.features()))
            .collect()
    }
}
