use crate::{Classifier, InstanceSet, TransferError};
use crate::error::{Result, Stage};


/// Returns the fraction of instances in `sample` that `f` misclassifies.
/// Every instance counts once, whatever its weight.
pub fn zero_one_loss<H>(sample: &InstanceSet, f: &H) -> Result<f64>
    where H: Classifier
{
    if sample.is_empty() {
        let message = "cannot evaluate on an empty sample".to_string();
        return Err(TransferError::EmptyInput(message));
    }
    let n_sample = sample.len() as f64;

    let predictions = f.predict_all(sample)
        .map_err(|e| TransferError::classifier(Stage::Predict, e))?;

    let loss = predictions.into_iter()
        .zip(sample.iter())
        .map(|(hx, inst)| if hx != inst.label() { 1f64 } else { 0f64 })
        .sum::<f64>()
        / n_sample;
    Ok(loss)
}


/// Returns `1 - zero_one_loss(sample, f)`.
pub fn accuracy<H>(sample: &InstanceSet, f: &H) -> Result<f64>
    where H: Classifier
{
    zero_one_loss(sample, f).map(|loss| 1f64 - loss)
}
