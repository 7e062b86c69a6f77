use ndarray::ArrayView2;

use crate::Result;

/// Scores a batch of predictions against the expected outputs, lower is better.
///
/// Both arguments hold one sample per row.
pub trait LossFn {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Result<f32>;
}
