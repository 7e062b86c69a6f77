use ndarray::{ArrayView2, Axis};

use super::LossFn;
use crate::{MlErr, Result};

/// Mean squared error loss function.
///
/// The error of a sample is the sum of the absolute differences between its predicted and
/// expected vectors. The loss is the mean of the squared per sample errors, `0` for an empty
/// batch.
#[derive(Default, Clone, Copy, Debug)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Result<f32> {
        if y_pred.nrows() != y.nrows() {
            return Err(MlErr::DimensionMismatch {
                what: "predictions and ground truth samples",
                got: y_pred.nrows(),
                expected: y.nrows(),
            });
        }

        if y_pred.ncols() != y.ncols() {
            return Err(MlErr::ShapeMismatch {
                what: "ground truth vectors",
                got: y.ncols(),
                expected: y_pred.ncols(),
                index: None,
            });
        }

        let per_sample = (&y_pred - &y).mapv(f32::abs).sum_axis(Axis(1));
        Ok(per_sample.mapv(|e| e.powi(2)).mean().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;

    #[test]
    fn identical_batches_have_no_error() {
        let y = array![[1., -2.], [0.5, 3.], [7., 0.]];
        assert_eq!(Mse.loss(y.view(), y.view()).unwrap(), 0.);
    }

    #[test]
    fn squares_the_absolute_sum_per_sample() {
        let y_pred = array![[1., 1.], [0., 0.]];
        let y = array![[0., 2.], [3., 0.]];

        // sample errors: |1| + |-1| = 2 and |-3| = 3, mean of 4 and 9
        assert_eq!(Mse.loss(y_pred.view(), y.view()).unwrap(), 6.5);
    }

    #[test]
    fn empty_batch_has_no_error() {
        let empty = Array2::<f32>::zeros((0, 2));
        assert_eq!(Mse.loss(empty.view(), empty.view()).unwrap(), 0.);
    }

    #[test]
    fn sample_count_mismatch_fails() {
        let y_pred = array![[1.], [2.]];
        let y = array![[1.]];

        assert_eq!(
            Mse.loss(y_pred.view(), y.view()),
            Err(MlErr::DimensionMismatch {
                what: "predictions and ground truth samples",
                got: 2,
                expected: 1,
            })
        );
    }

    #[test]
    fn vector_width_mismatch_fails() {
        let y_pred = array![[1., 2.]];
        let y = array![[1.]];

        assert!(matches!(
            Mse.loss(y_pred.view(), y.view()),
            Err(MlErr::ShapeMismatch { got: 1, expected: 2, .. })
        ));
    }
}
