mod error;
mod loader;
mod synthetic;

use ndarray::{Array2, ArrayView2};

pub use error::DataErr;
pub use loader::{load_dir, load_file, parse};
pub use synthetic::{complex, cubic, linear, xor};

/// A named set of samples, inputs and targets hold one sample per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    name: String,
    x: Array2<f32>,
    y: Array2<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Returns
    /// A `RowMismatch` error if `x` and `y` have a different amount of rows.
    pub fn new(name: impl Into<String>, x: Array2<f32>, y: Array2<f32>) -> Result<Self, DataErr> {
        if x.nrows() != y.nrows() {
            return Err(DataErr::RowMismatch {
                inputs: x.nrows(),
                targets: y.nrows(),
            });
        }

        Ok(Self {
            name: name.into(),
            x,
            y,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f32> {
        self.y.view()
    }

    /// The amount of input columns.
    pub fn x_size(&self) -> usize {
        self.x.ncols()
    }

    /// The amount of target columns.
    pub fn y_size(&self) -> usize {
        self.y.ncols()
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_parts(self) -> (Array2<f32>, Array2<f32>) {
        (self.x, self.y)
    }
}
