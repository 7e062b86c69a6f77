use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Data fed to a network: either a single vector or a batch with one sample per row.
#[derive(Clone, Copy, Debug)]
pub enum Samples<'a> {
    One(ArrayView1<'a, f32>),
    Many(ArrayView2<'a, f32>),
}

impl<'a> Samples<'a> {
    /// Views the samples as a batch, a single vector becomes a batch of one row.
    pub fn rows(self) -> ArrayView2<'a, f32> {
        match self {
            Samples::One(x) => x.insert_axis(Axis(0)),
            Samples::Many(x) => x,
        }
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        match self {
            Samples::One(_) => 1,
            Samples::Many(x) => x.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<ArrayView1<'a, f32>> for Samples<'a> {
    fn from(value: ArrayView1<'a, f32>) -> Self {
        Self::One(value)
    }
}

impl<'a> From<ArrayView2<'a, f32>> for Samples<'a> {
    fn from(value: ArrayView2<'a, f32>) -> Self {
        Self::Many(value)
    }
}

impl<'a> From<&'a Array1<f32>> for Samples<'a> {
    fn from(value: &'a Array1<f32>) -> Self {
        Self::One(value.view())
    }
}

impl<'a> From<&'a Array2<f32>> for Samples<'a> {
    fn from(value: &'a Array2<f32>) -> Self {
        Self::Many(value.view())
    }
}
