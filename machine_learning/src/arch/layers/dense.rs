use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};
use ndarray_rand::{RandomExt, rand_distr::StandardNormal};
use rand::Rng;

use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer where each unit owns a row of weights, a bias and its own activation
/// function.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    weights: Array2<f32>,
    act_fns: Vec<ActFn>,
    bias: Array1<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer from its parts.
    ///
    /// # Arguments
    /// * `weights` - A `(units_out, units_in)` matrix.
    /// * `act_fns` - One activation function per output unit.
    /// * `bias` - One bias per output unit.
    ///
    /// # Returns
    /// An error if `act_fns` or `bias` don't have one entry per row of `weights`.
    pub fn new(weights: Array2<f32>, act_fns: Vec<ActFn>, bias: Array1<f32>) -> Result<Self> {
        let units = weights.nrows();

        if act_fns.len() != units {
            return Err(MlErr::ShapeMismatch {
                what: "activation functions",
                got: act_fns.len(),
                expected: units,
                index: None,
            });
        }

        if bias.len() != units {
            return Err(MlErr::ShapeMismatch {
                what: "biases",
                got: bias.len(),
                expected: units,
                index: None,
            });
        }

        Ok(Self {
            weights,
            act_fns,
            bias,
        })
    }

    /// Creates a new `Dense` layer with standard normal weights and biases and activation
    /// functions picked uniformly from the catalog.
    ///
    /// # Arguments
    /// * `dim` - The `(units_in, units_out)` dimensions of the layer.
    /// * `rng` - A random number generator.
    pub fn random<R: Rng>(dim: (usize, usize), rng: &mut R) -> Self {
        let (units_in, units_out) = dim;

        let weights = Array2::random_using((units_out, units_in), StandardNormal, rng);
        let act_fns = (0..units_out).map(|_| ActFn::sample(rng)).collect();
        let bias = Array1::random_using(units_out, StandardNormal, rng);

        Self {
            weights,
            act_fns,
            bias,
        }
    }

    /// Returns the `(units_in, units_out)` dimensions of this layer.
    pub fn dim(&self) -> (usize, usize) {
        let (units_out, units_in) = self.weights.dim();
        (units_in, units_out)
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    pub fn act_fns(&self) -> &[ActFn] {
        &self.act_fns
    }

    pub fn bias(&self) -> ArrayView1<'_, f32> {
        self.bias.view()
    }

    pub(crate) fn weights_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.weights.view_mut()
    }

    pub(crate) fn act_fns_mut(&mut self) -> &mut [ActFn] {
        &mut self.act_fns
    }

    pub(crate) fn bias_mut(&mut self) -> ArrayViewMut1<'_, f32> {
        self.bias.view_mut()
    }

    /// Replaces every activation function of the layer.
    pub(crate) fn fill_act_fns(&mut self, act_fn: ActFn) {
        self.act_fns.fill(act_fn);
    }

    /// Propagates `x` through the layer, each unit computes `act_fn(w · x + b)`.
    ///
    /// The caller guarantees `x` has `units_in` entries.
    pub fn forward(&self, x: ArrayView1<f32>) -> Array1<f32> {
        let mut z = self.weights.dot(&x);

        z.iter_mut()
            .zip(&self.bias)
            .zip(&self.act_fns)
            .for_each(|((z, b), act_fn)| *z = act_fn.f(*z + b));

        z
    }
}
