use log::debug;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

use super::{
    Samples,
    activations::ActFn,
    layers::Dense,
    loss::{LossFn, Mse},
};
use crate::{MlErr, Result, codec};

/// A feed-forward network: information flows from the input layer through every `Dense` layer
/// in order.
///
/// `shape` holds the amount of units per layer, input layer included, so a network of shape
/// `[s0, .., sn]` has `n` layers where layer `i` maps `s_i` inputs to `s_{i+1}` outputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    shape: Vec<usize>,
    layers: Vec<Dense>,
    output_activation: bool,
}

impl Network {
    /// Creates a new randomly initialized `Network`.
    ///
    /// # Arguments
    /// * `shape` - The amount of units per layer, input layer included.
    /// * `rng` - The random number generator used for weights, biases and activation functions.
    /// * `output_activation` - Whether the output layer may use catalog activation functions,
    ///   if not its units are fixed to the identity.
    ///
    /// # Returns
    /// A `Configuration` error if the shape has less than two layers or an empty one.
    pub fn new<R: Rng>(shape: &[usize], rng: &mut R, output_activation: bool) -> Result<Self> {
        validate_shape(shape)?;

        let mut layers: Vec<_> = shape
            .windows(2)
            .map(|dim| Dense::random((dim[0], dim[1]), rng))
            .collect();

        if !output_activation {
            if let Some(last) = layers.last_mut() {
                last.fill_act_fns(ActFn::Identity);
            }
        }

        debug!("built network with shape {shape:?}");

        Ok(Self {
            shape: shape.to_vec(),
            layers,
            output_activation,
        })
    }

    /// Creates a new `Network` out of already built layers.
    ///
    /// # Arguments
    /// * `layers` - The layers, each one taking as many inputs as the previous one outputs.
    /// * `output_activation` - Whether the output layer's activations are searchable.
    pub fn from_layers<I>(layers: I, output_activation: bool) -> Result<Self>
    where
        I: IntoIterator<Item = Dense>,
    {
        let layers: Vec<_> = layers.into_iter().collect();

        let Some(first) = layers.first() else {
            return Err(MlErr::Configuration(
                "a network needs at least one layer".to_string(),
            ));
        };

        let mut shape = vec![first.dim().0];
        for (i, layer) in layers.iter().enumerate() {
            let (units_in, units_out) = layer.dim();
            let expected = shape[i];

            if units_in != expected {
                return Err(MlErr::ShapeMismatch {
                    what: "layer inputs",
                    got: units_in,
                    expected,
                    index: Some(i),
                });
            }

            shape.push(units_out);
        }

        validate_shape(&shape)?;

        Ok(Self {
            shape,
            layers,
            output_activation,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Dense] {
        &mut self.layers
    }

    /// Whether the output layer's activation functions are part of the search.
    pub fn output_activation(&self) -> bool {
        self.output_activation
    }

    /// Returns the length of the flat parameter vector that encodes this network.
    pub fn dimensions(&self) -> usize {
        codec::dimensions(&self.shape)
    }

    /// Makes a forward pass of a single input vector.
    ///
    /// # Returns
    /// The output vector, or a `ShapeMismatch` error if `x` doesn't fit the input layer.
    pub fn forward(&self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        self.forward_one(x, None)
    }

    /// Makes a forward pass of every sample.
    ///
    /// # Arguments
    /// * `x` - A single input vector or a batch with one input per row.
    ///
    /// # Returns
    /// The outputs with one row per input in the same order, or a `ShapeMismatch` error with the
    /// position of the first input that doesn't fit the input layer.
    pub fn forward_batch<'a>(&self, x: impl Into<Samples<'a>>) -> Result<Array2<f32>> {
        let x = x.into().rows();
        let units_out = self.shape[self.shape.len() - 1];
        let mut y = Array2::zeros((x.nrows(), units_out));

        for (i, (x, mut y)) in x.rows().into_iter().zip(y.rows_mut()).enumerate() {
            y.assign(&self.forward_one(x, Some(i))?);
        }

        Ok(y)
    }

    /// Predicts the outputs of `x` and scores them against `y` with the mean squared error.
    ///
    /// # Returns
    /// A `DimensionMismatch` error if `x` and `y` have a different amount of samples.
    pub fn evaluate<'a, 'b>(
        &self,
        x: impl Into<Samples<'a>>,
        y: impl Into<Samples<'b>>,
    ) -> Result<f32> {
        self.evaluate_with(x, y, &Mse)
    }

    /// Same as `evaluate` with a custom loss function.
    pub fn evaluate_with<'a, 'b, L: LossFn>(
        &self,
        x: impl Into<Samples<'a>>,
        y: impl Into<Samples<'b>>,
        loss_fn: &L,
    ) -> Result<f32> {
        let (x, y) = (x.into(), y.into());

        if x.len() != y.len() {
            return Err(MlErr::DimensionMismatch {
                what: "input and ground truth samples",
                got: x.len(),
                expected: y.len(),
            });
        }

        let y_pred = self.forward_batch(x)?;
        loss_fn.loss(y_pred.view(), y.rows())
    }

    /// Returns a copy of every layer's weight matrix.
    pub fn weights(&self) -> Vec<Array2<f32>> {
        self.layers.iter().map(|l| l.weights().to_owned()).collect()
    }

    /// Returns a copy of every layer's biases.
    pub fn biases(&self) -> Vec<Array1<f32>> {
        self.layers.iter().map(|l| l.bias().to_owned()).collect()
    }

    /// Returns a copy of every layer's activation functions.
    pub fn act_fns(&self) -> Vec<Vec<ActFn>> {
        self.layers.iter().map(|l| l.act_fns().to_vec()).collect()
    }

    /// Replaces every layer's weight matrix.
    ///
    /// # Returns
    /// A `ShapeMismatch` error, leaving the network untouched, if any matrix doesn't have the
    /// `(units_out, units_in)` shape of its layer.
    pub fn set_weights(&mut self, weights: Vec<Array2<f32>>) -> Result<()> {
        self.check_layer_count("weight matrices", weights.len())?;

        for (i, (layer, w)) in self.layers.iter().zip(&weights).enumerate() {
            let (units_in, units_out) = layer.dim();
            check_len("weight matrix rows", w.nrows(), units_out, i)?;
            check_len("weight matrix columns", w.ncols(), units_in, i)?;
        }

        for (layer, w) in self.layers.iter_mut().zip(&weights) {
            layer.weights_mut().assign(w);
        }

        Ok(())
    }

    /// Replaces every layer's biases.
    ///
    /// # Returns
    /// A `ShapeMismatch` error, leaving the network untouched, if any layer's biases don't have
    /// one entry per unit.
    pub fn set_biases(&mut self, biases: Vec<Array1<f32>>) -> Result<()> {
        self.check_layer_count("bias vectors", biases.len())?;

        for (i, (layer, b)) in self.layers.iter().zip(&biases).enumerate() {
            check_len("biases", b.len(), layer.dim().1, i)?;
        }

        for (layer, b) in self.layers.iter_mut().zip(&biases) {
            layer.bias_mut().assign(b);
        }

        Ok(())
    }

    /// Replaces every layer's activation functions.
    ///
    /// # Returns
    /// A `ShapeMismatch` error, leaving the network untouched, if any layer's activation
    /// functions don't have one entry per unit.
    pub fn set_act_fns(&mut self, act_fns: Vec<Vec<ActFn>>) -> Result<()> {
        self.check_layer_count("activation function lists", act_fns.len())?;

        for (i, (layer, f)) in self.layers.iter().zip(&act_fns).enumerate() {
            check_len("activation functions", f.len(), layer.dim().1, i)?;
        }

        for (layer, f) in self.layers.iter_mut().zip(&act_fns) {
            layer.act_fns_mut().copy_from_slice(f);
        }

        Ok(())
    }

    fn forward_one(&self, x: ArrayView1<f32>, index: Option<usize>) -> Result<Array1<f32>> {
        let units_in = self.shape[0];

        if x.len() != units_in {
            return Err(MlErr::ShapeMismatch {
                what: "input vector",
                got: x.len(),
                expected: units_in,
                index,
            });
        }

        let mut y = self.layers[0].forward(x);
        for layer in &self.layers[1..] {
            y = layer.forward(y.view());
        }

        Ok(y)
    }

    fn check_layer_count(&self, what: &'static str, got: usize) -> Result<()> {
        if got != self.layers.len() {
            return Err(MlErr::ShapeMismatch {
                what,
                got,
                expected: self.layers.len(),
                index: None,
            });
        }

        Ok(())
    }
}

/// Checks that a shape describes at least one layer and that no layer is empty.
pub(crate) fn validate_shape(shape: &[usize]) -> Result<()> {
    if shape.len() < 2 {
        return Err(MlErr::Configuration(format!(
            "a network needs at least an input and an output layer, got shape {shape:?}"
        )));
    }

    if shape.contains(&0) {
        return Err(MlErr::Configuration(format!(
            "every layer needs at least one unit, got shape {shape:?}"
        )));
    }

    Ok(())
}

fn check_len(what: &'static str, got: usize, expected: usize, layer: usize) -> Result<()> {
    if got != expected {
        return Err(MlErr::ShapeMismatch {
            what,
            got,
            expected,
            index: Some(layer),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, array};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn doubler() -> Network {
        let layer = Dense::new(array![[2.]], vec![ActFn::Identity], array![0.]).unwrap();
        Network::from_layers([layer], false).unwrap()
    }

    #[test]
    fn shapes_without_two_layers_are_rejected() {
        let mut rng = seeded_rng();

        let shapes: [&[usize]; 2] = [&[], &[3]];
        for shape in shapes {
            let res = Network::new(shape, &mut rng, false);
            assert!(matches!(res, Err(MlErr::Configuration(_))));
        }
    }

    #[test]
    fn empty_layers_are_rejected() {
        let res = Network::new(&[2, 0, 1], &mut seeded_rng(), false);
        assert!(matches!(res, Err(MlErr::Configuration(_))));
    }

    #[test]
    fn single_unit_identity_layer_scales_its_input() {
        let net = doubler();
        assert_eq!(net.forward(array![3.].view()).unwrap(), array![6.]);
    }

    #[test]
    fn output_has_one_entry_per_output_unit() {
        let mut rng = seeded_rng();

        for shape in [vec![1, 1], vec![2, 3, 1], vec![4, 8, 3, 2], vec![3, 5]] {
            let net = Network::new(&shape, &mut rng, true).unwrap();
            let x = Array::linspace(-1., 1., shape[0]);

            assert_eq!(net.forward(x.view()).unwrap().len(), shape[shape.len() - 1]);
            assert_eq!(net.layers().len(), shape.len() - 1);
        }
    }

    #[test]
    fn output_layer_is_identity_unless_enabled() {
        let net = Network::new(&[2, 4, 3], &mut seeded_rng(), false).unwrap();
        let last = &net.layers()[1];
        assert!(last.act_fns().iter().all(|&f| f == ActFn::Identity));
        assert!(net.layers()[0].act_fns().iter().all(|f| f.index().is_some()));

        let net = Network::new(&[2, 4, 3], &mut seeded_rng(), true).unwrap();
        assert!(net.act_fns().iter().flatten().all(|f| f.index().is_some()));
    }

    #[test]
    fn same_seed_builds_the_same_network() {
        let a = Network::new(&[3, 4, 2], &mut seeded_rng(), false).unwrap();
        let b = Network::new(&[3, 4, 2], &mut seeded_rng(), false).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn wrong_input_length_fails() {
        let net = doubler();

        assert_eq!(
            net.forward(array![1., 2.].view()),
            Err(MlErr::ShapeMismatch {
                what: "input vector",
                got: 2,
                expected: 1,
                index: None,
            })
        );
    }

    #[test]
    fn batch_keeps_input_order() {
        let net = doubler();
        let x = array![[1f32], [-2.], [0.5]];

        assert_eq!(net.forward_batch(&x).unwrap(), array![[2.], [-4.], [1.]]);
        assert_eq!(net.forward_batch(array![4f32].view()).unwrap(), array![[8.]]);
    }

    #[test]
    fn batch_error_reports_the_offending_row() {
        let net = Network::new(&[2, 3, 1], &mut seeded_rng(), false).unwrap();
        let x = array![[1f32, 2., 3.]];

        assert!(matches!(
            net.forward_batch(&x),
            Err(MlErr::ShapeMismatch {
                index: Some(0),
                got: 3,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn evaluating_own_predictions_has_no_error() {
        let net = Network::new(&[2, 5, 3], &mut seeded_rng(), true).unwrap();
        let x = array![[0f32, 1.], [1., 0.], [0.3, -0.7]];
        let y = net.forward_batch(&x).unwrap();

        assert_eq!(net.evaluate(&x, &y).unwrap(), 0.);
    }

    #[test]
    fn evaluating_single_vectors() {
        let net = doubler();
        let err = net.evaluate(&array![1f32], &array![3f32]).unwrap();

        assert_eq!(err, 1.);
    }

    #[test]
    fn mismatched_sample_counts_fail() {
        let net = doubler();
        let x = array![[1f32], [2.]];
        let y = array![[2f32]];

        assert_eq!(
            net.evaluate(&x, &y),
            Err(MlErr::DimensionMismatch {
                what: "input and ground truth samples",
                got: 2,
                expected: 1,
            })
        );
    }

    #[test]
    fn setters_roundtrip_the_getters() {
        let mut rng = seeded_rng();
        let src = Network::new(&[2, 3, 1], &mut rng, true).unwrap();
        let mut dst = Network::new(&[2, 3, 1], &mut rng, true).unwrap();

        dst.set_weights(src.weights()).unwrap();
        dst.set_biases(src.biases()).unwrap();
        dst.set_act_fns(src.act_fns()).unwrap();

        assert_eq!(src, dst);
    }

    #[test]
    fn setters_reject_wrong_shapes_without_touching_the_network() {
        let mut net = Network::new(&[2, 3, 1], &mut seeded_rng(), false).unwrap();
        let before = net.clone();

        let mut weights = net.weights();
        weights[1] = Array2::zeros((1, 2));
        assert!(matches!(
            net.set_weights(weights),
            Err(MlErr::ShapeMismatch {
                what: "weight matrix columns",
                index: Some(1),
                ..
            })
        ));

        let biases = vec![Array1::zeros(3)];
        assert!(matches!(
            net.set_biases(biases),
            Err(MlErr::ShapeMismatch {
                what: "bias vectors",
                ..
            })
        ));

        let mut act_fns = net.act_fns();
        act_fns[0].pop();
        assert!(net.set_act_fns(act_fns).is_err());

        assert_eq!(net, before);
    }

    #[test]
    fn layers_must_chain() {
        let a = Dense::new(Array2::zeros((3, 2)), vec![ActFn::Tanh; 3], Array1::zeros(3)).unwrap();
        let b = Dense::new(Array2::zeros((1, 4)), vec![ActFn::Tanh], Array1::zeros(1)).unwrap();

        assert!(matches!(
            Network::from_layers([a, b], false),
            Err(MlErr::ShapeMismatch {
                what: "layer inputs",
                index: Some(1),
                ..
            })
        ));
    }
}
