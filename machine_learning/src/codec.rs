//! Flattening of a network into a single parameter vector and back.
//!
//! For a network of shape `[s0, .., sn]` the vector holds, in order:
//! 1. every layer's weight matrix, row-major, `sum(s_i * s_{i+1})` entries;
//! 2. one activation selector per unit, `sum(s1..sn)` entries;
//! 3. one bias per unit, `sum(s1..sn)` entries.
//!
//! Activation selectors are continuous, the interval `[-1, 1]` is split evenly between the
//! catalog's entries and values outside of it clamp to the first or last one.

use crate::{
    MlErr, Result,
    arch::{
        Network, Samples,
        activations::{ActFn, CATALOG},
        validate_shape,
    },
};

/// Returns the length of the parameter vector of a network with the given shape.
pub fn dimensions(shape: &[usize]) -> usize {
    2 * units(shape) + weights(shape)
}

fn units(shape: &[usize]) -> usize {
    shape.iter().skip(1).sum()
}

fn weights(shape: &[usize]) -> usize {
    shape.windows(2).map(|dim| dim[0] * dim[1]).sum()
}

/// Maps an activation selector to a catalog entry, `NaN` maps to the first one.
pub fn act_fn_from_scalar(a: f32) -> ActFn {
    let k = CATALOG.len() as f32;
    let index = ((a + 1.) / 2. * k).floor().clamp(0., k - 1.) as usize;
    CATALOG[index]
}

/// Maps a catalog entry to the center of its selector interval, `None` for `Identity`.
pub fn act_fn_to_scalar(act_fn: ActFn) -> Option<f32> {
    let k = CATALOG.len() as f32;
    act_fn.index().map(|i| (2 * i + 1) as f32 / k - 1.)
}

/// Encodes networks of one shape into parameter vectors and decodes them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCodec {
    shape: Vec<usize>,
    weights: usize,
    units: usize,
}

impl ParamCodec {
    /// Creates a new `ParamCodec` for networks of `shape`.
    ///
    /// # Returns
    /// A `Configuration` error if the shape is not a valid network shape.
    pub fn new(shape: &[usize]) -> Result<Self> {
        validate_shape(shape)?;

        Ok(Self {
            shape: shape.to_vec(),
            weights: weights(shape),
            units: units(shape),
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the length of the parameter vectors this codec handles.
    pub fn dimensions(&self) -> usize {
        self.weights + 2 * self.units
    }

    /// Flattens `network` into a parameter vector.
    ///
    /// Units whose activation is not searchable (the output layer when output activations are
    /// disabled) are encoded as `0`.
    ///
    /// # Returns
    /// An error if the network has another shape or a searchable unit uses `Identity`.
    pub fn encode(&self, network: &Network) -> Result<Vec<f32>> {
        self.check_network(network)?;

        let mut params = Vec::with_capacity(self.dimensions());
        let searchable = searchable_layers(network);

        for layer in network.layers() {
            params.extend(layer.weights().iter());
        }

        for (i, layer) in network.layers().iter().enumerate() {
            if i >= searchable {
                params.extend(std::iter::repeat_n(0., layer.act_fns().len()));
                continue;
            }

            for (unit, &act_fn) in layer.act_fns().iter().enumerate() {
                let a = act_fn_to_scalar(act_fn)
                    .ok_or(MlErr::UnencodableActFn { layer: i, unit })?;
                params.push(a);
            }
        }

        for layer in network.layers() {
            params.extend(layer.bias().iter());
        }

        Ok(params)
    }

    /// Writes the parameters of `params` into `network`.
    ///
    /// # Returns
    /// A `DimensionMismatch` error if `params` doesn't have exactly `dimensions` entries, or a
    /// `ShapeMismatch` error if the network has another shape. The network is untouched on error.
    pub fn decode(&self, network: &mut Network, params: &[f32]) -> Result<()> {
        self.check_network(network)?;

        if params.len() != self.dimensions() {
            return Err(MlErr::DimensionMismatch {
                what: "parameter vector",
                got: params.len(),
                expected: self.dimensions(),
            });
        }

        let searchable = searchable_layers(network);
        let (mut weights, rest) = params.split_at(self.weights);
        let (mut act_fns, mut biases) = rest.split_at(self.units);

        for (i, layer) in network.layers_mut().iter_mut().enumerate() {
            let (units_in, units_out) = layer.dim();

            let (w, rest) = weights.split_at(units_in * units_out);
            weights = rest;
            let (a, rest) = act_fns.split_at(units_out);
            act_fns = rest;
            let (b, rest) = biases.split_at(units_out);
            biases = rest;

            layer
                .weights_mut()
                .iter_mut()
                .zip(w)
                .for_each(|(dst, &src)| *dst = src);

            layer
                .bias_mut()
                .iter_mut()
                .zip(b)
                .for_each(|(dst, &src)| *dst = src);

            if i < searchable {
                layer
                    .act_fns_mut()
                    .iter_mut()
                    .zip(a)
                    .for_each(|(dst, &src)| *dst = act_fn_from_scalar(src));
            }
        }

        Ok(())
    }

    /// Scores a parameter vector without touching shared state: `template` is cloned, `params`
    /// is decoded into the copy and the copy is evaluated over `x` and `y`.
    pub fn evaluate_params<'a, 'b>(
        &self,
        template: &Network,
        params: &[f32],
        x: impl Into<Samples<'a>>,
        y: impl Into<Samples<'b>>,
    ) -> Result<f32> {
        let mut network = template.clone();
        self.decode(&mut network, params)?;
        network.evaluate(x, y)
    }

    fn check_network(&self, network: &Network) -> Result<()> {
        let shape = network.shape();

        if shape.len() != self.shape.len() {
            return Err(MlErr::ShapeMismatch {
                what: "network layers",
                got: shape.len(),
                expected: self.shape.len(),
                index: None,
            });
        }

        let mismatch = shape.iter().zip(&self.shape).position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            return Err(MlErr::ShapeMismatch {
                what: "network layer units",
                got: shape[i],
                expected: self.shape[i],
                index: Some(i),
            });
        }

        Ok(())
    }
}

/// Returns how many leading layers have searchable activation functions.
fn searchable_layers(network: &Network) -> usize {
    let n = network.layers().len();
    if network.output_activation() { n } else { n - 1 }
}
