use rand::Rng;
use serde::{Deserialize, Serialize};

use ActFn::*;

/// An activation function a unit can apply to its weighted sum.
///
/// Every variant except `Identity` belongs to the searchable catalog, `Identity` is reserved for
/// output layers that must be able to produce any real value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFn {
    Zero,
    Sigmoid,
    Tanh,
    Cos,
    Gaussian,
    Identity,
}

/// The activation functions the search can choose from, in index order.
pub const CATALOG: [ActFn; 5] = [Zero, Sigmoid, Tanh, Cos, Gaussian];

impl ActFn {
    /// Returns the catalog entry at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        CATALOG.get(index).copied()
    }

    /// Returns the position of this function in the catalog, `None` for `Identity`.
    pub fn index(self) -> Option<usize> {
        CATALOG.iter().position(|&act_fn| act_fn == self)
    }

    /// Picks a catalog entry uniformly at random.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        CATALOG[rng.random_range(0..CATALOG.len())]
    }

    pub fn f(self, x: f32) -> f32 {
        match self {
            Zero => 0.,
            Sigmoid => 1. / (1. + (-x).exp()),
            Tanh => x.tanh(),
            Cos => x.cos(),
            Gaussian => (-(x * x) / 2.).exp(),
            Identity => x,
        }
    }
}
