use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used when building a swarm.
pub type Result<T> = std::result::Result<T, SwarmErr>;

/// Errors raised while validating a swarm's configuration.
///
/// A running swarm never fails on its own, every runtime error comes from the fitness function.
#[derive(Debug, Clone, PartialEq)]
pub enum SwarmErr {
    NoDimensions,
    InvalidBounds(String),
    InvalidVelocityLimit(f32),
    InvalidCoefficient { name: &'static str, value: f32 },
}

impl From<UniformError> for SwarmErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidBounds(value.to_string())
    }
}

impl Display for SwarmErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwarmErr::NoDimensions => write!(f, "the search space must have at least one dimension"),
            SwarmErr::InvalidBounds(e) => write!(f, "invalid position bounds: {e}"),
            SwarmErr::InvalidVelocityLimit(max) => {
                write!(f, "the velocity limit must be positive and finite, got {max}")
            }
            SwarmErr::InvalidCoefficient { name, value } => {
                write!(f, "the {name} coefficient must be finite, got {value}")
            }
        }
    }
}

impl Error for SwarmErr {}
