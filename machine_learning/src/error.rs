use std::{
    error::Error,
    fmt::{self, Display},
};

use swarm::SwarmErr;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// The network can't be built as requested.
    Configuration(String),
    /// The swarm's configuration is invalid.
    Swarm(SwarmErr),
    /// A vector or structure disagrees with the shape of the network.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
        index: Option<usize>,
    },
    /// Two collections that must have the same length don't.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A searchable unit holds an activation outside the catalog.
    UnencodableActFn { layer: usize, unit: usize },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            MlErr::Swarm(e) => write!(f, "invalid swarm configuration: {e}"),
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
                index: Some(i),
            } => write!(
                f,
                "shape mismatch for {what} at position {i}: got {got}, expected {expected}"
            ),
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
                index: None,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            MlErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            MlErr::UnencodableActFn { layer, unit } => write!(
                f,
                "the activation of unit {unit} in layer {layer} is not part of the catalog"
            ),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Swarm(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SwarmErr> for MlErr {
    fn from(value: SwarmErr) -> Self {
        Self::Swarm(value)
    }
}
