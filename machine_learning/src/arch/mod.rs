pub mod activations;
pub mod layers;
pub mod loss;
mod network;
mod samples;

pub use network::Network;
pub(crate) use network::validate_shape;
pub use samples::Samples;
