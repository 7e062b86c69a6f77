mod config;
mod error;
mod particle;
mod swarm;

pub use config::PsoConfig;
pub use error::{Result, SwarmErr};
pub use particle::Particle;
pub use swarm::{Best, History, Swarm};
