use rand::{SeedableRng, rngs::StdRng};
use swarm::PsoConfig;

use super::PsoTrainer;
use crate::Result;

/// Builds `PsoTrainer`s given a swarm configuration and an optional seed.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `PsoTrainer`.
    ///
    /// # Arguments
    /// * `config` - The swarm configuration used on every training.
    /// * `seed` - The seed of the trainer's random number generator, if `None` the generator
    ///   is seeded from the os.
    ///
    /// # Returns
    /// A `Swarm` error if the configuration is invalid.
    pub fn build(&self, config: PsoConfig, seed: Option<u64>) -> Result<PsoTrainer<StdRng>> {
        config.validate()?;
        Ok(PsoTrainer::new(config, self.generate_rng(seed)))
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
