use log::info;
use rand::Rng;
use swarm::{History, PsoConfig, Swarm};

use crate::{
    Result,
    arch::{Network, Samples},
    codec::ParamCodec,
};

/// Trains networks by searching their flattened parameters with a particle swarm.
///
/// Every particle position is a full parameter vector: weights, activation selectors and
/// biases. Its fitness is the error of the network it decodes to over the training samples.
pub struct PsoTrainer<R: Rng> {
    config: PsoConfig,
    rng: R,
}

impl<R: Rng> PsoTrainer<R> {
    /// Creates a new `PsoTrainer`.
    ///
    /// # Arguments
    /// * `config` - The swarm configuration used on every training.
    /// * `rng` - The random number generator every swarm draws from.
    pub fn new(config: PsoConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// The trainer's random number generator, shared with whoever builds the networks so a
    /// single seed reproduces the whole run.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Trains `network` over the samples, evaluating one particle at a time.
    ///
    /// Each evaluation decodes the particle into `network` itself. Once the swarm finishes the
    /// best position found is decoded into it one last time.
    ///
    /// # Returns
    /// The global best of every epoch, or the first error raised while evaluating.
    pub fn train<'a, 'b>(
        &mut self,
        network: &mut Network,
        x: impl Into<Samples<'a>>,
        y: impl Into<Samples<'b>>,
    ) -> Result<History> {
        let (x, y) = (x.into(), y.into());
        let codec = ParamCodec::new(network.shape())?;
        let mut swarm = self.swarm(&codec)?;

        let history = swarm.run(|params| -> Result<f32> {
            codec.decode(network, params)?;
            network.evaluate(x, y)
        })?;

        commit(&codec, network, &history)?;
        Ok(history)
    }

    /// Same as `train`, evaluating the particles of each epoch in parallel.
    ///
    /// Every evaluation decodes into its own copy of `network`, so the history is the same
    /// `train` would return for the same generator state.
    pub fn train_par<'a, 'b>(
        &mut self,
        network: &mut Network,
        x: impl Into<Samples<'a>>,
        y: impl Into<Samples<'b>>,
    ) -> Result<History> {
        let (x, y) = (x.into(), y.into());
        let codec = ParamCodec::new(network.shape())?;
        let mut swarm = self.swarm(&codec)?;

        let template = network.clone();
        let history = swarm.run_par(|params| codec.evaluate_params(&template, params, x, y))?;

        commit(&codec, network, &history)?;
        Ok(history)
    }

    fn swarm(&mut self, codec: &ParamCodec) -> Result<Swarm<&mut R>> {
        let dimensions = codec.dimensions();
        info!(
            dimensions = dimensions;
            "training network with shape {:?}, {} particles for {} epochs",
            codec.shape(),
            self.config.particles,
            self.config.epochs
        );

        let swarm = Swarm::new(dimensions, self.config.clone(), &mut self.rng)?;
        Ok(swarm)
    }
}

/// Decodes the final global best into `network`.
fn commit(codec: &ParamCodec, network: &mut Network, history: &History) -> Result<()> {
    if let Some(best) = history.last() {
        codec.decode(network, &best.position)?;
        info!(error = best.value; "training finished");
    }

    Ok(())
}
