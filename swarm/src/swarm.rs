use log::{debug, info};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;

use crate::{Particle, PsoConfig, Result, SwarmErr};

/// A position together with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Best {
    pub position: Vec<f32>,
    pub value: f32,
}

/// The swarm's global best after each epoch, in epoch order.
pub type History = Vec<Best>;

/// A particle swarm minimizing an opaque fitness function.
///
/// The swarm only knows the dimensionality of the search space, what a position means is up to
/// the fitness function.
///
/// The global best follows batch semantics: during an epoch every particle moves against the
/// global best as it was when the epoch started, and it's only replaced once all the particles
/// were evaluated, by the lowest personal best if it's strictly better (the lowest index wins
/// ties). Random numbers are always drawn sequentially, so sequential and parallel runs over the
/// same generator produce the same history.
pub struct Swarm<R: Rng> {
    config: PsoConfig,
    particles: Vec<Particle>,
    global_best: Best,
    initialized: bool,
    epoch: usize,
    rng: R,
}

impl<R: Rng> Swarm<R> {
    /// Creates a new `Swarm` with its particles scattered uniformly within the configured bounds.
    ///
    /// # Arguments
    /// * `dimensions` - The dimensionality of the search space.
    /// * `config` - The swarm's hyperparameters.
    /// * `rng` - The random number generator driving the whole run.
    ///
    /// # Returns
    /// An error if the configuration is invalid or there are no dimensions.
    pub fn new(dimensions: usize, config: PsoConfig, mut rng: R) -> Result<Self> {
        if dimensions == 0 {
            return Err(SwarmErr::NoDimensions);
        }

        config.validate()?;

        let (low, high) = config.bounds;
        let distribution = Uniform::new_inclusive(low, high)?;

        let particles: Vec<_> = (0..config.particles.get())
            .map(|_| {
                let position = (0..dimensions)
                    .map(|_| distribution.sample(&mut rng))
                    .collect();

                Particle::new(position)
            })
            .collect();

        let global_best = Best {
            position: particles[0].position().to_vec(),
            value: f32::INFINITY,
        };

        Ok(Self {
            config,
            particles,
            global_best,
            initialized: false,
            epoch: 0,
            rng,
        })
    }

    /// Returns the dimensionality of the search space.
    pub fn dimensions(&self) -> usize {
        self.global_best.position.len()
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The best position found so far by any particle.
    pub fn global_best(&self) -> &Best {
        &self.global_best
    }

    /// The amount of epochs run so far.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Runs the configured amount of epochs, evaluating one particle at a time.
    ///
    /// The first call also evaluates the initial positions to seed the personal and global
    /// bests, later calls resume from where the previous one stopped.
    ///
    /// # Arguments
    /// * `fitness` - The function to minimize.
    ///
    /// # Returns
    /// The global best after each epoch, or the first error returned by `fitness`, which aborts
    /// the run.
    pub fn run<F, E>(&mut self, mut fitness: F) -> std::result::Result<History, E>
    where
        F: FnMut(&[f32]) -> std::result::Result<f32, E>,
    {
        self.drive(|particles| particles.iter().map(|p| fitness(p.position())).collect())
    }

    /// Same as `run` but evaluates the particles of each epoch in parallel.
    ///
    /// The end of each epoch is the synchronization point, the global best is updated only after
    /// every evaluation of the epoch finished.
    pub fn run_par<F, E>(&mut self, fitness: F) -> std::result::Result<History, E>
    where
        F: Fn(&[f32]) -> std::result::Result<f32, E> + Sync,
        E: Send,
    {
        self.drive(|particles| {
            particles
                .par_iter()
                .map(|p| fitness(p.position()))
                .collect()
        })
    }

    fn drive<G, E>(&mut self, mut evaluate: G) -> std::result::Result<History, E>
    where
        G: FnMut(&[Particle]) -> std::result::Result<Vec<f32>, E>,
    {
        if !self.initialized {
            let values = evaluate(&self.particles)?;
            self.observe(&values);
            self.initialized = true;
            debug!(value = self.global_best.value; "initial global best");
        }

        let epochs = self.config.epochs.get();
        let mut history = Vec::with_capacity(epochs);

        for _ in 0..epochs {
            let Self {
                config,
                particles,
                global_best,
                rng,
                ..
            } = self;

            for particle in particles.iter_mut() {
                particle.step(&global_best.position, config, rng);
            }

            let values = evaluate(&self.particles)?;
            self.observe(&values);
            self.epoch += 1;

            debug!(epoch = self.epoch, value = self.global_best.value; "epoch finished");
            history.push(self.global_best.clone());
        }

        info!(
            "swarm of {} particles finished after {} epochs, best value {}",
            self.particles.len(),
            self.epoch,
            self.global_best.value
        );

        Ok(history)
    }

    /// Feeds one fitness value per particle, updating the personal bests and then the global
    /// best.
    fn observe(&mut self, values: &[f32]) {
        for (particle, &value) in self.particles.iter_mut().zip(values) {
            particle.observe(value);
        }

        let mut candidate: Option<&Particle> = None;
        for particle in &self.particles {
            let best = candidate.map_or(self.global_best.value, |p| p.best_value());
            if particle.best_value() < best {
                candidate = Some(particle);
            }
        }

        if let Some(particle) = candidate {
            self.global_best.value = particle.best_value();
            self.global_best
                .position
                .copy_from_slice(particle.best_position());
        }
    }
}
