use rand::Rng;

use crate::PsoConfig;

/// A candidate solution moving through the search space.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec<f32>,
    velocity: Vec<f32>,
    best_position: Vec<f32>,
    best_value: f32,
}

impl Particle {
    /// Creates a new resting `Particle` at `position`.
    ///
    /// Its personal best is the starting position with an infinite value until the first
    /// evaluation is observed.
    pub(crate) fn new(position: Vec<f32>) -> Self {
        Self {
            velocity: vec![0.; position.len()],
            best_position: position.clone(),
            best_value: f32::INFINITY,
            position,
        }
    }

    /// The particle's current position.
    pub fn position(&self) -> &[f32] {
        &self.position
    }

    /// The particle's current velocity.
    pub fn velocity(&self) -> &[f32] {
        &self.velocity
    }

    /// The best position this particle has visited.
    pub fn best_position(&self) -> &[f32] {
        &self.best_position
    }

    /// The fitness of `best_position`.
    pub fn best_value(&self) -> f32 {
        self.best_value
    }

    /// Updates the velocity and moves the particle one step.
    ///
    /// Both random factors are drawn per dimension, `r1` before `r2`.
    ///
    /// # Arguments
    /// * `global_best` - The swarm's best position at the start of the epoch.
    /// * `config` - The swarm's hyperparameters.
    /// * `rng` - A random number generator.
    pub(crate) fn step<R: Rng>(&mut self, global_best: &[f32], config: &PsoConfig, rng: &mut R) {
        let &PsoConfig {
            inertia,
            cognitive,
            social,
            bounds: (low, high),
            max_velocity,
            clamp_positions,
            ..
        } = config;

        self.position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(self.best_position.iter().zip(global_best))
            .for_each(|((x, v), (pb, gb))| {
                let r1: f32 = rng.random();
                let r2: f32 = rng.random();

                *v = inertia * *v + cognitive * r1 * (pb - *x) + social * r2 * (gb - *x);
                if let Some(max) = max_velocity {
                    *v = v.clamp(-max, max);
                }

                *x += *v;
                if clamp_positions {
                    *x = x.clamp(low, high);
                }
            });
    }

    /// Records the fitness of the current position.
    ///
    /// # Returns
    /// Whether it improved the particle's personal best. Only strictly lower values do, so `NaN`
    /// never becomes a personal best.
    pub(crate) fn observe(&mut self, value: f32) -> bool {
        if value < self.best_value {
            self.best_value = value;
            self.best_position.copy_from_slice(&self.position);
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn first_observation_sets_personal_best() {
        let mut particle = Particle::new(vec![0.5, -0.5]);

        assert!(particle.observe(3.));
        assert_eq!(particle.best_value(), 3.);
        assert_eq!(particle.best_position(), [0.5, -0.5]);
    }

    #[test]
    fn worse_or_nan_values_keep_personal_best() {
        let mut particle = Particle::new(vec![1.]);
        particle.observe(2.);

        assert!(!particle.observe(2.));
        assert!(!particle.observe(5.));
        assert!(!particle.observe(f32::NAN));
        assert_eq!(particle.best_value(), 2.);
    }

    #[test]
    fn particle_at_both_bests_keeps_still() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut particle = Particle::new(vec![0.25, 0.75]);
        particle.observe(1.);

        let config = PsoConfig::default();
        particle.step(&[0.25, 0.75], &config, &mut rng);

        assert_eq!(particle.velocity(), [0., 0.]);
        assert_eq!(particle.position(), [0.25, 0.75]);
    }

    #[test]
    fn particle_moves_towards_global_best() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut particle = Particle::new(vec![0.]);
        particle.observe(1.);

        let config = PsoConfig {
            cognitive: 0.,
            ..Default::default()
        };
        particle.step(&[1.], &config, &mut rng);

        assert!(particle.velocity()[0] >= 0.);
        assert!(particle.position()[0] <= config.social);
    }

    #[test]
    fn velocity_and_position_limits_apply() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut particle = Particle::new(vec![0.]);
        particle.observe(1.);

        let config = PsoConfig {
            inertia: 0.,
            cognitive: 0.,
            social: 100.,
            bounds: (-0.5, 0.5),
            max_velocity: Some(2.),
            clamp_positions: true,
            ..Default::default()
        };

        for _ in 0..10 {
            particle.step(&[50.], &config, &mut rng);
            assert!(particle.velocity()[0].abs() <= 2.);
            assert!((-0.5..=0.5).contains(&particle.position()[0]));
        }
    }
}
