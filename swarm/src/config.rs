use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{Result, SwarmErr};

const PARTICLES: NonZeroUsize = NonZeroUsize::new(30).unwrap();
const EPOCHS: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// The hyperparameters of a particle swarm run.
///
/// The dimensionality of the search space is not part of the configuration, it's given by
/// whoever owns the fitness function when building the `Swarm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoConfig {
    /// How much of its previous velocity a particle keeps (`w`).
    pub inertia: f32,
    /// The pull towards the particle's own best position (`c1`).
    pub cognitive: f32,
    /// The pull towards the swarm's best position (`c2`).
    pub social: f32,
    /// The amount of particles in the swarm (`N`).
    pub particles: NonZeroUsize,
    /// The amount of epochs to run (`T`).
    pub epochs: NonZeroUsize,
    /// The inclusive `(low, high)` range initial positions are sampled from.
    pub bounds: (f32, f32),
    /// The maximum absolute velocity per dimension, unbounded if `None`.
    pub max_velocity: Option<f32>,
    /// Whether positions are clamped to `bounds` after each move.
    pub clamp_positions: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            inertia: 0.729,
            cognitive: 1.49445,
            social: 1.49445,
            particles: PARTICLES,
            epochs: EPOCHS,
            bounds: (-1., 1.),
            max_velocity: None,
            clamp_positions: false,
        }
    }
}

impl PsoConfig {
    /// Checks that every coefficient is usable.
    ///
    /// # Returns
    /// An error describing the first invalid field, if any.
    pub fn validate(&self) -> Result<()> {
        let coefficients = [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ];

        for (name, value) in coefficients {
            if !value.is_finite() {
                return Err(SwarmErr::InvalidCoefficient { name, value });
            }
        }

        let (low, high) = self.bounds;
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(SwarmErr::InvalidBounds(format!("[{low}, {high}]")));
        }

        if let Some(max) = self.max_velocity {
            if !max.is_finite() || max <= 0. {
                return Err(SwarmErr::InvalidVelocityLimit(max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_their_defaults() {
        let config: PsoConfig = serde_json::from_str(r#"{ "particles": 8 }"#).unwrap();

        assert_eq!(config.particles.get(), 8);
        assert_eq!(config.epochs, EPOCHS);
        assert_eq!(config.bounds, (-1., 1.));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_particles_is_rejected_while_parsing() {
        let res = serde_json::from_str::<PsoConfig>(r#"{ "particles": 0 }"#);
        assert!(res.is_err());
    }

    #[test]
    fn reversed_bounds_are_invalid() {
        let config = PsoConfig {
            bounds: (1., -1.),
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(SwarmErr::InvalidBounds(_))));
    }

    #[test]
    fn non_positive_velocity_limit_is_invalid() {
        let config = PsoConfig {
            max_velocity: Some(0.),
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(SwarmErr::InvalidVelocityLimit(0.)));
    }

    #[test]
    fn nan_inertia_is_invalid() {
        let config = PsoConfig {
            inertia: f32::NAN,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(SwarmErr::InvalidCoefficient { name: "inertia", .. })
        ));
    }
}
