use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use swarm::PsoConfig;

/// Everything a training run needs besides its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSpec {
    /// The amount of units per layer, input layer included.
    pub shape: Vec<usize>,
    /// Whether the output layer's activation functions are searched too.
    pub output_activation: bool,
    /// Seeds both network construction and the swarm, random if `None`.
    pub seed: Option<u64>,
    /// Whether particles are evaluated in parallel.
    pub parallel: bool,
    pub pso: PsoConfig,
}

impl Default for RunSpec {
    fn default() -> Self {
        Self {
            shape: vec![1, 3, 1],
            output_activation: false,
            seed: None,
            parallel: false,
            pso: PsoConfig::default(),
        }
    }
}

impl RunSpec {
    /// Reads a spec from a json file, missing fields take their default value.
    ///
    /// # Arguments
    /// * `path` - The spec file, the default spec is returned if `None`.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read spec '{}'", path.display()))?;

        Self::from_json(&content).with_context(|| format!("invalid spec '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(content)?;
        spec.pso.validate()?;
        Ok(spec)
    }

    /// Replaces the shape with one given as comma separated layer sizes, e.g. `1,3,1`.
    pub fn with_shape(mut self, shape: Option<&str>) -> Result<Self> {
        if let Some(shape) = shape {
            self.shape = parse_shape(shape)?;
        }

        Ok(self)
    }
}

/// Parses comma separated layer sizes.
pub fn parse_shape(shape: &str) -> Result<Vec<usize>> {
    let shape = shape
        .split(',')
        .map(|units| {
            units
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid layer size '{units}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    if shape.len() < 2 {
        bail!("a shape needs at least an input and an output layer, got {shape:?}");
    }

    Ok(shape)
}
