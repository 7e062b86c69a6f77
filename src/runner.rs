use std::fmt::{self, Display};

use anyhow::{Context, Result};
use log::{info, warn};
use machine_learning::{arch::Network, dataset::Dataset, training::TrainerBuilder};
use ndarray::Array1;
use swarm::History;

use crate::config::RunSpec;

/// The outcome of training a network on one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub dataset: String,
    pub history: History,
    /// The first sample's input, the trained network's prediction for it and its target.
    pub sample: Option<(Array1<f32>, Array1<f32>, Array1<f32>)>,
}

/// Trains a fresh network on every dataset whose widths fit the spec's shape.
///
/// A single generator seeded from the spec builds every network and drives every swarm, in
/// dataset order. Datasets that don't fit the shape are skipped.
pub fn run(spec: &RunSpec, datasets: &[Dataset]) -> Result<Vec<Report>> {
    let mut trainer = TrainerBuilder::new().build(spec.pso.clone(), spec.seed)?;

    let (Some(&units_in), Some(&units_out)) = (spec.shape.first(), spec.shape.last()) else {
        anyhow::bail!("the shape has no layers");
    };

    let mut reports = Vec::with_capacity(datasets.len());

    for dataset in datasets {
        if dataset.x_size() != units_in || dataset.y_size() != units_out {
            warn!(
                "skipping dataset {}, it has {} inputs and {} targets but the shape is {:?}",
                dataset.name(),
                dataset.x_size(),
                dataset.y_size(),
                spec.shape
            );
            continue;
        }

        info!("training on dataset {}", dataset.name());

        let mut network = Network::new(&spec.shape, trainer.rng(), spec.output_activation)?;
        let history = if spec.parallel {
            trainer.train_par(&mut network, dataset.x(), dataset.y())
        } else {
            trainer.train(&mut network, dataset.x(), dataset.y())
        }
        .with_context(|| format!("training on dataset {}", dataset.name()))?;

        let sample = match dataset.x().rows().into_iter().next() {
            Some(x) => {
                let prediction = network.forward(x)?;
                Some((x.to_owned(), prediction, dataset.y().row(0).to_owned()))
            }
            None => None,
        };

        reports.push(Report {
            dataset: dataset.name().to_string(),
            history,
            sample,
        });
    }

    Ok(reports)
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dataset {}", self.dataset)?;

        for (epoch, best) in self.history.iter().enumerate() {
            writeln!(f, "  epoch {:>4}: {}", epoch + 1, best.value)?;
        }

        if let Some((x, prediction, y)) = &self.sample {
            writeln!(f, "  sample {x} -> {prediction} (expected {y})")?;
        }

        Ok(())
    }
}
