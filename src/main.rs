use std::env;

use anyhow::{Context, Result, bail};
use log::info;
use machine_learning::dataset;
use particle_net::{config::RunSpec, runner};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(data_dir) = args.next() else {
        bail!("usage: particle-net <data_dir> [spec.json]");
    };

    let shape = env::var("SHAPE").ok();
    let spec = RunSpec::load(args.next())?.with_shape(shape.as_deref())?;
    info!("running with {spec:?}");

    let datasets = dataset::load_dir(&data_dir)
        .with_context(|| format!("cannot load datasets from '{data_dir}'"))?;
    info!("loaded {} datasets from {data_dir}", datasets.len());

    for report in runner::run(&spec, &datasets)? {
        print!("{report}");
    }

    Ok(())
}
