use std::{fs, num::NonZeroUsize};

use machine_learning::dataset;
use particle_net::{config::RunSpec, runner};
use swarm::PsoConfig;

fn spec(shape: &[usize], parallel: bool) -> RunSpec {
    RunSpec {
        shape: shape.to_vec(),
        seed: Some(42),
        parallel,
        pso: PsoConfig {
            particles: NonZeroUsize::new(10).unwrap(),
            epochs: NonZeroUsize::new(15).unwrap(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn datasets_with_other_widths_are_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("1linear.txt"), "-1 -1\n0 0\n1 1\n").unwrap();
    fs::write(dir.path().join("2xor.txt"), "0 0 0\n0 1 1\n1 0 1\n1 1 0\n").unwrap();

    let datasets = dataset::load_dir(dir.path()).unwrap();
    let reports = runner::run(&spec(&[2, 3, 1], false), &datasets).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].dataset, "2xor");
    assert_eq!(reports[0].history.len(), 15);

    let (x, prediction, y) = reports[0].sample.clone().unwrap();
    assert_eq!(x.to_vec(), [0f32, 0.]);
    assert_eq!(prediction.len(), 1);
    assert_eq!(y.to_vec(), [0f32]);
}

#[test]
fn seeded_runs_are_reproducible() {
    let datasets = [dataset::linear(9), dataset::cubic(9)];

    let a = runner::run(&spec(&[1, 3, 1], false), &datasets).unwrap();
    let b = runner::run(&spec(&[1, 3, 1], false), &datasets).unwrap();
    let par = runner::run(&spec(&[1, 3, 1], true), &datasets).unwrap();

    assert_eq!(a.len(), 2);
    assert_eq!(a, b);
    assert_eq!(a, par);
}

#[test]
fn reports_print_one_line_per_epoch() {
    let reports = runner::run(&spec(&[2, 2, 1], false), &[dataset::xor()]).unwrap();
    let printed = reports[0].to_string();

    assert!(printed.starts_with("dataset xor\n"));
    assert_eq!(printed.lines().filter(|l| l.contains("epoch")).count(), 15);
    assert!(printed.contains("sample"));
}
