//! Benchmark target functions sampled into datasets.

use ndarray::{Array, Array2, Axis};

use super::Dataset;

/// `y = x` sampled at `n` evenly spaced points of `[-1, 1]`.
pub fn linear(n: usize) -> Dataset {
    sample_1d("linear", n, |x| x)
}

/// `y = x³` sampled at `n` evenly spaced points of `[-1, 1]`.
pub fn cubic(n: usize) -> Dataset {
    sample_1d("cubic", n, |x| x.powi(3))
}

/// The two bit exclusive or truth table.
pub fn xor() -> Dataset {
    let x = ndarray::array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
    let y = ndarray::array![[0.], [1.], [1.], [0.]];

    Dataset {
        name: "xor".to_string(),
        x,
        y,
    }
}

/// `1.9 (1.35 + e^(x1 - x2) sin(13 (x1 - 0.6)²) sin(7 x2))` sampled on an `n` by `n` grid of
/// `[0, 1]²`.
pub fn complex(n: usize) -> Dataset {
    let axis = Array::linspace(0., 1., n);
    let mut x = Array2::zeros((n * n, 2));
    let mut y = Array2::zeros((n * n, 1));

    let grid = axis.iter().flat_map(|&x1| axis.iter().map(move |&x2| (x1, x2)));
    for (i, (x1, x2)) in grid.enumerate() {
        x[[i, 0]] = x1;
        x[[i, 1]] = x2;
        y[[i, 0]] = complex_fn(x1, x2);
    }

    Dataset {
        name: "complex".to_string(),
        x,
        y,
    }
}

fn complex_fn(x1: f32, x2: f32) -> f32 {
    1.9 * (1.35 + (x1 - x2).exp() * (13. * (x1 - 0.6).powi(2)).sin() * (7. * x2).sin())
}

fn sample_1d(name: &str, n: usize, f: impl Fn(f32) -> f32) -> Dataset {
    let x = Array::linspace(-1., 1., n);
    let y = x.mapv(f);

    Dataset {
        name: name.to_string(),
        x: x.insert_axis(Axis(1)),
        y: y.insert_axis(Axis(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_dimensional_targets() {
        let dataset = cubic(5);

        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.x_size(), 1);
        assert_eq!(dataset.x()[[0, 0]], -1.);
        assert_eq!(dataset.y()[[0, 0]], -1.);
        assert_eq!(dataset.y()[[3, 0]], 0.125);

        let dataset = linear(3);
        assert_eq!(dataset.x(), dataset.y());
    }

    #[test]
    fn xor_truth_table() {
        let dataset = xor();

        for (x, y) in dataset.x().rows().into_iter().zip(dataset.y().rows()) {
            let expected = (x[0] as u8 ^ x[1] as u8) as f32;
            assert_eq!(y[0], expected);
        }
    }

    #[test]
    fn complex_covers_the_grid() {
        let dataset = complex(4);

        assert_eq!(dataset.len(), 16);
        assert_eq!(dataset.x_size(), 2);
        assert_eq!(dataset.x().row(5).to_vec(), [1f32 / 3., 1. / 3.]);
        assert!((dataset.y()[[0, 0]] - complex_fn(0., 0.)).abs() < 1e-6);
        assert!((complex_fn(0.6, 0.) - 2.565).abs() < 1e-5);
    }
}
