use std::{fs, path::Path};

use log::{debug, warn};
use ndarray::{Array2, s};

use super::{DataErr, Dataset};

/// Loads every dataset file of a directory, ordered by file name.
///
/// Entries that aren't regular files are skipped.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<Dataset>, DataErr> {
    let dir = dir.as_ref();
    let io_err = |source| DataErr::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();

        if !path.is_file() {
            warn!("skipping {}, not a regular file", path.display());
            continue;
        }

        paths.push(path);
    }

    paths.sort();
    paths.iter().map(load_file).collect()
}

/// Loads a single dataset file.
///
/// The first character of the file name is the amount of input columns, every other column
/// is a target. The dataset is named after the file stem.
pub fn load_file(path: impl AsRef<Path>) -> Result<Dataset, DataErr> {
    let path = path.as_ref();

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let x_size = file_name
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|&n| n > 0)
        .ok_or_else(|| DataErr::MalformedName(file_name.clone()))? as usize;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or(file_name);

    let content = fs::read_to_string(path).map_err(|source| DataErr::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse(name, &content, x_size)?;
    debug!(
        "loaded dataset {} with {} samples from {}",
        dataset.name(),
        dataset.len(),
        path.display()
    );

    Ok(dataset)
}

/// Parses whitespace separated rows, the first `x_size` columns of each row are the inputs.
///
/// Blank lines are ignored, line numbers in errors start at 1.
pub fn parse(name: impl Into<String>, content: &str, x_size: usize) -> Result<Dataset, DataErr> {
    let name = name.into();
    let mut data = Vec::new();
    let mut columns = None;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|v| {
                v.parse::<f32>().map_err(|_| DataErr::Parse {
                    name: name.clone(),
                    line: i + 1,
                    value: v.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expected = *columns.get_or_insert(values.len());
        if values.len() != expected {
            return Err(DataErr::Ragged {
                name,
                line: i + 1,
                got: values.len(),
                expected,
            });
        }

        data.extend(values);
    }

    let Some(columns) = columns else {
        return Err(DataErr::Empty(name));
    };

    if columns <= x_size {
        return Err(DataErr::NoTargets { name, columns });
    }

    let rows = data.len() / columns;
    let full = Array2::from_shape_vec((rows, columns), data).map_err(|_| DataErr::Ragged {
        name: name.clone(),
        line: rows,
        got: columns,
        expected: columns,
    })?;

    let x = full.slice(s![.., ..x_size]).to_owned();
    let y = full.slice(s![.., x_size..]).to_owned();

    Dataset::new(name, x, y)
}
