use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// Errors produced while loading datasets.
#[derive(Debug)]
pub enum DataErr {
    /// The file or directory couldn't be read.
    Io { path: PathBuf, source: io::Error },
    /// A value couldn't be parsed as a number.
    Parse {
        name: String,
        line: usize,
        value: String,
    },
    /// A row has a different amount of columns than the first one.
    Ragged {
        name: String,
        line: usize,
        got: usize,
        expected: usize,
    },
    /// The file name doesn't start with the amount of input columns.
    MalformedName(String),
    /// The rows don't have a single target column after the inputs.
    NoTargets { name: String, columns: usize },
    /// The file has no rows.
    Empty(String),
    /// Inputs and targets have a different amount of rows.
    RowMismatch { inputs: usize, targets: usize },
}

impl Display for DataErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataErr::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            DataErr::Parse { name, line, value } => {
                write!(f, "dataset {name} line {line}: cannot parse '{value}' as f32")
            }
            DataErr::Ragged {
                name,
                line,
                got,
                expected,
            } => write!(
                f,
                "dataset {name} line {line}: expected {expected} values, got {got}"
            ),
            DataErr::MalformedName(name) => write!(
                f,
                "dataset file '{name}' must start with its amount of input columns"
            ),
            DataErr::NoTargets { name, columns } => write!(
                f,
                "dataset {name} has {columns} columns, none of them left for targets"
            ),
            DataErr::Empty(name) => write!(f, "dataset {name} is empty"),
            DataErr::RowMismatch { inputs, targets } => write!(
                f,
                "inputs have {inputs} rows but targets have {targets}"
            ),
        }
    }
}

impl Error for DataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataErr::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
