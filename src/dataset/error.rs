use std::{error::Error, fmt, io};

use ndarray::ShapeError;

/// The dataset module's result type.
pub type Result<T> = std::result::Result<T, DataErr>;

/// Errors produced while reading, validating or writing datasets.
#[derive(Debug)]
pub enum DataErr {
    Io(io::Error),
    Csv(csv::Error),
    Shape(ShapeError),
    /// A field could not be parsed as a number.
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
    /// The label column does not hold a non-negative integer.
    InvalidLabel { row: usize, value: f32 },
    /// A row has a different amount of columns than the first one.
    RowWidth {
        row: usize,
        got: usize,
        expected: usize,
    },
    /// The amount of labels and feature rows differ.
    LengthMismatch { labels: usize, rows: usize },
    /// There are no data rows, or no feature columns.
    Empty,
}

impl fmt::Display for DataErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataErr::Io(e) => write!(f, "io error: {e}"),
            DataErr::Csv(e) => write!(f, "csv error: {e}"),
            DataErr::Shape(e) => write!(f, "shape error: {e}"),
            DataErr::Parse { row, column, value } => {
                write!(f, "row {row}, column {column}: cannot parse '{value}' as a number")
            }
            DataErr::InvalidLabel { row, value } => {
                write!(f, "row {row}: the label {value} is not a non-negative integer")
            }
            DataErr::RowWidth { row, got, expected } => {
                write!(f, "row {row}: expected {expected} columns, got {got}")
            }
            DataErr::LengthMismatch { labels, rows } => {
                write!(f, "there are {labels} labels for {rows} rows")
            }
            DataErr::Empty => write!(f, "the dataset is empty"),
        }
    }
}

impl Error for DataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataErr::Io(e) => Some(e),
            DataErr::Csv(e) => Some(e),
            DataErr::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DataErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<ShapeError> for DataErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}
