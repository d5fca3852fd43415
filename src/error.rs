//! Error types shared by the world-building pipeline.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, WorldError>;

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("row {row}: column '{column}' has invalid value '{value}': {reason}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid coordinate '{value}': {reason}")]
    InvalidCoordinate { value: String, reason: &'static str },

    #[error("row {row}: region '{name}' has zero population")]
    ZeroPopulation { row: usize, name: String },

    #[error("total daily passengers across all regions is zero; travel shares are undefined")]
    ZeroTotalPassengers,

    #[error("total {quantity} does not fit in 64 bits")]
    CountOverflow { quantity: &'static str },

    #[error("edge {left}-{right} references a node outside 0..{node_count}")]
    EdgeOutOfRange {
        left: usize,
        right: usize,
        node_count: usize,
    },

    #[error("{}: line {line}: {reason}", .path.display())]
    Series {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Sum counts, failing instead of wrapping.
pub fn checked_total(
    quantity: &'static str,
    values: impl IntoIterator<Item = u64>,
) -> Result<u64> {
    values
        .into_iter()
        .try_fold(0_u64, |total, value| total.checked_add(value))
        .ok_or(WorldError::CountOverflow { quantity })
}

impl WorldError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorldError::Io {
            path: path.into(),
            source,
        }
    }
}
