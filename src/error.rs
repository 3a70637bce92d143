use thiserror::Error;

use crate::types::DataRole;

/// Convenience result type for table loading and data view decoding.
pub type VisualResult<T> = Result<T, VisualError>;

/// Error type returned when loading host tables or decoding host payloads.
///
/// Missing fields and empty results are not errors: the visual reports them as placeholder
/// outcomes (see [`crate::visual::UpdateOutcome`]).
#[derive(Debug, Error)]
pub enum VisualError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV table error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON in a data view or update payload.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table header carries a role tag that is not a [`DataRole`], or an empty tag list.
    #[error("column '{column}' has an unknown role tag '{tag}'")]
    InvalidRoleTag { column: String, tag: String },

    /// A table has no column tagged with a role the chart cannot do without.
    #[error("table has no column tagged '{role}'")]
    MissingRole { role: DataRole },

    /// A value-side cell is not a number.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
