use thiserror::Error;

/// Convenience result type used across loading, derivation, filtering and aggregation.
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Error type returned by every fallible operation in this crate.
///
/// Loading failures (`Io`, `Csv`, `SchemaMismatch`, `ParseError`) come from the record loader;
/// `MalformedTimestamp` from the deriver; `EmptyResultSet`, `UnsupportedColumn` and
/// `UnknownCode` from aggregation; `RetriesExhausted` and `InputClosed` from the interactive
/// session.
#[derive(Debug, Error)]
pub enum BikeshareError {
    /// Underlying I/O error (e.g. dataset file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error (report output).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset does not carry a required column.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A cell could not be parsed into the type its column requires.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A record's start time does not encode a valid calendar date and hour.
    #[error("malformed timestamp in record {row}: {message} (raw='{raw}')")]
    MalformedTimestamp {
        row: usize,
        raw: String,
        message: String,
    },

    /// An aggregation that needs a maximum, sum or mean was given no values.
    #[error("no records to summarize for '{aggregation}'")]
    EmptyResultSet { aggregation: &'static str },

    /// A demographic aggregation was requested on a dataset without that column.
    #[error("dataset has no '{column}' column")]
    UnsupportedColumn { column: &'static str },

    /// A derived code has no entry in its name table (e.g. month "13").
    #[error("unknown {field} code '{code}'")]
    UnknownCode { field: &'static str, code: String },

    /// The user kept answering a prompt with invalid input.
    #[error("no valid answer to '{prompt}' after {attempts} attempts")]
    RetriesExhausted { prompt: String, attempts: usize },

    /// The input source reached end of input while a prompt was pending.
    #[error("input closed while waiting for '{prompt}'")]
    InputClosed { prompt: String },
}

impl BikeshareError {
    /// Whether the caller can recover by choosing different input (another filter or city).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyResultSet { .. } | Self::UnsupportedColumn { .. }
        )
    }
}
