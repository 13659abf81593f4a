//! Error types for loading and normalizing ride data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A required column is absent after header normalization. Fatal at startup.
    #[error("missing required field `{0}` in ride data")]
    MissingField(String),

    #[error("unknown rider selection `{0}` (expected all, casual, member or compare-both)")]
    UnknownRiderSelection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
