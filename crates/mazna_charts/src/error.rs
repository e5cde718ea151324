//! Error types for the chart engine.

use thiserror::Error;

/// Chart engine errors.
///
/// Backend failures never surface here; [`crate::fallback::load_entries`]
/// turns them into placeholder data.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid reading: {value} is not a finite, non-negative number")]
    InvalidReading { value: f64 },

    #[error("Invalid threshold table: {0}")]
    InvalidThresholds(String),
}

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
