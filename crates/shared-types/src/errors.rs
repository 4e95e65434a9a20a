//! Error types shared by the chart crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures the chart pipeline can report
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum ChartError {
    #[error("Series must be an array, got {found}")]
    MalformedSeries { found: String },

    #[error("Surface #{id} has no container to hide")]
    MissingContainer { id: String },

    #[error("Chart construction failed: {message}")]
    Construction { message: String },

    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization {
            message: err.to_string(),
        }
    }
}
