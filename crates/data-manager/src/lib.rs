//! Data Manager crate for the dashboard series chart
//! Turns integration request records into the monthly series the chart
//! plots, caches it, and embeds it into the admin page.

pub mod aggregation;
pub mod cache;
pub mod embed;
pub mod records;
pub mod store;

pub use aggregation::aggregate_monthly;
pub use cache::SeriesCache;
pub use embed::embed_script;
pub use records::{RequestRecord, RequestStatus};
pub use store::{RecordSource, SeriesStore};

/// Errors raised while computing or embedding a series
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Record source failed: {0}")]
    Source(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Invalid label format {format:?}")]
    LabelFormat { format: String },

    #[error("Invalid page global name {0:?}")]
    InvalidGlobal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DataResult<T> = Result<T, DataError>;
