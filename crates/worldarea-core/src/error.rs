// crates/worldarea-core/src/error.rs
use thiserror::Error;

/// Every failure the pipeline can hit.
///
/// Nothing is retried or salvaged: each variant aborts the run and bubbles up
/// to the caller (the CLI turns it into a non-zero exit).
#[derive(Debug, Error)]
pub enum GeoError {
    /// Dataset or output location could not be found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Structurally valid input with content we cannot use
    /// (missing attributes, non-areal geometry, empty rings...).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Coordinates the projection cannot handle.
    #[error("projection failed: {0}")]
    Projection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Png(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, GeoError>;
