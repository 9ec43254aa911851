// crates/worldarea-core/src/lib.rs

//! Equal-area statistics for the Natural Earth world-countries sample.
//!
//! ```no_run
//! use worldarea_core::{run, PipelineConfig};
//!
//! let report = run(&PipelineConfig::default())?;
//! println!("largest: {:?}", report.largest);
//! # Ok::<(), worldarea_core::GeoError>(())
//! ```

pub mod area;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod layout;
pub mod loader; // impl blocks for FeatureCollection
pub mod model;
pub mod pipeline;
pub mod projection;

// Re-exports
pub use crate::area::with_area;
pub use crate::classify::Quantiles;
pub use crate::config::PipelineConfig;
pub use crate::error::{GeoError, Result};
pub use crate::export::{AreaRow, CentroidFeature, ChartOptions, MapOptions};
pub use crate::filter::exclude_by_name;
pub use crate::layout::OutputLayout;
pub use crate::model::{CountryFeature, DatasetStats, FeatureCollection};
pub use crate::pipeline::{run, PipelineReport, COMPLETION_MESSAGE};
pub use crate::projection::{to_crs, Crs};
