// crates/worldarea-core/src/config.rs
use crate::export::table::DEFAULT_TOP_N;
use crate::export::{ChartOptions, MapOptions};
use crate::filter::DEFAULT_EXCLUDED;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every knob of a pipeline run. `Default` is the fixed analysis: bundled
/// dataset, Antarctica dropped, top 20, 12x6 in chart at 180 DPI and a map
/// opening on (20, 0) at zoom 2, all written below `outputs/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub out_dir: PathBuf,
    /// `None` reads the dataset bundled with this crate.
    pub input: Option<PathBuf>,
    /// Feature name dropped before any statistics.
    pub exclude: String,
    pub top_n: usize,
    pub chart: ChartOptions,
    pub map: MapOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("outputs"),
            input: None,
            exclude: DEFAULT_EXCLUDED.to_string(),
            top_n: DEFAULT_TOP_N,
            chart: ChartOptions::default(),
            map: MapOptions::default(),
        }
    }
}
