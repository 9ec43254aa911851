// crates/worldarea-core/src/export/mod.rs

//! Writers for the three run artefacts: ranked CSV, choropleth PNG and the
//! Leaflet point map.

pub mod chart;
pub mod glyphs;
pub mod map;
pub mod table;

pub use chart::{render_choropleth, ChartOptions};
pub use map::{centroids, render_point_map, CentroidFeature, MapOptions};
pub use table::{top_n, write_top_csv, AreaRow};
