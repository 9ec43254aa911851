// crates/worldarea-core/src/pipeline.rs

//! # Pipeline
//!
//! One linear pass per call:
//!
//! 1. create the output directories,
//! 2. load the dataset,
//! 3. drop the excluded feature,
//! 4. reproject to EPSG:6933 and compute `area_km2`,
//! 5. write the ranked CSV,
//! 6. render the choropleth PNG,
//! 7. write the Leaflet point map from the filtered geographic features.
//!
//! The first failing stage aborts the run; files written by earlier stages
//! stay on disk.

use crate::area::with_area;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::export::{
    centroids, render_choropleth, render_point_map, top_n, write_top_csv, AreaRow,
};
use crate::filter::exclude_by_name;
use crate::layout::OutputLayout;
use crate::model::FeatureCollection;
use serde::Serialize;
use std::path::PathBuf;

/// Printed once a run has written all of its files.
pub const COMPLETION_MESSAGE: &str = "Done! Check the outputs/ folder for results.";

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub loaded: usize,
    pub retained: usize,
    pub rows_written: usize,
    pub markers: usize,
    /// Sum of `pop_est` over the mapped features.
    pub mapped_population: f64,
    pub largest: Option<AreaRow>,
    pub csv_path: PathBuf,
    pub png_path: PathBuf,
    pub html_path: PathBuf,
}

pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let layout = OutputLayout::new(&config.out_dir);
    layout.ensure_dirs()?;

    let world = match &config.input {
        Some(path) => FeatureCollection::load_from_path(path)?,
        None => FeatureCollection::load_bundled()?,
    };
    let filtered = exclude_by_name(&world, &config.exclude);
    let measured = with_area(&filtered)?;

    let rows = top_n(&measured, config.top_n)?;
    let csv_path = layout.csv_path();
    write_top_csv(&rows, &csv_path)?;

    let png_path = layout.png_path();
    render_choropleth(&measured, &png_path, &config.chart)?;

    let points = centroids(&filtered)?;
    let html_path = layout.html_path();
    render_point_map(&points, &html_path, &config.map)?;

    let report = PipelineReport {
        loaded: world.len(),
        retained: filtered.len(),
        rows_written: rows.len(),
        markers: points.len(),
        mapped_population: points.iter().map(|p| p.pop_est).sum(),
        largest: rows.first().cloned(),
        csv_path,
        png_path,
        html_path,
    };
    tracing::debug!("Run report: {report:?}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const THREE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"name": "Small", "continent": "Europe", "pop_est": 1},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
            {"type": "Feature",
             "properties": {"name": "Large", "continent": "Asia", "pop_est": 2},
             "geometry": {"type": "Polygon", "coordinates": [[[10,0],[30,0],[30,20],[10,20],[10,0]]]}},
            {"type": "Feature",
             "properties": {"name": "Antarctica", "continent": "Antarctica", "pop_est": 0},
             "geometry": {"type": "Polygon", "coordinates": [[[-180,-90],[180,-90],[180,-60],[-180,-60],[-180,-90]]]}}
        ]
    }"#;

    #[test]
    fn run_on_custom_input() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("three.geojson");
        std::fs::File::create(&input)
            .unwrap()
            .write_all(THREE.as_bytes())
            .unwrap();

        let config = PipelineConfig {
            out_dir: tmp.path().join("out"),
            input: Some(input),
            ..PipelineConfig::default()
        };
        let report = run(&config).unwrap();

        assert_eq!(report.loaded, 3);
        assert_eq!(report.retained, 2);
        assert_eq!(report.rows_written, 2);
        assert_eq!(report.markers, 2);
        assert_eq!(report.mapped_population, 3.0);
        assert_eq!(report.largest.as_ref().map(|r| r.name.as_str()), Some("Large"));
        assert!(report.csv_path.is_file());
        assert!(report.png_path.is_file());
        assert!(report.html_path.is_file());
    }

    #[test]
    fn bad_input_fails_before_any_file_is_written() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            out_dir: tmp.path().join("out"),
            input: Some(tmp.path().join("missing.geojson")),
            ..PipelineConfig::default()
        };
        assert!(run(&config).is_err());
        let layout = OutputLayout::new(&config.out_dir);
        assert!(layout.maps_dir().is_dir(), "directories come first");
        assert!(!layout.csv_path().exists());
    }
}
