// crates/worldarea-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to the
//! GeoJSON parser.

use crate::error::Result;
use crate::model::FeatureCollection;
use once_cell::sync::OnceCell;
use std::io::Read;
use std::path::{Path, PathBuf};

mod common_io;
mod parse;
mod raw;

pub use self::parse::parse_feature_collection;

// Single in-process cache so the bundled sample is parsed once per process.
static BUNDLED_CACHE: OnceCell<FeatureCollection> = OnceCell::new();

impl FeatureCollection {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// The bundled sample ships gzip-compressed; reading it needs `compact`.
    pub fn default_dataset_filename() -> &'static str {
        "naturalearth_lowres.geojson.gz"
    }

    pub fn default_dataset_path() -> PathBuf {
        Self::default_data_dir().join(Self::default_dataset_filename())
    }

    /// Loads the bundled world-countries sample.
    ///
    /// The path is resolved relative to this crate's root
    /// (`CARGO_MANIFEST_DIR`), so the `data/` directory has to ship alongside.
    pub fn load_bundled() -> Result<Self> {
        BUNDLED_CACHE
            .get_or_try_init(|| Self::load_from_path(Self::default_dataset_path()))
            .cloned()
    }

    /// Loads any GeoJSON FeatureCollection of countries.
    ///
    /// `.gz` files are decompressed on the fly when the `compact` feature is on.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = common_io::open_stream(path)?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let fc = parse_feature_collection(&content)?;
        let stats = fc.stats();
        tracing::info!(
            "Loaded {} features ({} polygons, {} vertices) from {}",
            stats.features,
            stats.polygons,
            stats.vertices,
            path.display()
        );
        Ok(fc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;
    use crate::projection::Crs;
    use std::io::Write;

    const TWO_COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"name": "A", "continent": "Europe", "pop_est": 10},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
            {"type": "Feature",
             "properties": {"name": "B", "continent": "Asia", "pop_est": 20.5, "iso_a3": "BBB"},
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[2,2],[3,2],[3,3],[2,2]]]]}}
        ]
    }"#;

    #[cfg(feature = "compact")]
    #[test]
    fn bundled_dataset_loads() {
        let fc = FeatureCollection::load_bundled().unwrap();
        assert_eq!(fc.crs, Crs::Geographic);
        assert_eq!(fc.len(), 177);
        assert!(fc.find_by_name("Antarctica").is_some());
        assert!(fc.iter().all(|f| !f.name.is_empty() && !f.continent.is_empty()));
    }

    #[test]
    fn loads_plain_file() {
        let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
        file.write_all(TWO_COUNTRIES.as_bytes()).unwrap();

        let fc = FeatureCollection::load_from_path(file.path()).unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.features[1].iso3(), "BBB");
    }

    #[cfg(feature = "compact")]
    #[test]
    fn loads_gzipped_file() {
        use flate2::{write::GzEncoder, Compression};

        let file = tempfile::Builder::new().suffix(".geojson.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        encoder.write_all(TWO_COUNTRIES.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let fc = FeatureCollection::load_from_path(file.path()).unwrap();
        assert_eq!(fc.len(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = FeatureCollection::load_from_path("/definitely/not/here.geojson").unwrap_err();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}
