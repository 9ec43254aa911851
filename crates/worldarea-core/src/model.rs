// crates/worldarea-core/src/model.rs
use crate::projection::Crs;
use geo::{CoordsIter, MultiPolygon};
use serde::Serialize;

/// One country of the world dataset.
///
/// Attribute names follow the Natural Earth "lowres" sample. `area_km2` stays
/// `None` until the collection has gone through [`crate::area::with_area`].
#[derive(Clone, Debug, PartialEq)]
pub struct CountryFeature {
    pub name: String,
    pub continent: String,
    pub pop_est: f64,
    pub iso_a3: Option<String>,
    /// Polygon inputs are promoted to a single-member multipolygon.
    pub geometry: MultiPolygon<f64>,
    pub area_km2: Option<f64>,
}

impl CountryFeature {
    /// Country display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Continent label (e.g. "Africa").
    pub fn continent(&self) -> &str {
        &self.continent
    }

    /// Estimated population as stored in the dataset.
    pub fn population(&self) -> f64 {
        self.pop_est
    }

    /// ISO 3166-1 alpha-3 code, or an empty string when the dataset has none.
    pub fn iso3(&self) -> &str {
        self.iso_a3.as_deref().unwrap_or("")
    }

    /// Area in km², once computed in an equal-area system.
    pub fn area_km2(&self) -> Option<f64> {
        self.area_km2
    }
}

/// Ordered set of countries sharing one reference system.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureCollection {
    pub crs: Crs,
    pub features: Vec<CountryFeature>,
}

impl FeatureCollection {
    pub fn new(crs: Crs, features: Vec<CountryFeature>) -> Self {
        Self { crs, features }
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryFeature> {
        self.features.iter()
    }

    /// First feature with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&CountryFeature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Feature with the greatest computed area, first one wins on ties.
    pub fn largest(&self) -> Option<&CountryFeature> {
        self.features
            .iter()
            .filter(|f| f.area_km2.is_some())
            .fold(None, |best: Option<&CountryFeature>, f| match best {
                Some(b) if b.area_km2 >= f.area_km2 => Some(b),
                _ => Some(f),
            })
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            features: self.features.len(),
            polygons: self.features.iter().map(|f| f.geometry.0.len()).sum(),
            vertices: self
                .features
                .iter()
                .map(|f| f.geometry.coords_count())
                .sum(),
        }
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a CountryFeature;
    type IntoIter = std::slice::Iter<'a, CountryFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// Simple aggregate counts for a collection.
///
/// Logged after loading and carried in the pipeline report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub features: usize,
    pub polygons: usize,
    pub vertices: usize,
}
