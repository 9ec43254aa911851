// crates/worldarea-core/src/area.rs
use crate::error::{GeoError, Result};
use crate::model::FeatureCollection;
use crate::projection::{to_crs, Crs};
use geo::Area;

pub const SQ_M_PER_SQ_KM: f64 = 1_000_000.0;

/// Reprojects `fc` to EPSG:6933 and fills `area_km2` on every feature.
///
/// The returned collection is in [`Crs::EqualArea`]; the input is left as is.
/// Any coordinate that fails to project aborts the call.
pub fn with_area(fc: &FeatureCollection) -> Result<FeatureCollection> {
    let mut projected = to_crs(fc, Crs::EqualArea)?;
    let areas = planar_areas_km2(&projected)?;
    for (feature, area) in projected.features.iter_mut().zip(areas) {
        feature.area_km2 = Some(area);
    }
    tracing::info!("Computed area for {} features in {}", projected.len(), projected.crs);
    Ok(projected)
}

/// Planar area of each feature in km².
///
/// Refuses collections that are not in an equal-area system: square degrees
/// are not an area.
pub fn planar_areas_km2(fc: &FeatureCollection) -> Result<Vec<f64>> {
    if !fc.crs.is_equal_area() {
        return Err(GeoError::Projection(format!(
            "area requested in {}, reproject to {} first",
            fc.crs,
            Crs::EqualArea
        )));
    }
    Ok(fc
        .iter()
        .map(|f| f.geometry.unsigned_area() / SQ_M_PER_SQ_KM)
        .collect())
}
