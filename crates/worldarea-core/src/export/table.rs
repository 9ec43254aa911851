// crates/worldarea-core/src/export/table.rs
use crate::error::{GeoError, Result};
use crate::model::FeatureCollection;
use serde::Serialize;
use std::path::Path;

/// Rows kept in the ranked table.
pub const DEFAULT_TOP_N: usize = 20;

/// One line of the ranked area table. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRow {
    pub name: String,
    pub continent: String,
    pub area_km2: f64,
}

/// The `n` largest features by `area_km2`, largest first.
///
/// Selection is stable: on equal areas the feature that comes first in the
/// collection ranks first. Fails if a feature has no computed area.
pub fn top_n(fc: &FeatureCollection, n: usize) -> Result<Vec<AreaRow>> {
    let mut rows = fc
        .iter()
        .map(|f| {
            let area_km2 = f.area_km2.ok_or_else(|| {
                GeoError::InvalidData(format!("{} has no area_km2; compute areas first", f.name))
            })?;
            Ok(AreaRow {
                name: f.name.clone(),
                continent: f.continent.clone(),
                area_km2,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable, so ties keep collection order
    rows.sort_by(|a, b| b.area_km2.total_cmp(&a.area_km2));
    rows.truncate(n);
    Ok(rows)
}

/// Writes `name,continent,area_km2` plus one line per row, replacing any
/// existing file. The parent directory must already exist.
pub fn write_top_csv(rows: &[AreaRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(["name", "continent", "area_km2"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
