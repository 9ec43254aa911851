// crates/worldarea-core/src/loader/parse.rs
use super::raw::CountryPropsRaw;
use crate::error::{GeoError, Result};
use crate::model::{CountryFeature, FeatureCollection};
use crate::projection::Crs;
use ::geojson::{GeoJson, Value};
use geo::{Coord, LineString, MultiPolygon, Polygon};

/// Parses a GeoJSON document into a geographic [`FeatureCollection`].
///
/// Every feature must carry an areal geometry (Polygon or MultiPolygon) and
/// the `name`, `continent` and `pop_est` properties; anything else is
/// rejected instead of silently skipped.
pub fn parse_feature_collection(content: &str) -> Result<FeatureCollection> {
    let features = match content.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => {
            return Err(GeoError::InvalidData(
                "expected a FeatureCollection, found a bare geometry".into(),
            ))
        }
    };

    let mut out = Vec::with_capacity(features.len());
    for (index, feature) in features.into_iter().enumerate() {
        let props = feature
            .properties
            .ok_or_else(|| GeoError::InvalidData(format!("feature #{index} has no properties")))?;
        let raw: CountryPropsRaw = serde_json::from_value(serde_json::Value::Object(props))?;

        let geometry = feature.geometry.ok_or_else(|| {
            GeoError::InvalidData(format!("feature #{index} ({}) has no geometry", raw.name))
        })?;
        let geometry = to_multi_polygon(&geometry.value)
            .map_err(|msg| {
                GeoError::InvalidData(format!("feature #{index} ({}): {msg}", raw.name))
            })?;

        out.push(CountryFeature {
            name: raw.name,
            continent: raw.continent,
            pop_est: raw.pop_est,
            iso_a3: raw.iso_a3,
            geometry,
            area_km2: None,
        });
    }

    Ok(FeatureCollection::new(Crs::Geographic, out))
}

fn to_multi_polygon(value: &Value) -> std::result::Result<MultiPolygon<f64>, String> {
    match value {
        Value::Polygon(rings) => Ok(MultiPolygon::new(vec![to_polygon(rings)?])),
        Value::MultiPolygon(polys) => polys
            .iter()
            .map(|rings| to_polygon(rings))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(MultiPolygon::new),
        other => Err(format!("unsupported geometry type {}", other.type_name())),
    }
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> std::result::Result<Polygon<f64>, String> {
    let mut rings = rings.iter().map(|r| to_ring(r));
    let exterior = rings.next().ok_or("polygon without exterior ring")??;
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_ring(positions: &[Vec<f64>]) -> std::result::Result<LineString<f64>, String> {
    let coords = positions
        .iter()
        .map(|p| match p.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(format!("position with {} ordinate(s)", p.len())),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if coords.len() < 3 {
        return Err(format!("ring with {} position(s)", coords.len()));
    }
    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(props: &str, geometry: &str) -> String {
        format!(
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{props},"geometry":{geometry}}}]}}"#
        )
    }

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#;
    const PROPS: &str = r#"{"name":"A","continent":"Europe","pop_est":5}"#;

    #[test]
    fn polygon_is_promoted_and_ring_closed() {
        let fc = parse_feature_collection(&feature(PROPS, SQUARE)).unwrap();
        let geom = &fc.features[0].geometry;
        assert_eq!(geom.0.len(), 1);
        assert!(geom.0[0].exterior().is_closed());
        assert_eq!(fc.features[0].pop_est, 5.0);
    }

    #[test]
    fn holes_are_kept() {
        let with_hole = r#"{"type":"Polygon","coordinates":[
            [[0,0],[4,0],[4,4],[0,4],[0,0]],
            [[1,1],[2,1],[2,2],[1,1]]]}"#;
        let fc = parse_feature_collection(&feature(PROPS, with_hole)).unwrap();
        assert_eq!(fc.features[0].geometry.0[0].interiors().len(), 1);
    }

    #[test]
    fn point_geometry_is_rejected() {
        let point = r#"{"type":"Point","coordinates":[1,2]}"#;
        let err = parse_feature_collection(&feature(PROPS, point)).unwrap_err();
        assert!(matches!(err, GeoError::InvalidData(msg) if msg.contains("Point")));
    }

    #[test]
    fn missing_continent_is_rejected() {
        let err =
            parse_feature_collection(&feature(r#"{"name":"A","pop_est":1}"#, SQUARE)).unwrap_err();
        assert!(matches!(err, GeoError::Json(_)));
    }

    #[test]
    fn null_geometry_is_rejected() {
        let err = parse_feature_collection(&feature(PROPS, "null")).unwrap_err();
        assert!(matches!(err, GeoError::InvalidData(_)));
    }

    #[test]
    fn malformed_document_is_a_geojson_error() {
        let err = parse_feature_collection("{ not json").unwrap_err();
        assert!(matches!(err, GeoError::GeoJson(_)));
    }
}
