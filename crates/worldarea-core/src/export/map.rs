// crates/worldarea-core/src/export/map.rs

//! # Interactive point map
//!
//! One circle marker per country centroid on a Leaflet web map, written as a
//! single HTML document. Leaflet itself is pulled from its CDN, as any
//! Leaflet export does.

use crate::error::{GeoError, Result};
use crate::model::FeatureCollection;
use crate::projection::{transform_coord, Crs};
use geo::{Centroid, Point};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Separator between name and continent in every popup.
pub const POPUP_SEPARATOR: &str = " \u{2014} ";

const LEAFLET_VERSION: &str = "1.9.4";

/// A feature reduced to its centroid, in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidFeature {
    pub name: String,
    pub continent: String,
    pub pop_est: f64,
    /// x = longitude, y = latitude.
    pub point: Point<f64>,
}

impl CentroidFeature {
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    /// Name and continent joined by [`POPUP_SEPARATOR`]. Em dashes inside
    /// either field become `-`, so the separator occurs exactly once.
    pub fn popup(&self) -> String {
        format!(
            "{}{POPUP_SEPARATOR}{}",
            without_separator(&self.name),
            without_separator(&self.continent)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// (lat, lon) the map opens on.
    pub center: (f64, f64),
    pub zoom: u8,
    /// Circle marker radius in screen pixels.
    pub marker_radius: u32,
    pub title: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: (20.0, 0.0),
            zoom: 2,
            marker_radius: 3,
            title: "World countries".to_string(),
        }
    }
}

/// Planar centroid of every feature, computed in the collection's own
/// system and then moved to geographic coordinates.
pub fn centroids(fc: &FeatureCollection) -> Result<Vec<CentroidFeature>> {
    fc.iter()
        .map(|f| {
            let planar = f.geometry.centroid().ok_or_else(|| {
                GeoError::InvalidData(format!("{} has an empty geometry, no centroid", f.name))
            })?;
            let geographic = transform_coord(planar.0, fc.crs, Crs::Geographic)?;
            Ok(CentroidFeature {
                name: f.name.clone(),
                continent: f.continent.clone(),
                pop_est: f.pop_est,
                point: Point(geographic),
            })
        })
        .collect()
}

/// Writes the Leaflet page for `points` to `path`, replacing any old file.
pub fn render_point_map(
    points: &[CentroidFeature],
    path: &Path,
    opts: &MapOptions,
) -> Result<()> {
    let html = point_map_html(points, opts)?;
    std::fs::write(path, html)?;
    tracing::info!("Wrote map with {} markers to {}", points.len(), path.display());
    Ok(())
}

/// Builds the HTML document. The popup separator occurs exactly once per
/// marker and nowhere else.
pub fn point_map_html(points: &[CentroidFeature], opts: &MapOptions) -> Result<String> {
    let mut markers = String::new();
    for p in points {
        let popup = script_string(&html_escape(&p.popup()))?;
        writeln!(
            markers,
            "    L.circleMarker([{}, {}], {{radius: {}, fill: true}}).bindPopup({popup}).addTo(map);",
            p.lat(),
            p.lon(),
            opts.marker_radius,
        )
        .map_err(|e| GeoError::InvalidData(e.to_string()))?;
    }

    let title = html_escape(&without_separator(&opts.title));
    let (lat, lon) = opts.center;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css" />
    <script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
    <style>
        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
        #map {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}
    </style>
</head>
<body>
<div id="map"></div>
<script>
    var map = L.map("map", {{center: [{lat}, {lon}], zoom: {zoom}}});
    L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
        maxZoom: 19,
        attribution: "&copy; OpenStreetMap contributors"
    }}).addTo(map);
{markers}</script>
</body>
</html>
"#,
        zoom = opts.zoom,
    ))
}

fn without_separator(s: &str) -> String {
    s.replace(POPUP_SEPARATOR.trim(), "-")
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A JSON string literal that is also safe inside a `<script>` block.
fn script_string(s: &str) -> Result<String> {
    Ok(serde_json::to_string(s)?.replace("</", "<\\/"))
}
