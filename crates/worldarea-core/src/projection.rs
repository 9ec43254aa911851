// crates/worldarea-core/src/projection.rs

//! # Reprojection
//!
//! The pipeline only ever needs two reference systems:
//!
//! - EPSG:4326, geographic WGS84 longitude/latitude in degrees (how the
//!   dataset ships, and what web maps expect);
//! - EPSG:6933, "WGS 84 / NSIDC EASE-Grid 2.0 Global", a cylindrical
//!   equal-area projection on the WGS84 ellipsoid with true scale at ±30°.
//!
//! Both directions of EPSG:6933 are closed-form (Snyder, *Map Projections: A
//! Working Manual*, eqs. 3-12, 10-13 to 10-15 and 3-18), so no PROJ binding
//! is required. The `proj-transforms` feature routes every transform through
//! PROJ instead (needs libproj on the system).

use crate::error::{GeoError, Result};
use crate::model::FeatureCollection;
use geo::{Coord, MapCoords};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS84 semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Latitude of true scale for EASE-Grid 2.0.
pub const STANDARD_PARALLEL_DEG: f64 = 30.0;

const DEGREE_SLACK: f64 = 1e-9;

/// Reference systems known to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    /// EPSG:4326, lon/lat degrees.
    Geographic,
    /// EPSG:6933, metres on a cylindrical equal-area plane.
    EqualArea,
}

impl Crs {
    pub const fn epsg(self) -> u32 {
        match self {
            Crs::Geographic => 4326,
            Crs::EqualArea => 6933,
        }
    }

    pub fn from_epsg(code: u32) -> Result<Self> {
        match code {
            4326 => Ok(Crs::Geographic),
            6933 => Ok(Crs::EqualArea),
            other => Err(GeoError::Projection(format!("unsupported EPSG code {other}"))),
        }
    }

    /// Whether planar area in this system is proportional to surface area.
    pub const fn is_equal_area(self) -> bool {
        matches!(self, Crs::EqualArea)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

/// Precomputed constants of the ellipsoidal cylindrical equal-area projection.
#[derive(Debug, Clone, Copy)]
struct CylindricalEqualArea {
    a: f64,
    e: f64,
    e2: f64,
    k0: f64,
    qp: f64,
}

impl CylindricalEqualArea {
    fn new(a: f64, f: f64, standard_parallel_deg: f64) -> Self {
        let e2 = f * (2.0 - f);
        let e = e2.sqrt();
        let sin_ts = standard_parallel_deg.to_radians().sin();
        let k0 = standard_parallel_deg.to_radians().cos() / (1.0 - e2 * sin_ts * sin_ts).sqrt();
        let mut proj = Self { a, e, e2, k0, qp: 0.0 };
        proj.qp = proj.q(1.0);
        proj
    }

    /// Authalic `q` for a given sin(latitude).
    fn q(&self, sin_phi: f64) -> f64 {
        let e = self.e;
        (1.0 - self.e2)
            * (sin_phi / (1.0 - self.e2 * sin_phi * sin_phi)
                - (1.0 / (2.0 * e)) * ((1.0 - e * sin_phi) / (1.0 + e * sin_phi)).ln())
    }

    fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let x = self.a * self.k0 * lon_deg.to_radians();
        let y = self.a * self.q(lat_deg.to_radians().sin()) / (2.0 * self.k0);
        (x, y)
    }

    /// Returns `None` when `y` lies beyond the poles.
    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let mut ratio = 2.0 * y * self.k0 / (self.a * self.qp);
        if ratio.abs() > 1.0 {
            if ratio.abs() - 1.0 > 1e-12 {
                return None;
            }
            ratio = ratio.signum();
        }
        let beta = ratio.asin();
        let e4 = self.e2 * self.e2;
        let e6 = e4 * self.e2;
        let phi = beta
            + (self.e2 / 3.0 + 31.0 * e4 / 180.0 + 517.0 * e6 / 5040.0) * (2.0 * beta).sin()
            + (23.0 * e4 / 360.0 + 251.0 * e6 / 3780.0) * (4.0 * beta).sin()
            + (761.0 * e6 / 45360.0) * (6.0 * beta).sin();
        let lambda = x / (self.a * self.k0);
        Some((lambda.to_degrees(), phi.to_degrees()))
    }
}

static EASE_GRID_2: Lazy<CylindricalEqualArea> =
    Lazy::new(|| CylindricalEqualArea::new(WGS84_A, WGS84_F, STANDARD_PARALLEL_DEG));

/// Geographic degrees → EPSG:6933 metres.
pub fn project(lon: f64, lat: f64) -> Result<(f64, f64)> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(GeoError::Projection(format!("non-finite coordinate ({lon}, {lat})")));
    }
    if lat.abs() > 90.0 + DEGREE_SLACK || lon.abs() > 180.0 + DEGREE_SLACK {
        return Err(GeoError::Projection(format!(
            "coordinate ({lon}, {lat}) outside the geographic domain"
        )));
    }
    Ok(EASE_GRID_2.forward(lon, lat.clamp(-90.0, 90.0)))
}

/// EPSG:6933 metres → geographic degrees.
pub fn unproject(x: f64, y: f64) -> Result<(f64, f64)> {
    if !x.is_finite() || !y.is_finite() {
        return Err(GeoError::Projection(format!("non-finite coordinate ({x}, {y})")));
    }
    let (lon, lat) = EASE_GRID_2
        .inverse(x, y)
        .ok_or_else(|| GeoError::Projection(format!("northing {y} lies beyond the poles")))?;
    if lon.abs() > 180.0 + DEGREE_SLACK {
        return Err(GeoError::Projection(format!("easting {x} lies beyond the antimeridian")));
    }
    Ok((lon, lat))
}

/// Moves a single coordinate between two systems.
///
/// With `proj-transforms` this goes through PROJ; otherwise the closed-form
/// EPSG:6933 equations above are used.
pub fn transform_coord(c: Coord<f64>, from: Crs, to: Crs) -> Result<Coord<f64>> {
    Transformer::new(from, to)?.apply(c)
}

/// A resolved `from -> to` conversion, built once per collection.
#[cfg_attr(feature = "proj-transforms", allow(dead_code))]
enum Transformer {
    Identity,
    Forward,
    Inverse,
    #[cfg(feature = "proj-transforms")]
    Proj(proj::Proj, Crs),
}

impl Transformer {
    fn new(from: Crs, to: Crs) -> Result<Self> {
        if from == to {
            return Ok(Transformer::Identity);
        }
        #[cfg(feature = "proj-transforms")]
        {
            Self::with_proj(from, to)
        }
        #[cfg(not(feature = "proj-transforms"))]
        {
            Ok(Self::closed_form(from, to))
        }
    }

    #[cfg_attr(feature = "proj-transforms", allow(dead_code))]
    fn closed_form(from: Crs, to: Crs) -> Self {
        match (from, to) {
            (Crs::Geographic, Crs::EqualArea) => Transformer::Forward,
            (Crs::EqualArea, Crs::Geographic) => Transformer::Inverse,
            _ => Transformer::Identity,
        }
    }

    #[cfg(feature = "proj-transforms")]
    fn with_proj(from: Crs, to: Crs) -> Result<Self> {
        let p = proj::Proj::new_known_crs(&from.to_string(), &to.to_string(), None)
            .map_err(|e| GeoError::Projection(format!("PROJ init error: {e}")))?;
        Ok(Transformer::Proj(p, from))
    }

    fn apply(&self, c: Coord<f64>) -> Result<Coord<f64>> {
        let (x, y) = match self {
            Transformer::Identity => (c.x, c.y),
            Transformer::Forward => project(c.x, c.y)?,
            Transformer::Inverse => unproject(c.x, c.y)?,
            #[cfg(feature = "proj-transforms")]
            Transformer::Proj(p, from) => {
                if !c.x.is_finite() || !c.y.is_finite() {
                    return Err(GeoError::Projection(format!(
                        "non-finite coordinate ({}, {})",
                        c.x, c.y
                    )));
                }
                if *from == Crs::Geographic && c.y.abs() > 90.0 + DEGREE_SLACK {
                    return Err(GeoError::Projection(format!(
                        "coordinate ({}, {}) outside the geographic domain",
                        c.x, c.y
                    )));
                }
                // new_known_crs normalises axis order to (lon, lat)
                p.convert((c.x, c.y))
                    .map_err(|e| GeoError::Projection(format!("PROJ transform error: {e}")))?
            }
        };
        Ok(Coord { x, y })
    }
}

/// Reprojects every geometry of `fc` into `target`.
///
/// The first coordinate that cannot be transformed aborts the whole
/// collection; there is no per-feature isolation.
pub fn to_crs(fc: &FeatureCollection, target: Crs) -> Result<FeatureCollection> {
    if fc.crs == target {
        return Ok(fc.clone());
    }
    let source = fc.crs;
    let transformer = Transformer::new(source, target)?;
    let mut features = Vec::with_capacity(fc.features.len());
    for feature in &fc.features {
        let geometry = feature
            .geometry
            .try_map_coords(|c| transformer.apply(c))
            .map_err(|e| match e {
                GeoError::Projection(msg) => {
                    GeoError::Projection(format!("{} ({}): {msg}", feature.name, source))
                }
                other => other,
            })?;
        let mut out = feature.clone();
        out.geometry = geometry;
        features.push(out);
    }
    tracing::debug!("Reprojected {} features {} -> {}", features.len(), source, target);
    Ok(FeatureCollection::new(target, features))
}
