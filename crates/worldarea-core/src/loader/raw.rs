// crates/worldarea-core/src/loader/raw.rs
use serde::Deserialize;

/// Feature properties as they come from the Natural Earth sample.
/// NOTE: mirrors the external dataset's attribute table; not exposed publicly.
#[derive(Debug, Deserialize)]
pub struct CountryPropsRaw {
    pub name: String,
    pub continent: String,
    pub pop_est: f64,
    #[serde(default)]
    pub iso_a3: Option<String>,
}
