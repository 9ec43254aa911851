// crates/worldarea-core/src/filter.rs
use crate::model::FeatureCollection;

/// Name of the landmass dropped before any statistics are computed.
pub const DEFAULT_EXCLUDED: &str = "Antarctica";

/// Returns a copy of `fc` without the features named exactly `name`.
///
/// Matching is exact (case and accents included). If nothing matches the
/// result is simply an equal copy of the input.
pub fn exclude_by_name(fc: &FeatureCollection, name: &str) -> FeatureCollection {
    let features: Vec<_> = fc
        .features
        .iter()
        .filter(|f| f.name != name)
        .cloned()
        .collect();

    let removed = fc.features.len() - features.len();
    if removed == 0 {
        tracing::debug!("No feature named {name:?}; collection unchanged");
    } else {
        tracing::info!("Excluded {removed} feature(s) named {name:?}");
    }

    FeatureCollection::new(fc.crs, features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{boxed, world};

    #[test]
    fn removes_every_match_and_nothing_else() {
        let input = world(vec![
            boxed("Antarctica", "Antarctica", -10.0, -80.0, 10.0, -70.0),
            boxed("Chile", "South America", -72.0, -40.0, -70.0, -20.0),
            boxed("Antarctica", "Antarctica", 20.0, -80.0, 30.0, -70.0),
        ]);
        let out = exclude_by_name(&input, DEFAULT_EXCLUDED);

        let excluded = input.iter().filter(|f| f.name == DEFAULT_EXCLUDED).count();
        assert_eq!(out.len(), input.len() - excluded);
        assert!(out.iter().all(|f| f.name != DEFAULT_EXCLUDED));
        assert_eq!(input.len(), 3, "input is not mutated");
    }

    #[test]
    fn no_match_returns_equal_copy() {
        let input = world(vec![boxed("Chile", "South America", -72.0, -40.0, -70.0, -20.0)]);
        let out = exclude_by_name(&input, DEFAULT_EXCLUDED);
        assert_eq!(out, input);
    }

    #[test]
    fn match_is_exact() {
        let input = world(vec![boxed("antarctica", "Antarctica", -10.0, -80.0, 10.0, -70.0)]);
        assert_eq!(exclude_by_name(&input, DEFAULT_EXCLUDED).len(), 1);
    }
}
