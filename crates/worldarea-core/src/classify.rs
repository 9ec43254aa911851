// crates/worldarea-core/src/classify.rs

//! Quantile classification for choropleth shading.
//!
//! Bin bounds are the `100 * i / k` percentiles of the data (linear
//! interpolation between order statistics), de-duplicated, so heavily tied
//! data can end up with fewer than `k` classes. A value belongs to the first
//! class whose upper bound is greater than or equal to it.

/// Result of classifying one series of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantiles {
    bins: Vec<f64>,
    classes: Vec<usize>,
    min: f64,
}

impl Quantiles {
    pub fn classify(values: &[f64], k: usize) -> Self {
        if values.is_empty() || k == 0 {
            return Self {
                bins: Vec::new(),
                classes: vec![0; values.len()],
                min: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut bins: Vec<f64> = (1..=k)
            .map(|i| percentile(&sorted, 100.0 * i as f64 / k as f64))
            .collect();
        bins.dedup();

        let classes = values
            .iter()
            .map(|v| bins.partition_point(|b| b < v).min(bins.len() - 1))
            .collect();

        Self {
            bins,
            classes,
            min: sorted[0],
        }
    }

    /// Upper bound of each class, ascending.
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Number of classes actually produced.
    pub fn k(&self) -> usize {
        self.bins.len()
    }

    /// Class index of the `i`-th input value.
    pub fn class_of(&self, i: usize) -> usize {
        self.classes[i]
    }

    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// How many input values fell in each class.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.k()];
        for &c in &self.classes {
            if let Some(slot) = counts.get_mut(c) {
                *slot += 1;
            }
        }
        counts
    }

    /// `"lower, upper"` per class with two decimals, the first class starting
    /// at the minimum of the data.
    pub fn legend_labels(&self) -> Vec<String> {
        let mut lower = self.min;
        self.bins
            .iter()
            .map(|&upper| {
                let label = format!("{lower:.2}, {upper:.2}");
                lower = upper;
                label
            })
            .collect()
    }
}

fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * pct / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_values_into_five_classes() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let q = Quantiles::classify(&values, 5);
        let expected = [2.8, 4.6, 6.4, 8.2, 10.0];
        assert_eq!(q.k(), expected.len());
        for (got, want) in q.bins().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        assert_eq!(q.classes(), &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(q.counts(), vec![2, 2, 2, 2, 2]);
    }

    #[test]
    fn input_order_is_preserved_in_classes() {
        let q = Quantiles::classify(&[100.0, 1.0, 50.0], 3);
        assert_eq!(q.class_of(0), 2);
        assert_eq!(q.class_of(1), 0);
    }

    #[test]
    fn ties_collapse_bins() {
        let q = Quantiles::classify(&[5.0, 5.0, 5.0, 5.0], 5);
        assert_eq!(q.k(), 1);
        assert!(q.classes().iter().all(|&c| c == 0));
    }

    #[test]
    fn empty_input_has_no_bins() {
        let q = Quantiles::classify(&[], 5);
        assert_eq!(q.k(), 0);
        assert!(q.legend_labels().is_empty());
    }

    #[test]
    fn legend_labels_chain_bounds() {
        let q = Quantiles::classify(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(q.legend_labels(), vec!["1.00, 3.00", "3.00, 5.00"]);
    }
}
