//! Recall@k and reciprocal rank over ranked recipe ids.

use serde::Serialize;
use std::collections::BTreeSet;

use reciperag_core::error::{Error, Result};

/// 1.0 if any of the first `k` ids is expected, else 0.0.
pub fn recall_at_k(ranked: &[String], expected: &BTreeSet<String>, k: usize) -> f64 {
    if ranked.iter().take(k).any(|id| expected.contains(id)) {
        1.0
    } else {
        0.0
    }
}

/// `1 / position` of the first expected id within the first `k`, else 0.0.
pub fn reciprocal_rank(ranked: &[String], expected: &BTreeSet<String>, k: usize) -> f64 {
    ranked
        .iter()
        .take(k)
        .position(|id| expected.contains(id))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

/// Arithmetic mean. An empty input is a configuration error, not NaN.
pub fn mean(values: &[f64], what: &str) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::InvalidConfig(format!("cannot average {what}: no values")));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Per-query scores of one pipeline, averaged at the end of a run.
#[derive(Debug, Default, Clone)]
pub struct ScoreSheet {
    recalls: Vec<f64>,
    reciprocal_ranks: Vec<f64>,
}

impl ScoreSheet {
    pub fn record(&mut self, ranked: &[String], expected: &BTreeSet<String>, k: usize) {
        self.recalls.push(recall_at_k(ranked, expected, k));
        self.reciprocal_ranks.push(reciprocal_rank(ranked, expected, k));
    }

    pub fn mean_recall(&self) -> Result<f64> {
        mean(&self.recalls, "recall")
    }

    pub fn mean_reciprocal_rank(&self) -> Result<f64> {
        mean(&self.reciprocal_ranks, "reciprocal rank")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunMetrics {
    pub baseline_recall: f64,
    pub baseline_mrr: f64,
    pub enhanced_recall: f64,
    pub enhanced_mrr: f64,
}

impl RunMetrics {
    pub fn from_sheets(baseline: &ScoreSheet, enhanced: &ScoreSheet) -> Result<Self> {
        Ok(Self {
            baseline_recall: baseline.mean_recall()?,
            baseline_mrr: baseline.mean_reciprocal_rank()?,
            enhanced_recall: enhanced.mean_recall()?,
            enhanced_mrr: enhanced.mean_reciprocal_rank()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn set(v: &[&str]) -> BTreeSet<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn expected_at_rank_two_of_three() {
        let ranked = ids(&["r2", "r1", "r5"]);
        let expected = set(&["r1"]);
        assert_eq!(recall_at_k(&ranked, &expected, 3), 1.0);
        assert_eq!(reciprocal_rank(&ranked, &expected, 3), 0.5);
    }

    #[test]
    fn any_of_several_expected_counts() {
        let ranked = ids(&["r3", "r47", "r9"]);
        let expected = set(&["r9", "r46", "r47", "r48"]);
        assert_eq!(reciprocal_rank(&ranked, &expected, 3), 0.5);
    }

    #[test]
    fn hits_beyond_k_are_ignored() {
        let ranked = ids(&["r2", "r3", "r4", "r1"]);
        let expected = set(&["r1"]);
        assert_eq!(recall_at_k(&ranked, &expected, 3), 0.0);
        assert_eq!(reciprocal_rank(&ranked, &expected, 3), 0.0);
        assert_eq!(recall_at_k(&[], &expected, 3), 0.0);
    }

    #[test]
    fn mean_of_nothing_is_config_error() {
        assert!(matches!(mean(&[], "mrr"), Err(Error::InvalidConfig(_))));
        assert_eq!(mean(&[0.5, 1.0], "mrr").unwrap(), 0.75);
        assert!(RunMetrics::from_sheets(&ScoreSheet::default(), &ScoreSheet::default()).is_err());
    }

    proptest! {
        #[test]
        fn metric_ranges(
            ranked in proptest::collection::vec("r[0-9]", 0..10),
            expected in proptest::collection::btree_set("r[0-9]", 1..4),
            k in 1usize..8,
        ) {
            let recall = recall_at_k(&ranked, &expected, k);
            prop_assert!(recall == 0.0 || recall == 1.0);
            let hit = ranked.iter().take(k).any(|id| expected.contains(id));
            prop_assert_eq!(recall == 1.0, hit);

            let rr = reciprocal_rank(&ranked, &expected, k);
            prop_assert!(rr == 0.0 || (1..=k).any(|i| (rr - 1.0 / i as f64).abs() < 1e-12));
            prop_assert_eq!(rr > 0.0, hit);
        }
    }
}
