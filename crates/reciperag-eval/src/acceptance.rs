//! Relative improvement and the pass/fail rule over cross-run means.

use serde::Serialize;

use reciperag_core::error::Result;

use crate::metrics::{mean, RunMetrics};

/// `(enhanced - baseline) / baseline`; for a non-positive baseline, +inf if
/// enhanced is positive, else 0.
pub fn safe_improvement(enhanced: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        if enhanced > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        (enhanced - baseline) / baseline
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceRule {
    pub threshold: f64,
}

impl AcceptanceRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// MRR gates; a zero baseline can never pass.
    pub fn passes(&self, baseline_mrr: f64, mrr_improvement: f64) -> bool {
        mrr_improvement >= self.threshold && baseline_mrr > 0.0
    }
}

impl Default for AcceptanceRule {
    fn default() -> Self {
        Self { threshold: 0.30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateDecision {
    pub runs: Vec<RunMetrics>,
    pub baseline_recall_mean: f64,
    pub baseline_mrr_mean: f64,
    pub enhanced_recall_mean: f64,
    pub enhanced_mrr_mean: f64,
    pub mrr_improvement: f64,
    pub recall_improvement: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl AggregateDecision {
    pub fn from_runs(runs: Vec<RunMetrics>, rule: AcceptanceRule) -> Result<Self> {
        let col = |f: fn(&RunMetrics) -> f64| runs.iter().map(f).collect::<Vec<_>>();
        let baseline_recall_mean = mean(&col(|r| r.baseline_recall), "baseline recall over runs")?;
        let baseline_mrr_mean = mean(&col(|r| r.baseline_mrr), "baseline MRR over runs")?;
        let enhanced_recall_mean = mean(&col(|r| r.enhanced_recall), "enhanced recall over runs")?;
        let enhanced_mrr_mean = mean(&col(|r| r.enhanced_mrr), "enhanced MRR over runs")?;

        let mrr_improvement = safe_improvement(enhanced_mrr_mean, baseline_mrr_mean);
        let recall_improvement = safe_improvement(enhanced_recall_mean, baseline_recall_mean);
        let passed = rule.passes(baseline_mrr_mean, mrr_improvement);

        Ok(Self {
            runs,
            baseline_recall_mean,
            baseline_mrr_mean,
            enhanced_recall_mean,
            enhanced_mrr_mean,
            mrr_improvement,
            recall_improvement,
            threshold: rule.threshold,
            passed,
        })
    }
}
