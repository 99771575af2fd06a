//! Console and markdown rendering of evaluation results.

use serde::Serialize;
use std::fmt::Write;

use reciperag_core::error::{Error, Result};

use crate::acceptance::AggregateDecision;
use crate::benchmark::Benchmark;
use crate::metrics::RunMetrics;

/// Ratio as a percentage with one decimal; infinities print as `inf%`.
pub fn format_percent(ratio: f64) -> String {
    if ratio.is_infinite() {
        if ratio > 0.0 { "inf%".to_string() } else { "-inf%".to_string() }
    } else {
        format!("{:.1}%", ratio * 100.0)
    }
}

fn format_threshold(threshold: f64) -> String {
    let pct = threshold * 100.0;
    if (pct - pct.round()).abs() < 1e-9 { format!("{pct:.0}%") } else { format!("{pct:.1}%") }
}

pub fn format_run(i: usize, runs: usize, k: usize, m: &RunMetrics) -> String {
    format!(
        "\n=== RUN {i}/{runs} (K={k}) ===\n\
         Baseline  Recall@{k}: {:.3}   MRR@{k}: {:.3}\n\
         Enhanced  Recall@{k}: {:.3}   MRR@{k}: {:.3}",
        m.baseline_recall, m.baseline_mrr, m.enhanced_recall, m.enhanced_mrr
    )
}

pub fn format_summary(k: usize, d: &AggregateDecision) -> String {
    let acceptance = if d.passed {
        format!("✅ PASS (>={} MRR improvement)", format_threshold(d.threshold))
    } else {
        "❌ NOT YET".to_string()
    };
    format!(
        "\n=== SUMMARY (MEANS OVER RUNS) ===\n\
         Baseline mean  Recall@{k}: {:.3}   MRR@{k}: {:.3}\n\
         Enhanced mean  Recall@{k}: {:.3}   MRR@{k}: {:.3}\n\
         MRR improvement:   {}\n\
         Recall improvement:{}\n\
         ACCEPTANCE: {acceptance}",
        d.baseline_recall_mean,
        d.baseline_mrr_mean,
        d.enhanced_recall_mean,
        d.enhanced_mrr_mean,
        format_percent(d.mrr_improvement),
        format_percent(d.recall_improvement),
    )
}

pub fn format_markdown(k: usize, d: &AggregateDecision) -> String {
    let join = |f: fn(&RunMetrics) -> f64| {
        d.runs.iter().map(|r| format!("{:.3}", f(r))).collect::<Vec<_>>().join(", ")
    };
    let mut out = String::new();
    let _ = writeln!(out, "### Evaluation summary (K={k}, runs={})\n", d.runs.len());
    let _ = writeln!(out, "**Baseline runs (MRR@{k}):** {}  ", join(|r| r.baseline_mrr));
    let _ = writeln!(out, "**Enhanced runs (MRR@{k}):** {}\n", join(|r| r.enhanced_mrr));
    let _ = writeln!(out, "**Baseline mean MRR@{k}:** {:.3}  ", d.baseline_mrr_mean);
    let _ = writeln!(out, "**Enhanced mean MRR@{k}:** {:.3}\n", d.enhanced_mrr_mean);
    let improvement = format_percent(d.mrr_improvement);
    let _ = writeln!(out, "**Improvement% (using means):** {improvement}  ");
    let _ = writeln!(out, "**Threshold:** {}\n", format_threshold(d.threshold));
    let _ = write!(out, "**Decision:** {}", if d.passed { "PASS" } else { "NOT YET" });
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    benchmark: Benchmark,
    k: usize,
    #[serde(flatten)]
    decision: &'a AggregateDecision,
}

/// Machine-readable summary. Infinite improvements serialize as `null`.
pub fn format_json(benchmark: Benchmark, k: usize, d: &AggregateDecision) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport { benchmark, k, decision: d })
        .map_err(|e| Error::Operation(format!("failed to serialize report: {e}")))
}
