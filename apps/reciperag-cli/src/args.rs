use clap::{Parser, ValueEnum};

use reciperag_core::config::EvalSettings;
use reciperag_core::types::CandidateOrder;
use reciperag_eval::Benchmark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BenchmarkArg {
    Retrieval,
    Planning,
    All,
}

impl From<BenchmarkArg> for Benchmark {
    fn from(value: BenchmarkArg) -> Self {
        match value {
            BenchmarkArg::Retrieval => Benchmark::Retrieval,
            BenchmarkArg::Planning => Benchmark::Planning,
            BenchmarkArg::All => Benchmark::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CandidateOrderArg {
    FirstSeen,
    MinDistance,
}

impl From<CandidateOrderArg> for CandidateOrder {
    fn from(value: CandidateOrderArg) -> Self {
        match value {
            CandidateOrderArg::FirstSeen => CandidateOrder::FirstSeen,
            CandidateOrderArg::MinDistance => CandidateOrder::MinDistance,
        }
    }
}

/// Compare baseline retrieval with chunked retrieval plus LLM reranking.
#[derive(Debug, Parser)]
#[command(name = "reciperag-eval", version, about)]
pub struct EvalArgs {
    /// Number of independent runs; each re-ingests both collections
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub runs: u64,

    /// Cutoff for Recall@k and MRR@k
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub k: u64,

    /// Which fixed query set to evaluate
    #[arg(long, value_enum, default_value_t = BenchmarkArg::Retrieval)]
    pub benchmark: BenchmarkArg,

    /// Minimum relative MRR improvement to pass (overrides eval.improvement_threshold)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// How chunk hits are ordered into candidates (overrides eval.candidate_order)
    #[arg(long, value_enum)]
    pub candidate_order: Option<CandidateOrderArg>,

    /// Print only a JSON summary instead of the console and markdown report
    #[arg(long)]
    pub json: bool,
}

impl EvalArgs {
    /// Apply command-line overrides on top of configured settings.
    pub fn apply(&self, eval: &mut EvalSettings) {
        if let Some(t) = self.threshold {
            eval.improvement_threshold = t;
        }
        if let Some(order) = self.candidate_order {
            eval.candidate_order = order.into();
        }
    }
}
