//! A/B evaluation of baseline vs chunked+reranked retrieval over the recipe corpus.

pub mod acceptance;
pub mod benchmark;
pub mod candidates;
pub mod harness;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use acceptance::{safe_improvement, AcceptanceRule, AggregateDecision};
pub use benchmark::Benchmark;
pub use harness::Harness;
pub use metrics::RunMetrics;
