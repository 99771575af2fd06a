//! Repeated A/B runs: rebuild both collections, score every query, aggregate.

use std::path::PathBuf;
use tracing::{debug, info};

use reciperag_core::config::EvalSettings;
use reciperag_core::corpus::RecipeBook;
use reciperag_core::error::{Error, Result};
use reciperag_core::traits::{Embedder, Reranker};
use reciperag_core::types::{CollectionSpec, Query};
use reciperag_vector::LanceIndex;

use crate::acceptance::{AcceptanceRule, AggregateDecision};
use crate::ingest::{ingest_baseline, ingest_chunked};
use crate::metrics::{RunMetrics, ScoreSheet};
use crate::pipeline::{BaselinePipeline, EnhancedPipeline};

pub struct Harness<'a> {
    pub book: &'a RecipeBook,
    pub embedder: &'a dyn Embedder,
    pub reranker: &'a dyn Reranker,
    pub eval: EvalSettings,
    pub index_dir: PathBuf,
}

impl<'a> Harness<'a> {
    fn baseline_spec(&self) -> CollectionSpec {
        CollectionSpec::document(&self.eval.baseline_collection, self.embedder.dim())
    }

    fn chunk_spec(&self) -> CollectionSpec {
        CollectionSpec::sectioned(&self.eval.chunk_collection, self.embedder.dim())
    }

    /// One independent run. The index connection lives only for this call.
    pub async fn run_once(&self, queries: &[Query], k: usize) -> Result<RunMetrics> {
        let index = LanceIndex::open(&self.index_dir).await?;

        let baseline_spec = self.baseline_spec();
        let chunk_spec = self.chunk_spec();
        ingest_baseline(&index, self.embedder, &baseline_spec, self.book).await?;
        ingest_chunked(&index, self.embedder, &chunk_spec, self.book).await?;

        let baseline = BaselinePipeline { collection: baseline_spec.name.clone() };
        let enhanced = EnhancedPipeline::from_settings(&self.eval);

        let mut base_sheet = ScoreSheet::default();
        let mut enh_sheet = ScoreSheet::default();
        for query in queries {
            let qvec = self.embedder.embed(&query.text).await?;

            let base_ranked = baseline.rank(&index, &qvec, k).await?;
            base_sheet.record(&base_ranked, &query.expected, k);

            let enh_ranked = enhanced.rank(&index, self.reranker, &query.text, &qvec).await?;
            enh_sheet.record(&enh_ranked, &query.expected, k);

            debug!(query = %query.text, baseline = ?base_ranked, enhanced = ?enh_ranked, "ranked");
        }
        RunMetrics::from_sheets(&base_sheet, &enh_sheet)
    }

    /// Run `runs` times in sequence, reporting each run through `on_run` as it
    /// completes, then decide against `rule`.
    pub async fn evaluate<F>(
        &self,
        queries: &[Query],
        runs: usize,
        k: usize,
        rule: AcceptanceRule,
        mut on_run: F,
    ) -> Result<AggregateDecision>
    where
        F: FnMut(usize, &RunMetrics),
    {
        if runs == 0 || k == 0 {
            return Err(Error::InvalidConfig(format!(
                "runs and k must be >= 1 (runs={runs}, k={k})"
            )));
        }
        if queries.is_empty() {
            return Err(Error::InvalidConfig("query set is empty".to_string()));
        }

        let mut results = Vec::with_capacity(runs);
        for i in 1..=runs {
            info!(run = i, runs, k, queries = queries.len(), "starting evaluation run");
            let metrics = self.run_once(queries, k).await?;
            on_run(i, &metrics);
            results.push(metrics);
        }
        AggregateDecision::from_runs(results, rule)
    }
}
