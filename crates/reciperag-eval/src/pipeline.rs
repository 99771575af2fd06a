//! The two retrieval pipelines under comparison.

use tracing::debug;

use reciperag_core::config::EvalSettings;
use reciperag_core::error::Result;
use reciperag_core::traits::{Reranker, VectorIndex};
use reciperag_core::types::{CandidateOrder, RankedResult};

use crate::candidates::select_candidates;

/// Plain nearest-neighbor search over one vector per recipe.
pub struct BaselinePipeline {
    pub collection: String,
}

impl BaselinePipeline {
    pub async fn rank(
        &self,
        index: &dyn VectorIndex,
        query_vec: &[f32],
        k: usize,
    ) -> Result<RankedResult> {
        let hits = index.nearest(&self.collection, query_vec, k).await?;
        Ok(hits.into_iter().map(|h| h.recipe_id).collect())
    }
}

/// Oversampled chunk search, per-recipe grouping, then LLM rerank.
pub struct EnhancedPipeline {
    pub collection: String,
    pub neighbors: usize,
    pub max_candidates: usize,
    pub max_candidate_chars: usize,
    pub order: CandidateOrder,
}

impl EnhancedPipeline {
    pub fn from_settings(eval: &EvalSettings) -> Self {
        Self {
            collection: eval.chunk_collection.clone(),
            neighbors: eval.chunk_neighbors,
            max_candidates: eval.max_candidates,
            max_candidate_chars: eval.max_candidate_chars,
            order: eval.candidate_order,
        }
    }

    pub async fn rank(
        &self,
        index: &dyn VectorIndex,
        reranker: &dyn Reranker,
        query_text: &str,
        query_vec: &[f32],
    ) -> Result<RankedResult> {
        let hits = index.nearest(&self.collection, query_vec, self.neighbors).await?;
        let candidates =
            select_candidates(&hits, self.max_candidates, self.max_candidate_chars, self.order);
        debug!(chunks = hits.len(), candidates = candidates.len(), "enhanced candidates");
        reranker.rerank(query_text, &candidates).await
    }
}
