use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{Candidate, CollectionSpec, IndexedVector, Neighbor, RankedResult};

/// Embedding gateway: text in, fixed-length vector out.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Vector width produced by this embedder.
    fn dim(&self) -> usize;
    /// Stable identifier of the model behind the embedder.
    fn model_id(&self) -> &str;
    /// Embed a batch; output order and length match `texts`.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| Error::Gateway(format!("{} returned no embedding", self.model_id())))
    }
}

/// Completion gateway in answer mode.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
    fn model_name(&self) -> &str;
}

/// Completion gateway in rerank mode.
///
/// Implementations return a total order over exactly the ids of `candidates`,
/// whatever the underlying model produced.
#[async_trait]
pub trait Reranker: Send + Sync {
    async fn rerank(&self, query: &str, candidates: &[Candidate]) -> Result<RankedResult>;
}

/// Vector index holding named collections of [`IndexedVector`]s.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn has_collection(&self, name: &str) -> Result<bool>;
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<()>;
    /// Drop a collection; missing collections are not an error.
    async fn drop_collection(&self, name: &str) -> Result<()>;
    /// Insert records and return how many were written.
    async fn insert(&self, spec: &CollectionSpec, records: &[IndexedVector]) -> Result<usize>;
    /// Up to `limit` records ordered by increasing distance to `query`.
    async fn nearest(&self, collection: &str, query: &[f32], limit: usize) -> Result<Vec<Neighbor>>;
    async fn count(&self, collection: &str) -> Result<usize>;
    /// Stored vector width, or `None` when the collection does not exist.
    async fn collection_dim(&self, name: &str) -> Result<Option<usize>>;

    /// Drop (if present) and create again, leaving an empty collection.
    async fn recreate_collection(&self, spec: &CollectionSpec) -> Result<()> {
        if self.has_collection(&spec.name).await? {
            self.drop_collection(&spec.name).await?;
        }
        self.create_collection(spec).await
    }
}
