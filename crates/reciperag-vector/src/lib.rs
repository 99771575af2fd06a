//! LanceDB-backed vector index with one table per collection.

pub mod schema;
pub mod search;
pub mod table;
pub mod writer;

use arrow_array::RecordBatchIterator;
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, DistanceType};
use std::path::Path;
use tracing::{debug, info};

use reciperag_core::error::{Error, Result};
use reciperag_core::traits::VectorIndex;
use reciperag_core::types::{CollectionSpec, IndexedVector, Neighbor};

use crate::schema::vector_dim;
use crate::search::batch_to_neighbors;
use crate::table::{create_empty, drop_if_exists, op_err, open_db, open_existing, table_exists};
use crate::writer::records_to_batch;

/// Open connection to a local LanceDB directory. Released when dropped.
pub struct LanceIndex {
    db: Connection,
    uri: String,
}

impl LanceIndex {
    pub async fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::Connectivity(format!("cannot create index dir {}: {e}", dir.display()))
        })?;
        let uri = dir.to_string_lossy().to_string();
        let db = open_db(&uri).await?;
        info!(uri = %uri, "opened vector index");
        Ok(Self { db, uri })
    }
}

impl Drop for LanceIndex {
    fn drop(&mut self) {
        info!(uri = %self.uri, "released vector index");
    }
}

#[async_trait]
impl VectorIndex for LanceIndex {
    async fn has_collection(&self, name: &str) -> Result<bool> {
        table_exists(&self.db, name).await
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> Result<()> {
        create_empty(&self.db, spec).await?;
        debug!(
            collection = %spec.name,
            layout = ?spec.layout,
            dim = spec.dim,
            "created collection"
        );
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<()> {
        drop_if_exists(&self.db, name).await
    }

    async fn insert(&self, spec: &CollectionSpec, records: &[IndexedVector]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let batch = records_to_batch(spec, records)?;
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        let table = open_existing(&self.db, &spec.name).await?;
        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| op_err(&format!("insert into {}", spec.name), e))?;
        Ok(records.len())
    }

    async fn nearest(
        &self,
        collection: &str,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<Neighbor>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let table = open_existing(&self.db, collection).await?;
        let mut stream = table
            .vector_search(query.to_vec())
            .map_err(|e| op_err(&format!("search {collection}"), e))?
            .distance_type(DistanceType::Cosine)
            .limit(limit)
            .execute()
            .await
            .map_err(|e| op_err(&format!("search {collection}"), e))?;

        let mut hits = Vec::new();
        while let Some(batch) = stream
            .try_next()
            .await
            .map_err(|e| op_err(&format!("read results from {collection}"), e))?
        {
            hits.extend(batch_to_neighbors(&batch)?);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let table = open_existing(&self.db, collection).await?;
        table
            .count_rows(None)
            .await
            .map_err(|e| op_err(&format!("count {collection}"), e))
    }

    async fn collection_dim(&self, name: &str) -> Result<Option<usize>> {
        if !table_exists(&self.db, name).await? {
            return Ok(None);
        }
        let table = open_existing(&self.db, name).await?;
        let schema = table
            .schema()
            .await
            .map_err(|e| op_err(&format!("read schema of {name}"), e))?;
        vector_dim(&schema)
            .map(Some)
            .ok_or_else(|| Error::Operation(format!("collection '{name}' has no vector column")))
    }
}
