//! Interactive recipe assistant over a single-vector-per-recipe collection.

use tracing::{info, warn};

use reciperag_core::corpus::RecipeBook;
use reciperag_core::error::Result;
use reciperag_core::traits::{CompletionGateway, Embedder, VectorIndex};
use reciperag_core::types::{CollectionSpec, IndexedVector};
use reciperag_llm::answer::{answer_with_context, answer_without_context};

pub struct Assistant<'a> {
    pub index: &'a dyn VectorIndex,
    pub embedder: &'a dyn Embedder,
    pub chat: &'a dyn CompletionGateway,
    pub spec: CollectionSpec,
    pub top_k: usize,
    pub max_context_chars: usize,
}

/// Answers to one question, with and without retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPair {
    pub rag: String,
    pub no_rag: String,
}

impl Assistant<'_> {
    /// Rebuild the collection unless it holds exactly one vector per recipe at the
    /// embedder's width. Returns records written.
    pub async fn ensure_ingested(&self, book: &RecipeBook, batch_size: usize) -> Result<usize> {
        match self.index.collection_dim(&self.spec.name).await? {
            Some(dim) if dim != self.spec.dim => {
                warn!(
                    collection = %self.spec.name,
                    stored = dim,
                    expected = self.spec.dim,
                    "vector width changed; rebuilding"
                );
            }
            Some(_) => {
                let rows = self.index.count(&self.spec.name).await?;
                if rows == book.len() {
                    info!(
                        collection = %self.spec.name,
                        rows,
                        "assistant collection already populated"
                    );
                    return Ok(0);
                }
                warn!(
                    collection = %self.spec.name,
                    rows,
                    recipes = book.len(),
                    "row count differs from corpus; rebuilding"
                );
            }
            None => {}
        }
        self.index.recreate_collection(&self.spec).await?;

        let mut written = 0usize;
        for batch in book.recipes().chunks(batch_size.max(1)) {
            let texts: Vec<String> =
                batch.iter().map(|r| format!("{}\n\n{}", r.title, r.content)).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;
            let records: Vec<IndexedVector> = batch
                .iter()
                .zip(vectors)
                .map(|(r, embedding)| IndexedVector {
                    recipe_id: r.id.clone(),
                    title: r.title.clone(),
                    section: None,
                    content: r.content.clone(),
                    embedding,
                })
                .collect();
            written += self.index.insert(&self.spec, &records).await?;
        }
        info!(collection = %self.spec.name, records = written, "ingested assistant collection");
        Ok(written)
    }

    pub async fn answer(&self, question: &str) -> Result<AnswerPair> {
        let qvec = self.embedder.embed(question).await?;
        let hits = self.index.nearest(&self.spec.name, &qvec, self.top_k).await?;
        let rag = answer_with_context(self.chat, question, &hits, self.max_context_chars).await?;
        let no_rag = answer_without_context(self.chat, question).await?;
        Ok(AnswerPair { rag, no_rag })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Blank,
    Exit,
    Question(&'a str),
}

pub fn classify_input(line: &str) -> Input<'_> {
    let q = line.trim();
    if q.is_empty() {
        Input::Blank
    } else if q.eq_ignore_ascii_case("exit") || q.eq_ignore_ascii_case("quit") {
        Input::Exit
    } else {
        Input::Question(q)
    }
}
