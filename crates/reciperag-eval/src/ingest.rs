//! Full rebuilds of the baseline and chunked collections.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use reciperag_core::chunking::chunk_recipe;
use reciperag_core::corpus::RecipeBook;
use reciperag_core::error::Result;
use reciperag_core::traits::{Embedder, VectorIndex};
use reciperag_core::types::{CollectionSpec, IndexedVector, Recipe, Section};

pub fn baseline_embedding_input(recipe: &Recipe) -> String {
    format!("{}\n{}", recipe.title, recipe.content)
}

pub fn chunk_embedding_input(title: &str, section: Section, text: &str) -> String {
    format!("{title}\nsection:{section}\n{text}")
}

fn progress_bar(len: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let template = format!(
        "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} {{msg}}"
    );
    if let Ok(style) = ProgressStyle::default_bar().template(&template) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Drop and recreate the baseline collection, then index one vector per recipe.
pub async fn ingest_baseline(
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
    spec: &CollectionSpec,
    book: &RecipeBook,
) -> Result<usize> {
    index.recreate_collection(spec).await?;
    let pb = progress_bar(book.len(), "recipes");
    pb.set_message(spec.name.clone());

    let mut records = Vec::with_capacity(book.len());
    for recipe in book.recipes() {
        let embedding = embedder.embed(&baseline_embedding_input(recipe)).await?;
        records.push(IndexedVector {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            section: None,
            content: recipe.content.clone(),
            embedding,
        });
        pb.inc(1);
    }
    let written = index.insert(spec, &records).await?;
    pb.finish_and_clear();
    info!(collection = %spec.name, records = written, "ingested baseline collection");
    Ok(written)
}

/// Drop and recreate the chunked collection, then index two vectors per recipe.
pub async fn ingest_chunked(
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
    spec: &CollectionSpec,
    book: &RecipeBook,
) -> Result<usize> {
    index.recreate_collection(spec).await?;
    let pb = progress_bar(book.len() * 2, "chunks");
    pb.set_message(spec.name.clone());

    let mut records = Vec::with_capacity(book.len() * 2);
    for recipe in book.recipes() {
        for chunk in chunk_recipe(recipe) {
            let input = chunk_embedding_input(&recipe.title, chunk.section, &chunk.text);
            let embedding = embedder.embed(&input).await?;
            records.push(IndexedVector {
                recipe_id: chunk.recipe_id,
                title: recipe.title.clone(),
                section: Some(chunk.section),
                content: chunk.text,
                embedding,
            });
            pb.inc(1);
        }
    }
    let written = index.insert(spec, &records).await?;
    pb.finish_and_clear();
    info!(collection = %spec.name, records = written, "ingested chunked collection");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_inputs() {
        let r = Recipe { id: "r1".into(), title: "Pasta".into(), content: "Boil.".into() };
        assert_eq!(baseline_embedding_input(&r), "Pasta\nBoil.");
        assert_eq!(
            chunk_embedding_input("Pasta", Section::Instructions, "Instructions:\nBoil."),
            "Pasta\nsection:instructions\nInstructions:\nBoil."
        );
    }
}
