//! Embedding gateways: an OpenAI-compatible HTTP embedder and an offline hashed embedder.

mod fake;
mod openai;

pub use fake::FakeEmbedder;
pub use openai::OpenAiEmbedder;

use reciperag_core::config::Settings;
use reciperag_core::error::Result;
use reciperag_core::traits::Embedder;
use tracing::info;

/// True when `APP_USE_FAKE_EMBEDDINGS` is `1` or `true`.
pub fn fake_embeddings_requested() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn get_default_embedder(settings: &Settings) -> Result<Box<dyn Embedder>> {
    let dim = settings.openai.embedding_dimension;
    if settings.embedding.use_fake || fake_embeddings_requested() {
        info!(dim, "using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(dim)));
    }
    info!(model = %settings.openai.embedding_model, dim, "using OpenAI-compatible embedder");
    Ok(Box::new(OpenAiEmbedder::new(&settings.openai)?))
}
