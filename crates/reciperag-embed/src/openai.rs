use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use reciperag_core::config::OpenAiSettings;
use reciperag_core::error::{Error, Result};
use reciperag_core::traits::Embedder;

/// Embedder backed by an OpenAI-compatible `/v1/embeddings` endpoint.
pub struct OpenAiEmbedder {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    dim: usize,
}

impl OpenAiEmbedder {
    pub fn new(settings: &OpenAiSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Gateway(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.embedding_model.clone(),
            dim: settings.embedding_dimension,
        })
    }
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

/// Put response vectors back in request order and check count and width.
fn collect_ordered(data: Vec<EmbedData>, expected: usize, dim: usize) -> Result<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(Error::Gateway(format!(
            "embedding service returned {} vectors for {} inputs",
            data.len(),
            expected
        )));
    }
    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];
    for (pos, item) in data.into_iter().enumerate() {
        let idx = item.index.unwrap_or(pos);
        if idx >= expected || slots[idx].is_some() {
            return Err(Error::Gateway(format!("embedding service returned bad index {idx}")));
        }
        if item.embedding.len() != dim {
            return Err(Error::Gateway(format!(
                "embedding has dimension {}, expected {dim}",
                item.embedding.len()
            )));
        }
        slots[idx] = Some(item.embedding);
    }
    slots
        .into_iter()
        .map(|s| s.ok_or_else(|| Error::Gateway("embedding service skipped an input".to_string())))
        .collect()
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            input: &'a [String],
        }

        let request = EmbedRequest { model: &self.model, input: texts };
        let url = format!("{}/v1/embeddings", self.base_url);
        debug!(url = %url, inputs = texts.len(), "embedding request");

        let mut req = self.http_client.post(&url).json(&request);
        if let Some(ref api_key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("embedding request failed: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway(format!("Embedding service error (HTTP {status}): {body}")));
        }
        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("invalid embedding response: {e}")))?;

        collect_ordered(parsed.data, texts.len(), self.dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: Option<usize>, v: &[f32]) -> EmbedData {
        EmbedData { index, embedding: v.to_vec() }
    }

    #[test]
    fn reorders_by_index() {
        let data = vec![item(Some(1), &[2.0, 2.0]), item(Some(0), &[1.0, 1.0])];
        let out = collect_ordered(data, 2, 2).unwrap();
        assert_eq!(out, vec![vec![1.0, 1.0], vec![2.0, 2.0]]);
    }

    #[test]
    fn missing_index_uses_position() {
        let out = collect_ordered(vec![item(None, &[1.0]), item(None, &[2.0])], 2, 1).unwrap();
        assert_eq!(out, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn wrong_count_or_width_is_gateway_error() {
        let short = collect_ordered(vec![item(Some(0), &[1.0])], 2, 1);
        assert!(matches!(short, Err(Error::Gateway(_))));
        let narrow = collect_ordered(vec![item(Some(0), &[1.0, 2.0])], 1, 3);
        assert!(matches!(narrow, Err(Error::Gateway(_))));
        assert!(matches!(
            collect_ordered(vec![item(Some(0), &[1.0]), item(Some(0), &[2.0])], 2, 1),
            Err(Error::Gateway(_))
        ));
    }
}
