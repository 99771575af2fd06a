use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use reciperag_core::config::OpenAiSettings;
use reciperag_core::error::{Error, Result};
use reciperag_core::traits::CompletionGateway;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Chat client for an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiChatClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(settings: &OpenAiSettings, model: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Gateway(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: model.to_string(),
        })
    }

    /// Client for answers, using `openai.chat_model`.
    pub fn for_chat(settings: &OpenAiSettings) -> Result<Self> {
        Self::new(settings, &settings.chat_model)
    }

    /// Client for reranking, using `openai.rerank_model`.
    pub fn for_rerank(settings: &OpenAiSettings) -> Result<Self> {
        Self::new(settings, &settings.rerank_model)
    }

    pub async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage>,
            temperature: f32,
        }

        let request = ChatRequest { model: &self.model, messages, temperature: 0.0 };
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, "chat completion request");

        let mut req = self.http_client.post(&url).json(&request);
        if let Some(ref api_key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("chat request failed: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway(format!("LLM service error (HTTP {status}): {body}")));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("invalid chat response: {e}")))?;

        first_choice(chat_response)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Trimmed text of the first choice. A null `content` reads as empty.
fn first_choice(response: ChatResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::Gateway("No response from LLM".to_string()))?
        .message
        .content
        .unwrap_or_default();
    Ok(content.trim().to_string())
}

#[async_trait]
impl CompletionGateway for OpenAiChatClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];
        self.chat_completion(messages).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
