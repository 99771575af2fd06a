//! Completion gateway: OpenAI-compatible chat client, candidate reranking and
//! assistant answers.

pub mod answer;
pub mod client;
pub mod rerank;

pub use client::{ChatMessage, OpenAiChatClient};
pub use rerank::LlmReranker;
