//! Answer mode for the interactive assistant.

use reciperag_core::error::Result;
use reciperag_core::text::truncate_chars;
use reciperag_core::traits::CompletionGateway;
use reciperag_core::types::Neighbor;

pub const UNKNOWN_ANSWER: &str = "I do not know based on the provided context.";

pub const RAG_SYSTEM_PROMPT: &str = "You are a precise recipe assistant working with a small recipe knowledge base.

- Always use the exact ingredient amounts, times, and temperatures from CONTEXT.
- If CONTEXT includes grams, milliliters, minutes, etc., repeat them accurately.
- Answer in clear numbered steps when appropriate.
- If the answer is not in CONTEXT, reply exactly:
  \"I do not know based on the provided context.\"";

pub const NO_RAG_SYSTEM_PROMPT: &str = "You are a casual home-cooking advisor.
- Give only high-level, generic advice.
- DO NOT mention exact gram weights, milliliters, temperatures or times.
- Use phrases like 'a bit of', 'some', 'for a few minutes', etc.
- Do NOT give numbered step-by-step instructions.
- Keep answers short: 3–5 sentences.";

/// `Title: ..\nContent: ..` blocks separated by `---`.
pub fn format_context(hits: &[Neighbor]) -> String {
    hits.iter()
        .map(|h| format!("Title: {}\nContent: {}", h.title, h.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Answer from retrieved recipes. No hits means no model call.
pub async fn answer_with_context(
    gateway: &dyn CompletionGateway,
    question: &str,
    hits: &[Neighbor],
    max_context_chars: usize,
) -> Result<String> {
    if hits.is_empty() {
        return Ok(UNKNOWN_ANSWER.to_string());
    }
    let context = format_context(hits);
    let context = truncate_chars(&context, max_context_chars);
    let user = format!("CONTEXT:\n{context}\n\nQUESTION:\n{question}");
    gateway.complete(RAG_SYSTEM_PROMPT, &user).await
}

pub async fn answer_without_context(
    gateway: &dyn CompletionGateway,
    question: &str,
) -> Result<String> {
    gateway.complete(NO_RAG_SYSTEM_PROMPT, question).await
}
