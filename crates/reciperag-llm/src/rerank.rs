//! LLM reranking of recipe candidates.
//!
//! Model output is untrusted: whatever comes back is reduced to a total order
//! over exactly the candidate ids.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use reciperag_core::error::Result;
use reciperag_core::traits::{CompletionGateway, Reranker};
use reciperag_core::types::{Candidate, RankedResult};

pub const RERANK_SYSTEM_PROMPT: &str = "You are a strict reranker for recipe retrieval.\n\
Rank candidates by relevance to the question.\n\
Prefer the candidate that directly contains the asked-for fact (time/temp/amount).\n\
Return ONLY JSON: {\"ranked_ids\": [..]}.\n\
Use only provided IDs.";

pub struct LlmReranker {
    gateway: Arc<dyn CompletionGateway>,
}

impl LlmReranker {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Reranker for LlmReranker {
    async fn rerank(&self, query: &str, candidates: &[Candidate]) -> Result<RankedResult> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = build_rerank_prompt(query, candidates);
        let raw = self.gateway.complete(RERANK_SYSTEM_PROMPT, &prompt).await?;
        debug!(model = self.gateway.model_name(), raw = %raw, "rerank response");
        let parsed = parse_ranked_ids(&raw);
        Ok(sanitize_ranking(&parsed, candidates))
    }
}

/// JSON user message `{"question": .., "candidates": [{"id": .., "text": ..}]}`.
pub fn build_rerank_prompt(query: &str, candidates: &[Candidate]) -> String {
    #[derive(Serialize)]
    struct Payload<'a> {
        question: &'a str,
        candidates: &'a [Candidate],
    }
    serde_json::to_string(&Payload { question: query, candidates }).unwrap_or_else(|e| {
        warn!("failed to serialize rerank payload: {e}");
        format!("{{\"question\": {query:?}, \"candidates\": []}}")
    })
}

/// Extract `ranked_ids` from a model response.
///
/// Tolerates prose or code fences around the outermost `{..}`. Non-string
/// entries are skipped and duplicates keep their first position. Anything
/// unparseable yields an empty list.
pub fn parse_ranked_ids(response: &str) -> Vec<String> {
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => {
            warn!("rerank response has no JSON object; falling back to candidate order");
            return Vec::new();
        }
    };

    let parsed: serde_json::Value = match serde_json::from_str(json_str) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to parse reranking JSON: {e}, falling back to candidate order");
            return Vec::new();
        }
    };

    let Some(arr) = parsed.get("ranked_ids").and_then(|v| v.as_array()) else {
        warn!("rerank JSON has no ranked_ids array");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    arr.iter()
        .filter_map(|v| v.as_str())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Drop ids that are not candidates, dedupe, then append missing candidates
/// in candidate order.
pub fn sanitize_ranking(raw: &[String], candidates: &[Candidate]) -> RankedResult {
    let known: HashSet<&str> = candidates.iter().map(|c| c.recipe_id.as_str()).collect();
    let mut placed: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut ranked = Vec::with_capacity(candidates.len());

    let mut dropped = 0usize;
    for id in raw {
        if known.contains(id.as_str()) {
            if placed.insert(id.as_str()) {
                ranked.push(id.clone());
            }
        } else {
            dropped += 1;
        }
    }
    let returned = ranked.len();
    for c in candidates {
        if placed.insert(c.recipe_id.as_str()) {
            ranked.push(c.recipe_id.clone());
        }
    }
    if dropped > 0 || returned < ranked.len() {
        warn!(
            dropped_foreign = dropped,
            appended_missing = ranked.len() - returned,
            "repaired rerank output"
        );
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cands(ids: &[&str]) -> Vec<Candidate> {
        ids.iter()
            .map(|id| Candidate { recipe_id: id.to_string(), text: format!("text {id}") })
            .collect()
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn foreign_ids_dropped_and_missing_appended() {
        let raw = parse_ranked_ids(r#"{"ranked_ids": ["r9","zzz"]}"#);
        let ranked = sanitize_ranking(&raw, &cands(&["r1", "r9", "r46"]));
        assert_eq!(ranked, strings(&["r9", "r1", "r46"]));
    }

    #[test]
    fn parses_fenced_json_and_skips_non_strings() {
        let raw = "Sure!\n```json\n{\"ranked_ids\": [\"r2\", 7, null, \"r1\", \"r2\"]}\n```";
        assert_eq!(parse_ranked_ids(raw), strings(&["r2", "r1"]));
    }

    #[test]
    fn garbage_yields_empty() {
        assert!(parse_ranked_ids("I cannot rank these").is_empty());
        assert!(parse_ranked_ids("{not json}").is_empty());
        assert!(parse_ranked_ids(r#"{"ids": ["r1"]}"#).is_empty());
        assert!(parse_ranked_ids("} backwards {").is_empty());
    }

    #[test]
    fn prompt_is_json_with_id_and_text() {
        let prompt = build_rerank_prompt("Bake fish—temp?", &cands(&["r4"]));
        let v: serde_json::Value = serde_json::from_str(&prompt).unwrap();
        assert_eq!(v["question"], "Bake fish—temp?");
        assert_eq!(v["candidates"][0]["id"], "r4");
        assert_eq!(v["candidates"][0]["text"], "text r4");
    }

    proptest! {
        #[test]
        fn sanitized_set_equals_candidate_set(
            cand_ids in proptest::collection::btree_set("r[0-9]{1,2}", 0..12),
            raw in proptest::collection::vec("r[0-9]{1,2}|zz[a-z]", 0..20),
        ) {
            let ids: Vec<&str> = cand_ids.iter().map(String::as_str).collect();
            let candidates = cands(&ids);
            let ranked = sanitize_ranking(&raw, &candidates);
            prop_assert_eq!(ranked.len(), candidates.len());
            let out: std::collections::BTreeSet<String> = ranked.into_iter().collect();
            prop_assert_eq!(out, cand_ids);
        }
    }
}
