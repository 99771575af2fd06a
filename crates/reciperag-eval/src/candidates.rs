//! Group chunk hits into per-recipe rerank candidates.

use std::collections::HashMap;

use reciperag_core::text::truncate_chars;
use reciperag_core::types::{Candidate, CandidateOrder, Neighbor};

struct Group<'a> {
    recipe_id: &'a str,
    first_seen: usize,
    min_distance: f32,
    parts: Vec<String>,
}

fn section_label(hit: &Neighbor) -> &str {
    hit.section.map_or("full", |s| s.as_str())
}

/// Select at most `max_candidates` recipes from nearest-first chunk hits.
///
/// Each candidate's text joins its chunks (labeled with title and section) in
/// hit order and is cut to `max_chars` characters.
pub fn select_candidates(
    hits: &[Neighbor],
    max_candidates: usize,
    max_chars: usize,
    order: CandidateOrder,
) -> Vec<Candidate> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (pos, hit) in hits.iter().enumerate() {
        let gi = *index.entry(hit.recipe_id.as_str()).or_insert_with(|| {
            groups.push(Group {
                recipe_id: hit.recipe_id.as_str(),
                first_seen: pos,
                min_distance: hit.distance,
                parts: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[gi];
        group.min_distance = group.min_distance.min(hit.distance);
        group.parts.push(format!(
            "TITLE: {}\nSECTION: {}\n{}",
            hit.title,
            section_label(hit),
            hit.content
        ));
    }

    if order == CandidateOrder::MinDistance {
        groups.sort_by(|a, b| {
            a.min_distance
                .total_cmp(&b.min_distance)
                .then(a.first_seen.cmp(&b.first_seen))
        });
    }

    groups
        .into_iter()
        .take(max_candidates)
        .map(|g| {
            let joined = g.parts.join("\n\n");
            Candidate {
                recipe_id: g.recipe_id.to_string(),
                text: truncate_chars(&joined, max_chars).to_string(),
            }
        })
        .collect()
}
