//! Section chunking: every recipe becomes exactly one ingredients chunk and one
//! instructions chunk.

use tracing::warn;

use crate::types::{Chunk, Recipe, Section};

pub const INSTRUCTIONS_MARKER: &str = "Instructions:\n";
pub const INGREDIENTS_MARKER: &str = "Ingredients:\n";

/// Split recipe content into `(ingredients, instructions)` text.
///
/// Splits at the first `Instructions:\n`. Without the marker both parts are the
/// raw content. Serving and timing lines before the ingredients label stay in
/// the ingredients part.
pub fn split_sections(content: &str) -> (String, String) {
    let Some((before, after)) = content.split_once(INSTRUCTIONS_MARKER) else {
        return (content.to_string(), content.to_string());
    };

    let mut ingredients = normalize_ingredients_label(before);
    if ingredients.is_empty() {
        ingredients = content.to_string();
    }
    let instructions = format!("{INSTRUCTIONS_MARKER}{}", after.trim()).trim().to_string();
    (ingredients, instructions)
}

/// Trim and collapse repeated leading `Ingredients:\n` labels to one.
fn normalize_ingredients_label(before: &str) -> String {
    let trimmed = before.trim();
    let Some((preamble, rest)) = trimmed.split_once(INGREDIENTS_MARKER) else {
        return trimmed.to_string();
    };
    let mut rest = rest.trim_start();
    while let Some(stripped) = rest.strip_prefix(INGREDIENTS_MARKER) {
        rest = stripped.trim_start();
    }
    format!("{preamble}{INGREDIENTS_MARKER}{rest}").trim().to_string()
}

pub fn chunk_recipe(recipe: &Recipe) -> [Chunk; 2] {
    if !recipe.content.contains(INSTRUCTIONS_MARKER) {
        warn!(recipe_id = %recipe.id, "no instructions marker; both chunks use the full content");
    }
    let (ingredients, instructions) = split_sections(&recipe.content);
    [
        Chunk { recipe_id: recipe.id.clone(), section: Section::Ingredients, text: ingredients },
        Chunk { recipe_id: recipe.id.clone(), section: Section::Instructions, text: instructions },
    ]
}
