//! Domain types shared by the ingestion, retrieval and evaluation crates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub type RecipeId = String;

/// A single recipe record from the static corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub content: String,
}

/// Semantic section of a recipe produced by chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Ingredients,
    Instructions,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Ingredients => "ingredients",
            Section::Instructions => "instructions",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ingredients" => Some(Section::Ingredients),
            "instructions" => Some(Section::Instructions),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One section of one recipe. Recomputed at ingestion time, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub recipe_id: RecipeId,
    pub section: Section,
    pub text: String,
}

/// The unit stored in a vector index collection.
///
/// `section` is `None` for whole-document collections and always set for
/// sectioned collections.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedVector {
    pub recipe_id: RecipeId,
    pub title: String,
    pub section: Option<Section>,
    pub content: String,
    pub embedding: Vec<f32>,
}

/// A nearest-neighbor hit. Lists of neighbors are ordered nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub recipe_id: RecipeId,
    pub title: String,
    pub section: Option<Section>,
    pub content: String,
    pub distance: f32,
}

/// Record shape of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionLayout {
    /// One vector per recipe: `recipe_id`, `title`, `content`.
    Document,
    /// One vector per recipe section: adds a `section` column.
    Sectioned,
}

/// Name, record shape and vector width of one index collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: String,
    pub layout: CollectionLayout,
    pub dim: usize,
}

impl CollectionSpec {
    pub fn document(name: impl Into<String>, dim: usize) -> Self {
        Self { name: name.into(), layout: CollectionLayout::Document, dim }
    }

    pub fn sectioned(name: impl Into<String>, dim: usize) -> Self {
        Self { name: name.into(), layout: CollectionLayout::Sectioned, dim }
    }
}

/// A benchmark query with every recipe id that counts as a correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub expected: BTreeSet<RecipeId>,
}

impl Query {
    pub fn new(text: impl Into<String>, expected: &[&str]) -> Self {
        Self {
            text: text.into(),
            expected: expected.iter().map(|id| (*id).to_string()).collect(),
        }
    }
}

/// Reranking input: all retrieved chunks of one recipe merged into one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "id")]
    pub recipe_id: RecipeId,
    pub text: String,
}

/// Recipe ids ordered best first, without duplicates.
pub type RankedResult = Vec<RecipeId>;

/// How chunk hits are ordered into recipe candidates before truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    /// Position of the first chunk of the recipe in the neighbor list.
    #[default]
    FirstSeen,
    /// Smallest chunk distance of the recipe; ties keep first-seen order.
    MinDistance,
}
