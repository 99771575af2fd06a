use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::types::Recipe;

/// Immutable recipe corpus with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (i, r) in recipes.iter().enumerate() {
            if r.id.trim().is_empty() {
                return Err(Error::Corpus(format!("recipe at position {i} has an empty id")));
            }
            if by_id.insert(r.id.clone(), i).is_some() {
                return Err(Error::Corpus(format!("duplicate recipe id '{}'", r.id)));
            }
        }
        Ok(Self { recipes, by_id })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)
            .map_err(|e| Error::Corpus(format!("malformed corpus JSON: {e}")))?;
        Self::new(recipes)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        if !absolute.is_file() {
            return Err(Error::NotFound(format!("recipe corpus {}", absolute.display())));
        }
        let bytes = fs::read(&absolute)
            .map_err(|e| Error::Corpus(format!("failed to read {}: {e}", absolute.display())))?;
        let text = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        let book = Self::from_json_str(&text)?;
        info!(path = %absolute.display(), recipes = book.len(), "loaded recipe corpus");
        Ok(book)
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&i| &self.recipes[i])
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

pub fn load_recipes(path: &Path) -> Result<RecipeBook> {
    RecipeBook::load(path)
}
