use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::CandidateOrder;

/// Layered configuration: defaults, `config.toml`, `config.<env>.toml`, `APP_*` env vars.
pub struct Config {
    figment: Figment,
    settings: Settings,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(
                Env::raw()
                    .only(&["OPENAI_API_KEY", "OPENAI_BASE_URL"])
                    .map(|key| {
                        key.as_str().to_ascii_lowercase().replacen("openai_", "openai.", 1).into()
                    }),
            )
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let settings: Settings = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(Self { figment, settings })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub openai: OpenAiSettings,
    pub eval: EvalSettings,
    pub assistant: AssistantSettings,
    pub embedding: EmbeddingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub recipes_path: String,
    pub index_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            recipes_path: "data/recipes.json".to_string(),
            index_dir: "data/indexes/lancedb".to_string(),
        }
    }
}

impl DataSettings {
    pub fn resolved_recipes_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.recipes_path)
    }

    pub fn resolved_index_dir(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.index_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub chat_model: String,
    pub rerank_model: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimension: 1536,
            chat_model: "gpt-4o-mini".to_string(),
            rerank_model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalSettings {
    pub baseline_collection: String,
    pub chunk_collection: String,
    pub improvement_threshold: f64,
    pub chunk_neighbors: usize,
    pub max_candidates: usize,
    pub max_candidate_chars: usize,
    pub candidate_order: CandidateOrder,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            baseline_collection: "RecipeBaseline".to_string(),
            chunk_collection: "RecipeChunks".to_string(),
            improvement_threshold: 0.30,
            chunk_neighbors: 80,
            max_candidates: 12,
            max_candidate_chars: 1200,
            candidate_order: CandidateOrder::FirstSeen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub collection: String,
    pub max_context_chars: usize,
    pub top_k: usize,
    pub insert_batch_size: usize,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            collection: "RecipeNote".to_string(),
            max_context_chars: 8000,
            top_k: 3,
            insert_batch_size: 16,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub use_fake: bool,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let eval = &self.eval;
        if !eval.improvement_threshold.is_finite() || eval.improvement_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "eval.improvement_threshold must be finite and >= 0, got {}",
                eval.improvement_threshold
            )));
        }
        for (key, value) in [
            ("eval.chunk_neighbors", eval.chunk_neighbors),
            ("eval.max_candidates", eval.max_candidates),
            ("eval.max_candidate_chars", eval.max_candidate_chars),
            ("openai.embedding_dimension", self.openai.embedding_dimension),
            ("assistant.top_k", self.assistant.top_k),
            ("assistant.insert_batch_size", self.assistant.insert_batch_size),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{key} must be >= 1")));
            }
        }
        if eval.baseline_collection == eval.chunk_collection {
            return Err(Error::InvalidConfig(format!(
                "baseline and chunk collections must differ (both '{}')",
                eval.baseline_collection
            )));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_files() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load_for_env("test").expect("load");
            assert_eq!(cfg.settings().eval, EvalSettings::default());
            assert_eq!(cfg.settings().data, DataSettings::default());
            assert_eq!(cfg.settings().eval.max_candidates, 12);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_and_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [eval]
                chunk_neighbors = 40
                candidate_order = "min_distance"

                [openai]
                chat_model = "from-file"
                "#,
            )?;
            jail.create_file("config.test.toml", "[openai]\nchat_model = \"from-test-file\"\n")?;
            jail.set_env("APP_EVAL__MAX_CANDIDATES", "5");

            let cfg = Config::load_for_env("test").expect("load");
            let s = cfg.settings();
            assert_eq!(s.eval.chunk_neighbors, 40);
            assert_eq!(s.eval.max_candidates, 5);
            assert_eq!(s.eval.candidate_order, CandidateOrder::MinDistance);
            assert_eq!(s.openai.chat_model, "from-test-file");
            assert_eq!(cfg.get::<usize>("eval.max_candidates").expect("get"), 5);
            Ok(())
        });
    }

    #[test]
    fn openai_env_fallback_is_overridden_by_app_prefix() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENAI_API_KEY", "sk-plain");
            jail.set_env("OPENAI_BASE_URL", "http://localhost:9999");
            let cfg = Config::load_for_env("test").expect("load");
            assert_eq!(cfg.settings().openai.api_key.as_deref(), Some("sk-plain"));
            assert_eq!(cfg.settings().openai.base_url, "http://localhost:9999");

            jail.set_env("APP_OPENAI__API_KEY", "sk-app");
            let cfg = Config::load_for_env("test").expect("load");
            assert_eq!(cfg.settings().openai.api_key.as_deref(), Some("sk-app"));
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[eval]\nmax_candidates = 0\n")?;
            let err = Config::load_for_env("test").err().expect("must fail");
            assert!(matches!(err, Error::InvalidConfig(_)));
            Ok(())
        });

        let mut s = Settings::default();
        s.eval.improvement_threshold = f64::NAN;
        assert!(matches!(s.validate(), Err(Error::InvalidConfig(_))));
        s.eval.improvement_threshold = -0.1;
        assert!(s.validate().is_err());
    }

    #[test]
    fn resolve_keeps_absolute_and_joins_relative() {
        let base = Path::new("/srv/app");
        assert_eq!(resolve_with_base(base, "data/r.json"), PathBuf::from("/srv/app/data/r.json"));
        assert_eq!(resolve_with_base(base, "/tmp/x"), PathBuf::from("/tmp/x"));
    }
}
