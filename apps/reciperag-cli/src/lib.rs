//! Shared plumbing for the `reciperag-eval` and `reciperag-assistant` binaries.

pub mod args;
pub mod assistant;

use anyhow::Context;
use reciperag_core::config::{Config, Settings};

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load().context("failed to load configuration")?;
    Ok(config.into_settings())
}
