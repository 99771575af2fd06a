//! Core types, traits, configuration and corpus handling for the recipe RAG harness.
//!
//! Uses Figment to merge defaults + `config.toml` + `config.<env>.toml` + `APP_*` env vars.

pub mod chunking;
pub mod config;
pub mod corpus;
pub mod error;
pub mod text;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
