use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Vector index unreachable: {0}")]
    Connectivity(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
