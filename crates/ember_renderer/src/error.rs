//! Error types for rendering and scene setup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the tracing hot path: configuration and image output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write image: {0}")]
    Write(#[from] std::io::Error),

    #[error("Invalid scene settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid render config: {0}")]
    InvalidConfig(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
