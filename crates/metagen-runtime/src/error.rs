//! Error types for a generation run

use metagen_core::ExtractionError;
use metagen_lang::BuildError;
use thiserror::Error;

/// Result type alias for generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// A renderer could not write a node
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Fatal error that ends a generation run
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A root type could not be extracted
    #[error("root type {name} cannot be extracted: {source}")]
    Root {
        name: String,
        source: ExtractionError,
    },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("rendering {name} failed: {source}")]
    Render { name: String, source: RenderError },

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("generation cancelled: {0}")]
    Cancelled(String),

    /// The emission consumer stopped before the run finished
    #[error("emitter closed")]
    EmitterClosed,
}

impl GenerateError {
    /// Qualified name of the type the error is about, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            GenerateError::Root { name, .. } | GenerateError::Render { name, .. } => Some(name),
            GenerateError::Build(err) => Some(err.owner()),
            _ => None,
        }
    }
}
