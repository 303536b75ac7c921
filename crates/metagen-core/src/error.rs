//! Error types for metadata extraction

use thiserror::Error;

/// Result type alias for extraction operations
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Error raised while turning a declaration into class metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The type source has no declaration for the requested name
    #[error("no declaration found for type {0}")]
    UnknownType(String),

    /// A field, method or supertype carries a signature that cannot be parsed
    #[error("malformed signature `{signature}` on {owner}.{member}: {reason}")]
    MalformedSignature {
        owner: String,
        member: String,
        signature: String,
        reason: String,
    },
}

impl ExtractionError {
    /// Name of the type whose extraction failed.
    pub fn type_name(&self) -> &str {
        match self {
            ExtractionError::UnknownType(name) => name,
            ExtractionError::MalformedSignature { owner, .. } => owner,
        }
    }
}

/// Error raised by an annotation processor for an invalid annotation instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationProcessingError {
    /// A required attribute is absent
    #[error("{kind}: missing required attribute `{attribute}`")]
    MissingAttribute { kind: String, attribute: String },

    /// An attribute is present but has the wrong shape
    #[error("{kind}: attribute `{attribute}` must be {expected}")]
    InvalidAttribute {
        kind: String,
        attribute: String,
        expected: &'static str,
    },

    /// An attribute value is outside the set the processor understands
    #[error("{kind}: unsupported value `{value}` for `{attribute}`")]
    UnsupportedValue {
        kind: String,
        attribute: String,
        value: String,
    },
}

/// Error raised while loading a type model
#[derive(Error, Debug)]
pub enum ModelError {
    /// IO error reading the model
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The model is not valid JSON for the declaration schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two declarations share a qualified name
    #[error("duplicate declaration for type {0}")]
    DuplicateType(String),

    /// A declaration is structurally invalid
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),
}
