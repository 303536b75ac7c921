//! Error types for type mapping and node building

use crate::target::TargetLanguage;
use metagen_core::ExtractionError;
use std::fmt;
use thiserror::Error;

/// Result type alias for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;

/// Result type alias for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// No mapping rule covers a native type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {language} mapping for type {type_name}")]
pub struct UnmappableTypeError {
    pub type_name: String,
    pub language: TargetLanguage,
}

/// Error raised while mapping a flattened type list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error(transparent)]
    Unmappable(#[from] UnmappableTypeError),

    /// A referenced complex type could not be extracted
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Member of a class whose type failed to map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPosition {
    Field(String),
    Return(String),
    Param { method: String, param: String },
    Superclass,
}

impl fmt::Display for MemberPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberPosition::Field(name) => write!(f, "field `{name}`"),
            MemberPosition::Return(method) => write!(f, "return type of `{method}`"),
            MemberPosition::Param { method, param } => {
                write!(f, "parameter `{param}` of `{method}`")
            }
            MemberPosition::Superclass => write!(f, "superclass"),
        }
    }
}

/// Error raised while building a target node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A member type could not be mapped
    #[error("cannot map {position} of {owner}: {source}")]
    Mapping {
        owner: String,
        position: MemberPosition,
        source: MappingError,
    },

    /// Inherited members could not be extracted
    #[error("cannot read inherited members of {owner}: {source}")]
    Inherited {
        owner: String,
        source: ExtractionError,
    },
}

impl BuildError {
    pub fn mapping(owner: &str, position: MemberPosition, source: MappingError) -> Self {
        BuildError::Mapping {
            owner: owner.to_string(),
            position,
            source,
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            BuildError::Mapping { owner, .. } | BuildError::Inherited { owner, .. } => owner,
        }
    }

    /// Whether no mapping rule exists. Such a failure recurs on every run
    /// with the same tables, unlike extraction failures of referenced types.
    pub fn is_unmappable(&self) -> bool {
        matches!(
            self,
            BuildError::Mapping {
                source: MappingError::Unmappable(_),
                ..
            }
        )
    }
}
