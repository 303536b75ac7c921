//! metagen-core - Type metadata extraction for SDK code generation
//!
//! This crate turns declarations from a [`TypeSource`] into normalized, cached
//! class metadata and derives the facts later stages need:
//! - [`SourceExtractor`] for single-flight, cached [`ClassMeta`] extraction
//! - [`resolver`] for one-level dependency sets and eligibility filtering
//! - [`annotations`] for the pluggable annotation processor registry
//! - [`TypeModel`] for loading declarations from JSON
//!
//! Generic types are flattened in pre-order: `Map<String, List<Order>>`
//! becomes `[Map, String, List, Order]`. Every downstream stage consumes this
//! flattened form.

pub mod annotations;
pub mod builtins;
mod error;
mod extractor;
mod meta;
pub mod resolver;
pub mod signature;
mod source;
mod type_ref;

pub use annotations::{
    AnnotationFact, AnnotationProcessor, AnnotationRegistry, CommentContext, Fact, Locale,
};
pub use error::{AnnotationProcessingError, ExtractionError, ExtractionResult, ModelError};
pub use extractor::SourceExtractor;
pub use meta::{
    AnnotationRef, AnnotationValue, ClassKind, ClassMeta, FieldMeta, MethodMeta, ParamMeta,
    Visibility,
};
pub use resolver::EligibilityFilter;
pub use source::{FieldDecl, MethodDecl, ParamDecl, TypeDecl, TypeModel, TypeSource};
pub use type_ref::TypeRef;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnnotationRef, AnnotationRegistry, ClassKind, ClassMeta, EligibilityFilter,
        ExtractionError, FieldMeta, MethodMeta, SourceExtractor, TypeModel, TypeRef, TypeSource,
    };
}
