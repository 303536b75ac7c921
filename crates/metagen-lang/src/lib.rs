//! metagen-lang - Target-language metadata for SDK code generation
//!
//! This crate maps extracted [`ClassMeta`](metagen_core::ClassMeta) into
//! renderer-ready nodes:
//! - [`TypeMappingEngine`] for native-to-target type list mapping
//! - [`LanguageMetaBuilder`] and its TypeScript, Dart and Java builders
//! - [`strategy`] for member selection and output locations
//! - [`routes`] for HTTP path combination and route deduplication

mod accessors;
pub mod builder;
mod error;
pub mod languages;
mod mapping;
pub mod naming;
pub mod routes;
pub mod strategy;
mod target;

pub use accessors::merge_accessor_fields;
pub use builder::{AnnotationOwner, BuilderContext, FieldNaming, LanguageMetaBuilder};
pub use error::{
    BuildError, BuildResult, MappingError, MappingResult, MemberPosition, UnmappableTypeError,
};
pub use languages::{builder_for, default_tables, precise_numbers};
pub use mapping::{TypeMappingEngine, TypeTables};
pub use strategy::{MatchingStrategy, PackageMapStrategy, PrefixPackageMap, RouteMatchingStrategy};
pub use target::{
    AnnotationArg, HttpRoute, NodeRef, NodeShape, TargetAnnotation, TargetClassMeta,
    TargetFieldMeta, TargetKind, TargetLanguage, TargetMethodMeta, TargetParam, TargetType,
    TargetTypeRef,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuildError, BuilderContext, LanguageMetaBuilder, NodeRef, NodeShape, TargetClassMeta,
        TargetLanguage, TypeMappingEngine, TypeTables,
    };
}
