//! # metagen
//!
//! A metadata pipeline that turns a typed model of backend classes into
//! target-language node descriptions for SDK code generation.
//!
//! metagen walks the types reachable from a set of roots and hands each one to
//! a [`Renderer`] as a [`TargetClassMeta`], dependencies first:
//! - cached, single-flight extraction of class metadata
//! - pluggable annotation processors (validation, routes, Swagger, OpenAPI)
//! - per-language type mapping for TypeScript, Dart and Java
//! - concurrent traversal with deterministic emission order
//!
//! ## Quick Start
//!
//! ```ignore
//! use metagen::prelude::*;
//! use std::sync::Arc;
//!
//! let model = TypeModel::from_file("model.json".as_ref())?;
//! let renderer = Arc::new(CollectingRenderer::new());
//! let generator = GeneratorBuilder::new(TargetLanguage::Typescript, Arc::new(model))
//!     .with_pipeline(Pipeline::Swagger2)
//!     .with_package_prefix("com.example.model", "models")
//!     .build(renderer.clone());
//!
//! let runtime = AsyncRuntime::with_defaults()?;
//! let report = runtime.generate(generator.orchestrator(), vec![
//!     "com.example.web.OrderController".to_string(),
//! ])?;
//! println!("emitted {} nodes", report.emitted.len());
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`metagen_core`] - type model, extractor, dependency resolver, annotations
//! - [`metagen_lang`] - target vocabulary, type mapping and language builders
//! - [`metagen_runtime`] - orchestrator, renderer boundary and Tokio runtime

mod generator;

pub use generator::{Generator, GeneratorBuilder, Pipeline};

// Re-export core types
pub use metagen_core::{
    AnnotationRegistry, ClassMeta, EligibilityFilter, ExtractionError, Locale, ModelError,
    SourceExtractor, TypeDecl, TypeModel, TypeRef, TypeSource,
};

// Re-export language types
pub use metagen_lang::{
    BuildError, FieldNaming, LanguageMetaBuilder, NodeShape, PrefixPackageMap, TargetClassMeta,
    TargetLanguage, TargetType, TypeTables,
};

// Re-export runtime types
pub use metagen_runtime::{
    AsyncRuntime, CollectingRenderer, GenerateError, GenerateResult, GenerationReport,
    Orchestrator, OrchestratorConfig, RenderError, Renderer, RuntimeConfig, TypeState,
};

// Re-export common dependencies that renderer authors need
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use metagen::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        AsyncRuntime, CollectingRenderer, FieldNaming, GenerateError, GenerationReport, Generator,
        GeneratorBuilder, Locale, Pipeline, RenderError, Renderer, TargetClassMeta,
        TargetLanguage, TypeModel,
    };

    pub use serde::{Deserialize, Serialize};
}
