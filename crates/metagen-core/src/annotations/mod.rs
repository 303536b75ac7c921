//! Annotation processing.
//!
//! An [`AnnotationProcessor`] turns one annotation instance into a typed
//! [`Fact`] and renders that fact as a human-readable comment. The
//! [`AnnotationRegistry`] maps annotation kinds to processors.
//!
//! # Built-in processors
//!
//! | Pipeline | Kinds |
//! |----------|-------|
//! | [`AnnotationRegistry::with_defaults`] | `Size`, `NotNull`, `Pattern` (javax and jakarta), the six Spring mapping kinds, Spring `RequestBody` |
//! | [`register_swagger2`] | `Api`, `ApiOperation`, `ApiParam`, `ApiImplicitParam(s)`, `ApiModel`, `ApiModelProperty` |
//! | [`register_openapi3`] | `Operation`, `Parameter`, `RequestBody`, `Schema`, `Tag`, `ApiResponse` |
//!
//! Annotations with no registered processor are skipped silently. A
//! registered processor that rejects an instance is logged and the instance
//! skipped; neither aborts the surrounding build.
//!
//! The registry has no interior mutability. Populate it first, then share it
//! behind an `Arc`.

pub mod attrs;
pub mod kinds;
mod openapi;
mod route;
mod validation;

pub use openapi::{
    CompositeProcessor, DescriptionProcessor, ParameterProcessor, RequestBodyProcessor,
    ResponseProcessor, SchemaProcessor, SummaryProcessor, TagProcessor, register_openapi3,
    register_swagger2,
};
pub use route::{HttpMethod, RouteFact, RouteProcessor};
pub use validation::{NotNullProcessor, PatternProcessor, SIZE_UNBOUNDED, SizeProcessor};

use crate::error::AnnotationProcessingError;
use crate::meta::{AnnotationRef, AnnotationValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Separator between lines of a multi-line comment.
pub const MULTILINE_COMMENT_TAG: &str = "\n";

/// Language used for rendered comments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

impl Locale {
    /// Pick the text for this locale.
    pub fn pick<'a>(self, en: &'a str, zh_cn: &'a str) -> &'a str {
        match self {
            Locale::En => en,
            Locale::ZhCn => zh_cn,
        }
    }
}

/// Context a comment is rendered in.
#[derive(Debug, Clone, Copy)]
pub struct CommentContext<'a> {
    /// Name of the annotated element (field, method, parameter or type)
    pub owner_name: &'a str,
    pub locale: Locale,
}

/// A documented parameter, from a Swagger or OpenAPI parameter annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterFact {
    pub name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
}

/// Typed fact derived from one annotation instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "fact", rename_all = "snake_case")]
pub enum Fact {
    Size {
        min: i64,
        max: i64,
        message: Option<String>,
    },
    NotNull {
        message: Option<String>,
    },
    Pattern {
        regexp: String,
        message: Option<String>,
    },
    Route(RouteFact),
    Description {
        text: String,
    },
    Summary {
        summary: String,
        description: Option<String>,
    },
    Parameter(ParameterFact),
    RequestBody {
        description: Option<String>,
        required: bool,
    },
    Schema {
        title: Option<String>,
        description: Option<String>,
    },
    Tag {
        name: String,
        description: Option<String>,
    },
    /// Facts of a container annotation, one per element
    Composite {
        facts: Vec<Fact>,
    },
    /// Raw attributes, for processors outside the built-in set
    Custom {
        attributes: BTreeMap<String, AnnotationValue>,
    },
}

impl Fact {
    pub fn as_route(&self) -> Option<&RouteFact> {
        match self {
            Fact::Route(route) => Some(route),
            _ => None,
        }
    }

    /// Whether the fact marks its element as mandatory.
    pub fn marks_required(&self) -> bool {
        match self {
            Fact::NotNull { .. } => true,
            Fact::Parameter(param) => param.required,
            Fact::RequestBody { required, .. } => *required,
            _ => false,
        }
    }

    pub fn is_request_body(&self) -> bool {
        matches!(self, Fact::RequestBody { .. })
    }

    /// Short label naming a type, from tag and description facts.
    pub fn label(&self) -> Option<&str> {
        match self {
            Fact::Tag { name, .. } => Some(name),
            Fact::Description { text } => Some(text),
            Fact::Schema {
                title: Some(title), ..
            } => Some(title),
            _ => None,
        }
    }
}

/// Converts annotation instances of one or more kinds into facts.
pub trait AnnotationProcessor: Send + Sync {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError>;

    /// Render a fact produced by this processor. `None` means no comment.
    fn comment(&self, fact: &Fact, ctx: &CommentContext<'_>) -> Option<String>;
}

/// A fact together with its source kind and rendered comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationFact {
    pub kind: String,
    pub fact: Fact,
    pub comment: Option<String>,
}

impl AnnotationFact {
    /// Unqualified annotation name.
    pub fn simple_kind(&self) -> &str {
        self.kind.rsplit('.').next().unwrap_or(&self.kind)
    }
}

/// Annotation kind to processor mapping.
#[derive(Clone, Default)]
pub struct AnnotationRegistry {
    processors: HashMap<String, Arc<dyn AnnotationProcessor>>,
    locale: Locale,
}

impl AnnotationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with validation, route and request-body processors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        validation::register(&mut registry);
        route::register(&mut registry);
        registry.register(
            kinds::REQUEST_BODY,
            Arc::new(RequestBodyProcessor::marker()),
        );
        registry
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Register a processor, returning the one it replaced.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        processor: Arc<dyn AnnotationProcessor>,
    ) -> Option<Arc<dyn AnnotationProcessor>> {
        self.processors.insert(kind.into(), processor)
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.processors.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.processors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Fact for one annotation; `None` when unregistered or invalid.
    pub fn process(&self, annotation: &AnnotationRef) -> Option<Fact> {
        let processor = self.processors.get(&annotation.kind)?;
        match processor.process(annotation) {
            Ok(fact) => Some(fact),
            Err(err) => {
                warn!(kind = %annotation.kind, error = %err, "skipping invalid annotation");
                None
            }
        }
    }

    /// Comment for a fact, rendered by the processor registered for `kind`.
    pub fn comment(&self, kind: &str, fact: &Fact, owner_name: &str) -> Option<String> {
        let ctx = CommentContext {
            owner_name,
            locale: self.locale,
        };
        self.processors
            .get(kind)?
            .comment(fact, &ctx)
            .filter(|comment| !comment.trim().is_empty())
    }

    /// Facts and comments for every processable annotation, in order.
    pub fn facts(&self, annotations: &[AnnotationRef], owner_name: &str) -> Vec<AnnotationFact> {
        annotations
            .iter()
            .filter_map(|annotation| {
                let fact = self.process(annotation)?;
                let comment = self.comment(&annotation.kind, &fact, owner_name);
                Some(AnnotationFact {
                    kind: annotation.kind.clone(),
                    fact,
                    comment,
                })
            })
            .collect()
    }
}

impl fmt::Debug for AnnotationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationRegistry")
            .field("kinds", &self.kinds())
            .field("locale", &self.locale)
            .finish()
    }
}
