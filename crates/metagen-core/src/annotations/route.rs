//! Spring request-mapping processors.

use super::{AnnotationProcessor, AnnotationRegistry, CommentContext, Fact, attrs, kinds};
use crate::error::AnnotationProcessingError;
use crate::meta::AnnotationRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub(crate) fn register(registry: &mut AnnotationRegistry) {
    let processor: Arc<dyn AnnotationProcessor> = Arc::new(RouteProcessor);
    for kind in kinds::ROUTE_KINDS {
        registry.register(kind, Arc::clone(&processor));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl HttpMethod {
    /// Parse `GET`, `get` or `RequestMethod.GET`.
    pub fn parse(value: &str) -> Option<HttpMethod> {
        let value = value.rsplit('.').next().unwrap_or(value);
        let method = match value.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            "TRACE" => HttpMethod::Trace,
            _ => return None,
        };
        Some(method)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Fixed method of a shortcut mapping kind such as `GetMapping`.
    fn of_shortcut(kind: &str) -> Option<HttpMethod> {
        match kind {
            kinds::GET_MAPPING => Some(HttpMethod::Get),
            kinds::POST_MAPPING => Some(HttpMethod::Post),
            kinds::PUT_MAPPING => Some(HttpMethod::Put),
            kinds::PATCH_MAPPING => Some(HttpMethod::Patch),
            kinds::DELETE_MAPPING => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route declared by a mapping annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteFact {
    pub paths: Vec<String>,
    /// Declared methods; empty means the mapping accepts any method
    pub methods: Vec<HttpMethod>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
}

impl RouteFact {
    /// First declared path. Only the first pattern is used for routing.
    pub fn first_path(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    /// Declared methods, or `GET, POST` when none are declared.
    pub fn effective_methods(&self) -> Vec<HttpMethod> {
        if self.methods.is_empty() {
            vec![HttpMethod::Get, HttpMethod::Post]
        } else {
            self.methods.clone()
        }
    }
}

/// Processor for `RequestMapping` and its shortcut kinds.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteProcessor;

impl AnnotationProcessor for RouteProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let mut paths = attrs::strings(annotation, "value")?;
        if paths.is_empty() {
            paths = attrs::strings(annotation, "path")?;
        }

        let methods = match HttpMethod::of_shortcut(&annotation.kind) {
            Some(method) => vec![method],
            None => attrs::strings(annotation, "method")?
                .iter()
                .map(|value| {
                    HttpMethod::parse(value).ok_or_else(|| AnnotationProcessingError::UnsupportedValue {
                        kind: annotation.kind.clone(),
                        attribute: "method".to_string(),
                        value: value.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Fact::Route(RouteFact {
            paths,
            methods,
            consumes: attrs::strings(annotation, "consumes")?,
            produces: attrs::strings(annotation, "produces")?,
        }))
    }

    fn comment(&self, _fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        None
    }
}
