//! Swagger 2 and OpenAPI 3 documentation processors.
//!
//! Both generations describe the same things with different attribute
//! names, so each processor is configured with the attributes to read.

use super::{
    AnnotationProcessor, AnnotationRegistry, CommentContext, Fact, Locale, MULTILINE_COMMENT_TAG,
    ParameterFact, attrs, kinds,
};
use crate::error::AnnotationProcessingError;
use crate::meta::AnnotationRef;
use std::sync::Arc;

/// Register the Swagger 2 (`io.swagger.annotations`) processors.
pub fn register_swagger2(registry: &mut AnnotationRegistry) {
    let implicit_param = Arc::new(ParameterProcessor {
        description_attr: "value",
    });
    registry.register(
        kinds::API,
        Arc::new(DescriptionProcessor {
            attributes: &["tags", "value"],
        }),
    );
    registry.register(
        kinds::API_OPERATION,
        Arc::new(SummaryProcessor {
            summary_attr: "value",
            description_attr: Some("notes"),
        }),
    );
    registry.register(
        kinds::API_PARAM,
        Arc::new(ParameterProcessor {
            description_attr: "value",
        }),
    );
    registry.register(kinds::API_IMPLICIT_PARAM, implicit_param.clone());
    registry.register(
        kinds::API_IMPLICIT_PARAMS,
        Arc::new(CompositeProcessor::new(implicit_param)),
    );
    registry.register(
        kinds::API_MODEL,
        Arc::new(SchemaProcessor {
            title_attr: Some("value"),
            description_attr: "description",
        }),
    );
    registry.register(
        kinds::API_MODEL_PROPERTY,
        Arc::new(SchemaProcessor {
            title_attr: None,
            description_attr: "value",
        }),
    );
}

/// Register the OpenAPI 3 (`io.swagger.v3.oas.annotations`) processors.
pub fn register_openapi3(registry: &mut AnnotationRegistry) {
    registry.register(
        kinds::OPERATION,
        Arc::new(SummaryProcessor {
            summary_attr: "summary",
            description_attr: Some("description"),
        }),
    );
    registry.register(
        kinds::PARAMETER,
        Arc::new(ParameterProcessor {
            description_attr: "description",
        }),
    );
    registry.register(kinds::OAS_REQUEST_BODY, Arc::new(RequestBodyProcessor::openapi3()));
    registry.register(
        kinds::SCHEMA,
        Arc::new(SchemaProcessor {
            title_attr: Some("title"),
            description_attr: "description",
        }),
    );
    registry.register(kinds::TAG, Arc::new(TagProcessor));
    registry.register(kinds::API_RESPONSE, Arc::new(ResponseProcessor));
}

/// Free-text description taken from the first non-empty attribute.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionProcessor {
    pub attributes: &'static [&'static str],
}

impl AnnotationProcessor for DescriptionProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        for attribute in self.attributes {
            if let Some(text) = attrs::strings(annotation, attribute)?.into_iter().next() {
                return Ok(Fact::Description { text });
            }
        }
        Err(attrs::missing(
            annotation,
            self.attributes.first().copied().unwrap_or("value"),
        ))
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        match fact {
            Fact::Description { text } => Some(text.clone()),
            _ => None,
        }
    }
}

/// Operation summary with an optional longer description.
#[derive(Debug, Clone, Copy)]
pub struct SummaryProcessor {
    pub summary_attr: &'static str,
    pub description_attr: Option<&'static str>,
}

impl AnnotationProcessor for SummaryProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let summary = attrs::string(annotation, self.summary_attr)?
            .ok_or_else(|| attrs::missing(annotation, self.summary_attr))?;
        let description = match self.description_attr {
            Some(attribute) => attrs::string(annotation, attribute)?,
            None => None,
        };
        Ok(Fact::Summary {
            summary,
            description,
        })
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        let Fact::Summary {
            summary,
            description,
        } = fact
        else {
            return None;
        };
        Some(match description {
            Some(description) => format!("{summary}{MULTILINE_COMMENT_TAG}{description}"),
            None => summary.clone(),
        })
    }
}

/// Documented request parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterProcessor {
    pub description_attr: &'static str,
}

impl AnnotationProcessor for ParameterProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        Ok(Fact::Parameter(ParameterFact {
            name: attrs::string(annotation, "name")?,
            description: attrs::string(annotation, self.description_attr)?,
            required: attrs::boolean(annotation, "required")?.unwrap_or(false),
        }))
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        match fact {
            Fact::Parameter(param) => param.description.clone(),
            _ => None,
        }
    }
}

/// Marks a parameter as the request body.
#[derive(Debug, Clone, Copy)]
pub struct RequestBodyProcessor {
    description_attr: Option<&'static str>,
    default_required: bool,
}

impl RequestBodyProcessor {
    /// Spring's `@RequestBody` marker, required unless stated otherwise.
    pub fn marker() -> Self {
        Self {
            description_attr: None,
            default_required: true,
        }
    }

    pub fn openapi3() -> Self {
        Self {
            description_attr: Some("description"),
            default_required: false,
        }
    }
}

impl AnnotationProcessor for RequestBodyProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let description = match self.description_attr {
            Some(attribute) => attrs::string(annotation, attribute)?,
            None => None,
        };
        Ok(Fact::RequestBody {
            description,
            required: attrs::boolean(annotation, "required")?.unwrap_or(self.default_required),
        })
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        match fact {
            Fact::RequestBody { description, .. } => description.clone(),
            _ => None,
        }
    }
}

/// Model or property schema documentation.
#[derive(Debug, Clone, Copy)]
pub struct SchemaProcessor {
    pub title_attr: Option<&'static str>,
    pub description_attr: &'static str,
}

impl AnnotationProcessor for SchemaProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let title = match self.title_attr {
            Some(attribute) => attrs::string(annotation, attribute)?,
            None => None,
        };
        Ok(Fact::Schema {
            title,
            description: attrs::string(annotation, self.description_attr)?,
        })
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        match fact {
            Fact::Schema { title, description } => description.clone().or_else(|| title.clone()),
            _ => None,
        }
    }
}

/// OpenAPI 3 `@Tag`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagProcessor;

impl AnnotationProcessor for TagProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let name = attrs::string(annotation, "name")?.ok_or_else(|| attrs::missing(annotation, "name"))?;
        Ok(Fact::Tag {
            name,
            description: attrs::string(annotation, "description")?,
        })
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        match fact {
            Fact::Tag { name, description } => Some(description.clone().unwrap_or_else(|| name.clone())),
            _ => None,
        }
    }
}

/// OpenAPI 3 `@ApiResponse`, rendered as `code: description`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseProcessor;

impl AnnotationProcessor for ResponseProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let description = attrs::string(annotation, "description")?
            .ok_or_else(|| attrs::missing(annotation, "description"))?;
        let text = match attrs::string(annotation, "responseCode")? {
            Some(code) => format!("{code}: {description}"),
            None => description,
        };
        Ok(Fact::Description { text })
    }

    fn comment(&self, fact: &Fact, _ctx: &CommentContext<'_>) -> Option<String> {
        match fact {
            Fact::Description { text } => Some(text.clone()),
            _ => None,
        }
    }
}

/// Container annotation whose `value` holds element annotations of one kind.
///
/// The comment is a preformatted block with one line per element.
pub struct CompositeProcessor {
    element: Arc<dyn AnnotationProcessor>,
}

impl CompositeProcessor {
    pub fn new(element: Arc<dyn AnnotationProcessor>) -> Self {
        Self { element }
    }
}

impl AnnotationProcessor for CompositeProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let facts = attrs::annotations(annotation, "value")?
            .iter()
            .map(|element| self.element.process(element))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Fact::Composite { facts })
    }

    fn comment(&self, fact: &Fact, ctx: &CommentContext<'_>) -> Option<String> {
        let Fact::Composite { facts } = fact else {
            return None;
        };
        if facts.is_empty() {
            return None;
        }

        let mut lines = vec![
            "<pre>".to_string(),
            ctx.locale.pick("Parameters:", "参数列表：").to_string(),
        ];
        for element in facts {
            let name = match element {
                Fact::Parameter(param) => param.name.as_deref(),
                _ => None,
            };
            let element_ctx = CommentContext {
                owner_name: name.unwrap_or(ctx.owner_name),
                locale: ctx.locale,
            };
            let comment = self.element.comment(element, &element_ctx).unwrap_or_default();
            lines.push(match (name, ctx.locale) {
                (Some(name), Locale::En) => format!("name: {name}, description: {comment}"),
                (Some(name), Locale::ZhCn) => {
                    format!("参数名称：{name}，参数说明：{comment}")
                }
                (None, _) => comment,
            });
        }
        lines.push("</pre>".to_string());
        Some(lines.join(MULTILINE_COMMENT_TAG))
    }
}
