//! Bean-validation constraint processors.

use super::{AnnotationProcessor, AnnotationRegistry, CommentContext, Fact, Locale, attrs, kinds};
use crate::error::AnnotationProcessingError;
use crate::meta::AnnotationRef;
use std::sync::Arc;

/// Upper bound a `Size` constraint has when `max` is not given.
pub const SIZE_UNBOUNDED: i64 = i32::MAX as i64;

pub(crate) fn register(registry: &mut AnnotationRegistry) {
    let size: Arc<dyn AnnotationProcessor> = Arc::new(SizeProcessor);
    let not_null: Arc<dyn AnnotationProcessor> = Arc::new(NotNullProcessor);
    let pattern: Arc<dyn AnnotationProcessor> = Arc::new(PatternProcessor);
    for (kind, processor) in [
        (kinds::SIZE, &size),
        (kinds::JAKARTA_SIZE, &size),
        (kinds::NOT_NULL, &not_null),
        (kinds::JAKARTA_NOT_NULL, &not_null),
        (kinds::PATTERN, &pattern),
        (kinds::JAKARTA_PATTERN, &pattern),
    ] {
        registry.register(kind, Arc::clone(processor));
    }
}

/// `@Size(min, max)` length constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeProcessor;

impl AnnotationProcessor for SizeProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let min = attrs::int(annotation, "min")?.unwrap_or(0);
        let max = attrs::int(annotation, "max")?.unwrap_or(SIZE_UNBOUNDED);
        if min < 0 || max < min {
            return Err(AnnotationProcessingError::UnsupportedValue {
                kind: annotation.kind.clone(),
                attribute: "min".to_string(),
                value: format!("{min}..{max}"),
            });
        }
        Ok(Fact::Size {
            min,
            max,
            message: attrs::string(annotation, "message")?,
        })
    }

    fn comment(&self, fact: &Fact, ctx: &CommentContext<'_>) -> Option<String> {
        let Fact::Size { min, max, .. } = fact else {
            return None;
        };
        let owner = ctx.owner_name;
        let comment = match (ctx.locale, *max == SIZE_UNBOUNDED) {
            (Locale::En, false) => {
                format!("{owner} length must be between {min} and {max}")
            }
            (Locale::En, true) => format!("{owner} length must be at least {min}"),
            (Locale::ZhCn, false) => {
                format!("{owner} 约束条件：输入字符串的最小长度为：{min}，输入字符串的最大长度为：{max}")
            }
            (Locale::ZhCn, true) => {
                format!("{owner} 约束条件：输入字符串的最小长度为：{min}")
            }
        };
        Some(comment)
    }
}

/// `@NotNull` presence constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotNullProcessor;

impl AnnotationProcessor for NotNullProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        Ok(Fact::NotNull {
            message: attrs::string(annotation, "message")?,
        })
    }

    fn comment(&self, fact: &Fact, ctx: &CommentContext<'_>) -> Option<String> {
        let Fact::NotNull { message } = fact else {
            return None;
        };
        let base = format!(
            "{} {}",
            ctx.owner_name,
            ctx.locale.pick("must not be null", "不能为空")
        );
        Some(match message {
            Some(message) => format!("{base} ({message})"),
            None => base,
        })
    }
}

/// `@Pattern(regexp)` format constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternProcessor;

impl AnnotationProcessor for PatternProcessor {
    fn process(&self, annotation: &AnnotationRef) -> Result<Fact, AnnotationProcessingError> {
        let regexp =
            attrs::string(annotation, "regexp")?.ok_or_else(|| attrs::missing(annotation, "regexp"))?;
        Ok(Fact::Pattern {
            regexp,
            message: attrs::string(annotation, "message")?,
        })
    }

    fn comment(&self, fact: &Fact, ctx: &CommentContext<'_>) -> Option<String> {
        let Fact::Pattern { regexp, .. } = fact else {
            return None;
        };
        Some(format!(
            "{} {} `{regexp}`",
            ctx.owner_name,
            ctx.locale.pick("must match", "需匹配正则")
        ))
    }
}
