//! Typed attribute access for annotation processors.
//!
//! Empty strings count as absent: annotation attributes default to `""`.

use crate::error::AnnotationProcessingError;
use crate::meta::{AnnotationRef, AnnotationValue};

fn invalid(annotation: &AnnotationRef, attribute: &str, expected: &'static str) -> AnnotationProcessingError {
    AnnotationProcessingError::InvalidAttribute {
        kind: annotation.kind.clone(),
        attribute: attribute.to_string(),
        expected,
    }
}

pub fn missing(annotation: &AnnotationRef, attribute: &str) -> AnnotationProcessingError {
    AnnotationProcessingError::MissingAttribute {
        kind: annotation.kind.clone(),
        attribute: attribute.to_string(),
    }
}

pub fn string(annotation: &AnnotationRef, attribute: &str) -> Result<Option<String>, AnnotationProcessingError> {
    match annotation.get(attribute) {
        None => Ok(None),
        Some(AnnotationValue::Str(s)) if s.is_empty() => Ok(None),
        Some(AnnotationValue::Str(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(annotation, attribute, "a string")),
    }
}

/// A string or list of strings, normalized to a list without empty entries.
pub fn strings(annotation: &AnnotationRef, attribute: &str) -> Result<Vec<String>, AnnotationProcessingError> {
    match annotation.get(attribute) {
        None => Ok(Vec::new()),
        Some(AnnotationValue::Str(s)) if s.is_empty() => Ok(Vec::new()),
        Some(AnnotationValue::Str(s)) => Ok(vec![s.clone()]),
        Some(AnnotationValue::List(items)) => items
            .iter()
            .filter_map(|item| match item {
                AnnotationValue::Str(s) if s.is_empty() => None,
                AnnotationValue::Str(s) => Some(Ok(s.clone())),
                _ => Some(Err(invalid(annotation, attribute, "a list of strings"))),
            })
            .collect(),
        Some(_) => Err(invalid(annotation, attribute, "a string or a list of strings")),
    }
}

pub fn int(annotation: &AnnotationRef, attribute: &str) -> Result<Option<i64>, AnnotationProcessingError> {
    match annotation.get(attribute) {
        None => Ok(None),
        Some(AnnotationValue::Int(n)) => Ok(Some(*n)),
        Some(_) => Err(invalid(annotation, attribute, "an integer")),
    }
}

pub fn boolean(annotation: &AnnotationRef, attribute: &str) -> Result<Option<bool>, AnnotationProcessingError> {
    match annotation.get(attribute) {
        None => Ok(None),
        Some(AnnotationValue::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(annotation, attribute, "a boolean")),
    }
}

/// Nested annotations, from a single annotation or a list of them.
pub fn annotations(
    annotation: &AnnotationRef,
    attribute: &str,
) -> Result<Vec<AnnotationRef>, AnnotationProcessingError> {
    match annotation.get(attribute) {
        None => Ok(Vec::new()),
        Some(AnnotationValue::Annotation(nested)) => Ok(vec![nested.clone()]),
        Some(AnnotationValue::List(items)) => items
            .iter()
            .map(|item| match item {
                AnnotationValue::Annotation(nested) => Ok(nested.clone()),
                _ => Err(invalid(annotation, attribute, "a list of annotations")),
            })
            .collect(),
        Some(_) => Err(invalid(annotation, attribute, "a list of annotations")),
    }
}
