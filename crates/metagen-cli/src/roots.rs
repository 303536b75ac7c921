//! Root type selection by name pattern and annotation

use crate::config::RootsSection;
use anyhow::Result;
use metagen::{TypeModel, TypeSource};
use metagen_core::annotations::kinds;
use std::collections::BTreeSet;

/// A qualified-name pattern.
///
/// `com.example.web.*` matches types directly in `com.example.web`,
/// `com.example.**` matches types in `com.example` and below, anything else
/// matches one qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    Exact(String),
    Package(String),
    Subpackages(String),
}

impl NamePattern {
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if let Some(prefix) = pattern.strip_suffix(".**") {
            NamePattern::Subpackages(prefix.to_string())
        } else if let Some(prefix) = pattern.strip_suffix(".*") {
            NamePattern::Package(prefix.to_string())
        } else {
            NamePattern::Exact(pattern.to_string())
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Exact(exact) => name == exact,
            NamePattern::Package(package) => name
                .strip_prefix(package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|simple| !simple.is_empty() && !simple.contains('.')),
            NamePattern::Subpackages(package) => name
                .strip_prefix(package.as_str())
                .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1),
        }
    }
}

/// Qualified names of the roots a config selects, sorted.
///
/// Explicit `types` must be declared. Pattern matches must carry one of the
/// configured annotations, nested types excluded.
pub fn select(model: &TypeModel, roots: &RootsSection) -> Result<Vec<String>> {
    let include: Vec<NamePattern> = roots.include.iter().map(|p| NamePattern::parse(p)).collect();
    let exclude: Vec<NamePattern> = roots.exclude.iter().map(|p| NamePattern::parse(p)).collect();
    let annotations: Vec<&str> = if roots.annotations.is_empty() {
        kinds::CONTROLLER_KINDS.to_vec()
    } else {
        roots.annotations.iter().map(String::as_str).collect()
    };

    let mut selected = BTreeSet::new();
    for name in &roots.types {
        if !model.is_declared(name) {
            anyhow::bail!("Root type not declared in model: {}", name);
        }
        selected.insert(name.clone());
    }

    for decl in model.iter() {
        if !include.iter().any(|p| p.matches(&decl.name)) {
            continue;
        }
        if exclude.iter().any(|p| p.matches(&decl.name)) {
            continue;
        }
        if decl.is_static || decl.name.contains('$') || !decl.has_annotation(&annotations) {
            continue;
        }
        selected.insert(decl.name.clone());
    }

    tracing::debug!(roots = selected.len(), "selected root types");
    Ok(selected.into_iter().collect())
}

#[cfg(test)]
#[path = "roots/roots_tests.rs"]
mod roots_tests;
