//! Member selection and output-location strategies.

use metagen_core::annotations::kinds;
use metagen_core::{ClassMeta, FieldMeta, MethodMeta};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Decides which members of a class become part of its node.
pub trait MatchingStrategy: Send + Sync {
    fn matches_field(&self, field: &FieldMeta, owner: &ClassMeta) -> bool;

    fn matches_method(&self, method: &MethodMeta, owner: &ClassMeta) -> bool;
}

/// Keeps instance fields, enum constants and route-annotated methods.
#[derive(Debug, Clone, Default)]
pub struct RouteMatchingStrategy {
    ignored_methods: BTreeSet<String>,
}

impl RouteMatchingStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_method(mut self, name: impl Into<String>) -> Self {
        self.ignored_methods.insert(name.into());
        self
    }
}

impl MatchingStrategy for RouteMatchingStrategy {
    fn matches_field(&self, field: &FieldMeta, owner: &ClassMeta) -> bool {
        if owner.is_enum() {
            return !field.is_static || owner.is_enum_constant(field);
        }
        !field.is_static
    }

    fn matches_method(&self, method: &MethodMeta, _owner: &ClassMeta) -> bool {
        method.has_annotation(&kinds::ROUTE_KINDS) && !self.ignored_methods.contains(&method.name)
    }
}

/// Maps a native qualified name to the node's output location and name.
pub trait PackageMapStrategy: Send + Sync {
    /// `/`-separated output path of the node, ending in its file stem.
    fn package_path(&self, qualified_name: &str) -> String;

    fn class_name(&self, simple_name: &str) -> String {
        simple_name.to_string()
    }
}

/// Rewrites package prefixes; the longest matching prefix wins.
///
/// With `com.example.model -> models`, `com.example.model.Order` is written
/// to `models/Order`. A prefix mapped to an empty string is stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixPackageMap {
    prefixes: BTreeMap<String, String>,
}

impl PrefixPackageMap {
    pub fn new(prefixes: BTreeMap<String, String>) -> Self {
        Self { prefixes }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), replacement.into());
        self
    }

    fn longest_match<'a>(&self, qualified_name: &'a str) -> Option<(&str, &'a str)> {
        self.prefixes
            .iter()
            .filter_map(|(prefix, replacement)| {
                let rest = qualified_name.strip_prefix(prefix.as_str())?;
                (rest.is_empty() || rest.starts_with('.'))
                    .then_some((prefix.len(), replacement.as_str(), rest))
            })
            .max_by_key(|(len, _, _)| *len)
            .map(|(_, replacement, rest)| (replacement, rest))
    }
}

impl PackageMapStrategy for PrefixPackageMap {
    fn package_path(&self, qualified_name: &str) -> String {
        let dotted = match self.longest_match(qualified_name) {
            Some((replacement, rest)) => format!("{replacement}{rest}"),
            None => qualified_name.to_string(),
        };
        dotted
            .split(['.', '/'])
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.replace('$', "_"))
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
#[path = "strategy/strategy_tests.rs"]
mod strategy_tests;
