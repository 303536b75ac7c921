//! One-level dependency resolution.
//!
//! [`resolve`] collects every type a class references directly: field types,
//! method return and parameter types, its superclass and its interfaces.
//! Array types contribute their element type. The result is a pure fact
//! about the class; deciding which dependencies get traversed is left to
//! [`EligibilityFilter`].
//!
//! Resolution never recurses, so reference cycles such as
//! `Order -> OrderItem -> Order` cannot loop here. Traversal terminates
//! because the extractor caches one entry per qualified name and the
//! orchestrator visits each name once.

use crate::annotations::kinds;
use crate::builtins;
use crate::meta::ClassMeta;
use crate::source::TypeSource;
use crate::type_ref::TypeRef;
use std::collections::BTreeSet;

/// Every type the class references directly, deduplicated.
pub fn resolve(meta: &ClassMeta) -> BTreeSet<TypeRef> {
    let mut dependencies = BTreeSet::new();
    let mut add = |types: &[TypeRef]| {
        for ty in types {
            dependencies.insert(dependency_key(ty));
        }
    };

    for field in &meta.fields {
        add(&field.types);
    }
    for method in &meta.methods {
        add(&method.return_types);
        for param in &method.param_types {
            add(param);
        }
    }
    if let Some(superclass) = &meta.superclass {
        add(&superclass.flatten());
    }
    for interface in &meta.interfaces {
        add(&interface.flatten());
    }
    dependencies
}

fn dependency_key(ty: &TypeRef) -> TypeRef {
    if ty.is_array() { ty.element() } else { ty.clone() }
}

/// Decides which dependencies are worth traversing.
///
/// A dependency is eligible when it is declared in the type source, is not a
/// platform builtin, does not come from an ignored library or package, and is
/// not a service bean.
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    pub ignored_libraries: BTreeSet<String>,
    pub ignored_packages: Vec<String>,
    pub service_annotations: Vec<String>,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self {
            ignored_libraries: BTreeSet::new(),
            ignored_packages: vec![
                "org.springframework.".to_string(),
                "io.swagger.".to_string(),
                "com.fasterxml.".to_string(),
            ],
            service_annotations: kinds::SERVICE_KINDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl EligibilityFilter {
    pub fn with_ignored_library(mut self, library: impl Into<String>) -> Self {
        self.ignored_libraries.insert(library.into());
        self
    }

    pub fn with_ignored_package(mut self, prefix: impl Into<String>) -> Self {
        self.ignored_packages.push(prefix.into());
        self
    }

    pub fn is_eligible(&self, name: &str, source: &dyn TypeSource) -> bool {
        let name = name.trim_end_matches("[]");
        if builtins::is_builtin(name) {
            return false;
        }
        if self.ignored_packages.iter().any(|p| name.starts_with(p.as_str())) {
            return false;
        }
        let Some(decl) = source.declaration(name) else {
            return false;
        };
        if decl
            .library
            .as_ref()
            .is_some_and(|library| self.ignored_libraries.contains(library))
        {
            return false;
        }
        !decl
            .annotations
            .iter()
            .any(|a| self.service_annotations.iter().any(|k| *k == a.kind))
    }

    /// Qualified names of the eligible members of a dependency set.
    pub fn eligible(&self, dependencies: &BTreeSet<TypeRef>, source: &dyn TypeSource) -> BTreeSet<String> {
        dependencies
            .iter()
            .filter(|ty| self.is_eligible(&ty.name, source))
            .map(|ty| ty.element().name)
            .collect()
    }
}

#[cfg(test)]
#[path = "resolver/resolver_tests.rs"]
mod resolver_tests;
