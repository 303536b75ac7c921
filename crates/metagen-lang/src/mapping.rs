//! Native-to-target type mapping.
//!
//! The engine maps a flattened native type list (owner first, then its
//! generic arguments in pre-order) to a list of [`TargetTypeRef`]s.
//!
//! # Rule order
//!
//! A custom-table entry for the owner is applied first: the owner is
//! replaced by the entry's types, which are mapped without consulting the
//! custom table again, and the remaining arguments follow. Otherwise the
//! owner is mapped by the first rule that matches:
//!
//! | Rule | Result |
//! |------|--------|
//! | exact base-table key | the table's builtin |
//! | declared in the type source | a [`NodeRef`] to the generated node |
//! | builtin family with a base-table entry | the family's builtin |
//! | array | the array marker, then the mapped component |
//! | none of the above | [`UnmappableTypeError`] |
//!
//! Each remaining argument is then mapped the same way and appended.

use crate::error::{MappingResult, UnmappableTypeError};
use crate::languages;
use crate::strategy::PackageMapStrategy;
use crate::target::{NodeRef, TargetLanguage, TargetType, TargetTypeRef};
use metagen_core::builtins::TypeFamily;
use metagen_core::{ExtractionError, SourceExtractor, TypeRef};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Base and custom mapping tables for one target language.
///
/// Tables are assembled up front and frozen behind an `Arc` before any
/// engine reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTables {
    language: TargetLanguage,
    base: BTreeMap<String, TargetType>,
    custom: BTreeMap<String, Vec<String>>,
    array_marker: TargetType,
}

impl TypeTables {
    pub fn new(language: TargetLanguage, array_marker: TargetType) -> Self {
        Self {
            language,
            base: BTreeMap::new(),
            custom: BTreeMap::new(),
            array_marker,
        }
    }

    /// The built-in tables of a language.
    pub fn defaults(language: TargetLanguage) -> Self {
        languages::default_tables(language)
    }

    pub fn with_base_type(mut self, native: impl Into<String>, target: TargetType) -> Self {
        self.base.insert(native.into(), target);
        self
    }

    /// Opt into the language's per-type numeric names. Afterwards numeric
    /// types no longer all share the number family's target.
    pub fn with_precise_numbers(self) -> Self {
        languages::precise_numbers(self)
    }

    /// Replace a native type by a list of native types before mapping.
    pub fn with_custom_type(mut self, native: impl Into<String>, replacement: Vec<String>) -> Self {
        self.custom.insert(native.into(), replacement);
        self
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    pub fn base(&self, native: &str) -> Option<&TargetType> {
        self.base.get(native)
    }

    pub fn custom(&self, native: &str) -> Option<&[String]> {
        self.custom.get(native).map(Vec::as_slice)
    }

    pub fn array_marker(&self) -> &TargetType {
        &self.array_marker
    }

    pub fn into_shared(self) -> Arc<TypeTables> {
        Arc::new(self)
    }
}

/// Maps flattened native type lists for one target language.
#[derive(Clone)]
pub struct TypeMappingEngine {
    tables: Arc<TypeTables>,
    extractor: Arc<SourceExtractor>,
    packages: Arc<dyn PackageMapStrategy>,
}

impl TypeMappingEngine {
    pub fn new(
        tables: Arc<TypeTables>,
        extractor: Arc<SourceExtractor>,
        packages: Arc<dyn PackageMapStrategy>,
    ) -> Self {
        Self {
            tables,
            extractor,
            packages,
        }
    }

    pub fn language(&self) -> TargetLanguage {
        self.tables.language()
    }

    pub fn tables(&self) -> &TypeTables {
        &self.tables
    }

    /// Whether the type maps to a generated node rather than a builtin.
    pub fn is_complex(&self, ty: &TypeRef) -> bool {
        self.tables.base(&ty.name).is_none() && self.extractor.is_declared(&ty.name)
    }

    /// Map a flattened native type list.
    pub fn map_types(&self, types: &[TypeRef]) -> MappingResult<Vec<TargetTypeRef>> {
        let Some((owner, rest)) = types.split_first() else {
            return Ok(Vec::new());
        };
        let mut mapped = Vec::with_capacity(types.len());
        match self.tables.custom(&owner.name) {
            Some(replacement) => {
                trace!(type_name = %owner.name, ?replacement, "applying custom type mapping");
                for name in replacement {
                    mapped.extend(self.map_owner(&TypeRef::raw(name.as_str()))?);
                }
            }
            None => mapped.extend(self.map_owner(owner)?),
        }
        for arg in rest {
            mapped.extend(self.map_types(std::slice::from_ref(arg))?);
        }
        Ok(mapped)
    }

    /// Map a single, possibly generic, native type.
    pub fn map_type(&self, ty: &TypeRef) -> MappingResult<Vec<TargetTypeRef>> {
        self.map_types(&ty.flatten())
    }

    fn map_owner(&self, owner: &TypeRef) -> MappingResult<Vec<TargetTypeRef>> {
        if let Some(target) = self.tables.base(&owner.name) {
            return Ok(vec![TargetTypeRef::Builtin(target.clone())]);
        }
        if self.extractor.is_declared(&owner.name) {
            return Ok(vec![TargetTypeRef::Node(self.node_ref(&owner.name)?)]);
        }
        if let Some(target) =
            TypeFamily::of(&owner.name).and_then(|family| self.tables.base(family.representative()))
        {
            return Ok(vec![TargetTypeRef::Builtin(target.clone())]);
        }
        if let Some(component) = owner.component() {
            let mut mapped = vec![TargetTypeRef::Builtin(self.tables.array_marker().clone())];
            mapped.extend(self.map_types(&[component.erasure()])?);
            return Ok(mapped);
        }
        Err(UnmappableTypeError {
            type_name: owner.name.clone(),
            language: self.language(),
        }
        .into())
    }

    /// Reference to the node generated for a declared type.
    ///
    /// Built from the declaration alone: a referenced type that fails
    /// extraction still yields a reference, and the failure surfaces when
    /// that type itself is built.
    pub fn node_ref(&self, qualified_name: &str) -> MappingResult<NodeRef> {
        let decl = self
            .extractor
            .source()
            .declaration(qualified_name)
            .ok_or_else(|| ExtractionError::UnknownType(qualified_name.to_string()))?;
        Ok(NodeRef {
            qualified_name: decl.name.clone(),
            name: self.packages.class_name(decl.simple_name()),
            package_path: self.packages.package_path(&decl.name),
            kind: decl.kind,
        })
    }
}

impl std::fmt::Debug for TypeMappingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMappingEngine")
            .field("language", &self.language())
            .finish()
    }
}
