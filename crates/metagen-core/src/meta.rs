//! Normalized class metadata produced by the extractor.

use crate::type_ref::{TypeRef, simple_name};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of a declared type
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Declared visibility of a type or member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

/// An annotation instance attached to a type, member or parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRef {
    /// Qualified annotation type, e.g. `javax.validation.constraints.Size`
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, AnnotationValue>,
}

/// An annotation attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AnnotationValue>),
    Annotation(AnnotationRef),
}

impl AnnotationRef {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.values.insert(attribute.into(), value.into());
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&AnnotationValue> {
        self.values.get(attribute)
    }

    /// Unqualified annotation name (`Size` for `javax.validation.constraints.Size`).
    pub fn simple_kind(&self) -> &str {
        simple_name(&self.kind)
    }

    pub fn is(&self, kinds: &[&str]) -> bool {
        kinds.contains(&self.kind.as_str())
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Int(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Str(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Str(value)
    }
}

impl From<AnnotationRef> for AnnotationValue {
    fn from(value: AnnotationRef) -> Self {
        AnnotationValue::Annotation(value)
    }
}

impl<T: Into<AnnotationValue>> From<Vec<T>> for AnnotationValue {
    fn from(values: Vec<T>) -> Self {
        AnnotationValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Normalized metadata of one native type.
///
/// Built once per qualified name by the extractor and shared read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMeta {
    pub kind: ClassKind,
    /// Qualified name
    pub name: String,
    pub simple_name: String,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub type_params: Vec<String>,
    /// Ancestor chain from the direct superclass upward, each with its bound
    /// generic arguments. `java.lang.Object` is never listed.
    pub supertypes: Vec<TypeRef>,
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldMeta>,
    pub methods: Vec<MethodMeta>,
    pub annotations: Vec<AnnotationRef>,
    /// Library (artifact) the declaration came from, if known
    pub library: Option<String>,
    pub dependencies: BTreeSet<TypeRef>,
}

impl ClassMeta {
    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    pub fn annotation(&self, kind: &str) -> Option<&AnnotationRef> {
        self.annotations.iter().find(|a| a.kind == kind)
    }

    pub fn has_annotation(&self, kinds: &[&str]) -> bool {
        self.annotations.iter().any(|a| a.is(kinds))
    }

    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Bound generic arguments of an ancestor, if it is on the chain.
    pub fn binding_for(&self, supertype: &str) -> Option<&[TypeRef]> {
        self.supertypes
            .iter()
            .find(|t| t.name == supertype)
            .map(|t| t.args.as_slice())
    }

    /// Whether the field is one of this enum's constants.
    pub fn is_enum_constant(&self, field: &FieldMeta) -> bool {
        self.is_enum()
            && field.is_static
            && field.types.first().is_some_and(|t| t.name == self.name)
    }
}

/// Normalized metadata of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMeta {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
    /// Flattened resolved type, owning type first
    pub types: Vec<TypeRef>,
    /// Type parameters of the owning class referenced by this field
    pub type_variables: Vec<String>,
    pub annotations: Vec<AnnotationRef>,
    /// Synthesized from an accessor method rather than declared
    pub synthetic: bool,
}

impl FieldMeta {
    pub fn has_annotation(&self, kinds: &[&str]) -> bool {
        self.annotations.iter().any(|a| a.is(kinds))
    }
}

/// A named method parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamMeta {
    pub name: String,
    pub types: Vec<TypeRef>,
    pub annotations: Vec<AnnotationRef>,
}

/// Normalized metadata of one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodMeta {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_synchronized: bool,
    pub is_native: bool,
    /// Qualified name of the declaring type
    pub owner: String,
    /// Named parameters in declaration order; `None` when any name is unknown
    pub params: Option<Vec<ParamMeta>>,
    /// Flattened parameter types, always positional
    pub param_types: Vec<Vec<TypeRef>>,
    pub return_types: Vec<TypeRef>,
    pub annotations: Vec<AnnotationRef>,
}

impl MethodMeta {
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }

    pub fn returns_void(&self) -> bool {
        self.return_types
            .first()
            .is_none_or(|t| t.name == "void" || t.name == "java.lang.Void")
    }

    pub fn has_annotation(&self, kinds: &[&str]) -> bool {
        self.annotations.iter().any(|a| a.is(kinds))
    }
}
