//! Declarations and the sources that provide them.
//!
//! A [`TypeSource`] answers "what is declared under this qualified name".
//! [`TypeModel`] is the in-memory implementation, loaded from a JSON document
//! that is either a list of declarations or `{ "types": [...] }`.

use crate::error::ModelError;
use crate::meta::{AnnotationRef, ClassKind, Visibility};
use crate::type_ref::simple_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Declaration of one native type, as written in source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Qualified name
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Superclass signature, e.g. `com.example.BaseController<java.lang.String>`
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    #[serde(default)]
    pub library: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_transient: bool,
    #[serde(default)]
    pub is_volatile: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "default_return_type")]
    pub returns: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_synchronized: bool,
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Parameter name, absent when the source was compiled without names
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
}

fn default_return_type() -> String {
    crate::builtins::VOID.to_string()
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            visibility: Visibility::Public,
            is_abstract: false,
            is_static: false,
            is_final: false,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
            library: None,
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn has_annotation(&self, kinds: &[&str]) -> bool {
        self.annotations.iter().any(|a| a.is(kinds))
    }
}

/// Provider of type declarations by qualified name.
pub trait TypeSource: Send + Sync {
    fn declaration(&self, name: &str) -> Option<Arc<TypeDecl>>;

    /// All declared names, sorted.
    fn type_names(&self) -> Vec<String>;

    fn is_declared(&self, name: &str) -> bool {
        self.declaration(name).is_some()
    }
}

/// In-memory type source keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    types: BTreeMap<String, Arc<TypeDecl>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelDocument {
    Wrapped { types: Vec<TypeDecl> },
    List(Vec<TypeDecl>),
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_decls(decls: impl IntoIterator<Item = TypeDecl>) -> Result<Self, ModelError> {
        let mut model = Self::new();
        for decl in decls {
            model.insert(decl)?;
        }
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let decls = match serde_json::from_str::<ModelDocument>(json)? {
            ModelDocument::Wrapped { types } => types,
            ModelDocument::List(types) => types,
        };
        Self::from_decls(decls)
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, decl: TypeDecl) -> Result<(), ModelError> {
        if decl.name.trim().is_empty() {
            return Err(ModelError::InvalidDeclaration(
                "type name cannot be empty".to_string(),
            ));
        }
        if let Some(param) = duplicate(&decl.type_params) {
            return Err(ModelError::InvalidDeclaration(format!(
                "type parameter {param} declared twice on {}",
                decl.name
            )));
        }
        if self.types.contains_key(&decl.name) {
            return Err(ModelError::DuplicateType(decl.name));
        }
        self.types.insert(decl.name.clone(), Arc::new(decl));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDecl>> {
        self.types.values()
    }
}

fn duplicate(names: &[String]) -> Option<&str> {
    names
        .iter()
        .enumerate()
        .find(|(i, name)| names[..*i].contains(name))
        .map(|(_, name)| name.as_str())
}

impl TypeSource for TypeModel {
    fn declaration(&self, name: &str) -> Option<Arc<TypeDecl>> {
        self.types.get(name).cloned()
    }

    fn type_names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "source/source_tests.rs"]
mod source_tests;
