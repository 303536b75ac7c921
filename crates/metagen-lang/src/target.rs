//! Target-language metadata handed to renderers.
//!
//! Everything here is plain serializable data. Collections use `Vec` in
//! declaration order or `BTreeMap`, so serializing the same node twice gives
//! identical bytes.

use metagen_core::ClassKind;
use metagen_core::annotations::HttpMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLanguage {
    Typescript,
    Dart,
    Java,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 3] = [
        TargetLanguage::Typescript,
        TargetLanguage::Dart,
        TargetLanguage::Java,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TargetLanguage::Typescript => "typescript",
            TargetLanguage::Dart => "dart",
            TargetLanguage::Java => "java",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            TargetLanguage::Typescript => "ts",
            TargetLanguage::Dart => "dart",
            TargetLanguage::Java => "java",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(TargetLanguage::Typescript),
            "dart" => Ok(TargetLanguage::Dart),
            "java" => Ok(TargetLanguage::Java),
            other => Err(format!("unsupported target language: {other}")),
        }
    }
}

/// Category of a builtin target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Number,
    String,
    Boolean,
    Date,
    Void,
    Any,
    Set,
    Array,
    Map,
    Promise,
    /// A target type identified only by its name
    Named,
}

/// A builtin type of the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetType {
    pub kind: TargetKind,
    pub name: String,
}

impl TargetType {
    pub fn new(kind: TargetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TargetKind::Named, name)
    }
}

/// Reference to another generated node by identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    /// Native qualified name; the node's identity
    pub qualified_name: String,
    /// Name of the generated type
    pub name: String,
    /// Output location, `/`-separated
    pub package_path: String,
    pub kind: ClassKind,
}

/// One entry of a mapped, flattened type list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "ref", rename_all = "snake_case")]
pub enum TargetTypeRef {
    Builtin(TargetType),
    Node(NodeRef),
}

impl TargetTypeRef {
    pub fn name(&self) -> &str {
        match self {
            TargetTypeRef::Builtin(ty) => &ty.name,
            TargetTypeRef::Node(node) => &node.name,
        }
    }

    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            TargetTypeRef::Node(node) => Some(node),
            TargetTypeRef::Builtin(_) => None,
        }
    }

    pub fn is_kind(&self, kind: TargetKind) -> bool {
        matches!(self, TargetTypeRef::Builtin(ty) if ty.kind == kind)
    }
}

/// Annotation argument value, formatted by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationArg {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    /// Target-language expression emitted verbatim
    Code(String),
}

/// An annotation or decorator to emit on a generated element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAnnotation {
    pub name: String,
    /// Import path of the annotation, when the target needs one
    pub import: Option<String>,
    pub arguments: BTreeMap<String, AnnotationArg>,
}

impl TargetAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import: None,
            arguments: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: AnnotationArg) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFieldMeta {
    /// Emitted name
    pub name: String,
    /// Native name, used as the wire key
    pub source_name: String,
    pub types: Vec<TargetTypeRef>,
    pub type_variables: Vec<String>,
    pub is_static: bool,
    pub is_enum_constant: bool,
    pub required: bool,
    pub synthetic: bool,
    pub comments: Vec<String>,
    pub annotations: Vec<TargetAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetParam {
    pub name: String,
    pub types: Vec<TargetTypeRef>,
    pub required: bool,
    pub request_body: bool,
    pub comments: Vec<String>,
    pub annotations: Vec<TargetAnnotation>,
}

/// HTTP binding of a service method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRoute {
    pub methods: Vec<HttpMethod>,
    pub path: Option<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMethodMeta {
    pub name: String,
    /// Native type that declares the method
    pub declared_by: String,
    pub return_types: Vec<TargetTypeRef>,
    pub params: Vec<TargetParam>,
    pub route: Option<HttpRoute>,
    pub comments: Vec<String>,
    pub annotations: Vec<TargetAnnotation>,
}

/// Which template family a node renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    Enum,
    Data,
    Service,
}

/// A fully mapped node, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetClassMeta {
    pub language: TargetLanguage,
    pub name: String,
    pub qualified_name: String,
    pub package_path: String,
    pub kind: ClassKind,
    pub shape: NodeShape,
    pub is_abstract: bool,
    pub type_params: Vec<String>,
    pub superclass: Vec<TargetTypeRef>,
    pub fields: Vec<TargetFieldMeta>,
    pub methods: Vec<TargetMethodMeta>,
    pub comments: Vec<String>,
    /// Display label from a tag or description annotation
    pub tag: Option<String>,
    pub annotations: Vec<TargetAnnotation>,
    /// Other nodes this node references, keyed by qualified name
    pub dependencies: BTreeMap<String, NodeRef>,
}

impl TargetClassMeta {
    pub fn node_ref(&self) -> NodeRef {
        NodeRef {
            qualified_name: self.qualified_name.clone(),
            name: self.name.clone(),
            package_path: self.package_path.clone(),
            kind: self.kind,
        }
    }

    /// Every type list of the node: superclass, fields, returns and params.
    pub fn type_lists(&self) -> impl Iterator<Item = &[TargetTypeRef]> {
        std::iter::once(self.superclass.as_slice())
            .chain(self.fields.iter().map(|f| f.types.as_slice()))
            .chain(self.methods.iter().flat_map(|m| {
                std::iter::once(m.return_types.as_slice())
                    .chain(m.params.iter().map(|p| p.types.as_slice()))
            }))
    }
}
