//! Java node builder and JVM primitive handling.
//!
//! # Exact entries
//!
//! | Native | Java | Default |
//! |--------|------|---------|
//! | `boolean` | `Boolean` | yes |
//! | `char` | `Character` | yes |
//! | `java.time.LocalDate` | `LocalDate` | yes |
//! | `int` | `Integer` | precise numbers only |
//! | `long` | `Long` | precise numbers only |
//! | `java.math.BigDecimal` | `BigDecimal` | precise numbers only |
//!
//! Numbers map to `Number` unless precise numbers are enabled. Generic
//! arguments must be reference types, so primitives always map to their
//! boxed form.

use crate::builder::{AnnotationOwner, BuilderContext, LanguageMetaBuilder};
use crate::mapping::TypeTables;
use crate::target::{AnnotationArg, TargetAnnotation, TargetFieldMeta, TargetKind, TargetType};
use metagen_core::annotations::AnnotationFact;
use metagen_core::builtins::TypeFamily;
use metagen_core::{ClassMeta, FieldMeta};

const SERIALIZED_NAME: &str = "com.google.gson.annotations.SerializedName";

pub(super) fn family_name(family: TypeFamily) -> &'static str {
    match family {
        TypeFamily::Number => "Number",
        TypeFamily::String => "String",
        TypeFamily::Boolean => "Boolean",
        TypeFamily::Temporal => "Date",
        TypeFamily::Void => "Void",
        TypeFamily::Set => "Set",
        TypeFamily::List => "List",
        TypeFamily::Collection => "Collection",
        TypeFamily::Map => "Map",
        TypeFamily::Object => "Object",
    }
}

/// A JVM type with its primitive and boxed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JvmType {
    /// Primitive name, e.g. `int`
    pub primitive: &'static str,
    /// Boxed simple name, e.g. `Integer`
    pub boxed: &'static str,
}

impl JvmType {
    pub const PRIMITIVES: [JvmType; 9] = [
        JvmType::new("boolean", "Boolean"),
        JvmType::new("byte", "Byte"),
        JvmType::new("short", "Short"),
        JvmType::new("int", "Integer"),
        JvmType::new("long", "Long"),
        JvmType::new("float", "Float"),
        JvmType::new("double", "Double"),
        JvmType::new("char", "Character"),
        JvmType::new("void", "Void"),
    ];

    const fn new(primitive: &'static str, boxed: &'static str) -> Self {
        Self { primitive, boxed }
    }

    pub fn of_primitive(name: &str) -> Option<JvmType> {
        Self::PRIMITIVES.into_iter().find(|ty| ty.primitive == name)
    }

    pub fn boxed_qualified(self) -> String {
        format!("java.lang.{}", self.boxed)
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == TargetKind::Number
    }

    fn kind(self) -> TargetKind {
        match self.primitive {
            "boolean" => TargetKind::Boolean,
            "char" => TargetKind::String,
            "void" => TargetKind::Void,
            _ => TargetKind::Number,
        }
    }
}

/// Non-numeric primitives and their boxes map to the boxed name; the
/// `java.time` dates keep their own name.
pub(super) fn exact_types(tables: TypeTables) -> TypeTables {
    let tables = JvmType::PRIMITIVES
        .into_iter()
        .filter(|ty| !ty.is_numeric())
        .fold(tables, with_boxed);
    tables
        .with_base_type(
            "java.time.LocalDateTime",
            TargetType::new(TargetKind::Date, "LocalDateTime"),
        )
        .with_base_type(
            "java.time.LocalDate",
            TargetType::new(TargetKind::Date, "LocalDate"),
        )
}

/// Numeric primitives and their boxes map to the boxed name, big numbers
/// keep their own name.
pub(super) fn precise_numbers(tables: TypeTables) -> TypeTables {
    let tables = JvmType::PRIMITIVES
        .into_iter()
        .filter(|ty| ty.is_numeric())
        .fold(tables, with_boxed);
    tables
        .with_base_type(
            "java.math.BigDecimal",
            TargetType::new(TargetKind::Number, "BigDecimal"),
        )
        .with_base_type(
            "java.math.BigInteger",
            TargetType::new(TargetKind::Number, "BigInteger"),
        )
}

fn with_boxed(tables: TypeTables, ty: JvmType) -> TypeTables {
    let target = TargetType::new(ty.kind(), ty.boxed);
    tables
        .with_base_type(ty.primitive, target.clone())
        .with_base_type(ty.boxed_qualified(), target)
}

/// Builds Java nodes for Gson-based clients.
///
/// Renamed fields get `@SerializedName`; every emitted annotation carries
/// its qualified name as the import.
#[derive(Debug, Clone)]
pub struct JavaMetaBuilder {
    context: BuilderContext,
}

impl JavaMetaBuilder {
    pub fn new(context: BuilderContext) -> Self {
        Self { context }
    }
}

impl LanguageMetaBuilder for JavaMetaBuilder {
    fn context(&self) -> &BuilderContext {
        &self.context
    }

    fn enhance_field(&self, target: &mut TargetFieldMeta, _source: &FieldMeta, _owner: &ClassMeta) {
        if target.name == target.source_name || target.is_enum_constant {
            return;
        }
        let mut annotation = TargetAnnotation::new("SerializedName")
            .with("value", AnnotationArg::Str(target.source_name.clone()));
        annotation.import = Some(SERIALIZED_NAME.to_string());
        target.annotations.push(annotation);
    }

    fn enhance_annotation(
        &self,
        target: &mut TargetAnnotation,
        fact: &AnnotationFact,
        _owner: AnnotationOwner<'_>,
    ) {
        target.import = Some(fact.kind.clone());
    }
}
