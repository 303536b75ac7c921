//! Dart node builder.

use crate::builder::{BuilderContext, LanguageMetaBuilder};
use crate::mapping::TypeTables;
use crate::target::{AnnotationArg, TargetAnnotation, TargetFieldMeta, TargetKind, TargetType};
use metagen_core::builtins::TypeFamily;
use metagen_core::{ClassMeta, FieldMeta};

pub(super) fn family_name(family: TypeFamily) -> &'static str {
    match family {
        TypeFamily::Number => "num",
        TypeFamily::String => "String",
        TypeFamily::Boolean => "bool",
        TypeFamily::Temporal => "DateTime",
        TypeFamily::Void => "void",
        TypeFamily::Set => "Set",
        TypeFamily::List | TypeFamily::Collection => "List",
        TypeFamily::Map => "Map",
        TypeFamily::Object => "dynamic",
    }
}

const INTEGRAL: [&str; 10] = [
    "byte",
    "short",
    "int",
    "long",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.math.BigInteger",
    "java.util.concurrent.atomic.AtomicLong",
];

const FLOATING: [&str; 4] = ["float", "double", "java.lang.Float", "java.lang.Double"];

/// Dart distinguishes `int` from `double`; the rest of the number family
/// stays `num`.
pub(super) fn precise_numbers(tables: TypeTables) -> TypeTables {
    let tables = INTEGRAL.iter().fold(tables, |tables, native| {
        tables.with_base_type(*native, TargetType::new(TargetKind::Number, "int"))
    });
    FLOATING.iter().fold(tables, |tables, native| {
        tables.with_base_type(*native, TargetType::new(TargetKind::Number, "double"))
    })
}

/// Builds Dart nodes for `json_serializable`.
///
/// A field whose emitted name differs from its native name gets
/// `@JsonKey(name: ...)` so the wire key is unchanged.
#[derive(Debug, Clone)]
pub struct DartMetaBuilder {
    context: BuilderContext,
}

impl DartMetaBuilder {
    pub fn new(context: BuilderContext) -> Self {
        Self { context }
    }
}

impl LanguageMetaBuilder for DartMetaBuilder {
    fn context(&self) -> &BuilderContext {
        &self.context
    }

    fn enhance_field(&self, target: &mut TargetFieldMeta, _source: &FieldMeta, _owner: &ClassMeta) {
        if target.name != target.source_name && !target.is_enum_constant {
            target.annotations.push(
                TargetAnnotation::new("JsonKey")
                    .with("name", AnnotationArg::Str(target.source_name.clone())),
            );
        }
    }
}
