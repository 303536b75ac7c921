//! TypeScript node builder.

use crate::builder::{AnnotationOwner, BuilderContext, LanguageMetaBuilder};
use crate::target::{AnnotationArg, TargetAnnotation, TargetFieldMeta, TargetKind};
use metagen_core::annotations::AnnotationFact;
use metagen_core::builtins::TypeFamily;
use metagen_core::{ClassMeta, FieldMeta};

pub(super) fn family_name(family: TypeFamily) -> &'static str {
    match family {
        TypeFamily::Number => "number",
        TypeFamily::String => "string",
        TypeFamily::Boolean => "boolean",
        TypeFamily::Temporal => "Date",
        TypeFamily::Void => "void",
        TypeFamily::Set => "Set",
        TypeFamily::List | TypeFamily::Collection => "Array",
        TypeFamily::Map => "Record",
        TypeFamily::Object => "any",
    }
}

/// Builds TypeScript nodes.
///
/// Every native numeric type collapses to `number`, so number fields carry
/// a comment naming their native type. Route methods are emitted as
/// `RequestMethod` enum members.
#[derive(Debug, Clone)]
pub struct TypescriptMetaBuilder {
    context: BuilderContext,
}

impl TypescriptMetaBuilder {
    pub fn new(context: BuilderContext) -> Self {
        Self { context }
    }
}

impl LanguageMetaBuilder for TypescriptMetaBuilder {
    fn context(&self) -> &BuilderContext {
        &self.context
    }

    fn enhance_field(&self, target: &mut TargetFieldMeta, source: &FieldMeta, _owner: &ClassMeta) {
        let is_number = target
            .types
            .first()
            .is_some_and(|ty| ty.is_kind(TargetKind::Number));
        if !is_number {
            return;
        }
        if let Some(native) = source.types.first() {
            let label = self
                .context
                .locale()
                .pick("native type: ", "在java中的类型为：");
            target.comments.push(format!("{label}{}", native.simple_name()));
        }
    }

    fn enhance_annotation(
        &self,
        target: &mut TargetAnnotation,
        fact: &AnnotationFact,
        _owner: AnnotationOwner<'_>,
    ) {
        if fact.fact.as_route().is_none() {
            return;
        }
        let Some(AnnotationArg::List(methods)) = target.arguments.get("method") else {
            return;
        };
        let members: Vec<String> = methods.iter().map(|m| format!("RequestMethod.{m}")).collect();
        let code = match members.as_slice() {
            [single] => single.clone(),
            _ => format!("[{}]", members.join(", ")),
        };
        target
            .arguments
            .insert("method".to_string(), AnnotationArg::Code(code));
    }
}
