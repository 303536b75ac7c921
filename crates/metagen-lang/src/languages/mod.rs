//! Per-language type tables and node builders.
//!
//! | Language | Array marker | `Map` | `Object` | Field hook | Annotation hook |
//! |----------|--------------|-------|----------|------------|-----------------|
//! | TypeScript | `Array` | `Record` | `any` | native-type comment on numbers | route methods as `RequestMethod.X` |
//! | Dart | `List` | `Map` | `dynamic` | `@JsonKey(name:)` on renamed fields | none |
//! | Java | `List` | `Map` | `Object` | `@SerializedName` on renamed fields | qualified import |

mod dart;
mod java;
mod typescript;

pub use dart::DartMetaBuilder;
pub use java::{JavaMetaBuilder, JvmType};
pub use typescript::TypescriptMetaBuilder;

use crate::builder::{BuilderContext, LanguageMetaBuilder};
use crate::mapping::TypeTables;
use crate::target::{TargetKind, TargetLanguage, TargetType};
use metagen_core::builtins::TypeFamily;
use std::sync::Arc;

/// Built-in tables of a language: one entry per type family
/// representative, plus the language's exact non-numeric entries.
///
/// Every member of the number family maps to the family's target here;
/// see [`precise_numbers`] for per-type numeric names.
pub fn default_tables(language: TargetLanguage) -> TypeTables {
    let (family_name, marker): (fn(TypeFamily) -> &'static str, &str) = match language {
        TargetLanguage::Typescript => (typescript::family_name, "Array"),
        TargetLanguage::Dart => (dart::family_name, "List"),
        TargetLanguage::Java => (java::family_name, "List"),
    };

    let mut tables = TypeTables::new(language, TargetType::new(TargetKind::Array, marker));
    for family in TypeFamily::ALL {
        tables = tables.with_base_type(
            family.representative(),
            TargetType::new(family_kind(family), family_name(family)),
        );
    }
    match language {
        TargetLanguage::Typescript | TargetLanguage::Dart => tables,
        TargetLanguage::Java => java::exact_types(tables),
    }
}

/// Add the language's per-type numeric entries, e.g. Dart `int` and
/// `double` or Java `Long` and `BigDecimal`. TypeScript has a single number
/// type and is returned unchanged.
pub fn precise_numbers(tables: TypeTables) -> TypeTables {
    match tables.language() {
        TargetLanguage::Typescript => tables,
        TargetLanguage::Dart => dart::precise_numbers(tables),
        TargetLanguage::Java => java::precise_numbers(tables),
    }
}

/// Builder for the context's language.
pub fn builder_for(context: BuilderContext) -> Arc<dyn LanguageMetaBuilder> {
    match context.language() {
        TargetLanguage::Typescript => Arc::new(TypescriptMetaBuilder::new(context)),
        TargetLanguage::Dart => Arc::new(DartMetaBuilder::new(context)),
        TargetLanguage::Java => Arc::new(JavaMetaBuilder::new(context)),
    }
}

fn family_kind(family: TypeFamily) -> TargetKind {
    match family {
        TypeFamily::Number => TargetKind::Number,
        TypeFamily::String => TargetKind::String,
        TypeFamily::Boolean => TargetKind::Boolean,
        TypeFamily::Temporal => TargetKind::Date,
        TypeFamily::Void => TargetKind::Void,
        TypeFamily::Set => TargetKind::Set,
        TypeFamily::List | TypeFamily::Collection => TargetKind::Array,
        TypeFamily::Map => TargetKind::Map,
        TypeFamily::Object => TargetKind::Any,
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case(TargetLanguage::Typescript, "java.util.Map", "Record" ; "typescript map")]
    #[test_case(TargetLanguage::Typescript, "java.lang.Object", "any" ; "typescript object")]
    #[test_case(TargetLanguage::Dart, "java.util.Date", "DateTime" ; "dart date")]
    #[test_case(TargetLanguage::Dart, "java.lang.Object", "dynamic" ; "dart object")]
    #[test_case(TargetLanguage::Java, "void", "Void" ; "java void")]
    #[test_case(TargetLanguage::Java, "java.util.Collection", "Collection" ; "java collection")]
    fn default_tables___family_entries(language: TargetLanguage, native: &str, expected: &str) {
        let tables = default_tables(language);

        assert_eq!(tables.base(native).map(|t| t.name.as_str()), Some(expected));
    }

    #[test]
    fn default_tables___every_family_has_an_entry() {
        for language in TargetLanguage::ALL {
            let tables = default_tables(language);
            for family in TypeFamily::ALL {
                assert!(
                    tables.base(family.representative()).is_some(),
                    "{language} has no entry for {family:?}"
                );
            }
        }
    }

    #[test_case(TargetLanguage::Dart, "long", "int" ; "dart integral")]
    #[test_case(TargetLanguage::Dart, "java.lang.Double", "double" ; "dart floating")]
    #[test_case(TargetLanguage::Java, "int", "Integer" ; "java primitive")]
    #[test_case(TargetLanguage::Java, "java.math.BigDecimal", "BigDecimal" ; "java big decimal")]
    fn precise_numbers___per_type_entries(language: TargetLanguage, native: &str, expected: &str) {
        let tables = precise_numbers(default_tables(language));

        assert_eq!(tables.base(native).map(|t| t.name.as_str()), Some(expected));
    }

    #[test]
    fn precise_numbers___typescript___unchanged() {
        let tables = default_tables(TargetLanguage::Typescript);

        assert_eq!(precise_numbers(tables.clone()), tables);
    }

    #[test]
    fn default_tables___array_marker_is_array_kind() {
        assert_eq!(default_tables(TargetLanguage::Typescript).array_marker().name, "Array");
        assert_eq!(default_tables(TargetLanguage::Dart).array_marker().name, "List");
        assert_eq!(
            default_tables(TargetLanguage::Java).array_marker().kind,
            TargetKind::Array
        );
    }
}
