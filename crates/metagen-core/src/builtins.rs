//! Platform-builtin native types.
//!
//! Builtins are never traversed as dependencies. Each family has one
//! canonical representative that base mapping tables are keyed by, so a
//! table entry for `java.lang.Number` also covers `int`, `Long` and
//! `java.math.BigDecimal`.

use serde::{Deserialize, Serialize};

/// The universal root type.
pub const OBJECT: &str = "java.lang.Object";

pub const VOID: &str = "void";

/// Package prefixes owned by the platform runtime.
const RUNTIME_PREFIXES: &[&str] = &["java.", "javax.", "jakarta.", "jdk.", "sun.", "kotlin."];

/// A family of builtin types that map to one target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    Number,
    String,
    Boolean,
    Temporal,
    Void,
    Set,
    List,
    Collection,
    Map,
    Object,
}

impl TypeFamily {
    pub const ALL: [TypeFamily; 10] = [
        TypeFamily::Number,
        TypeFamily::String,
        TypeFamily::Boolean,
        TypeFamily::Temporal,
        TypeFamily::Void,
        TypeFamily::Set,
        TypeFamily::List,
        TypeFamily::Collection,
        TypeFamily::Map,
        TypeFamily::Object,
    ];

    /// Native type that base tables are keyed by for this family.
    pub fn representative(self) -> &'static str {
        match self {
            TypeFamily::Number => "java.lang.Number",
            TypeFamily::String => "java.lang.String",
            TypeFamily::Boolean => "java.lang.Boolean",
            TypeFamily::Temporal => "java.util.Date",
            TypeFamily::Void => VOID,
            TypeFamily::Set => "java.util.Set",
            TypeFamily::List => "java.util.List",
            TypeFamily::Collection => "java.util.Collection",
            TypeFamily::Map => "java.util.Map",
            TypeFamily::Object => OBJECT,
        }
    }

    /// Family of a qualified native name, if it is a known builtin.
    pub fn of(name: &str) -> Option<TypeFamily> {
        let family = match name {
            "byte" | "short" | "int" | "long" | "float" | "double" | "java.lang.Byte"
            | "java.lang.Short" | "java.lang.Integer" | "java.lang.Long" | "java.lang.Float"
            | "java.lang.Double" | "java.lang.Number" | "java.math.BigDecimal"
            | "java.math.BigInteger" | "java.util.concurrent.atomic.AtomicInteger"
            | "java.util.concurrent.atomic.AtomicLong" => TypeFamily::Number,
            "char" | "java.lang.Character" | "java.lang.String" | "java.lang.CharSequence"
            | "java.util.UUID" => TypeFamily::String,
            "boolean" | "java.lang.Boolean" | "java.util.concurrent.atomic.AtomicBoolean" => {
                TypeFamily::Boolean
            }
            "java.util.Date" | "java.util.Calendar" | "java.sql.Date" | "java.sql.Timestamp"
            | "java.sql.Time" | "java.time.LocalDate" | "java.time.LocalDateTime"
            | "java.time.LocalTime" | "java.time.Instant" | "java.time.OffsetDateTime"
            | "java.time.ZonedDateTime" => TypeFamily::Temporal,
            "void" | "java.lang.Void" => TypeFamily::Void,
            "java.util.Set" | "java.util.HashSet" | "java.util.LinkedHashSet"
            | "java.util.TreeSet" | "java.util.SortedSet" => TypeFamily::Set,
            "java.util.List" | "java.util.ArrayList" | "java.util.LinkedList"
            | "java.lang.Iterable" => TypeFamily::List,
            "java.util.Collection" | "java.util.Queue" | "java.util.Deque" => {
                TypeFamily::Collection
            }
            "java.util.Map" | "java.util.HashMap" | "java.util.LinkedHashMap"
            | "java.util.TreeMap" | "java.util.SortedMap"
            | "java.util.concurrent.ConcurrentHashMap" => TypeFamily::Map,
            OBJECT => TypeFamily::Object,
            _ => return None,
        };
        Some(family)
    }
}

pub fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "byte" | "short" | "int" | "long" | "float" | "double" | "char" | "boolean" | "void"
    )
}

/// Whether a type belongs to the platform and is never a dependency.
pub fn is_builtin(name: &str) -> bool {
    let name = name.trim_end_matches("[]");
    is_primitive(name)
        || TypeFamily::of(name).is_some()
        || RUNTIME_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("int", TypeFamily::Number)]
    #[test_case("java.lang.Long", TypeFamily::Number)]
    #[test_case("java.math.BigDecimal", TypeFamily::Number)]
    #[test_case("char", TypeFamily::String)]
    #[test_case("boolean", TypeFamily::Boolean)]
    #[test_case("java.time.LocalDateTime", TypeFamily::Temporal)]
    #[test_case("java.util.ArrayList", TypeFamily::List)]
    #[test_case("java.util.HashMap", TypeFamily::Map)]
    #[test_case("java.lang.Void", TypeFamily::Void)]
    fn TypeFamily___of___classifies_builtin(name: &str, expected: TypeFamily) {
        assert_eq!(TypeFamily::of(name), Some(expected));
    }

    #[test]
    fn TypeFamily___of_user_type___is_none() {
        assert_eq!(TypeFamily::of("com.example.Order"), None);
    }

    #[test]
    fn TypeFamily___representative___belongs_to_its_own_family() {
        for family in TypeFamily::ALL {
            assert_eq!(TypeFamily::of(family.representative()), Some(family));
        }
    }

    #[test_case("int[]", true)]
    #[test_case("java.util.Optional", true)]
    #[test_case("javax.servlet.http.HttpServletRequest", true)]
    #[test_case("com.example.Order", false)]
    #[test_case("com.example.Order[]", false)]
    fn is_builtin___classifies(name: &str, expected: bool) {
        assert_eq!(is_builtin(name), expected);
    }
}
