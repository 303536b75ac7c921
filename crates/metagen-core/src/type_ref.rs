//! Native type identities.

use serde::{Deserialize, Serialize};
use std::fmt;

const ARRAY_SUFFIX: &str = "[]";

/// Identity of a native type: qualified name plus bound generic arguments.
///
/// Array types carry a `[]` suffix on the name and keep the generic
/// arguments of their component, so `List<Order>[]` is
/// `TypeRef { name: "java.util.List[]", args: [Order] }`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A type reference without generic arguments.
    pub fn raw(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn array_of(component: TypeRef) -> Self {
        Self {
            name: format!("{}{ARRAY_SUFFIX}", component.name),
            args: component.args,
        }
    }

    pub fn is_array(&self) -> bool {
        self.name.ends_with(ARRAY_SUFFIX)
    }

    /// Component type of an array, `None` for non-array types.
    pub fn component(&self) -> Option<TypeRef> {
        self.name
            .strip_suffix(ARRAY_SUFFIX)
            .map(|name| TypeRef::new(name, self.args.clone()))
    }

    /// Innermost non-array type.
    pub fn element(&self) -> TypeRef {
        let mut current = self.clone();
        while let Some(component) = current.component() {
            current = component;
        }
        current
    }

    /// The same type with its generic arguments removed.
    pub fn erasure(&self) -> TypeRef {
        TypeRef::raw(self.name.clone())
    }

    /// Unqualified name (`Order` for `com.example.Order`, `Inner` for `Outer$Inner`).
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Pre-order flattening into raw type identities.
    pub fn flatten(&self) -> Vec<TypeRef> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<TypeRef>) {
        out.push(self.erasure());
        for arg in &self.args {
            arg.flatten_into(out);
        }
    }
}

/// Unqualified part of a qualified type name.
pub(crate) fn simple_name(qualified: &str) -> &str {
    qualified
        .rsplit(['.', '$'])
        .next()
        .unwrap_or(qualified)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(component) = self.component() {
            return write!(f, "{component}{ARRAY_SUFFIX}");
        }
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::raw(name)
    }
}

#[cfg(test)]
#[path = "type_ref/type_ref_tests.rs"]
mod type_ref_tests;
