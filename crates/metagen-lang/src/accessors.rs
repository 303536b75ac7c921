//! Fields synthesized from accessor methods.

use crate::naming::accessor_property;
use metagen_core::{FieldMeta, MethodMeta, Visibility};

/// Declared fields followed by one synthetic field per qualifying accessor.
///
/// An accessor qualifies when it is a `getX`/`isX` instance method that is
/// not abstract, takes no parameters, returns a value, and names a property
/// no declared field already has. `getClass` never qualifies.
pub fn merge_accessor_fields(fields: &[FieldMeta], methods: &[MethodMeta]) -> Vec<FieldMeta> {
    let mut merged = fields.to_vec();
    for method in methods {
        if method.is_static || method.is_abstract || method.arity() != 0 || method.returns_void() {
            continue;
        }
        if method.name == "getClass" {
            continue;
        }
        let Some(property) = accessor_property(&method.name) else {
            continue;
        };
        if merged.iter().any(|f| f.name == property) {
            continue;
        }
        merged.push(FieldMeta {
            name: property,
            visibility: Visibility::Public,
            is_static: false,
            is_final: false,
            is_transient: false,
            is_volatile: false,
            types: method.return_types.clone(),
            type_variables: Vec::new(),
            annotations: method.annotations.clone(),
            synthetic: true,
        });
    }
    merged
}
