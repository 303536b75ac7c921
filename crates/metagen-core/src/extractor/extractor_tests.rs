#![allow(non_snake_case)]

use super::*;
use crate::source::TypeModel;
use std::thread;

const GENERIC_MODEL: &str = r#"[
    {
        "name": "com.example.Box",
        "type_params": ["T"],
        "fields": [
            { "name": "value", "type": "T", "visibility": "public" },
            { "name": "history", "type": "java.util.List<T>", "visibility": "public" },
            { "name": "raw", "type": "T[]", "visibility": "private" }
        ],
        "methods": [
            {
                "name": "get",
                "returns": "T",
                "params": [ { "name": "fallback", "type": "T" } ]
            },
            {
                "name": "convert",
                "returns": "E",
                "type_params": ["E"],
                "params": [ { "name": "target", "type": "java.lang.Class<E>" } ]
            }
        ]
    },
    {
        "name": "com.example.IntBox",
        "superclass": "com.example.Box<java.lang.Integer>",
        "fields": [ { "name": "label", "type": "java.lang.String", "visibility": "public" } ]
    },
    {
        "name": "com.example.MapHolder",
        "fields": [
            { "name": "index", "type": "java.util.Map<java.lang.String, java.util.List<com.example.Order>>" },
            { "name": "orders", "type": "com.example.Order[]" },
            { "name": "bounded", "type": "java.util.List<? extends com.example.Order>" }
        ]
    },
    { "name": "com.example.Order" },
    {
        "name": "com.example.Status",
        "kind": "enum",
        "fields": [
            { "name": "$VALUES", "type": "com.example.Status[]", "is_static": true, "visibility": "private" },
            { "name": "OPEN", "type": "com.example.Status", "is_static": true },
            { "name": "CLOSED", "type": "com.example.Status", "is_static": true }
        ]
    },
    {
        "name": "com.example.Unnamed",
        "methods": [
            {
                "name": "find",
                "returns": "com.example.Order",
                "params": [ { "name": "id", "type": "long" }, { "type": "int" } ]
            }
        ]
    },
    {
        "name": "com.example.Broken",
        "fields": [ { "name": "bad", "type": "java.util.List<" } ]
    },
    { "name": "com.example.LoopA", "superclass": "com.example.LoopB" },
    { "name": "com.example.LoopB", "superclass": "com.example.LoopA" }
]"#;

fn extractor() -> SourceExtractor {
    let model = TypeModel::from_json(GENERIC_MODEL).unwrap();
    SourceExtractor::new(Arc::new(model))
}

fn names(types: &[TypeRef]) -> Vec<&str> {
    types.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn extract___same_name_twice___returns_identical_instance() {
    let extractor = extractor();

    let first = extractor.extract("com.example.Order").unwrap();
    let second = extractor.extract("com.example.Order").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(extractor.cache_len(), 1);
}

#[test]
fn extract___concurrent_requests___share_one_instance() {
    let extractor = Arc::new(extractor());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let extractor = Arc::clone(&extractor);
            thread::spawn(move || extractor.extract("com.example.MapHolder").unwrap())
        })
        .collect();
    let results: Vec<Arc<ClassMeta>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn extract___unknown_type___returns_unknown_type_error() {
    let extractor = extractor();

    let err = extractor.extract("com.example.Missing").unwrap_err();

    assert_eq!(err, ExtractionError::UnknownType("com.example.Missing".into()));
}

#[test]
fn extract___failure___is_not_cached() {
    let extractor = extractor();

    assert!(extractor.extract("com.example.Broken").is_err());

    assert!(extractor.cached("com.example.Broken").is_none());
    assert_eq!(extractor.cache_len(), 0);
}

#[test]
fn extract___malformed_field_signature___names_member() {
    let extractor = extractor();

    let err = extractor.extract("com.example.Broken").unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::MalformedSignature { ref owner, ref member, .. }
            if owner == "com.example.Broken" && member == "bad"
    ));
}

#[test]
fn extract___nested_generic_field___flattens_pre_order() {
    let meta = extractor().extract("com.example.MapHolder").unwrap();

    let index = meta.field("index").unwrap();

    assert_eq!(
        names(&index.types),
        vec![
            "java.util.Map",
            "java.lang.String",
            "java.util.List",
            "com.example.Order"
        ]
    );
}

#[test]
fn extract___upper_bounded_wildcard___resolves_to_bound() {
    let meta = extractor().extract("com.example.MapHolder").unwrap();

    let bounded = meta.field("bounded").unwrap();

    assert_eq!(names(&bounded.types), vec!["java.util.List", "com.example.Order"]);
}

#[test]
fn extract___unbound_variable_field___erases_to_object() {
    let meta = extractor().extract("com.example.Box").unwrap();

    let value = meta.field("value").unwrap();
    let history = meta.field("history").unwrap();
    let raw = meta.field("raw").unwrap();

    assert_eq!(names(&value.types), vec!["java.lang.Object"]);
    assert_eq!(names(&history.types), vec!["java.util.List"]);
    assert_eq!(names(&raw.types), vec!["java.lang.Object[]"]);
    assert_eq!(value.type_variables, vec!["T"]);
    assert_eq!(history.type_variables, vec!["T"]);
}

#[test]
fn extract___method_type_parameter___is_not_a_class_variable() {
    let meta = extractor().extract("com.example.Box").unwrap();

    let convert = meta.methods.iter().find(|m| m.name == "convert").unwrap();

    assert_eq!(names(&convert.return_types), vec!["java.lang.Object"]);
    assert_eq!(names(&convert.param_types[0]), vec!["java.lang.Class"]);
}

#[test]
fn extract___subclass_of_generic___records_bound_supertype() {
    let meta = extractor().extract("com.example.IntBox").unwrap();

    assert_eq!(
        meta.supertypes,
        vec![TypeRef::new(
            "com.example.Box",
            vec![TypeRef::raw("java.lang.Integer")]
        )]
    );
    assert_eq!(
        meta.binding_for("com.example.Box"),
        Some(&[TypeRef::raw("java.lang.Integer")][..])
    );
    assert_eq!(meta.superclass, Some(meta.supertypes[0].clone()));
}

#[test]
fn extract___public_only___includes_inherited_members_with_bindings() {
    let model = TypeModel::from_json(GENERIC_MODEL).unwrap();
    let extractor = SourceExtractor::public_only(Arc::new(model));

    let meta = extractor.extract("com.example.IntBox").unwrap();

    let field_names: Vec<&str> = meta.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(field_names, vec!["label", "value", "history"]);
    let value = meta.field("value").unwrap();
    assert_eq!(names(&value.types), vec!["java.lang.Integer"]);
    assert!(value.type_variables.is_empty());
    let get = meta.methods.iter().find(|m| m.name == "get").unwrap();
    assert_eq!(get.owner, "com.example.Box");
    assert_eq!(names(&get.return_types), vec!["java.lang.Integer"]);
}

#[test]
fn extract___declared_mode___keeps_private_members() {
    let meta = extractor().extract("com.example.Box").unwrap();

    assert!(meta.field("raw").is_some());
}

#[test]
fn inherited_methods___resolve_through_bindings() {
    let extractor = extractor();

    let inherited = extractor.inherited_methods("com.example.IntBox").unwrap();

    let get = inherited.iter().find(|m| m.name == "get").unwrap();
    assert_eq!(names(&get.param_types[0]), vec!["java.lang.Integer"]);
    let params = get.params.as_ref().unwrap();
    assert_eq!(params[0].name, "fallback");
}

#[test]
fn extract___enum___drops_values_array_and_keeps_constants() {
    let meta = extractor().extract("com.example.Status").unwrap();

    let field_names: Vec<&str> = meta.fields.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(field_names, vec!["OPEN", "CLOSED"]);
    assert!(meta.fields.iter().all(|f| meta.is_enum_constant(f)));
}

#[test]
fn extract___missing_parameter_name___keeps_positional_types_only() {
    let meta = extractor().extract("com.example.Unnamed").unwrap();

    let find = &meta.methods[0];

    assert!(find.params.is_none());
    assert_eq!(find.arity(), 2);
    assert_eq!(names(&find.param_types[1]), vec!["int"]);
}

#[test]
fn extract___cyclic_superclass_chain___terminates() {
    let meta = extractor().extract("com.example.LoopA").unwrap();

    assert_eq!(names(&meta.supertypes), vec!["com.example.LoopB"]);
}

#[test]
fn extract___dependencies___cover_fields_and_unwrap_arrays() {
    let meta = extractor().extract("com.example.MapHolder").unwrap();

    assert!(meta.dependencies.contains(&TypeRef::raw("com.example.Order")));
    assert!(meta.dependencies.contains(&TypeRef::raw("java.util.Map")));
    assert!(!meta.dependencies.contains(&TypeRef::raw("com.example.Order[]")));
}
