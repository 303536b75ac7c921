#![allow(non_snake_case)]

use super::*;
use crate::meta::AnnotationValue;

const ORDER_MODEL: &str = r#"{
    "types": [
        {
            "name": "com.example.Order",
            "fields": [
                { "name": "id", "type": "java.lang.String" },
                {
                    "name": "note",
                    "type": "java.lang.String",
                    "annotations": [
                        { "kind": "javax.validation.constraints.Size", "values": { "max": 64 } }
                    ]
                }
            ],
            "methods": [
                { "name": "cancel", "params": [ { "type": "java.lang.String" } ] }
            ]
        },
        { "name": "com.example.Status", "kind": "enum" }
    ]
}"#;

#[test]
fn TypeModel___from_json_wrapped___loads_declarations() {
    let model = TypeModel::from_json(ORDER_MODEL).unwrap();

    assert_eq!(model.len(), 2);
    assert_eq!(
        model.type_names(),
        vec!["com.example.Order", "com.example.Status"]
    );
}

#[test]
fn TypeModel___from_json___applies_defaults() {
    let model = TypeModel::from_json(ORDER_MODEL).unwrap();

    let order = model.declaration("com.example.Order").unwrap();
    let cancel = &order.methods[0];

    assert_eq!(order.kind, ClassKind::Class);
    assert_eq!(order.visibility, Visibility::Public);
    assert_eq!(cancel.returns, "void");
    assert_eq!(cancel.params[0].name, None);
}

#[test]
fn TypeModel___from_json___parses_annotation_values() {
    let model = TypeModel::from_json(ORDER_MODEL).unwrap();

    let order = model.declaration("com.example.Order").unwrap();
    let size = &order.fields[1].annotations[0];

    assert_eq!(size.get("max"), Some(&AnnotationValue::Int(64)));
}

#[test]
fn TypeModel___from_json_list___loads_declarations() {
    let model = TypeModel::from_json(r#"[{ "name": "a.B" }]"#).unwrap();

    assert!(model.is_declared("a.B"));
    assert!(!model.is_declared("a.C"));
}

#[test]
fn TypeModel___duplicate_name___is_rejected() {
    let result = TypeModel::from_decls(vec![TypeDecl::new("a.B"), TypeDecl::new("a.B")]);

    assert!(matches!(result, Err(ModelError::DuplicateType(name)) if name == "a.B"));
}

#[test]
fn TypeModel___empty_name___is_rejected() {
    let result = TypeModel::from_decls(vec![TypeDecl::new("  ")]);

    assert!(matches!(result, Err(ModelError::InvalidDeclaration(_))));
}

#[test]
fn TypeModel___duplicate_type_param___is_rejected() {
    let mut decl = TypeDecl::new("a.Pair");
    decl.type_params = vec!["T".into(), "T".into()];

    let result = TypeModel::from_decls(vec![decl]);

    assert!(matches!(result, Err(ModelError::InvalidDeclaration(_))));
}

#[test]
fn TypeModel___invalid_json___returns_json_error() {
    let result = TypeModel::from_json("{ not json");

    assert!(matches!(result, Err(ModelError::Json(_))));
}

#[test]
fn TypeDecl___simple_name___strips_package() {
    assert_eq!(TypeDecl::new("com.example.Order").simple_name(), "Order");
}
