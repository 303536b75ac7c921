#![allow(non_snake_case)]

use super::*;
use metagen_core::{SourceExtractor, TypeModel};
use std::sync::Arc;
use test_case::test_case;

const MODEL: &str = r#"[
    {
        "name": "com.example.Status",
        "kind": "enum",
        "fields": [
            { "name": "OPEN", "type": "com.example.Status", "is_static": true },
            { "name": "CACHE", "type": "java.util.Map<java.lang.String, com.example.Status>", "is_static": true },
            { "name": "label", "type": "java.lang.String" }
        ]
    },
    {
        "name": "com.example.OrderController",
        "fields": [
            { "name": "serialVersionUID", "type": "long", "is_static": true },
            { "name": "service", "type": "java.lang.Object" }
        ],
        "methods": [
            {
                "name": "create",
                "annotations": [ { "kind": "org.springframework.web.bind.annotation.PostMapping" } ]
            },
            {
                "name": "health",
                "annotations": [ { "kind": "org.springframework.web.bind.annotation.GetMapping" } ]
            },
            { "name": "helper" }
        ]
    }
]"#;

fn extract(name: &str) -> Arc<ClassMeta> {
    let model = TypeModel::from_json(MODEL).unwrap();
    SourceExtractor::new(Arc::new(model)).extract(name).unwrap()
}

#[test]
fn RouteMatchingStrategy___enum___keeps_constants_and_instance_fields() {
    let meta = extract("com.example.Status");
    let strategy = RouteMatchingStrategy::new();

    let kept: Vec<&str> = meta
        .fields
        .iter()
        .filter(|f| strategy.matches_field(f, &meta))
        .map(|f| f.name.as_str())
        .collect();

    assert_eq!(kept, vec!["OPEN", "label"]);
}

#[test]
fn RouteMatchingStrategy___class___drops_static_fields() {
    let meta = extract("com.example.OrderController");
    let strategy = RouteMatchingStrategy::new();

    let kept: Vec<&str> = meta
        .fields
        .iter()
        .filter(|f| strategy.matches_field(f, &meta))
        .map(|f| f.name.as_str())
        .collect();

    assert_eq!(kept, vec!["service"]);
}

#[test]
fn RouteMatchingStrategy___methods___require_route_and_respect_ignores() {
    let meta = extract("com.example.OrderController");
    let strategy = RouteMatchingStrategy::new().ignore_method("health");

    let kept: Vec<&str> = meta
        .methods
        .iter()
        .filter(|m| strategy.matches_method(m, &meta))
        .map(|m| m.name.as_str())
        .collect();

    assert_eq!(kept, vec!["create"]);
}

#[test_case("com.example.model.Order", "models/Order" ; "mapped prefix")]
#[test_case("com.example.model.sub.Line", "models/sub/Line" ; "nested package")]
#[test_case("com.example.controller.OrderController", "services/OrderController" ; "longest prefix wins")]
#[test_case("com.example.Root", "Root" ; "stripped prefix")]
#[test_case("org.other.Thing", "org/other/Thing" ; "unmapped")]
#[test_case("com.example.modelling.Plan", "modelling/Plan" ; "prefix must end at a segment")]
#[test_case("com.example.Outer$Inner", "Outer_Inner" ; "nested class")]
fn PrefixPackageMap___package_path(name: &str, expected: &str) {
    let map = PrefixPackageMap::default()
        .with_prefix("com.example", "")
        .with_prefix("com.example.model", "models")
        .with_prefix("com.example.controller", "services");

    assert_eq!(map.package_path(name), expected);
}

#[test]
fn PrefixPackageMap___class_name___defaults_to_simple_name() {
    assert_eq!(PrefixPackageMap::default().class_name("Order"), "Order");
}
