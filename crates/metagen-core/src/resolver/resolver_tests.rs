#![allow(non_snake_case)]

use super::*;
use crate::extractor::SourceExtractor;
use crate::source::TypeModel;
use std::sync::Arc;

const MODEL: &str = r#"[
    {
        "name": "com.example.Order",
        "superclass": "com.example.Base<com.example.Customer>",
        "interfaces": ["java.io.Serializable"],
        "fields": [
            { "name": "items", "type": "java.util.List<com.example.OrderItem>" },
            { "name": "service", "type": "com.example.OrderService" },
            { "name": "page", "type": "org.springframework.data.domain.Page<com.example.OrderItem>" },
            { "name": "audit", "type": "com.vendor.Audit" }
        ],
        "methods": [
            {
                "name": "apply",
                "returns": "com.example.Receipt[]",
                "params": [ { "name": "coupon", "type": "com.example.Coupon" } ]
            }
        ]
    },
    {
        "name": "com.example.OrderItem",
        "fields": [ { "name": "order", "type": "com.example.Order" } ]
    },
    { "name": "com.example.Base", "type_params": ["C"] },
    { "name": "com.example.Customer" },
    { "name": "com.example.Receipt" },
    { "name": "com.example.Coupon" },
    {
        "name": "com.example.OrderService",
        "annotations": [ { "kind": "org.springframework.stereotype.Service" } ]
    },
    { "name": "com.vendor.Audit", "library": "vendor-audit-1.2.jar" },
    { "name": "org.springframework.data.domain.Page", "type_params": ["T"] }
]"#;

fn setup() -> (Arc<TypeModel>, SourceExtractor) {
    let model = Arc::new(TypeModel::from_json(MODEL).unwrap());
    let extractor = SourceExtractor::new(model.clone());
    (model, extractor)
}

fn dependency_names(meta: &ClassMeta) -> Vec<String> {
    meta.dependencies.iter().map(|t| t.name.clone()).collect()
}

#[test]
fn resolve___covers_fields_methods_superclass_and_interfaces() {
    let (_, extractor) = setup();

    let meta = extractor.extract("com.example.Order").unwrap();
    let names = dependency_names(&meta);

    for expected in [
        "com.example.OrderItem",
        "com.example.Receipt",
        "com.example.Coupon",
        "com.example.Customer",
        "java.io.Serializable",
        "java.util.List",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
    assert!(meta.dependencies.iter().any(|t| t.name == "com.example.Base"));
}

#[test]
fn resolve___array_return___contributes_element_type() {
    let (_, extractor) = setup();

    let meta = extractor.extract("com.example.Order").unwrap();

    assert!(!dependency_names(&meta).iter().any(|n| n.ends_with("[]")));
}

#[test]
fn resolve___mutual_references___terminate_without_recursion() {
    let (_, extractor) = setup();

    let order = extractor.extract("com.example.Order").unwrap();
    let item = extractor.extract("com.example.OrderItem").unwrap();

    assert!(dependency_names(&order).contains(&"com.example.OrderItem".to_string()));
    assert!(dependency_names(&item).contains(&"com.example.Order".to_string()));
}

#[test]
fn EligibilityFilter___default___keeps_only_traversable_user_types() {
    let (model, extractor) = setup();
    let filter = EligibilityFilter::default();

    let meta = extractor.extract("com.example.Order").unwrap();
    let eligible = filter.eligible(&meta.dependencies, model.as_ref());

    let expected: BTreeSet<String> = [
        "com.example.Base",
        "com.example.Coupon",
        "com.example.Customer",
        "com.example.OrderItem",
        "com.example.Receipt",
        "com.vendor.Audit",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(eligible, expected);
}

#[test]
fn EligibilityFilter___ignored_library___excludes_its_types() {
    let (model, _) = setup();
    let filter = EligibilityFilter::default().with_ignored_library("vendor-audit-1.2.jar");

    assert!(!filter.is_eligible("com.vendor.Audit", model.as_ref()));
}

#[test]
fn EligibilityFilter___ignored_package___excludes_its_types() {
    let (model, _) = setup();
    let filter = EligibilityFilter::default().with_ignored_package("com.vendor.");

    assert!(!filter.is_eligible("com.vendor.Audit", model.as_ref()));
}

#[test]
fn EligibilityFilter___service_bean___is_not_eligible() {
    let (model, _) = setup();

    assert!(!EligibilityFilter::default().is_eligible("com.example.OrderService", model.as_ref()));
}

#[test]
fn EligibilityFilter___undeclared_type___is_not_eligible() {
    let (model, _) = setup();

    assert!(!EligibilityFilter::default().is_eligible("com.example.Ghost", model.as_ref()));
}
