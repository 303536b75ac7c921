#![allow(non_snake_case)]

use super::*;

const FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/order_service.json"
));

fn model() -> TypeModel {
    TypeModel::from_json(FIXTURE).unwrap()
}

fn section(include: &[&str]) -> RootsSection {
    RootsSection {
        include: include.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    }
}

// NamePattern tests

#[test]
fn NamePattern___parse___recognizes_forms() {
    assert_eq!(
        NamePattern::parse("com.example.*"),
        NamePattern::Package("com.example".into())
    );
    assert_eq!(
        NamePattern::parse("com.example.**"),
        NamePattern::Subpackages("com.example".into())
    );
    assert_eq!(
        NamePattern::parse(" com.example.A "),
        NamePattern::Exact("com.example.A".into())
    );
}

#[test]
fn NamePattern___package___matches_direct_members_only() {
    let pattern = NamePattern::parse("com.example.*");

    assert!(pattern.matches("com.example.A"));
    assert!(!pattern.matches("com.example.web.A"));
    assert!(!pattern.matches("com.examples.A"));
}

#[test]
fn NamePattern___subpackages___matches_nested_members() {
    let pattern = NamePattern::parse("com.example.**");

    assert!(pattern.matches("com.example.A"));
    assert!(pattern.matches("com.example.web.A"));
    assert!(!pattern.matches("com.example"));
    assert!(!pattern.matches("com.examples.A"));
}

// select tests

#[test]
fn select___package_pattern___keeps_controllers() {
    let roots = select(&model(), &section(&["com.example.**"])).unwrap();

    assert_eq!(roots, vec!["com.example.web.OrderController"]);
}

#[test]
fn select___exclude___removes_match() {
    let mut roots_section = section(&["com.example.web.*"]);
    roots_section.exclude = vec!["com.example.web.OrderController".to_string()];

    let roots = select(&model(), &roots_section).unwrap();

    assert!(roots.is_empty());
}

#[test]
fn select___custom_annotations___replace_controller_kinds() {
    let mut roots_section = section(&["com.example.**"]);
    roots_section.annotations = vec!["org.springframework.stereotype.Service".to_string()];

    let roots = select(&model(), &roots_section).unwrap();

    assert_eq!(roots, vec!["com.example.service.OrderService"]);
}

#[test]
fn select___explicit_types___are_kept_without_annotations() {
    let roots_section = RootsSection {
        types: vec!["com.example.model.OrderDto".to_string()],
        ..Default::default()
    };

    let roots = select(&model(), &roots_section).unwrap();

    assert_eq!(roots, vec!["com.example.model.OrderDto"]);
}

#[test]
fn select___undeclared_explicit_type___fails() {
    let roots_section = RootsSection {
        types: vec!["com.example.Missing".to_string()],
        ..Default::default()
    };

    assert!(select(&model(), &roots_section).is_err());
}
