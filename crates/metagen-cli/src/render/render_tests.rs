#![allow(non_snake_case)]

use super::*;
use metagen::{GeneratorBuilder, TargetLanguage, TypeModel};
use std::sync::Arc;

const FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/order_service.json"
));

fn node(language: TargetLanguage, name: &str) -> TargetClassMeta {
    let model = TypeModel::from_json(FIXTURE).unwrap();
    GeneratorBuilder::new(language, Arc::new(model))
        .with_package_prefix("com.example.model", "models")
        .with_package_prefix("com.example.web", "api")
        .build(Arc::new(metagen::CollectingRenderer::new()))
        .inspect(name)
        .unwrap()
}

#[test]
fn template_name___follows_shape() {
    assert_eq!(
        template_name(&node(TargetLanguage::Typescript, "com.example.model.OrderStatus")),
        "typescript/enum"
    );
    assert_eq!(
        template_name(&node(TargetLanguage::Dart, "com.example.model.OrderDto")),
        "dart/model"
    );
    assert_eq!(
        template_name(&node(TargetLanguage::Java, "com.example.web.OrderController")),
        "java/service"
    );
}

#[test]
fn relative_path___uses_package_path_and_extension() {
    let path = relative_path(&node(TargetLanguage::Dart, "com.example.model.OrderDto"));

    assert_eq!(path, PathBuf::from("models/OrderDto.dart.json"));
}

#[test]
fn JsonFileRenderer___render___writes_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = JsonFileRenderer::new(dir.path());
    let order = node(TargetLanguage::Typescript, "com.example.model.OrderDto");

    renderer.render(&order).unwrap();

    let written = std::fs::read_to_string(dir.path().join("models/OrderDto.ts.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["template"], "typescript/model");
    assert_eq!(value["node"]["qualified_name"], "com.example.model.OrderDto");
    assert_eq!(renderer.written(), 1);
}

#[test]
fn JsonFileRenderer___render_twice___skips_unchanged_file() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = JsonFileRenderer::new(dir.path());
    let order = node(TargetLanguage::Typescript, "com.example.model.OrderDto");

    renderer.render(&order).unwrap();
    renderer.render(&order).unwrap();

    assert_eq!(renderer.written(), 1);
    assert_eq!(renderer.unchanged(), 1);
}

#[test]
fn JsonFileRenderer___render___rewrites_changed_file() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = JsonFileRenderer::new(dir.path());
    let mut order = node(TargetLanguage::Typescript, "com.example.model.OrderDto");
    renderer.render(&order).unwrap();

    order.comments.push("changed".to_string());
    renderer.render(&order).unwrap();

    assert_eq!(renderer.written(), 2);
    assert_eq!(renderer.unchanged(), 0);
}

#[test]
fn JsonFileRenderer___unwritable_output___is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();
    let renderer = JsonFileRenderer::new(&blocker);

    let err = renderer
        .render(&node(TargetLanguage::Typescript, "com.example.model.OrderDto"))
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
}
