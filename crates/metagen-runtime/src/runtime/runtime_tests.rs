#![allow(non_snake_case)]

use super::*;
use crate::renderer::CollectingRenderer;
use metagen_core::{AnnotationRegistry, SourceExtractor, TypeModel};
use metagen_lang::{BuilderContext, TargetLanguage, builder_for, default_tables};
use std::sync::Arc;

const FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/order_service.json"
));

fn orchestrator(renderer: Arc<CollectingRenderer>) -> Orchestrator {
    let model = TypeModel::from_json(FIXTURE).unwrap();
    let extractor = Arc::new(SourceExtractor::new(Arc::new(model)));
    let context = BuilderContext::new(
        default_tables(TargetLanguage::Dart).into_shared(),
        extractor.clone(),
        Arc::new(AnnotationRegistry::with_defaults()),
    );
    Orchestrator::new(extractor, builder_for(context), renderer)
}

// RuntimeConfig tests

#[test]
fn RuntimeConfig___default___has_expected_values() {
    let config = RuntimeConfig::default();

    assert!(config.worker_threads.is_none());
    assert_eq!(config.thread_name, "metagen-worker");
    assert_eq!(config.max_blocking_threads, 64);
}

#[test]
fn RuntimeConfig___builder_chain___combines_options() {
    let config = RuntimeConfig::new()
        .with_worker_threads(2)
        .with_thread_name("test-worker")
        .with_max_blocking_threads(8);

    assert_eq!(config.worker_threads, Some(2));
    assert_eq!(config.thread_name, "test-worker");
    assert_eq!(config.max_blocking_threads, 8);
}

// AsyncRuntime tests

#[test]
fn AsyncRuntime___with_defaults___creates_runtime() {
    let runtime = AsyncRuntime::with_defaults().unwrap();

    assert!(!runtime.is_shutting_down());
}

#[test]
fn AsyncRuntime___new___keeps_custom_config() {
    let runtime = AsyncRuntime::new(RuntimeConfig::new().with_worker_threads(2)).unwrap();

    assert_eq!(runtime.config().worker_threads, Some(2));
}

#[test]
fn AsyncRuntime___block_on___executes_future() {
    let runtime = AsyncRuntime::with_defaults().unwrap();

    assert_eq!(runtime.block_on(async { 42 }), 42);
}

#[test]
fn AsyncRuntime___shutdown___triggers_signal() {
    let runtime = AsyncRuntime::with_defaults().unwrap();
    let signal = runtime.cancel_signal();

    runtime.shutdown();

    assert!(signal.is_cancelled());
    assert!(runtime.is_shutting_down());
}

#[test]
fn AsyncRuntime___generate___returns_report() {
    let runtime = AsyncRuntime::new(RuntimeConfig::new().with_worker_threads(2)).unwrap();
    let renderer = Arc::new(CollectingRenderer::new());
    let orchestrator = orchestrator(renderer.clone());

    let report = runtime
        .generate(&orchestrator, vec!["com.example.model.OrderDto".to_string()])
        .unwrap();

    assert_eq!(
        report.emitted,
        vec![
            "com.example.model.OrderStatus",
            "com.example.model.OrderItem",
            "com.example.model.OrderDto",
        ]
    );
    assert_eq!(renderer.names(), report.emitted);
}

#[test]
fn AsyncRuntime___generate_after_shutdown___is_cancelled() {
    let runtime = AsyncRuntime::with_defaults().unwrap();
    let orchestrator = orchestrator(Arc::new(CollectingRenderer::new()));
    runtime.shutdown();

    let err = runtime
        .generate(&orchestrator, vec!["com.example.model.OrderDto".to_string()])
        .unwrap_err();

    assert!(matches!(err, GenerateError::Cancelled(ref reason) if reason == "runtime shut down"));
}
