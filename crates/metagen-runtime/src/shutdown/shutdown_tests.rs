#![allow(non_snake_case)]

use super::*;
use std::time::Duration;

#[test]
fn CancelHandle___new___not_cancelled() {
    let handle = CancelHandle::new();

    assert!(!handle.is_cancelled());
    assert_eq!(handle.reason(), None);
}

#[test]
fn CancelHandle___cancel___keeps_first_reason() {
    let handle = CancelHandle::new();

    handle.cancel("root failed");
    handle.cancel("second");

    assert!(handle.is_cancelled());
    assert_eq!(handle.reason().as_deref(), Some("root failed"));
}

#[test]
fn CancelHandle___clone___shares_state() {
    let handle = CancelHandle::new();
    let clone = handle.clone();

    clone.cancel("stop");

    assert!(handle.is_cancelled());
}

#[test]
fn CancelSignal___reflects_handle_state() {
    let handle = CancelHandle::new();
    let signal = handle.signal();

    assert!(!signal.is_cancelled());
    handle.cancel("stop");
    assert!(signal.is_cancelled());
}

#[tokio::test]
async fn CancelSignal___cancelled___returns_immediately_when_already_cancelled() {
    let handle = CancelHandle::new();
    handle.cancel("stop");
    let mut signal = handle.signal();

    tokio::time::timeout(Duration::from_millis(100), signal.cancelled())
        .await
        .unwrap();
}

#[tokio::test]
async fn CancelSignal___cancelled___wakes_on_cancel() {
    let handle = CancelHandle::new();
    let mut signal = handle.signal();

    let waiter = tokio::spawn(async move {
        signal.cancelled().await;
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    handle.cancel("stop");

    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn CancelSignal___clone___observes_same_cancel() {
    let handle = CancelHandle::new();
    let signal = handle.signal();
    let mut clone = signal.clone();

    handle.cancel("stop");

    tokio::time::timeout(Duration::from_millis(100), clone.cancelled())
        .await
        .unwrap();
    assert!(signal.is_cancelled());
}
