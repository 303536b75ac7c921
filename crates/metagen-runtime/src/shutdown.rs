//! Cooperative cancellation of a run

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Handle for cancelling a run
#[derive(Clone, Debug)]
pub struct CancelHandle {
    triggered: Arc<AtomicBool>,
    reason: Arc<Mutex<Option<String>>>,
    sender: broadcast::Sender<()>,
}

impl CancelHandle {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            triggered: Arc::new(AtomicBool::new(false)),
            reason: Arc::new(Mutex::new(None)),
            sender,
        }
    }

    /// Cancel with a reason. Only the first reason is kept.
    pub fn cancel(&self, reason: impl Into<String>) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            *self.reason.lock() = Some(reason.into());
            let _ = self.sender.send(());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub fn reason(&self) -> Option<String> {
        self.reason.lock().clone()
    }

    /// Signal that observes this handle
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            triggered: self.triggered.clone(),
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a [`CancelHandle`], for passing into tasks
#[derive(Debug)]
pub struct CancelSignal {
    triggered: Arc<AtomicBool>,
    receiver: broadcast::Receiver<()>,
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Wait until cancelled. Returns immediately if already cancelled.
    pub async fn cancelled(&mut self) {
        if self.is_cancelled() {
            return;
        }
        let _ = self.receiver.recv().await;
    }
}

impl Clone for CancelSignal {
    fn clone(&self) -> Self {
        Self {
            triggered: self.triggered.clone(),
            receiver: self.receiver.resubscribe(),
        }
    }
}

#[cfg(test)]
#[path = "shutdown/shutdown_tests.rs"]
mod shutdown_tests;
