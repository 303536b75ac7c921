//! Tokio runtime management for synchronous callers

use crate::error::{GenerateError, GenerateResult};
use crate::orchestrator::Orchestrator;
use crate::shutdown::{CancelHandle, CancelSignal};
use crate::state::GenerationReport;
use tokio::runtime::{Builder, Runtime};

/// Configuration for the generation runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of worker threads (None = number of CPU cores)
    pub worker_threads: Option<usize>,
    /// Name prefix for worker threads
    pub thread_name: String,
    /// Maximum blocking threads, which run extraction and rendering
    pub max_blocking_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name: "metagen-worker".to_string(),
            max_blocking_threads: 64,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_max_blocking_threads(mut self, threads: usize) -> Self {
        self.max_blocking_threads = threads;
        self
    }
}

/// Owns a multi-thread Tokio runtime and drives runs to completion
pub struct AsyncRuntime {
    runtime: Runtime,
    cancel: CancelHandle,
    config: RuntimeConfig,
}

impl AsyncRuntime {
    pub fn new(config: RuntimeConfig) -> GenerateResult<Self> {
        let mut builder = Builder::new_multi_thread();

        if let Some(threads) = config.worker_threads {
            builder.worker_threads(threads);
        }

        let runtime = builder
            .thread_name(&config.thread_name)
            .max_blocking_threads(config.max_blocking_threads)
            .enable_all()
            .build()
            .map_err(|e| GenerateError::Runtime(format!("failed to create runtime: {e}")))?;

        Ok(Self {
            runtime,
            cancel: CancelHandle::new(),
            config,
        })
    }

    pub fn with_defaults() -> GenerateResult<Self> {
        Self::new(RuntimeConfig::default())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Handle that cancels runs started through [`AsyncRuntime::generate`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.signal()
    }

    /// Block on a future from a sync context
    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        self.runtime.block_on(future)
    }

    /// Run the orchestrator over the roots and wait for the report.
    ///
    /// Cancelling this runtime's handle cancels the run.
    pub fn generate(
        &self,
        orchestrator: &Orchestrator,
        roots: Vec<String>,
    ) -> GenerateResult<GenerationReport> {
        if let Some(reason) = self.cancel.reason() {
            return Err(GenerateError::Cancelled(reason));
        }
        let run_cancel = orchestrator.cancel_handle();
        let mut signal = self.cancel.signal();
        self.runtime.block_on(async move {
            tokio::select! {
                report = orchestrator.generate(roots) => report,
                _ = signal.cancelled() => {
                    let reason = self.cancel.reason().unwrap_or_else(|| "cancelled".to_string());
                    run_cancel.cancel(reason.clone());
                    Err(GenerateError::Cancelled(reason))
                }
            }
        })
    }

    /// Cancel any run in progress
    pub fn shutdown(&self) {
        tracing::info!("cancelling generation runtime");
        self.cancel.cancel("runtime shut down");
    }

    pub fn is_shutting_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for AsyncRuntime {
    fn drop(&mut self) {
        self.cancel.cancel("runtime dropped");
    }
}

#[cfg(test)]
#[path = "runtime/runtime_tests.rs"]
mod runtime_tests;
