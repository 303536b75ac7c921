//! metagen-runtime - Orchestration of SDK metadata generation
//!
//! This crate provides:
//! - [`Orchestrator`] for breadth-first traversal from root types with
//!   bounded worker fan-out and topologically ordered emission
//! - [`Renderer`] as the boundary to whatever writes the generated files
//! - [`AsyncRuntime`] for driving a run from synchronous callers
//! - Cooperative cancellation with [`CancelHandle`] and [`CancelSignal`]

mod error;
mod orchestrator;
mod renderer;
mod runtime;
mod shutdown;
mod state;

pub use error::{GenerateError, GenerateResult, RenderError};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use renderer::{CollectingRenderer, Renderer};
pub use runtime::{AsyncRuntime, RuntimeConfig};
pub use shutdown::{CancelHandle, CancelSignal};
pub use state::{GenerationReport, SkippedType, TypeState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AsyncRuntime, CancelHandle, GenerateError, GenerationReport, Orchestrator,
        OrchestratorConfig, Renderer, RuntimeConfig, TypeState,
    };
}
