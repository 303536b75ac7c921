//! Boundary to the code that turns nodes into files.

use crate::error::RenderError;
use metagen_lang::TargetClassMeta;
use parking_lot::Mutex;

/// Consumes finished nodes.
///
/// Called from a single blocking thread, in emission order: a node is
/// rendered only after every node it depends on has been handed over,
/// except where dependencies form a cycle.
pub trait Renderer: Send + Sync {
    fn render(&self, node: &TargetClassMeta) -> Result<(), RenderError>;
}

/// Renderer that keeps every node in memory.
#[derive(Debug, Default)]
pub struct CollectingRenderer {
    nodes: Mutex<Vec<TargetClassMeta>>,
}

impl CollectingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered nodes, in emission order.
    pub fn nodes(&self) -> Vec<TargetClassMeta> {
        self.nodes.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.nodes
            .lock()
            .iter()
            .map(|node| node.qualified_name.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.nodes.lock().clear();
    }
}

impl Renderer for CollectingRenderer {
    fn render(&self, node: &TargetClassMeta) -> Result<(), RenderError> {
        self.nodes.lock().push(node.clone());
        Ok(())
    }
}
