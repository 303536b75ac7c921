//! JSON node renderer
//!
//! Writes every node as `<output>/<package_path>.<ext>.json`, wrapped in an
//! envelope naming the template a code renderer should apply. Files whose
//! content would not change are left untouched.

use metagen::{NodeShape, RenderError, Renderer, TargetClassMeta};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Template family for a node: `<language>/<enum|model|service>`.
pub fn template_name(node: &TargetClassMeta) -> String {
    let shape = match node.shape {
        NodeShape::Enum => "enum",
        NodeShape::Data => "model",
        NodeShape::Service => "service",
    };
    format!("{}/{}", node.language, shape)
}

/// Output path of a node, relative to the output directory.
pub fn relative_path(node: &TargetClassMeta) -> PathBuf {
    let mut path: PathBuf = node.package_path.split('/').filter(|s| !s.is_empty()).collect();
    path.set_extension(format!("{}.json", node.language.file_extension()));
    path
}

#[derive(Serialize)]
struct Envelope<'a> {
    template: String,
    node: &'a TargetClassMeta,
}

/// Writes nodes as pretty-printed JSON files.
#[derive(Debug)]
pub struct JsonFileRenderer {
    output: PathBuf,
    written: AtomicUsize,
    unchanged: AtomicUsize,
}

impl JsonFileRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            written: AtomicUsize::new(0),
            unchanged: AtomicUsize::new(0),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Files created or rewritten.
    pub fn written(&self) -> usize {
        self.written.load(Ordering::Relaxed)
    }

    /// Files skipped because their content was already current.
    pub fn unchanged(&self) -> usize {
        self.unchanged.load(Ordering::Relaxed)
    }
}

impl Renderer for JsonFileRenderer {
    fn render(&self, node: &TargetClassMeta) -> Result<(), RenderError> {
        let path = self.output.join(relative_path(node));
        let envelope = Envelope {
            template: template_name(node),
            node,
        };
        let mut content = serde_json::to_vec_pretty(&envelope)?;
        content.push(b'\n');

        if std::fs::read(&path).is_ok_and(|existing| existing == content) {
            tracing::debug!(path = %path.display(), "output unchanged");
            self.unchanged.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "wrote node");
        self.written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
#[path = "render/render_tests.rs"]
mod render_tests;
