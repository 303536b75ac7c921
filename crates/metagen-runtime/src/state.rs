//! Per-type progress and the run report.

use serde::Serialize;
use std::collections::BTreeMap;

/// Progress of one type through a run.
///
/// States only move forward: `Unseen`, `Extracting`, `MetaBuilt`,
/// `DepsExpanded`, then `Emitted`. `Skipped` is terminal for dependencies
/// that failed recoverably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeState {
    Unseen,
    Extracting,
    MetaBuilt,
    DepsExpanded,
    Emitted,
    Skipped,
}

impl TypeState {
    /// Whether the type has been built or has left the run.
    pub fn is_settled(self) -> bool {
        self >= TypeState::MetaBuilt
    }
}

/// A dependency left out of the run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedType {
    pub name: String,
    pub reason: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Qualified names in emission order
    pub emitted: Vec<String>,
    /// Recoverable failures, sorted by name
    pub skipped: Vec<SkippedType>,
    pub states: BTreeMap<String, TypeState>,
    /// Hex SHA-256 over the emitted nodes' JSON, in emission order
    pub fingerprint: String,
}

impl GenerationReport {
    pub fn state(&self, name: &str) -> Option<TypeState> {
        self.states.get(name).copied()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
