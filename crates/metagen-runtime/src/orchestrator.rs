//! Breadth-first generation from root types.
//!
//! # Run lifecycle
//!
//! 1. The roots form the first wave.
//! 2. Every type of a wave is extracted and built on the blocking pool,
//!    at most `max_workers` at a time. Outcomes are applied in name order.
//! 3. Eligible dependencies not seen before form the next wave.
//! 4. After each wave, every built node whose dependencies are all
//!    published or skipped is published to the emission queue.
//! 5. When no wave is left, nodes held back only by cycles are published
//!    in depth-first post-order.
//!
//! A single consumer on the blocking pool renders published nodes in
//! queue order and hashes their JSON into the report fingerprint.
//!
//! # Failures
//!
//! | Failure | Root | Dependency |
//! |---------|------|------------|
//! | extraction | fatal | skipped |
//! | unmappable type | fatal | fatal |
//! | other build failure | fatal | skipped |
//! | renderer | fatal | fatal |
//!
//! A node that failed to build is never published.

use crate::error::{GenerateError, GenerateResult};
use crate::renderer::Renderer;
use crate::shutdown::CancelHandle;
use crate::state::{GenerationReport, SkippedType, TypeState};
use dashmap::DashMap;
use metagen_core::{EligibilityFilter, ExtractionError, SourceExtractor};
use metagen_lang::{BuildError, LanguageMetaBuilder, TargetClassMeta};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Concurrency limits of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Types extracted and built concurrently
    pub max_workers: usize,
    /// Published nodes waiting for the renderer
    pub queue_capacity: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_workers: std::thread::available_parallelism().map_or(4, |n| n.get()),
            queue_capacity: 64,
        }
    }
}

impl OrchestratorConfig {
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }
}

/// Drives extraction, building and emission for a set of root types.
pub struct Orchestrator {
    extractor: Arc<SourceExtractor>,
    builder: Arc<dyn LanguageMetaBuilder>,
    filter: Arc<EligibilityFilter>,
    renderer: Arc<dyn Renderer>,
    config: OrchestratorConfig,
    cancel: CancelHandle,
}

/// A built node and the dependencies it waits for.
struct Built {
    node: TargetClassMeta,
    deps: BTreeSet<String>,
}

enum Failure {
    Extraction(ExtractionError),
    Build(BuildError),
    Cancelled,
}

impl Orchestrator {
    pub fn new(
        extractor: Arc<SourceExtractor>,
        builder: Arc<dyn LanguageMetaBuilder>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            extractor,
            builder,
            filter: Arc::new(EligibilityFilter::default()),
            renderer,
            config: OrchestratorConfig::default(),
            cancel: CancelHandle::new(),
        }
    }

    pub fn with_filter(mut self, filter: EligibilityFilter) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Handle that cancels this orchestrator's runs, current and future.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Generate nodes for the roots and everything they depend on.
    pub async fn generate<I, S>(&self, roots: I) -> GenerateResult<GenerationReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roots: BTreeSet<String> = roots.into_iter().map(Into::into).collect();
        info!(roots = roots.len(), "starting generation");

        let states: Arc<DashMap<String, TypeState>> = Arc::new(DashMap::new());
        for root in &roots {
            states.insert(root.clone(), TypeState::Unseen);
        }

        let (tx, rx) = mpsc::channel(self.config.queue_capacity.max(1));
        let consumer = {
            let renderer = self.renderer.clone();
            let states = states.clone();
            tokio::task::spawn_blocking(move || consume(rx, renderer.as_ref(), &states))
        };

        let run_cancel = CancelHandle::new();
        let mut run = Run {
            roots: &roots,
            states: states.as_ref(),
            tx,
            pending: BTreeMap::new(),
            published: HashSet::new(),
            skipped: BTreeMap::new(),
        };
        let traversal = self.traverse(&mut run, &run_cancel).await;
        let Run { tx, skipped, .. } = run;
        drop(tx);

        if let Err(err) = &traversal {
            run_cancel.cancel(err.to_string());
            warn!(error = %err, "generation failed, draining queued nodes");
        }

        let consumed = consumer
            .await
            .map_err(|e| GenerateError::Runtime(format!("emitter task failed: {e}")))?;
        let (emitted, fingerprint) = match (traversal, consumed) {
            (Err(GenerateError::EmitterClosed), Err(render_err)) => return Err(render_err),
            (Err(err), _) => return Err(err),
            (Ok(()), Err(render_err)) => return Err(render_err),
            (Ok(()), Ok(done)) => done,
        };

        let report = GenerationReport {
            emitted,
            skipped: skipped
                .into_iter()
                .map(|(name, reason)| SkippedType { name, reason })
                .collect(),
            states: states
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
            fingerprint,
        };
        info!(
            emitted = report.emitted.len(),
            skipped = report.skipped.len(),
            fingerprint = %report.fingerprint,
            "generation complete"
        );
        Ok(report)
    }

    async fn traverse(&self, run: &mut Run<'_>, run_cancel: &CancelHandle) -> GenerateResult<()> {
        let mut wave: Vec<String> = run.roots.iter().cloned().collect();
        let mut depth = 0usize;

        while !wave.is_empty() {
            if let Some(reason) = self.cancel.reason() {
                run_cancel.cancel(reason.clone());
                return Err(GenerateError::Cancelled(reason));
            }
            debug!(depth, types = wave.len(), "expanding wave");

            let outcomes = self.build_wave(&wave, run.states, run_cancel).await?;
            let mut next = BTreeSet::new();
            for (name, outcome) in outcomes {
                let is_root = run.roots.contains(&name);
                match outcome {
                    Ok(built) => {
                        run.states.insert(name.clone(), TypeState::MetaBuilt);
                        for dep in &built.deps {
                            if !run.states.contains_key(dep) {
                                run.states.insert(dep.clone(), TypeState::Unseen);
                                next.insert(dep.clone());
                            }
                        }
                        run.states.insert(name.clone(), TypeState::DepsExpanded);
                        run.pending.insert(name, built);
                    }
                    Err(Failure::Cancelled) => {
                        let reason = self
                            .cancel
                            .reason()
                            .or_else(|| run_cancel.reason())
                            .unwrap_or_else(|| "cancelled".to_string());
                        return Err(GenerateError::Cancelled(reason));
                    }
                    Err(Failure::Extraction(source)) if is_root => {
                        return Err(GenerateError::Root { name, source });
                    }
                    Err(Failure::Build(err)) if is_root || err.is_unmappable() => {
                        return Err(GenerateError::Build(err));
                    }
                    Err(Failure::Extraction(err)) => run.skip(name, err.to_string()),
                    Err(Failure::Build(err)) => run.skip(name, err.to_string()),
                }
            }

            run.publish_ready().await?;
            wave = next.into_iter().collect();
            depth += 1;
        }

        run.flush_cycles().await
    }

    /// Build every type of a wave; outcomes sorted by name.
    async fn build_wave(
        &self,
        wave: &[String],
        states: &DashMap<String, TypeState>,
        run_cancel: &CancelHandle,
    ) -> GenerateResult<Vec<(String, Result<Built, Failure>)>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_workers.max(1)));
        let mut workers = JoinSet::new();

        for name in wave {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| GenerateError::Runtime(format!("worker pool closed: {e}")))?;
            states.insert(name.clone(), TypeState::Extracting);

            let name = name.clone();
            let extractor = self.extractor.clone();
            let builder = self.builder.clone();
            let filter = self.filter.clone();
            let cancel = self.cancel.clone();
            let run_cancel = run_cancel.clone();
            workers.spawn_blocking(move || {
                let _permit = permit;
                if cancel.is_cancelled() || run_cancel.is_cancelled() {
                    return (name, Err(Failure::Cancelled));
                }
                let outcome = build_one(&extractor, builder.as_ref(), &filter, &name);
                (name, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(wave.len());
        while let Some(joined) = workers.join_next().await {
            let outcome =
                joined.map_err(|e| GenerateError::Runtime(format!("worker task failed: {e}")))?;
            outcomes.push(outcome);
        }
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(outcomes)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("language", &self.builder.language())
            .field("filter", &self.filter)
            .field("config", &self.config)
            .finish()
    }
}

fn build_one(
    extractor: &SourceExtractor,
    builder: &dyn LanguageMetaBuilder,
    filter: &EligibilityFilter,
    name: &str,
) -> Result<Built, Failure> {
    let meta = extractor.extract(name).map_err(Failure::Extraction)?;
    let node = builder.build(&meta).map_err(Failure::Build)?;

    let source = extractor.source().as_ref();
    let mut deps = filter.eligible(&meta.dependencies, source);
    deps.extend(
        node.dependencies
            .keys()
            .filter(|dep| filter.is_eligible(dep, source))
            .cloned(),
    );
    deps.remove(name);
    Ok(Built { node, deps })
}

/// Mutable bookkeeping of one run.
struct Run<'a> {
    roots: &'a BTreeSet<String>,
    states: &'a DashMap<String, TypeState>,
    tx: mpsc::Sender<TargetClassMeta>,
    pending: BTreeMap<String, Built>,
    published: HashSet<String>,
    skipped: BTreeMap<String, String>,
}

impl Run<'_> {
    fn skip(&mut self, name: String, reason: String) {
        warn!(type_name = %name, %reason, "skipping dependency");
        self.states.insert(name.clone(), TypeState::Skipped);
        self.skipped.insert(name, reason);
    }

    fn is_settled(&self, dep: &str) -> bool {
        self.published.contains(dep) || self.skipped.contains_key(dep)
    }

    /// Publish, in name order, every pending node whose dependencies are all
    /// settled, until no more become ready.
    async fn publish_ready(&mut self) -> GenerateResult<()> {
        loop {
            let ready: Vec<String> = self
                .pending
                .iter()
                .filter(|(_, built)| built.deps.iter().all(|dep| self.is_settled(dep)))
                .map(|(name, _)| name.clone())
                .collect();
            if ready.is_empty() {
                return Ok(());
            }
            for name in ready {
                self.publish(&name).await?;
            }
        }
    }

    /// Publish what is left; only cycles can hold nodes back at this point.
    async fn flush_cycles(&mut self) -> GenerateResult<()> {
        let mut order = Vec::with_capacity(self.pending.len());
        let mut visited = HashSet::new();
        for name in self.pending.keys() {
            self.post_order(name, &mut visited, &mut order);
        }
        if !order.is_empty() {
            debug!(types = order.len(), "publishing cyclic nodes");
        }
        for name in order {
            self.publish(&name).await?;
        }
        Ok(())
    }

    fn post_order(&self, name: &str, visited: &mut HashSet<String>, order: &mut Vec<String>) {
        if !visited.insert(name.to_string()) {
            return;
        }
        let Some(built) = self.pending.get(name) else {
            return;
        };
        for dep in &built.deps {
            if self.pending.contains_key(dep) {
                self.post_order(dep, visited, order);
            }
        }
        order.push(name.to_string());
    }

    async fn publish(&mut self, name: &str) -> GenerateResult<()> {
        let Some(built) = self.pending.remove(name) else {
            return Ok(());
        };
        debug!(type_name = %name, "publishing node");
        self.tx
            .send(built.node)
            .await
            .map_err(|_| GenerateError::EmitterClosed)?;
        self.published.insert(name.to_string());
        Ok(())
    }
}

/// Render published nodes in order, marking each emitted and hashing it.
fn consume(
    mut rx: mpsc::Receiver<TargetClassMeta>,
    renderer: &dyn Renderer,
    states: &DashMap<String, TypeState>,
) -> GenerateResult<(Vec<String>, String)> {
    let mut hasher = Sha256::new();
    let mut emitted = Vec::new();

    while let Some(node) = rx.blocking_recv() {
        let name = node.qualified_name.clone();
        renderer
            .render(&node)
            .map_err(|source| GenerateError::Render {
                name: name.clone(),
                source,
            })?;
        let json = serde_json::to_vec(&node).map_err(|e| GenerateError::Render {
            name: name.clone(),
            source: e.into(),
        })?;
        hasher.update(&json);
        hasher.update(b"\n");
        states.insert(name.clone(), TypeState::Emitted);
        info!(type_name = %name, "emitted node");
        emitted.push(name);
    }

    Ok((emitted, hex::encode(hasher.finalize())))
}
