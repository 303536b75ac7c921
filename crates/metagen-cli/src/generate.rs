//! generate and inspect commands

use crate::config::Config;
use crate::render::JsonFileRenderer;
use crate::roots;
use anyhow::{Context, Result};
use metagen::{AsyncRuntime, CollectingRenderer, TargetLanguage};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line values that take precedence over metagen.toml.
#[derive(Debug, Default)]
pub struct Overrides {
    pub lang: Option<String>,
    pub model: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub roots: Vec<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(lang) = self.lang {
            config.generator.language = lang
                .parse::<TargetLanguage>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        if let Some(model) = self.model {
            config.generator.model = model;
        }
        if let Some(output) = self.output {
            config.generator.output = output;
        }
        if !self.roots.is_empty() {
            config.roots.types = self.roots;
            config.roots.include.clear();
        }
        Ok(())
    }
}

/// Generate command implementation
pub fn run(config_path: Option<PathBuf>, overrides: Overrides) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    overrides.apply(&mut config)?;
    config.validate()?;

    let model = config.load_model()?;
    let roots = roots::select(&model, &config.roots)?;
    if roots.is_empty() {
        anyhow::bail!("No root types matched the configured patterns");
    }

    let renderer = Arc::new(JsonFileRenderer::new(&config.generator.output));
    let generator = config.generator_builder(model).build(renderer.clone());

    println!(
        "Generating {} nodes from {} roots",
        config.generator.language,
        roots.len()
    );

    let runtime = AsyncRuntime::with_defaults().context("Failed to start runtime")?;
    let report = runtime
        .generate(generator.orchestrator(), roots)
        .context("Generation failed")?;

    for skipped in &report.skipped {
        println!("! Skipped {}: {}", skipped.name, skipped.reason);
    }
    println!("✓ Emitted: {}", report.emitted.len());
    println!(
        "✓ Files: {} written, {} unchanged in {:?}",
        renderer.written(),
        renderer.unchanged(),
        renderer.output()
    );
    println!("✓ Fingerprint: {}", report.fingerprint);

    Ok(())
}

/// Inspect command implementation
pub fn inspect(name: &str, config_path: Option<PathBuf>, overrides: Overrides) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    overrides.apply(&mut config)?;

    let model = config.load_model()?;
    let generator = config
        .generator_builder(model)
        .build(Arc::new(CollectingRenderer::new()));
    let node = generator
        .inspect(name)
        .with_context(|| format!("Failed to build node for {}", name))?;

    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}
