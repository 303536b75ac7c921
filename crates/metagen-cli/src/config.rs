//! metagen.toml parsing and validation

use anyhow::{Context, Result};
use metagen::{
    EligibilityFilter, FieldNaming, GeneratorBuilder, Locale, OrchestratorConfig, Pipeline,
    TargetLanguage, TargetType, TypeModel,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// metagen.toml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub roots: RootsSection,

    #[serde(default)]
    pub filter: FilterSection,

    /// Native package prefix to output directory
    #[serde(default)]
    pub packages: BTreeMap<String, String>,

    /// Native type to target type name, overriding the built-in tables
    #[serde(default)]
    pub base_types: BTreeMap<String, String>,

    /// Native type to the native types it is replaced by before mapping
    #[serde(default)]
    pub custom_types: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_language")]
    pub language: TargetLanguage,

    /// JSON type model to read
    #[serde(default = "default_model")]
    pub model: PathBuf,

    /// Directory rendered nodes are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub field_naming: FieldNaming,

    #[serde(default)]
    pub only_public: bool,

    /// Per-type numeric names instead of one number type
    #[serde(default)]
    pub precise_numbers: bool,

    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub pipelines: Vec<Pipeline>,

    #[serde(default)]
    pub ignored_methods: Vec<String>,

    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default)]
    pub queue_capacity: Option<usize>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            language: default_language(),
            model: default_model(),
            output: default_output(),
            field_naming: FieldNaming::default(),
            only_public: false,
            precise_numbers: false,
            locale: Locale::default(),
            pipelines: Vec::new(),
            ignored_methods: Vec::new(),
            workers: None,
            queue_capacity: None,
        }
    }
}

fn default_language() -> TargetLanguage {
    TargetLanguage::Typescript
}

fn default_model() -> PathBuf {
    PathBuf::from("model.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

/// Which declared types start a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootsSection {
    /// Qualified names always used as roots
    #[serde(default)]
    pub types: Vec<String>,

    /// Name patterns; `pkg.*` matches one package, `pkg.**` its subpackages too
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Annotation kinds a pattern-matched type must carry; empty means the
    /// controller annotations
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSection {
    #[serde(default)]
    pub ignored_libraries: Vec<String>,

    /// Package prefixes never traversed, on top of the framework packages
    #[serde(default)]
    pub ignored_packages: Vec<String>,

    /// Replaces the default service annotations when set
    #[serde(default)]
    pub service_annotations: Option<Vec<String>>,
}

impl Config {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse config from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the file if given, `metagen.toml` if present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new("metagen.toml").exists() => Self::from_file("metagen.toml"),
            None => Ok(Self::default()),
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.generator.workers == Some(0) {
            anyhow::bail!("generator.workers must be at least 1");
        }
        if self.generator.queue_capacity == Some(0) {
            anyhow::bail!("generator.queue_capacity must be at least 1");
        }
        if self.roots.types.is_empty() && self.roots.include.is_empty() {
            anyhow::bail!("No roots configured: set roots.types or roots.include");
        }
        for pattern in self.roots.include.iter().chain(&self.roots.exclude) {
            if pattern.trim().is_empty() {
                anyhow::bail!("Root patterns cannot be empty");
            }
        }
        for (prefix, dir) in &self.packages {
            if prefix.is_empty() {
                anyhow::bail!("Package prefix cannot be empty (mapped to '{}')", dir);
            }
        }
        for (native, target) in &self.base_types {
            if target.is_empty() {
                anyhow::bail!("Base type for '{}' cannot be empty", native);
            }
        }
        for (native, replacement) in &self.custom_types {
            if replacement.is_empty() {
                anyhow::bail!("Custom type '{}' needs at least one replacement", native);
            }
        }
        Ok(())
    }

    /// Read the configured type model.
    pub fn load_model(&self) -> Result<TypeModel> {
        TypeModel::from_file(&self.generator.model)
            .with_context(|| format!("Failed to load type model: {:?}", self.generator.model))
    }

    pub fn eligibility_filter(&self) -> EligibilityFilter {
        let mut filter = EligibilityFilter::default();
        for library in &self.filter.ignored_libraries {
            filter = filter.with_ignored_library(library.clone());
        }
        for prefix in &self.filter.ignored_packages {
            filter = filter.with_ignored_package(prefix.clone());
        }
        if let Some(kinds) = &self.filter.service_annotations {
            filter.service_annotations = kinds.clone();
        }
        filter
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::default();
        if let Some(workers) = self.generator.workers {
            config = config.with_max_workers(workers);
        }
        if let Some(capacity) = self.generator.queue_capacity {
            config = config.with_queue_capacity(capacity);
        }
        config
    }

    /// Generator builder over a loaded model with every section applied.
    pub fn generator_builder(&self, model: TypeModel) -> GeneratorBuilder {
        let generator = &self.generator;
        let mut builder = GeneratorBuilder::new(generator.language, Arc::new(model))
            .only_public(generator.only_public)
            .precise_numbers(generator.precise_numbers)
            .with_locale(generator.locale)
            .with_field_naming(generator.field_naming)
            .with_filter(self.eligibility_filter())
            .with_config(self.orchestrator_config());

        for pipeline in &generator.pipelines {
            builder = builder.with_pipeline(*pipeline);
        }
        for method in &generator.ignored_methods {
            builder = builder.ignore_method(method.clone());
        }
        for (prefix, dir) in &self.packages {
            builder = builder.with_package_prefix(prefix.clone(), dir.clone());
        }
        for (native, target) in &self.base_types {
            builder = builder.with_base_type(native.clone(), TargetType::named(target.clone()));
        }
        for (native, replacement) in &self.custom_types {
            builder = builder.with_custom_type(native.clone(), replacement.clone());
        }
        builder
    }
}

/// Check command implementation
pub fn check(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    config.validate()?;

    println!("Checking model: {:?}", config.generator.model);
    let model = config.load_model()?;
    let roots = crate::roots::select(&model, &config.roots)?;

    println!("✓ Language: {}", config.generator.language);
    println!("✓ Declared types: {}", model.len());
    println!("✓ Roots: {}", roots.len());
    for root in &roots {
        println!("  - {}", root);
    }
    println!("\nConfig is valid!");

    Ok(())
}
