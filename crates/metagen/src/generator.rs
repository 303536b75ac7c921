//! One-stop wiring of extractor, registry, builder and orchestrator.

use metagen_core::annotations::{register_openapi3, register_swagger2};
use metagen_core::{AnnotationRegistry, EligibilityFilter, Locale, SourceExtractor, TypeSource};
use metagen_lang::{
    BuilderContext, FieldNaming, LanguageMetaBuilder, PrefixPackageMap, RouteMatchingStrategy,
    TargetClassMeta, TargetLanguage, TargetType, TypeTables, builder_for,
};
use metagen_runtime::{
    CancelHandle, GenerateError, GenerateResult, GenerationReport, Orchestrator,
    OrchestratorConfig, Renderer,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Optional annotation processor set on top of the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    /// Swagger 2 `io.swagger.annotations`
    Swagger2,
    /// OpenAPI 3 `io.swagger.v3.oas.annotations`
    Openapi3,
}

impl Pipeline {
    pub fn register(self, registry: &mut AnnotationRegistry) {
        match self {
            Pipeline::Swagger2 => register_swagger2(registry),
            Pipeline::Openapi3 => register_openapi3(registry),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Swagger2 => f.write_str("swagger2"),
            Pipeline::Openapi3 => f.write_str("openapi3"),
        }
    }
}

impl FromStr for Pipeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "swagger2" | "swagger" => Ok(Pipeline::Swagger2),
            "openapi3" | "openapi" => Ok(Pipeline::Openapi3),
            other => Err(format!("unknown annotation pipeline: {other}")),
        }
    }
}

/// Builder for a [`Generator`].
pub struct GeneratorBuilder {
    language: TargetLanguage,
    source: Arc<dyn TypeSource>,
    only_public: bool,
    locale: Locale,
    pipelines: Vec<Pipeline>,
    tables: TypeTables,
    packages: PrefixPackageMap,
    field_naming: FieldNaming,
    matching: RouteMatchingStrategy,
    filter: EligibilityFilter,
    config: OrchestratorConfig,
}

impl GeneratorBuilder {
    pub fn new(language: TargetLanguage, source: Arc<dyn TypeSource>) -> Self {
        Self {
            language,
            source,
            only_public: false,
            locale: Locale::default(),
            pipelines: Vec::new(),
            tables: TypeTables::defaults(language),
            packages: PrefixPackageMap::default(),
            field_naming: FieldNaming::default(),
            matching: RouteMatchingStrategy::new(),
            filter: EligibilityFilter::default(),
            config: OrchestratorConfig::default(),
        }
    }

    /// Restrict extraction to public members, inherited ones included.
    pub fn only_public(mut self, only_public: bool) -> Self {
        self.only_public = only_public;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        if !self.pipelines.contains(&pipeline) {
            self.pipelines.push(pipeline);
        }
        self
    }

    /// Use per-type numeric names, e.g. Dart `int` and `double`, instead of
    /// one target for the whole number family. Base types added earlier
    /// for numeric natives are replaced.
    pub fn precise_numbers(mut self, enabled: bool) -> Self {
        if enabled {
            self.tables = self.tables.with_precise_numbers();
        }
        self
    }

    pub fn with_base_type(mut self, native: impl Into<String>, target: TargetType) -> Self {
        self.tables = self.tables.with_base_type(native, target);
        self
    }

    pub fn with_custom_type(mut self, native: impl Into<String>, replacement: Vec<String>) -> Self {
        self.tables = self.tables.with_custom_type(native, replacement);
        self
    }

    pub fn with_package_prefix(
        mut self,
        prefix: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.packages = self.packages.with_prefix(prefix, replacement);
        self
    }

    pub fn with_field_naming(mut self, field_naming: FieldNaming) -> Self {
        self.field_naming = field_naming;
        self
    }

    /// Never emit methods with this name, even when routed.
    pub fn ignore_method(mut self, name: impl Into<String>) -> Self {
        self.matching = self.matching.ignore_method(name);
        self
    }

    pub fn with_filter(mut self, filter: EligibilityFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Freeze the tables and registry and wire the pipeline.
    pub fn build(self, renderer: Arc<dyn Renderer>) -> Generator {
        let extractor = Arc::new(if self.only_public {
            SourceExtractor::public_only(self.source)
        } else {
            SourceExtractor::new(self.source)
        });

        let mut registry = AnnotationRegistry::with_defaults().with_locale(self.locale);
        for pipeline in &self.pipelines {
            pipeline.register(&mut registry);
        }

        let context = BuilderContext::new(
            self.tables.into_shared(),
            extractor.clone(),
            Arc::new(registry),
        )
        .with_matching(Arc::new(self.matching))
        .with_packages(Arc::new(self.packages))
        .with_field_naming(self.field_naming);
        let builder = builder_for(context);

        let orchestrator = Orchestrator::new(extractor.clone(), builder.clone(), renderer)
            .with_filter(self.filter)
            .with_config(self.config);

        tracing::debug!(
            language = %self.language,
            pipelines = ?self.pipelines,
            "generator ready"
        );

        Generator {
            extractor,
            builder,
            orchestrator,
        }
    }
}

impl fmt::Debug for GeneratorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorBuilder")
            .field("language", &self.language)
            .field("only_public", &self.only_public)
            .field("locale", &self.locale)
            .field("pipelines", &self.pipelines)
            .field("field_naming", &self.field_naming)
            .field("config", &self.config)
            .finish()
    }
}

/// A wired pipeline for one target language.
pub struct Generator {
    extractor: Arc<SourceExtractor>,
    builder: Arc<dyn LanguageMetaBuilder>,
    orchestrator: Orchestrator,
}

impl Generator {
    pub fn language(&self) -> TargetLanguage {
        self.builder.language()
    }

    pub fn extractor(&self) -> &SourceExtractor {
        &self.extractor
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.orchestrator.cancel_handle()
    }

    /// Generate the roots and everything they depend on.
    pub async fn generate<I, S>(&self, roots: I) -> GenerateResult<GenerationReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.orchestrator.generate(roots).await
    }

    /// Build the node for one type without traversing or rendering.
    pub fn inspect(&self, name: &str) -> GenerateResult<TargetClassMeta> {
        let meta = self
            .extractor
            .extract(name)
            .map_err(|source| GenerateError::Root {
                name: name.to_string(),
                source,
            })?;
        Ok(self.builder.build(&meta)?)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("language", &self.language())
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
