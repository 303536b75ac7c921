//! Conversion of extracted classes into target nodes.
//!
//! A [`LanguageMetaBuilder`] turns one [`ClassMeta`] into a
//! [`TargetClassMeta`]. The conversion itself is shared by every language
//! and lives in the free functions of this module; a language customizes
//! the result through the `enhance_*` hooks, which run after each element
//! is converted.
//!
//! # Member selection
//!
//! | Member | Kept when |
//! |--------|-----------|
//! | declared field | the [`MatchingStrategy`] accepts it |
//! | accessor (`getX`/`isX`) | non-enum owner, no field of that name |
//! | method | not static, not abstract unless the owner is an interface, accepted by the strategy |
//! | inherited method | owner is a controller and no own method has the same name and arity |
//!
//! Methods of a controller are deduplicated by HTTP route, keeping the first
//! method declared for each (methods, path) pair.

use crate::accessors::merge_accessor_fields;
use crate::error::{BuildError, BuildResult, MemberPosition};
use crate::mapping::{TypeMappingEngine, TypeTables};
use crate::naming::{to_camel_case, to_snake_case};
use crate::routes::{RouteKey, combine_paths, dedup_routes};
use crate::strategy::{MatchingStrategy, PackageMapStrategy, PrefixPackageMap, RouteMatchingStrategy};
use crate::target::{
    AnnotationArg, HttpRoute, NodeRef, NodeShape, TargetAnnotation, TargetClassMeta,
    TargetFieldMeta, TargetLanguage, TargetMethodMeta, TargetParam, TargetTypeRef,
};
use metagen_core::annotations::{
    AnnotationFact, AnnotationRegistry, Fact, Locale, RouteFact, SIZE_UNBOUNDED, kinds,
};
use metagen_core::{ClassKind, ClassMeta, FieldMeta, MethodMeta, ParamMeta, SourceExtractor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Naming convention applied to emitted field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// Keep the native name
    #[default]
    Preserve,
    CamelCase,
    SnakeCase,
}

impl FieldNaming {
    pub fn apply(self, name: &str) -> String {
        match self {
            FieldNaming::Preserve => name.to_string(),
            FieldNaming::CamelCase => to_camel_case(name),
            FieldNaming::SnakeCase => to_snake_case(name),
        }
    }
}

/// Shared, read-only collaborators of a builder.
#[derive(Clone)]
pub struct BuilderContext {
    tables: Arc<TypeTables>,
    extractor: Arc<SourceExtractor>,
    registry: Arc<AnnotationRegistry>,
    matching: Arc<dyn MatchingStrategy>,
    packages: Arc<dyn PackageMapStrategy>,
    engine: TypeMappingEngine,
    field_naming: FieldNaming,
}

impl BuilderContext {
    /// Context with route matching, identity package paths and native field names.
    pub fn new(
        tables: Arc<TypeTables>,
        extractor: Arc<SourceExtractor>,
        registry: Arc<AnnotationRegistry>,
    ) -> Self {
        let packages: Arc<dyn PackageMapStrategy> = Arc::new(PrefixPackageMap::default());
        let engine = TypeMappingEngine::new(tables.clone(), extractor.clone(), packages.clone());
        Self {
            tables,
            extractor,
            registry,
            matching: Arc::new(RouteMatchingStrategy::new()),
            packages,
            engine,
            field_naming: FieldNaming::default(),
        }
    }

    pub fn with_matching(mut self, matching: Arc<dyn MatchingStrategy>) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_packages(mut self, packages: Arc<dyn PackageMapStrategy>) -> Self {
        self.engine =
            TypeMappingEngine::new(self.tables.clone(), self.extractor.clone(), packages.clone());
        self.packages = packages;
        self
    }

    pub fn with_field_naming(mut self, field_naming: FieldNaming) -> Self {
        self.field_naming = field_naming;
        self
    }

    pub fn language(&self) -> TargetLanguage {
        self.tables.language()
    }

    pub fn locale(&self) -> Locale {
        self.registry.locale()
    }

    pub fn engine(&self) -> &TypeMappingEngine {
        &self.engine
    }

    pub fn extractor(&self) -> &SourceExtractor {
        &self.extractor
    }

    pub fn registry(&self) -> &AnnotationRegistry {
        &self.registry
    }

    pub fn matching(&self) -> &dyn MatchingStrategy {
        self.matching.as_ref()
    }

    pub fn packages(&self) -> &dyn PackageMapStrategy {
        self.packages.as_ref()
    }

    pub fn field_naming(&self) -> FieldNaming {
        self.field_naming
    }
}

impl std::fmt::Debug for BuilderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderContext")
            .field("language", &self.language())
            .field("registry", &self.registry)
            .field("field_naming", &self.field_naming)
            .finish()
    }
}

/// Element an annotation is converted for.
#[derive(Debug, Clone, Copy)]
pub enum AnnotationOwner<'a> {
    Class(&'a ClassMeta),
    Field(&'a FieldMeta),
    Method {
        method: &'a MethodMeta,
        route: Option<&'a HttpRoute>,
    },
    Param(&'a ParamMeta),
}

/// Builds target nodes for one language.
pub trait LanguageMetaBuilder: Send + Sync {
    fn context(&self) -> &BuilderContext;

    fn language(&self) -> TargetLanguage {
        self.context().language()
    }

    fn build(&self, meta: &ClassMeta) -> BuildResult<TargetClassMeta> {
        build_node(self, meta)
    }

    fn convert_field(&self, field: &FieldMeta, owner: &ClassMeta) -> BuildResult<TargetFieldMeta> {
        convert_field(self, field, owner)
    }

    /// `None` when the method cannot be represented and was skipped.
    fn convert_method(
        &self,
        method: &MethodMeta,
        owner: &ClassMeta,
        class_route: Option<&RouteFact>,
    ) -> BuildResult<Option<TargetMethodMeta>> {
        convert_method(self, method, owner, class_route)
    }

    fn convert_annotation(
        &self,
        fact: &AnnotationFact,
        owner: AnnotationOwner<'_>,
    ) -> Option<TargetAnnotation> {
        let mut annotation = default_annotation(fact, owner)?;
        self.enhance_annotation(&mut annotation, fact, owner);
        Some(annotation)
    }

    fn enhance_field(&self, _target: &mut TargetFieldMeta, _source: &FieldMeta, _owner: &ClassMeta) {}

    fn enhance_method(
        &self,
        _target: &mut TargetMethodMeta,
        _source: &MethodMeta,
        _owner: &ClassMeta,
    ) {
    }

    fn enhance_annotation(
        &self,
        _target: &mut TargetAnnotation,
        _fact: &AnnotationFact,
        _owner: AnnotationOwner<'_>,
    ) {
    }
}

/// Convert a class into a node: members, superclass, annotations and
/// dependencies.
pub fn build_node<B>(builder: &B, meta: &ClassMeta) -> BuildResult<TargetClassMeta>
where
    B: LanguageMetaBuilder + ?Sized,
{
    let ctx = builder.context();
    debug!(type_name = %meta.name, language = %builder.language(), "building node");

    let candidates = if meta.is_enum() {
        meta.fields.clone()
    } else {
        merge_accessor_fields(&meta.fields, &meta.methods)
    };
    let mut fields = Vec::with_capacity(candidates.len());
    for field in candidates
        .iter()
        .filter(|field| ctx.matching().matches_field(field, meta))
    {
        fields.push(builder.convert_field(field, meta)?);
    }

    let class_facts = ctx.registry().facts(&meta.annotations, &meta.simple_name);
    let class_route = class_facts.iter().find_map(|f| f.fact.as_route()).cloned();
    let is_controller = meta.has_annotation(&kinds::CONTROLLER_KINDS);

    let mut methods = Vec::new();
    for method in method_candidates(ctx, meta, class_route.as_ref(), is_controller)? {
        if let Some(converted) = builder.convert_method(&method, meta, class_route.as_ref())? {
            methods.push(converted);
        }
    }

    let superclass = match &meta.superclass {
        Some(superclass) if ctx.engine().is_complex(superclass) => ctx
            .engine()
            .map_type(superclass)
            .map_err(|e| BuildError::mapping(&meta.name, MemberPosition::Superclass, e))?,
        _ => Vec::new(),
    };

    let shape = if meta.is_enum() {
        NodeShape::Enum
    } else if is_controller || !methods.is_empty() {
        NodeShape::Service
    } else {
        NodeShape::Data
    };

    let mut node = TargetClassMeta {
        language: builder.language(),
        name: ctx.packages().class_name(&meta.simple_name),
        qualified_name: meta.name.clone(),
        package_path: ctx.packages().package_path(&meta.name),
        kind: meta.kind,
        shape,
        is_abstract: meta.is_abstract,
        type_params: meta.type_params.clone(),
        superclass,
        fields,
        methods,
        comments: comments(&class_facts),
        tag: class_facts
            .iter()
            .find_map(|f| f.fact.label())
            .map(str::to_string),
        annotations: class_facts
            .iter()
            .filter_map(|f| builder.convert_annotation(f, AnnotationOwner::Class(meta)))
            .collect(),
        dependencies: BTreeMap::new(),
    };
    node.dependencies = collect_dependencies(&node);
    Ok(node)
}

/// Convert one field. The field is already selected by the strategy.
pub fn convert_field<B>(builder: &B, field: &FieldMeta, owner: &ClassMeta) -> BuildResult<TargetFieldMeta>
where
    B: LanguageMetaBuilder + ?Sized,
{
    let ctx = builder.context();
    let types = ctx.engine().map_types(&field.types).map_err(|e| {
        BuildError::mapping(&owner.name, MemberPosition::Field(field.name.clone()), e)
    })?;
    let facts = ctx.registry().facts(&field.annotations, &field.name);

    let mut target = TargetFieldMeta {
        name: ctx.field_naming().apply(&field.name),
        source_name: field.name.clone(),
        types,
        type_variables: field.type_variables.clone(),
        is_static: field.is_static,
        is_enum_constant: owner.is_enum_constant(field),
        required: facts.iter().any(|f| f.fact.marks_required()),
        synthetic: field.synthetic,
        comments: comments(&facts),
        annotations: facts
            .iter()
            .filter_map(|f| builder.convert_annotation(f, AnnotationOwner::Field(field)))
            .collect(),
    };
    builder.enhance_field(&mut target, field, owner);
    Ok(target)
}

/// Convert one method, or skip it when its parameter names are unknown.
pub fn convert_method<B>(
    builder: &B,
    method: &MethodMeta,
    owner: &ClassMeta,
    class_route: Option<&RouteFact>,
) -> BuildResult<Option<TargetMethodMeta>>
where
    B: LanguageMetaBuilder + ?Sized,
{
    let ctx = builder.context();
    let Some(params) = &method.params else {
        warn!(
            type_name = %owner.name,
            method = %method.name,
            "skipping method without parameter names"
        );
        return Ok(None);
    };

    let return_types = ctx.engine().map_types(&method.return_types).map_err(|e| {
        BuildError::mapping(&owner.name, MemberPosition::Return(method.name.clone()), e)
    })?;

    let mut target_params = Vec::with_capacity(params.len());
    for param in params {
        let types = ctx.engine().map_types(&param.types).map_err(|e| {
            let position = MemberPosition::Param {
                method: method.name.clone(),
                param: param.name.clone(),
            };
            BuildError::mapping(&owner.name, position, e)
        })?;
        let facts = ctx.registry().facts(&param.annotations, &param.name);
        target_params.push(TargetParam {
            name: param.name.clone(),
            types,
            required: facts.iter().any(|f| f.fact.marks_required()),
            request_body: facts.iter().any(|f| f.fact.is_request_body()),
            comments: comments(&facts),
            annotations: facts
                .iter()
                .filter_map(|f| builder.convert_annotation(f, AnnotationOwner::Param(param)))
                .collect(),
        });
    }

    let facts = ctx.registry().facts(&method.annotations, &method.name);
    let route = facts
        .iter()
        .find_map(|f| f.fact.as_route())
        .map(|route| http_route(route, class_route));
    let annotations = facts
        .iter()
        .filter_map(|f| {
            let owner = AnnotationOwner::Method {
                method,
                route: route.as_ref(),
            };
            builder.convert_annotation(f, owner)
        })
        .collect();

    let mut target = TargetMethodMeta {
        name: method.name.clone(),
        declared_by: method.owner.clone(),
        return_types,
        params: target_params,
        route,
        comments: comments(&facts),
        annotations,
    };
    builder.enhance_method(&mut target, method, owner);
    Ok(Some(target))
}

/// Language-neutral annotation for a fact. Facts that only carry
/// documentation produce no annotation.
pub fn default_annotation(fact: &AnnotationFact, owner: AnnotationOwner<'_>) -> Option<TargetAnnotation> {
    let annotation = TargetAnnotation::new(fact.simple_kind());
    let annotation = match &fact.fact {
        Fact::Size { min, max, message } => {
            let mut annotation = annotation.with("min", AnnotationArg::Int(*min));
            if *max != SIZE_UNBOUNDED {
                annotation = annotation.with("max", AnnotationArg::Int(*max));
            }
            with_message(annotation, message)
        }
        Fact::NotNull { message } => with_message(annotation, message),
        Fact::Pattern { regexp, message } => with_message(
            annotation.with("regexp", AnnotationArg::Str(regexp.clone())),
            message,
        ),
        Fact::Route(route) => {
            let path = match owner {
                AnnotationOwner::Method {
                    route: Some(http), ..
                } => http.path.clone(),
                _ => route.first_path().map(str::to_string),
            };
            let mut annotation = annotation;
            if let Some(path) = path {
                annotation = annotation.with("value", AnnotationArg::Str(path));
            }
            if !route.methods.is_empty() {
                let methods = route.methods.iter().map(|m| m.as_str().to_string()).collect();
                annotation = annotation.with("method", AnnotationArg::List(methods));
            }
            if !route.consumes.is_empty() {
                annotation = annotation.with("consumes", AnnotationArg::List(route.consumes.clone()));
            }
            if !route.produces.is_empty() {
                annotation = annotation.with("produces", AnnotationArg::List(route.produces.clone()));
            }
            annotation
        }
        Fact::RequestBody { required, .. } => {
            annotation.with("required", AnnotationArg::Bool(*required))
        }
        _ => return None,
    };
    Some(annotation)
}

fn with_message(annotation: TargetAnnotation, message: &Option<String>) -> TargetAnnotation {
    match message {
        Some(message) => annotation.with("message", AnnotationArg::Str(message.clone())),
        None => annotation,
    }
}

fn comments(facts: &[AnnotationFact]) -> Vec<String> {
    facts.iter().filter_map(|f| f.comment.clone()).collect()
}

fn http_route(route: &RouteFact, class_route: Option<&RouteFact>) -> HttpRoute {
    let prefix = class_route.and_then(RouteFact::first_path);
    let inherit = |own: &[String], class: Option<&Vec<String>>| {
        if own.is_empty() {
            class.cloned().unwrap_or_default()
        } else {
            own.to_vec()
        }
    };
    HttpRoute {
        methods: route.effective_methods(),
        path: combine_paths(prefix, route.first_path()),
        consumes: inherit(&route.consumes, class_route.map(|c| &c.consumes)),
        produces: inherit(&route.produces, class_route.map(|c| &c.produces)),
    }
}

/// Whether a method can become a node method at all: not static, not
/// abstract outside interfaces, and accepted by the matching strategy.
fn is_candidate(ctx: &BuilderContext, meta: &ClassMeta, method: &MethodMeta) -> bool {
    !method.is_static
        && !(method.is_abstract && meta.kind != ClassKind::Interface)
        && ctx.matching().matches_method(method, meta)
}

/// Own methods, then for controllers the inherited methods they do not
/// override. Only candidates take part in route deduplication, so the
/// first surviving method claims its route.
fn method_candidates(
    ctx: &BuilderContext,
    meta: &ClassMeta,
    class_route: Option<&RouteFact>,
    is_controller: bool,
) -> BuildResult<Vec<MethodMeta>> {
    if !is_controller {
        return Ok(meta
            .methods
            .iter()
            .filter(|method| is_candidate(ctx, meta, method))
            .cloned()
            .collect());
    }
    let mut methods = meta.methods.clone();
    let inherited = ctx
        .extractor()
        .inherited_methods(&meta.name)
        .map_err(|source| BuildError::Inherited {
            owner: meta.name.clone(),
            source,
        })?;
    for method in inherited {
        let overridden = methods
            .iter()
            .any(|own| own.name == method.name && own.arity() == method.arity());
        if !overridden {
            methods.push(method);
        }
    }

    methods.retain(|method| is_candidate(ctx, meta, method));
    let prefix = class_route.and_then(RouteFact::first_path);
    Ok(dedup_routes(methods, |method| route_key(ctx, method, prefix)))
}

/// Route identity of a controller method. With neither a class prefix nor
/// a method pattern the path is `""`, so pathless handlers of the same HTTP
/// method share one key and only the first is kept.
fn route_key(ctx: &BuilderContext, method: &MethodMeta, prefix: Option<&str>) -> Option<RouteKey> {
    let route = method
        .annotations
        .iter()
        .filter(|a| kinds::is_route(&a.kind))
        .find_map(|a| ctx.registry().process(a))?;
    let route = route.as_route()?;
    let path = combine_paths(prefix, route.first_path()).unwrap_or_default();
    Some(RouteKey::new(route.effective_methods(), path))
}

fn collect_dependencies(node: &TargetClassMeta) -> BTreeMap<String, NodeRef> {
    node.type_lists()
        .flatten()
        .filter_map(TargetTypeRef::as_node)
        .filter(|dep| dep.qualified_name != node.qualified_name)
        .map(|dep| (dep.qualified_name.clone(), dep.clone()))
        .collect()
}
