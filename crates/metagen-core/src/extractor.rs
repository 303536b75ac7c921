//! Source extraction with a process-wide, single-flight cache.
//!
//! [`SourceExtractor::extract`] produces at most one [`ClassMeta`] per
//! qualified name for the extractor's lifetime. Concurrent requests for the
//! same name block on one in-flight build; requests for different names run
//! in parallel. A failed build is not cached, so the next request retries.
//!
//! # Generic resolution
//!
//! Inherited members are viewed through the bindings of the ancestor chain.
//! Given `class OrderController extends BaseController<String>` and
//! `BaseController<T> { T find(T id) }`, the inherited `find` of
//! `OrderController` resolves to `String find(String id)`.
//!
//! Unbound type variables are dropped from generic argument lists and erased
//! at the top level of a member type: an unbound `T` field becomes
//! `java.lang.Object`, an unbound `T[]` becomes `java.lang.Object[]`.

use crate::builtins::OBJECT;
use crate::error::{ExtractionError, ExtractionResult};
use crate::meta::{ClassKind, ClassMeta, FieldMeta, MethodMeta, ParamMeta, Visibility};
use crate::resolver;
use crate::signature::TypeExpr;
use crate::source::{FieldDecl, MethodDecl, TypeDecl, TypeSource};
use crate::type_ref::TypeRef;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Synthetic backing array the platform adds to every enum.
const ENUM_VALUES_FIELD: &str = "$VALUES";

/// Single-flight, cached extractor of class metadata.
pub struct SourceExtractor {
    source: Arc<dyn TypeSource>,
    only_public: bool,
    cache: DashMap<String, Arc<OnceCell<Arc<ClassMeta>>>>,
}

impl SourceExtractor {
    /// Extractor over declared members of every visibility.
    pub fn new(source: Arc<dyn TypeSource>) -> Self {
        Self {
            source,
            only_public: false,
            cache: DashMap::new(),
        }
    }

    /// Extractor over public members only, including inherited public members.
    pub fn public_only(source: Arc<dyn TypeSource>) -> Self {
        Self {
            only_public: true,
            ..Self::new(source)
        }
    }

    pub fn source(&self) -> &Arc<dyn TypeSource> {
        &self.source
    }

    pub fn is_public_only(&self) -> bool {
        self.only_public
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.source.is_declared(name)
    }

    /// Already-built metadata, without triggering a build.
    pub fn cached(&self, name: &str) -> Option<Arc<ClassMeta>> {
        self.cache
            .get(name)
            .and_then(|cell| cell.value().get().cloned())
    }

    /// Number of successfully built entries.
    pub fn cache_len(&self) -> usize {
        self.cache
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Extract metadata for a qualified name.
    ///
    /// Returns the identical `Arc` for every call with the same name once a
    /// build succeeded.
    pub fn extract(&self, name: &str) -> ExtractionResult<Arc<ClassMeta>> {
        let cell = self
            .cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        cell.get_or_try_init(|| self.build(name)).cloned()
    }

    /// Public methods of every ancestor, viewed through this type's bindings.
    ///
    /// Ancestors that have no declaration are skipped.
    pub fn inherited_methods(&self, name: &str) -> ExtractionResult<Vec<MethodMeta>> {
        let decl = self.declaration(name)?;
        let mut methods = Vec::new();
        for level in self.ancestors(&decl)? {
            let Some(parent) = &level.decl else {
                continue;
            };
            let scope = Scope::new(parent, level.bindings.clone());
            for method in parent.methods.iter().filter(|m| m.visibility == Visibility::Public) {
                methods.push(scope.method_meta(method)?);
            }
        }
        Ok(methods)
    }

    fn declaration(&self, name: &str) -> ExtractionResult<Arc<TypeDecl>> {
        self.source
            .declaration(name)
            .ok_or_else(|| ExtractionError::UnknownType(name.to_string()))
    }

    fn build(&self, name: &str) -> ExtractionResult<Arc<ClassMeta>> {
        let decl = self.declaration(name)?;
        debug!(type_name = name, "extracting class metadata");

        let ancestors = self.ancestors(&decl)?;
        let scope = Scope::new(&decl, HashMap::new());

        let superclass = match decl.superclass.as_deref() {
            Some(signature) => {
                let expr = scope.parse("<superclass>", signature)?;
                scope.resolve(&expr, &[]).filter(|t| t.name != OBJECT)
            }
            None => None,
        };
        let mut interfaces = Vec::with_capacity(decl.interfaces.len());
        for signature in &decl.interfaces {
            let expr = scope.parse("<interface>", signature)?;
            interfaces.extend(scope.resolve(&expr, &[]));
        }

        let mut fields = Vec::new();
        for field in decl.fields.iter().filter(|f| self.includes_field(&decl, f)) {
            fields.push(scope.field_meta(field)?);
        }
        let mut methods = Vec::new();
        for method in decl.methods.iter().filter(|m| self.includes_visibility(m.visibility)) {
            methods.push(scope.method_meta(method)?);
        }

        if self.only_public {
            for level in &ancestors {
                let Some(parent) = &level.decl else {
                    continue;
                };
                let parent_scope = Scope::new(parent, level.bindings.clone());
                for field in parent.fields.iter().filter(|f| self.includes_field(parent, f)) {
                    if fields.iter().all(|own: &FieldMeta| own.name != field.name) {
                        fields.push(parent_scope.field_meta(field)?);
                    }
                }
                for method in parent.methods.iter().filter(|m| m.visibility == Visibility::Public) {
                    let shadowed = methods.iter().any(|own: &MethodMeta| {
                        own.name == method.name && own.arity() == method.params.len()
                    });
                    if !shadowed {
                        methods.push(parent_scope.method_meta(method)?);
                    }
                }
            }
        }

        let mut meta = ClassMeta {
            kind: decl.kind,
            name: decl.name.clone(),
            simple_name: decl.simple_name().to_string(),
            visibility: decl.visibility,
            is_abstract: decl.is_abstract,
            is_static: decl.is_static,
            is_final: decl.is_final,
            type_params: decl.type_params.clone(),
            supertypes: ancestors.into_iter().map(|level| level.ty).collect(),
            superclass,
            interfaces,
            fields,
            methods,
            annotations: decl.annotations.clone(),
            library: decl.library.clone(),
            dependencies: Default::default(),
        };
        meta.dependencies = resolver::resolve(&meta);
        trace!(
            type_name = name,
            fields = meta.fields.len(),
            methods = meta.methods.len(),
            dependencies = meta.dependencies.len(),
            "class metadata built"
        );
        Ok(Arc::new(meta))
    }

    fn includes_visibility(&self, visibility: Visibility) -> bool {
        !self.only_public || visibility == Visibility::Public
    }

    fn includes_field(&self, owner: &TypeDecl, field: &FieldDecl) -> bool {
        if owner.kind == ClassKind::Enum && field.name == ENUM_VALUES_FIELD {
            return false;
        }
        self.includes_visibility(field.visibility)
    }

    /// Walk the superclass chain, resolving each level's arguments through
    /// the bindings of the level below it.
    fn ancestors(&self, decl: &Arc<TypeDecl>) -> ExtractionResult<Vec<Ancestor>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([decl.name.clone()]);
        let mut current = Arc::clone(decl);
        let mut bindings = HashMap::new();

        while let Some(signature) = current.superclass.clone() {
            let scope = Scope::new(&current, bindings);
            let TypeExpr::Named { name, args } = scope.parse("<superclass>", &signature)? else {
                break;
            };
            if name == OBJECT || !seen.insert(name.clone()) {
                break;
            }
            let bound: Vec<Option<TypeRef>> = args.iter().map(|a| scope.resolve(a, &[])).collect();
            let parent = self.source.declaration(&name);
            let ty = TypeRef::new(name, bound.iter().flatten().cloned().collect());

            let Some(parent) = parent else {
                chain.push(Ancestor {
                    ty,
                    decl: None,
                    bindings: HashMap::new(),
                });
                break;
            };
            bindings = parent
                .type_params
                .iter()
                .cloned()
                .zip(bound)
                .filter_map(|(param, bound)| bound.map(|b| (param, b)))
                .collect();
            chain.push(Ancestor {
                ty,
                decl: Some(Arc::clone(&parent)),
                bindings: bindings.clone(),
            });
            current = parent;
        }
        Ok(chain)
    }
}

impl std::fmt::Debug for SourceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceExtractor")
            .field("only_public", &self.only_public)
            .field("cached", &self.cache.len())
            .finish()
    }
}

struct Ancestor {
    ty: TypeRef,
    decl: Option<Arc<TypeDecl>>,
    /// Type parameter of `decl` to its concrete binding
    bindings: HashMap<String, TypeRef>,
}

/// Type-variable scope of one declaring class.
struct Scope<'a> {
    owner: &'a TypeDecl,
    bindings: HashMap<String, TypeRef>,
}

impl<'a> Scope<'a> {
    fn new(owner: &'a TypeDecl, bindings: HashMap<String, TypeRef>) -> Self {
        Self { owner, bindings }
    }

    fn parse(&self, member: &str, signature: &str) -> ExtractionResult<TypeExpr> {
        TypeExpr::parse(signature).map_err(|err| ExtractionError::MalformedSignature {
            owner: self.owner.name.clone(),
            member: member.to_string(),
            signature: signature.to_string(),
            reason: err.to_string(),
        })
    }

    fn is_class_variable(&self, name: &str, method_params: &[String]) -> bool {
        !method_params.iter().any(|p| p == name) && self.owner.type_params.iter().any(|p| p == name)
    }

    fn is_variable(&self, name: &str, method_params: &[String]) -> bool {
        method_params.iter().any(|p| p == name) || self.is_class_variable(name, method_params)
    }

    /// Resolve an expression, `None` when it is an unbound variable.
    fn resolve(&self, expr: &TypeExpr, method_params: &[String]) -> Option<TypeRef> {
        match expr {
            TypeExpr::Named { name, args } if args.is_empty() && self.is_variable(name, method_params) => {
                if self.is_class_variable(name, method_params) {
                    self.bindings.get(name).cloned()
                } else {
                    None
                }
            }
            TypeExpr::Named { name, args } => Some(TypeRef::new(
                name.clone(),
                args.iter()
                    .filter_map(|arg| self.resolve(arg, method_params))
                    .collect(),
            )),
            TypeExpr::Array(component) => self
                .resolve(component, method_params)
                .map(TypeRef::array_of),
            TypeExpr::Wildcard(bound) => bound
                .as_deref()
                .and_then(|b| self.resolve(b, method_params)),
        }
    }

    /// Resolve a member's top-level type, erasing unbound variables.
    fn resolve_member(&self, expr: &TypeExpr, method_params: &[String]) -> TypeRef {
        self.resolve(expr, method_params)
            .unwrap_or_else(|| erase(expr))
    }

    fn field_meta(&self, field: &FieldDecl) -> ExtractionResult<FieldMeta> {
        let expr = self.parse(&field.name, &field.ty)?;
        let resolved = self.resolve_member(&expr, &[]);
        let type_variables = expr
            .bare_names()
            .into_iter()
            .filter(|name| self.is_class_variable(name, &[]) && !self.bindings.contains_key(*name))
            .map(str::to_string)
            .collect();

        Ok(FieldMeta {
            name: field.name.clone(),
            visibility: field.visibility,
            is_static: field.is_static,
            is_final: field.is_final,
            is_transient: field.is_transient,
            is_volatile: field.is_volatile,
            types: resolved.flatten(),
            type_variables,
            annotations: field.annotations.clone(),
            synthetic: false,
        })
    }

    fn method_meta(&self, method: &MethodDecl) -> ExtractionResult<MethodMeta> {
        let method_params = &method.type_params;
        let returns = self.parse(&method.name, &method.returns)?;
        let return_types = self.resolve_member(&returns, method_params).flatten();

        let mut param_types = Vec::with_capacity(method.params.len());
        for (index, param) in method.params.iter().enumerate() {
            let member = match &param.name {
                Some(name) => format!("{}({name})", method.name),
                None => format!("{}(#{index})", method.name),
            };
            let expr = self.parse(&member, &param.ty)?;
            param_types.push(self.resolve_member(&expr, method_params).flatten());
        }

        let params = method
            .params
            .iter()
            .zip(&param_types)
            .map(|(param, types)| {
                param.name.as_ref().map(|name| ParamMeta {
                    name: name.clone(),
                    types: types.clone(),
                    annotations: param.annotations.clone(),
                })
            })
            .collect::<Option<Vec<_>>>();

        Ok(MethodMeta {
            name: method.name.clone(),
            visibility: method.visibility,
            is_static: method.is_static,
            is_abstract: method.is_abstract,
            is_synchronized: method.is_synchronized,
            is_native: method.is_native,
            owner: self.owner.name.clone(),
            params,
            param_types,
            return_types,
            annotations: method.annotations.clone(),
        })
    }
}

fn erase(expr: &TypeExpr) -> TypeRef {
    match expr {
        TypeExpr::Array(component) => TypeRef::array_of(erase(component)),
        _ => TypeRef::raw(OBJECT),
    }
}

#[cfg(test)]
#[path = "extractor/extractor_tests.rs"]
mod extractor_tests;
