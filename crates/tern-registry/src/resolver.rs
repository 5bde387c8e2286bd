//! The external descriptor resolver.
//!
//! [`DescriptorResolver`] turns [`RawClass`] descriptions into class
//! descriptors exactly once per qualified name. A class is built in a fixed
//! order: reserve the slot with a skeleton, resolve type parameters, resolve
//! supertypes, attach the lazy member scope, resolve constructors, mark the
//! slot ready. Any lookup of the same class while it is being built (a
//! supertype or constructor parameter mentioning the class itself) gets the
//! skeleton back instead of starting a second build.

use rustc_hash::FxHashMap;
use tern_core::{
    ClassDescriptor, ConstructorDescriptor, DataType, DeclHash, Descriptor, DescriptorId,
    DescriptorTable, FunctionDescriptor, NamespaceSource, PackageDescriptor, QualifiedName,
    Qualifier, RegistryError, TypeChecker, TypeParameterDescriptor, ValueParameter,
    VariableDescriptor,
};
use tracing::{debug, trace};

use crate::cache::{DescriptorCache, SlotState};
use crate::external::{
    ExternalDeclarationProvider, RawClass, RawParameter, RawType, RawTypeParameter,
};
use crate::member_scope::LazyMemberScope;

type Result<T> = std::result::Result<T, RegistryError>;

/// Counters describing the work the resolver has done.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub classes_built: usize,
    pub supertype_resolutions: usize,
    pub type_parameters_built: usize,
    pub namespaces_built: usize,
    pub members_built: usize,
    /// Lookups that found their class still being built.
    pub reentrant_hits: usize,
}

/// Builds and memoizes descriptors for externally described declarations.
///
/// Owns the session's [`DescriptorTable`]; every descriptor it builds lives
/// there for the rest of the session.
pub struct DescriptorResolver<'p> {
    provider: &'p dyn ExternalDeclarationProvider,
    type_checker: &'p dyn TypeChecker,
    table: DescriptorTable,

    classes: DescriptorCache<QualifiedName>,
    type_parameters: DescriptorCache<DeclHash>,
    /// Type parameters of classes being built, not yet resolved.
    pending_type_parameters: FxHashMap<DeclHash, (u32, RawTypeParameter)>,
    namespaces: FxHashMap<QualifiedName, DescriptorId>,
    /// Source declaration → descriptor, for later external lookup.
    declarations: FxHashMap<DeclHash, DescriptorId>,
    /// Member scopes by the class or namespace descriptor they belong to.
    member_scopes: FxHashMap<DescriptorId, LazyMemberScope>,

    stats: CacheStats,
}

impl<'p> DescriptorResolver<'p> {
    pub fn new(provider: &'p dyn ExternalDeclarationProvider, type_checker: &'p dyn TypeChecker) -> Self {
        Self::with_table(provider, type_checker, DescriptorTable::new())
    }

    /// Create a resolver that adds to an existing table.
    pub fn with_table(
        provider: &'p dyn ExternalDeclarationProvider,
        type_checker: &'p dyn TypeChecker,
        table: DescriptorTable,
    ) -> Self {
        Self {
            provider,
            type_checker,
            table,
            classes: DescriptorCache::new(),
            type_parameters: DescriptorCache::new(),
            pending_type_parameters: FxHashMap::default(),
            namespaces: FxHashMap::default(),
            declarations: FxHashMap::default(),
            member_scopes: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DescriptorTable {
        &mut self.table
    }

    pub fn into_table(self) -> DescriptorTable {
        self.table
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Cache state of the class `name`.
    pub fn class_state(&self, name: &QualifiedName) -> SlotState {
        self.classes.state(name)
    }

    /// The fully built class `name`, without building anything.
    pub fn lookup_class(&self, name: &QualifiedName) -> Option<DescriptorId> {
        self.classes.ready(name)
    }

    /// The descriptor built for a source declaration.
    pub fn declaration(&self, hash: DeclHash) -> Option<DescriptorId> {
        self.declarations.get(&hash).copied()
    }

    // ========================================================================
    // Classes
    // ========================================================================

    /// Resolve the class `name`, building it on first use.
    ///
    /// Returns `None` when the provider does not know the class.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_class(&mut self, name: &QualifiedName) -> Result<Option<DescriptorId>> {
        if let Some(id) = self.cached_class(name) {
            return Ok(Some(id));
        }
        match self.provider.find_class(name) {
            Some(raw) => self.build_class(raw).map(Some),
            None => {
                trace!(key = %name, "no external class");
                Ok(None)
            }
        }
    }

    /// Resolve a class from a description already at hand.
    pub fn resolve_raw_class(&mut self, raw: RawClass) -> Result<DescriptorId> {
        match self.cached_class(&raw.name) {
            Some(id) => Ok(id),
            None => self.build_class(raw),
        }
    }

    fn cached_class(&mut self, name: &QualifiedName) -> Option<DescriptorId> {
        match self.classes.state(name) {
            SlotState::Ready(id) => {
                trace!(key = %name, %id, "class cache hit");
                Some(id)
            }
            SlotState::InProgress(id) => {
                self.stats.reentrant_hits += 1;
                debug!(key = %name, %id, "re-entrant lookup sees skeleton");
                Some(id)
            }
            SlotState::Uninitialized => None,
        }
    }

    fn build_class(&mut self, raw: RawClass) -> Result<DescriptorId> {
        let name = raw.name.clone();
        let class_hash = DeclHash::from_class(&name);

        // The skeleton is visible to re-entrant lookups from here on.
        let skeleton = ClassDescriptor::skeleton(
            name.clone(),
            raw.modifiers.class_kind(),
            raw.modifiers.modality(),
        );
        let id = self.table.alloc(Descriptor::Class(skeleton));
        self.classes.reserve(name.clone(), id)?;
        debug!(key = %name, %id, "reserved class slot");

        if let Err(err) = self.build_class_body(&raw, id, class_hash) {
            self.abandon_class(&raw, id, class_hash);
            debug!(key = %name, %id, error = %err, "class build failed, slot released");
            return Err(err);
        }

        self.classes.mark_ready(&name)?;
        self.declarations.insert(class_hash, id);
        self.stats.classes_built += 1;
        debug!(
            key = %name,
            %id,
            constructors = raw.constructors.len(),
            "class ready"
        );
        Ok(id)
    }

    /// Everything between reserving the slot and marking it ready.
    fn build_class_body(&mut self, raw: &RawClass, id: DescriptorId, class_hash: DeclHash) -> Result<()> {
        for (index, tp) in raw.type_parameters.iter().enumerate() {
            self.pending_type_parameters.insert(
                DeclHash::from_type_parameter(class_hash, &tp.name),
                (index as u32, tp.clone()),
            );
        }
        let mut type_parameters = Vec::with_capacity(raw.type_parameters.len());
        for (index, tp) in raw.type_parameters.iter().enumerate() {
            type_parameters.push(self.resolve_type_parameter(class_hash, index as u32, tp)?);
        }
        self.class_mut(id)?.type_parameters = type_parameters;
        debug!(key = %raw.name, %id, "published class skeleton");

        let supertypes = self.resolve_supertypes(raw)?;
        self.class_mut(id)?.supertypes = supertypes;

        self.member_scopes
            .insert(id, LazyMemberScope::new(id, raw.name.clone(), false));
        self.class_mut(id)?.member_scope = Some(class_hash);

        for ctor in &raw.constructors {
            let value_parameters = self.resolve_value_parameters(&ctor.parameters)?;
            let ctor_id = self.table.alloc(Descriptor::Constructor(ConstructorDescriptor::new(
                id,
                value_parameters,
            )));
            let hash = DeclHash::from_constructor(class_hash, &signature(&ctor.parameters));
            self.declarations.insert(hash, ctor_id);
            self.class_mut(id)?.constructors.push(ctor_id);
        }
        Ok(())
    }

    /// Undo what a failed build left behind: the class slot, its unresolved
    /// or half-built type parameters, its member scope and its constructors.
    fn abandon_class(&mut self, raw: &RawClass, id: DescriptorId, class_hash: DeclHash) {
        self.classes.release(&raw.name);
        for tp in &raw.type_parameters {
            let key = DeclHash::from_type_parameter(class_hash, &tp.name);
            self.pending_type_parameters.remove(&key);
            self.type_parameters.release(&key);
        }
        self.member_scopes.remove(&id);
        for ctor in &raw.constructors {
            self.declarations
                .remove(&DeclHash::from_constructor(class_hash, &signature(&ctor.parameters)));
        }
    }

    fn class_mut(&mut self, id: DescriptorId) -> Result<&mut ClassDescriptor> {
        self.table
            .class_mut(id)
            .ok_or(RegistryError::UnknownDescriptor { id })
    }

    fn resolve_supertypes(&mut self, raw: &RawClass) -> Result<Vec<DataType>> {
        self.stats.supertype_resolutions += 1;
        let mut supertypes = Vec::with_capacity(1 + raw.extends.len() + raw.implements.len());
        supertypes.push(DataType::any());
        for declared in raw.extends.iter().chain(&raw.implements) {
            supertypes.push(self.transform_type(declared, true)?);
        }
        Ok(supertypes)
    }

    // ========================================================================
    // Type parameters
    // ========================================================================

    fn resolve_type_parameter(
        &mut self,
        owner: DeclHash,
        index: u32,
        raw: &RawTypeParameter,
    ) -> Result<DescriptorId> {
        let key = DeclHash::from_type_parameter(owner, &raw.name);
        if let Some(id) = self.type_parameters.state(&key).descriptor() {
            return Ok(id);
        }
        self.pending_type_parameters.remove(&key);

        // Reserved before the bounds so `T : Comparable<T>` finds itself.
        let id = self
            .table
            .alloc(Descriptor::TypeParameter(TypeParameterDescriptor::unbounded(
                raw.name.clone(),
                index,
            )));
        self.type_parameters.reserve(key, id)?;

        let (upper_bounds, bound) = match self.type_parameter_bounds(raw) {
            Ok(bounds) => bounds,
            Err(err) => {
                self.type_parameters.release(&key);
                return Err(err);
            }
        };

        match self.table.get_mut(id) {
            Some(Descriptor::TypeParameter(tp)) => {
                tp.upper_bounds = upper_bounds;
                tp.bound = bound;
            }
            _ => return Err(RegistryError::UnknownDescriptor { id }),
        }
        self.type_parameters.mark_ready(&key)?;
        self.stats.type_parameters_built += 1;
        trace!(name = %raw.name, %id, "type parameter ready");
        Ok(id)
    }

    /// Upper bounds of `raw` and the single bound they stand for: nullable
    /// `Any` when unbounded, the bound itself when there is one, their
    /// intersection otherwise.
    fn type_parameter_bounds(&mut self, raw: &RawTypeParameter) -> Result<(Vec<DataType>, DataType)> {
        Ok(match raw.bounds.as_slice() {
            [] => {
                let top = DataType::nullable_any();
                (vec![top.clone()], top)
            }
            [only] => {
                let bound = self.transform_type(only, false)?;
                (vec![bound.clone()], bound)
            }
            many => {
                let mut bounds: Vec<DataType> = Vec::with_capacity(many.len());
                for declared in many {
                    let bound = self.transform_type(declared, false)?;
                    if !bounds.contains(&bound) {
                        bounds.push(bound);
                    }
                }
                let bound = match bounds.as_slice() {
                    [only] => only.clone(),
                    _ => self.type_checker.intersect(&bounds),
                };
                (bounds, bound)
            }
        })
    }

    /// The type parameter `name` of class `owner`.
    pub fn type_parameter(&mut self, owner: &QualifiedName, name: &str) -> Result<DescriptorId> {
        let owner_hash = DeclHash::from_class(owner);
        let key = DeclHash::from_type_parameter(owner_hash, name);
        if let Some(id) = self.type_parameters.state(&key).descriptor() {
            return Ok(id);
        }
        if let Some((index, raw)) = self.pending_type_parameters.get(&key).cloned() {
            return self.resolve_type_parameter(owner_hash, index, &raw);
        }
        // Building the owner registers its type parameters.
        self.resolve_class(owner)?;
        self.type_parameters
            .state(&key)
            .descriptor()
            .ok_or_else(|| RegistryError::UnknownDeclaration {
                name: format!("{owner}.{name}"),
            })
    }

    // ========================================================================
    // Types and parameters
    // ========================================================================

    /// Transform an external type reference.
    ///
    /// Reference types come out nullable unless `normalize` is set, in which
    /// case they are made non-null.
    pub fn transform_type(&mut self, raw: &RawType, normalize: bool) -> Result<DataType> {
        let ty = match raw {
            RawType::Primitive(builtin) => return Ok(DataType::builtin(*builtin)),
            RawType::Class { name, arguments } => {
                let id = self
                    .resolve_class(name)?
                    .ok_or_else(|| RegistryError::UnknownDeclaration {
                        name: name.to_string(),
                    })?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.transform_type(argument, false)?);
                }
                DataType::class_with_args(id, args)
            }
            RawType::TypeParameter { owner, name } => {
                DataType::type_parameter(self.type_parameter(owner, name)?)
            }
            RawType::Array(element) => DataType::array_of(self.transform_type(element, false)?),
        };
        Ok(ty.with_nullability(!normalize))
    }

    /// Transform parameters in declaration order. Unnamed parameters become
    /// `p<index>`.
    pub fn resolve_value_parameters(&mut self, params: &[RawParameter]) -> Result<Vec<ValueParameter>> {
        let mut result = Vec::with_capacity(params.len());
        for (i, param) in params.iter().enumerate() {
            let index = i as u32;
            let name = param
                .name
                .clone()
                .unwrap_or_else(|| ValueParameter::synthetic_name(index));
            let value_parameter = match (&param.ty, param.variadic) {
                (RawType::Array(element), true) => {
                    ValueParameter::varargs(name, index, self.transform_type(element, false)?)
                }
                (ty, true) => ValueParameter::varargs(name, index, self.transform_type(ty, false)?),
                (ty, false) => ValueParameter::new(name, index, self.transform_type(ty, false)?),
            };
            result.push(value_parameter);
        }
        Ok(result)
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    /// Resolve `name` as a namespace.
    ///
    /// A class yields a static-only view of itself; otherwise a known package
    /// yields a package namespace.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_namespace(&mut self, name: &QualifiedName) -> Result<Option<DescriptorId>> {
        if let Some(&id) = self.namespaces.get(name) {
            return Ok(Some(id));
        }
        let descriptor = if let Some(class) = self.resolve_class(name)? {
            PackageDescriptor::static_scope(name.clone(), class)
        } else if name.is_root() || self.provider.has_package(name) {
            PackageDescriptor::package(name.clone())
        } else {
            return Ok(None);
        };

        let source = descriptor.source;
        let id = self.table.alloc(Descriptor::Package(descriptor));
        if let NamespaceSource::StaticScope(class) = source {
            self.member_scopes
                .insert(id, LazyMemberScope::new(class, name.clone(), true));
        }
        self.namespaces.insert(name.clone(), id);
        self.stats.namespaces_built += 1;
        debug!(key = %name, %id, static_only = source != NamespaceSource::Package, "namespace ready");
        Ok(Some(id))
    }

    /// The class or package `name` directly inside `scope`.
    ///
    /// `scope` is a namespace or class descriptor.
    pub fn scope_member(&mut self, scope: DescriptorId, name: &str) -> Result<Option<Qualifier>> {
        let scope_name = match self.table.get(scope) {
            Some(Descriptor::Package(p)) => p.name.clone(),
            Some(Descriptor::Class(c)) => c.name.clone(),
            Some(other) => {
                return Err(RegistryError::NotAClass {
                    name: other.name().to_string(),
                });
            }
            None => return Err(RegistryError::UnknownDescriptor { id: scope }),
        };
        let child = scope_name.child(name);
        if let Some(class) = self.resolve_class(&child)? {
            return Ok(Some(Qualifier::Class(class)));
        }
        if self.provider.has_package(&child) {
            return Ok(self.resolve_namespace(&child)?.map(Qualifier::Package));
        }
        Ok(None)
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// Functions named `name` in the member scope of `owner` (a class or a
    /// static namespace). Built on first lookup, memoized afterwards.
    pub fn member_functions(&mut self, owner: DescriptorId, name: &str) -> Result<Vec<DescriptorId>> {
        let scope = self
            .member_scopes
            .get(&owner)
            .ok_or(RegistryError::UnknownDescriptor { id: owner })?;
        if let Some(cached) = scope.cached_functions(name) {
            return Ok(cached.to_vec());
        }
        let class = scope.class();
        let class_name = scope.class_name().clone();
        let static_only = scope.is_static_only();
        let class_hash = DeclHash::from_class(&class_name);

        let mut functions = Vec::new();
        for method in self.provider.find_methods(&class_name, name) {
            if static_only && !method.modifiers.is_static() {
                continue;
            }
            let hash = DeclHash::from_member(class_hash, &method.name, &signature(&method.parameters));
            if let Some(&existing) = self.declarations.get(&hash) {
                functions.push(existing);
                continue;
            }
            let value_parameters = self.resolve_value_parameters(&method.parameters)?;
            let return_type = self.transform_type(&method.return_type, false)?;
            let function = FunctionDescriptor::new(method.name.clone(), value_parameters, return_type)
                .with_owner(class)
                .with_static(method.modifiers.is_static());
            let id = self.table.alloc(Descriptor::Function(function));
            self.declarations.insert(hash, id);
            self.stats.members_built += 1;
            functions.push(id);
        }
        trace!(class = %class_name, name, count = functions.len(), "member functions materialized");

        if let Some(scope) = self.member_scopes.get_mut(&owner) {
            scope.store_functions(name, functions.clone());
        }
        Ok(functions)
    }

    /// The field named `name` in the member scope of `owner`.
    pub fn member_variable(&mut self, owner: DescriptorId, name: &str) -> Result<Option<DescriptorId>> {
        let scope = self
            .member_scopes
            .get(&owner)
            .ok_or(RegistryError::UnknownDescriptor { id: owner })?;
        if let Some(cached) = scope.cached_variable(name) {
            return Ok(cached);
        }
        let class = scope.class();
        let class_name = scope.class_name().clone();
        let static_only = scope.is_static_only();

        let variable = match self.provider.find_field(&class_name, name) {
            Some(field) if !static_only || field.modifiers.is_static() => {
                let hash = DeclHash::from_field(DeclHash::from_class(&class_name), &field.name);
                match self.declarations.get(&hash) {
                    Some(&existing) => Some(existing),
                    None => {
                        let ty = self.transform_type(&field.ty, false)?;
                        let descriptor = VariableDescriptor::property(field.name.clone(), ty, Some(class))
                            .with_static(field.modifiers.is_static());
                        let id = self.table.alloc(Descriptor::Variable(descriptor));
                        self.declarations.insert(hash, id);
                        self.stats.members_built += 1;
                        Some(id)
                    }
                }
            }
            _ => None,
        };

        if let Some(scope) = self.member_scopes.get_mut(&owner) {
            scope.store_variable(name, variable);
        }
        Ok(variable)
    }

    /// The lazy member scope of a class or static namespace.
    pub fn member_scope(&self, owner: DescriptorId) -> Option<&LazyMemberScope> {
        self.member_scopes.get(&owner)
    }
}

fn signature(params: &[RawParameter]) -> Vec<DeclHash> {
    params.iter().map(|p| p.ty.erased_hash()).collect()
}
