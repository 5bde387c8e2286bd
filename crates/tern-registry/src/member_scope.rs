//! Lazy member scopes.
//!
//! A class's members are not enumerated when the class is built. The scope
//! records which names have been asked for and the descriptors built for
//! them; [`DescriptorResolver`](crate::DescriptorResolver) fills it on first
//! lookup of each name.

use rustc_hash::FxHashMap;
use tern_core::{DescriptorId, QualifiedName};

/// Memoized view over the members of one external class.
#[derive(Debug, Clone)]
pub struct LazyMemberScope {
    /// The class whose members this scope exposes.
    class: DescriptorId,
    class_name: QualifiedName,
    /// Only static members are visible (namespace view of a class).
    static_only: bool,
    functions: FxHashMap<String, Vec<DescriptorId>>,
    variables: FxHashMap<String, Option<DescriptorId>>,
}

impl LazyMemberScope {
    pub fn new(class: DescriptorId, class_name: QualifiedName, static_only: bool) -> Self {
        Self {
            class,
            class_name,
            static_only,
            functions: FxHashMap::default(),
            variables: FxHashMap::default(),
        }
    }

    pub fn class(&self) -> DescriptorId {
        self.class
    }

    pub fn class_name(&self) -> &QualifiedName {
        &self.class_name
    }

    pub fn is_static_only(&self) -> bool {
        self.static_only
    }

    /// Functions already built for `name`.
    pub fn cached_functions(&self, name: &str) -> Option<&[DescriptorId]> {
        self.functions.get(name).map(Vec::as_slice)
    }

    /// Variable already looked up for `name`; `Some(None)` records a miss.
    pub fn cached_variable(&self, name: &str) -> Option<Option<DescriptorId>> {
        self.variables.get(name).copied()
    }

    pub fn store_functions(&mut self, name: &str, functions: Vec<DescriptorId>) {
        self.functions.insert(name.to_string(), functions);
    }

    pub fn store_variable(&mut self, name: &str, variable: Option<DescriptorId>) {
        self.variables.insert(name.to_string(), variable);
    }

    /// Number of names looked up so far.
    pub fn materialized_names(&self) -> usize {
        self.functions.len() + self.variables.len()
    }
}
