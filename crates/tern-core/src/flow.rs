//! Data-flow facts threaded through resolution.
//!
//! [`DataFlowInfo`] records what is known about the nullability of values
//! after evaluating an expression. It is a persistent-style value: every
//! refinement returns a new `DataFlowInfo` and leaves the original intact,
//! so a trial that is thrown away cannot leak facts.

use rustc_hash::FxHashMap;

use crate::{DataType, DescriptorId, NodeId};

/// A value facts can be stated about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowValue {
    /// A stable variable, identified by its descriptor.
    Variable(DescriptorId),
    /// The value of one particular expression node.
    Expression(NodeId),
}

/// What is known about a value's nullness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullability {
    Null,
    NotNull,
    #[default]
    Unknown,
}

/// Nullability facts valid at one program point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataFlowInfo {
    nullability: FxHashMap<FlowValue, Nullability>,
}

impl DataFlowInfo {
    /// No facts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The recorded nullability of `value`.
    pub fn nullability(&self, value: FlowValue) -> Nullability {
        self.nullability
            .get(&value)
            .copied()
            .unwrap_or_default()
    }

    /// Whether `value`, statically of type `ty`, may hold null here.
    pub fn can_be_null(&self, value: FlowValue, ty: &DataType) -> bool {
        ty.nullable && self.nullability(value) != Nullability::NotNull
    }

    /// These facts plus "`value` is not null".
    pub fn disequate_with_null(&self, value: FlowValue) -> Self {
        self.with(value, Nullability::NotNull)
    }

    /// These facts with `value` set to `nullability`.
    pub fn with(&self, value: FlowValue, nullability: Nullability) -> Self {
        let mut next = self.clone();
        next.nullability.insert(value, nullability);
        next
    }

    /// Facts of `self` overridden by those of `other`.
    pub fn and(&self, other: &DataFlowInfo) -> Self {
        let mut next = self.clone();
        next.nullability
            .extend(other.nullability.iter().map(|(k, v)| (*k, *v)));
        next
    }

    pub fn is_empty(&self) -> bool {
        self.nullability.is_empty()
    }
}
