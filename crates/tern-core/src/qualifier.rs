//! Qualifiers and receivers.
//!
//! A [`Qualifier`] is a name that denotes a scope (package or class) rather
//! than a value. A [`Receiver`] is whatever sits left of a selector: nothing,
//! a value, or a qualifier.

use std::fmt;

use crate::{DataType, DescriptorId, NodeId};

/// A resolved reference to a named scope. Carries no runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// A package (or a class used as a static scope), by its namespace descriptor.
    Package(DescriptorId),
    /// A class, by its class descriptor.
    Class(DescriptorId),
}

impl Qualifier {
    pub fn descriptor(self) -> DescriptorId {
        match self {
            Qualifier::Package(id) | Qualifier::Class(id) => id,
        }
    }

    #[inline]
    pub fn is_package(self) -> bool {
        matches!(self, Qualifier::Package(_))
    }

    #[inline]
    pub fn is_class(self) -> bool {
        matches!(self, Qualifier::Class(_))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Package(id) => write!(f, "package {id}"),
            Qualifier::Class(id) => write!(f, "class {id}"),
        }
    }
}

/// The left-hand side a selector is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// No explicit receiver; implicit receivers are the overload service's concern.
    None,
    /// A value produced by the expression at `node`.
    Expression { node: NodeId, ty: DataType },
    /// A scope named at `node`.
    Qualifier { node: NodeId, qualifier: Qualifier },
}

impl Receiver {
    /// The qualifier, for qualifier receivers.
    pub fn qualifier(&self) -> Option<Qualifier> {
        match self {
            Receiver::Qualifier { qualifier, .. } => Some(*qualifier),
            _ => None,
        }
    }

    /// The value type, for expression receivers.
    pub fn value_type(&self) -> Option<&DataType> {
        match self {
            Receiver::Expression { ty, .. } => Some(ty),
            _ => None,
        }
    }

    /// The node the receiver was written at.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Receiver::None => None,
            Receiver::Expression { node, .. } | Receiver::Qualifier { node, .. } => Some(*node),
        }
    }

    #[inline]
    pub fn exists(&self) -> bool {
        !matches!(self, Receiver::None)
    }
}
