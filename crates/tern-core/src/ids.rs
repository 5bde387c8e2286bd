//! Identifier types for syntax nodes and descriptors.
//!
//! Both identifiers are dense indices handed out by their owning arena:
//! [`NodeId`] by the syntax builder, [`DescriptorId`] by the
//! [`DescriptorTable`](crate::DescriptorTable). The binding trace keys every
//! record by `NodeId`, and descriptor identity is `DescriptorId` equality.

use std::fmt;

/// Identifies one expression node of the syntax tree being resolved.
///
/// # Example
///
/// ```
/// use tern_core::NodeId;
///
/// let node = NodeId::new(3);
/// assert_eq!(node.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a node id with the given index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

/// Identifies a descriptor in the session's descriptor table.
///
/// Two lookups of the same declaration yield equal ids; that equality is
/// the identity guarantee downstream consumers rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u32);

impl DescriptorId {
    /// Create a descriptor id with the given index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "desc_{}", self.0)
    }
}
