//! Variable descriptors: locals, properties and object placeholders.

use crate::{DataType, DescriptorId};

/// What a variable descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Local,
    Property,
    /// Placeholder standing for an object declaration's instance when the
    /// object's name is used as a value. The object may still turn out to be
    /// a qualifier once the selector after the dot is known.
    ObjectQualifier {
        /// The object's class descriptor.
        object: DescriptorId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDescriptor {
    pub name: String,
    pub ty: DataType,
    pub kind: VariableKind,
    /// Declaring class, for properties.
    pub owner: Option<DescriptorId>,
    pub is_static: bool,
}

impl VariableDescriptor {
    pub fn local(name: impl Into<String>, ty: DataType) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: VariableKind::Local,
            owner: None,
            is_static: false,
        }
    }

    pub fn property(name: impl Into<String>, ty: DataType, owner: Option<DescriptorId>) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: VariableKind::Property,
            owner,
            is_static: false,
        }
    }

    /// Placeholder for the instance of object `object`.
    pub fn object_qualifier(name: impl Into<String>, object: DescriptorId) -> Self {
        Self {
            name: name.into(),
            ty: DataType::class(object),
            kind: VariableKind::ObjectQualifier { object },
            owner: None,
            is_static: false,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[inline]
    pub fn is_object_qualifier(&self) -> bool {
        matches!(self.kind, VariableKind::ObjectQualifier { .. })
    }
}
