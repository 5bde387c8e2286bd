//! Class descriptor.
//!
//! A `ClassDescriptor` starts life as a skeleton (name and modifiers only)
//! and is filled in by the descriptor cache: type parameters, supertypes,
//! member scope, and finally constructors.

use crate::{DataType, DeclHash, DescriptorId, QualifiedName};

/// What sort of classifier this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
    /// A singleton object declaration.
    Object,
}

/// Inheritance modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    /// Subclasses are a closed set; not constructible directly.
    Sealed,
}

/// Descriptor of a class, interface, enum, annotation or object.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    /// Fully qualified name.
    pub name: QualifiedName,
    pub kind: ClassKind,
    pub modality: Modality,

    // === Type constructor ===
    /// Own type parameters, in declaration order.
    pub type_parameters: Vec<DescriptorId>,
    /// Direct supertypes. Empty until the cache resolves them.
    pub supertypes: Vec<DataType>,

    // === Members ===
    /// Handle of the lazy member scope, once attached.
    pub member_scope: Option<DeclHash>,
    /// Constructor descriptors, in declaration order.
    pub constructors: Vec<DescriptorId>,
}

impl ClassDescriptor {
    /// Create a skeleton carrying only name and modifiers.
    pub fn skeleton(name: QualifiedName, kind: ClassKind, modality: Modality) -> Self {
        Self {
            name,
            kind,
            modality,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            member_scope: None,
            constructors: Vec::new(),
        }
    }

    #[inline]
    pub fn is_annotation(&self) -> bool {
        self.kind == ClassKind::Annotation
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.modality == Modality::Sealed
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.modality == Modality::Final
    }

    /// Whether the member scope has been attached.
    pub fn is_complete(&self) -> bool {
        self.member_scope.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_is_incomplete() {
        let class = ClassDescriptor::skeleton(
            QualifiedName::from_dotted("a.Point"),
            ClassKind::Class,
            Modality::Open,
        );
        assert!(!class.is_complete());
        assert!(!class.is_final());
        assert!(class.supertypes.is_empty());
    }

    #[test]
    fn kind_predicates() {
        let ann = ClassDescriptor::skeleton("Ann".into(), ClassKind::Annotation, Modality::Final);
        assert!(ann.is_annotation() && !ann.is_enum() && !ann.is_sealed());

        let sealed = ClassDescriptor::skeleton("Expr".into(), ClassKind::Class, Modality::Sealed);
        assert!(sealed.is_sealed());
    }
}
