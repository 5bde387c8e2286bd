use crate::{DescriptorId, QualifiedName};

/// What a namespace descriptor was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceSource {
    /// A real package; exposes classes and sub-packages.
    Package,
    /// A class used purely as a container of its static members.
    StaticScope(DescriptorId),
}

/// Descriptor of a package or of a class's static scope.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    pub name: QualifiedName,
    pub source: NamespaceSource,
}

impl PackageDescriptor {
    pub fn package(name: QualifiedName) -> Self {
        Self {
            name,
            source: NamespaceSource::Package,
        }
    }

    pub fn static_scope(name: QualifiedName, class: DescriptorId) -> Self {
        Self {
            name,
            source: NamespaceSource::StaticScope(class),
        }
    }

    /// Whether only static members are visible through this namespace.
    #[inline]
    pub fn is_static_only(&self) -> bool {
        matches!(self.source, NamespaceSource::StaticScope(_))
    }
}
