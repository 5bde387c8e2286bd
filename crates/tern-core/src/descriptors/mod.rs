//! Declaration descriptors.
//!
//! Every declaration the resolver can bind a name to is one variant of the
//! closed [`Descriptor`] enum:
//!
//! - [`ClassDescriptor`] - classes, interfaces, enums, annotations, objects
//! - [`FunctionDescriptor`] - functions and methods
//! - [`ConstructorDescriptor`] - class constructors
//! - [`VariableDescriptor`] - locals, properties, object placeholders
//! - [`TypeParameterDescriptor`] - type parameters with their bounds
//! - [`PackageDescriptor`] - packages and static class scopes
//!
//! Descriptors live in a [`DescriptorTable`] and are referred to by
//! [`DescriptorId`](crate::DescriptorId).

mod class;
mod function;
mod package;
mod table;
mod type_parameter;
mod variable;

pub use class::{ClassDescriptor, ClassKind, Modality};
pub use function::{ConstructorDescriptor, FunctionDescriptor, ValueParameter};
pub use package::{NamespaceSource, PackageDescriptor};
pub use table::DescriptorTable;
pub use type_parameter::TypeParameterDescriptor;
pub use variable::{VariableDescriptor, VariableKind};

use crate::DataType;

/// Name every constructor descriptor reports.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// A declaration the resolver can bind to.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Class(ClassDescriptor),
    Function(FunctionDescriptor),
    Constructor(ConstructorDescriptor),
    Variable(VariableDescriptor),
    TypeParameter(TypeParameterDescriptor),
    Package(PackageDescriptor),
}

impl Descriptor {
    /// The simple name of the declaration.
    pub fn name(&self) -> &str {
        match self {
            Descriptor::Class(c) => c.name.simple_name(),
            Descriptor::Function(f) => &f.name,
            Descriptor::Constructor(_) => CONSTRUCTOR_NAME,
            Descriptor::Variable(v) => &v.name,
            Descriptor::TypeParameter(t) => &t.name,
            Descriptor::Package(p) => p.name.simple_name(),
        }
    }

    /// The type of a use of this declaration as a value or call.
    ///
    /// Functions give their return type, constructors the class type,
    /// variables their declared type. Classifiers and packages have none.
    pub fn return_type(&self) -> Option<DataType> {
        match self {
            Descriptor::Function(f) => Some(f.return_type.clone()),
            Descriptor::Constructor(c) => Some(c.return_type()),
            Descriptor::Variable(v) => Some(v.ty.clone()),
            Descriptor::Class(_) | Descriptor::TypeParameter(_) | Descriptor::Package(_) => None,
        }
    }

    /// Formal parameters, for functions and constructors.
    pub fn value_parameters(&self) -> &[ValueParameter] {
        match self {
            Descriptor::Function(f) => &f.value_parameters,
            Descriptor::Constructor(c) => &c.value_parameters,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_constructor(&self) -> bool {
        matches!(self, Descriptor::Constructor(_))
    }

    /// Whether this is the placeholder for an object used as a value.
    #[inline]
    pub fn is_object_qualifier(&self) -> bool {
        matches!(self, Descriptor::Variable(v) if v.is_object_qualifier())
    }

    pub fn as_class(&self) -> Option<&ClassDescriptor> {
        match self {
            Descriptor::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDescriptor> {
        match self {
            Descriptor::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_constructor(&self) -> Option<&ConstructorDescriptor> {
        match self {
            Descriptor::Constructor(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDescriptor> {
        match self {
            Descriptor::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameterDescriptor> {
        match self {
            Descriptor::TypeParameter(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_package(&self) -> Option<&PackageDescriptor> {
        match self {
            Descriptor::Package(p) => Some(p),
            _ => None,
        }
    }
}
