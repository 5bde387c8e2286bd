//! Core vocabulary shared by every tern crate.
//!
//! - identity: [`NodeId`], [`DescriptorId`], [`QualifiedName`], [`DeclHash`]
//! - types: [`DataType`], [`TypeInfo`], [`DataFlowInfo`]
//! - declarations: the closed [`Descriptor`] enum and its [`DescriptorTable`]
//! - scopes: [`Qualifier`], [`Receiver`]
//! - reporting: [`Diagnostic`] and the internal error enums

mod constant;
mod data_type;
mod decl_hash;
mod descriptors;
mod diagnostics;
mod error;
mod flow;
mod ids;
mod qualified_name;
mod qualifier;
mod span;
mod type_checker;
mod type_info;

pub use constant::{CompileTimeConstant, ConstantValue};
pub use data_type::{BuiltinType, DataType, TypeKind};
pub use decl_hash::{DeclHash, hash_constants};
pub use descriptors::{
    CONSTRUCTOR_NAME, ClassDescriptor, ClassKind, ConstructorDescriptor, Descriptor, DescriptorTable,
    FunctionDescriptor, Modality, NamespaceSource, PackageDescriptor, TypeParameterDescriptor,
    ValueParameter, VariableDescriptor, VariableKind,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{CodegenError, RegistryError, ResolutionError, TernError};
pub use flow::{DataFlowInfo, FlowValue, Nullability};
pub use ids::{DescriptorId, NodeId};
pub use qualified_name::QualifiedName;
pub use qualifier::{Qualifier, Receiver};
pub use span::Span;
pub use type_checker::{StructuralTypeChecker, TypeChecker};
pub use type_info::TypeInfo;
