//! DataType - a resolved type with its nullability.
//!
//! Types produced by resolution and by the descriptor cache. Class types
//! point at their class descriptor by [`DescriptorId`], so a class seen while
//! it is still being built already has a usable type.
//!
//! # Example
//!
//! ```
//! use tern_core::{BuiltinType, DataType};
//!
//! let int = DataType::builtin(BuiltinType::Int);
//! assert!(!int.nullable);
//!
//! let top = DataType::nullable_any();
//! assert!(top.is_any() && top.nullable);
//! ```

use std::fmt::{self, Display, Formatter};

use crate::DescriptorId;

/// Built-in types that need no descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// Top type; every class has it as an implicit supertype.
    Any,
    /// Bottom type; the type of expressions that never complete.
    Nothing,
    Unit,
    Boolean,
    Char,
    Int,
    Long,
    Double,
    String,
}

impl BuiltinType {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinType::Any => "Any",
            BuiltinType::Nothing => "Nothing",
            BuiltinType::Unit => "Unit",
            BuiltinType::Boolean => "Boolean",
            BuiltinType::Char => "Char",
            BuiltinType::Int => "Int",
            BuiltinType::Long => "Long",
            BuiltinType::Double => "Double",
            BuiltinType::String => "String",
        }
    }
}

/// The shape of a type, without nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Builtin(BuiltinType),
    /// An instance of a class, with its type arguments.
    Class {
        descriptor: DescriptorId,
        arguments: Vec<DataType>,
    },
    /// A reference to a type parameter descriptor.
    TypeParameter(DescriptorId),
    /// An array with the given element type.
    Array(Box<DataType>),
    /// The intersection of several types; a subtype of each member.
    Intersection(Vec<DataType>),
    /// Produced after a reported error; compatible with everything.
    Error,
}

/// A complete type: shape plus nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl DataType {
    /// Create a non-null type of the given kind.
    #[inline]
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    #[inline]
    pub fn builtin(builtin: BuiltinType) -> Self {
        Self::new(TypeKind::Builtin(builtin))
    }

    /// Non-null `Any`.
    #[inline]
    pub fn any() -> Self {
        Self::builtin(BuiltinType::Any)
    }

    /// `Any?`, the bound of an unbounded type parameter.
    #[inline]
    pub fn nullable_any() -> Self {
        Self::any().make_nullable()
    }

    #[inline]
    pub fn unit() -> Self {
        Self::builtin(BuiltinType::Unit)
    }

    /// Non-null instance of a class without type arguments.
    #[inline]
    pub fn class(descriptor: DescriptorId) -> Self {
        Self::class_with_args(descriptor, Vec::new())
    }

    #[inline]
    pub fn class_with_args(descriptor: DescriptorId, arguments: Vec<DataType>) -> Self {
        Self::new(TypeKind::Class {
            descriptor,
            arguments,
        })
    }

    #[inline]
    pub fn type_parameter(descriptor: DescriptorId) -> Self {
        Self::new(TypeKind::TypeParameter(descriptor))
    }

    /// Array of `element`.
    #[inline]
    pub fn array_of(element: DataType) -> Self {
        Self::new(TypeKind::Array(Box::new(element)))
    }

    /// Intersection of `members`; a single member collapses to itself.
    pub fn intersection(mut members: Vec<DataType>) -> Self {
        if members.len() == 1 {
            if let Some(only) = members.pop() {
                return only;
            }
        }
        let nullable = !members.is_empty() && members.iter().all(|m| m.nullable);
        Self {
            kind: TypeKind::Intersection(members),
            nullable,
        }
    }

    #[inline]
    pub fn error() -> Self {
        Self::new(TypeKind::Error)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TypeKind::Error)
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self.kind, TypeKind::Builtin(BuiltinType::Any))
    }

    /// The same type, accepting null.
    #[inline]
    pub fn make_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The same type, rejecting null.
    #[inline]
    pub fn make_not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Nullability set explicitly.
    #[inline]
    pub fn with_nullability(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// The class descriptor, for class types.
    pub fn class_descriptor(&self) -> Option<DescriptorId> {
        match &self.kind {
            TypeKind::Class { descriptor, .. } => Some(*descriptor),
            _ => None,
        }
    }

    /// The element type, for array types.
    pub fn array_element(&self) -> Option<&DataType> {
        match &self.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Builtin(b) => write!(f, "{}", b.name())?,
            TypeKind::Class {
                descriptor,
                arguments,
            } => {
                write!(f, "{descriptor}")?;
                if !arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
            }
            TypeKind::TypeParameter(descriptor) => write!(f, "{descriptor}")?,
            TypeKind::Array(element) => write!(f, "Array<{element}>")?,
            TypeKind::Intersection(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{member}")?;
                }
                return Ok(());
            }
            TypeKind::Error => write!(f, "<error>")?,
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}
