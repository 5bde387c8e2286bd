//! Function, constructor and value-parameter descriptors.

use crate::{DataType, DescriptorId};

/// A formal parameter of a function or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueParameter {
    /// Declared name, or `p<index>` when the declaration has none.
    pub name: String,
    /// Position in the parameter list.
    pub index: u32,
    /// Declared type. For a vararg parameter this is the array type.
    pub ty: DataType,
    /// Element type, set only for a vararg parameter.
    pub varargs_element: Option<DataType>,
    /// Whether a default value is declared.
    pub has_default: bool,
}

impl ValueParameter {
    /// Create an ordinary parameter.
    pub fn new(name: impl Into<String>, index: u32, ty: DataType) -> Self {
        Self {
            name: name.into(),
            index,
            ty,
            varargs_element: None,
            has_default: false,
        }
    }

    /// Create a vararg parameter collecting `element`s into an array.
    pub fn varargs(name: impl Into<String>, index: u32, element: DataType) -> Self {
        Self {
            name: name.into(),
            index,
            ty: DataType::array_of(element.clone()),
            varargs_element: Some(element),
            has_default: false,
        }
    }

    /// Name used when the declaration has none.
    pub fn synthetic_name(index: u32) -> String {
        format!("p{index}")
    }

    /// Mark this parameter as having a default value.
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    #[inline]
    pub fn is_varargs(&self) -> bool {
        self.varargs_element.is_some()
    }
}

/// Descriptor of a named function or method.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Declaring class, or `None` for a top-level function.
    pub owner: Option<DescriptorId>,
    pub type_parameters: Vec<DescriptorId>,
    pub value_parameters: Vec<ValueParameter>,
    pub return_type: DataType,
    pub is_static: bool,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, value_parameters: Vec<ValueParameter>, return_type: DataType) -> Self {
        Self {
            name: name.into(),
            owner: None,
            type_parameters: Vec::new(),
            value_parameters,
            return_type,
            is_static: false,
        }
    }

    pub fn with_owner(mut self, owner: DescriptorId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// Descriptor of a class constructor.
///
/// Its return type is the owning class's type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDescriptor {
    /// The class being constructed.
    pub owner: DescriptorId,
    pub value_parameters: Vec<ValueParameter>,
    pub is_primary: bool,
}

impl ConstructorDescriptor {
    pub fn new(owner: DescriptorId, value_parameters: Vec<ValueParameter>) -> Self {
        Self {
            owner,
            value_parameters,
            is_primary: false,
        }
    }

    /// The type a call of this constructor produces.
    pub fn return_type(&self) -> DataType {
        DataType::class(self.owner)
    }
}
