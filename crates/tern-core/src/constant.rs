//! Compile-time constants produced by the constant evaluator.

use std::fmt;

use crate::DataType;

/// A constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Boolean(bool),
    Char(char),
    Int(i64),
    Double(f64),
    String(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => write!(f, "null"),
            ConstantValue::Boolean(b) => write!(f, "{b}"),
            ConstantValue::Char(c) => write!(f, "'{c}'"),
            ConstantValue::Int(i) => write!(f, "{i}"),
            ConstantValue::Double(d) => write!(f, "{d}"),
            ConstantValue::String(s) => write!(f, "\"{s}\""),
        }
    }
}

/// An evaluated constant with its type.
///
/// `is_pure` is false when the value depends on something other than
/// literals and constant declarations; such a constant must not replace
/// the expression's type info.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileTimeConstant {
    pub value: ConstantValue,
    pub ty: DataType,
    pub is_pure: bool,
}

impl CompileTimeConstant {
    pub fn pure(value: ConstantValue, ty: DataType) -> Self {
        Self {
            value,
            ty,
            is_pure: true,
        }
    }

    pub fn impure(value: ConstantValue, ty: DataType) -> Self {
        Self {
            value,
            ty,
            is_pure: false,
        }
    }
}
