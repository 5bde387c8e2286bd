//! TypeInfo - the result of resolving one expression.
//!
//! This module provides [`TypeInfo`]: the expression's type (absent for
//! qualifiers and unresolved names), the data-flow facts after it, and the
//! jump-out marker with the facts that hold on the escaping path.

use crate::{DataFlowInfo, DataType};

/// Result of resolving an expression.
///
/// # Jumps
///
/// When evaluating the expression may transfer control out of the normal
/// continuation (for example an argument containing a non-local return),
/// `jump_out_possible` is set and `jump_flow` carries the facts valid on
/// that path.
///
/// # Example
///
/// ```
/// use tern_core::{DataFlowInfo, DataType, TypeInfo};
///
/// let value = TypeInfo::new(Some(DataType::any()), DataFlowInfo::empty());
/// assert!(value.ty.is_some());
/// assert!(!value.jump_out_possible);
///
/// let qualifier = TypeInfo::no_type(DataFlowInfo::empty());
/// assert!(qualifier.ty.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    /// The type of the value, or `None` when the expression has no value.
    pub ty: Option<DataType>,

    /// Facts valid after evaluating the expression normally.
    pub data_flow: DataFlowInfo,

    /// Whether control may escape while evaluating the expression.
    pub jump_out_possible: bool,

    /// Facts valid on the escaping path. Meaningful only when
    /// `jump_out_possible` is set.
    pub jump_flow: DataFlowInfo,
}

impl TypeInfo {
    /// A result with the given type and no jump.
    #[inline]
    pub fn new(ty: Option<DataType>, data_flow: DataFlowInfo) -> Self {
        Self {
            ty,
            jump_flow: data_flow.clone(),
            data_flow,
            jump_out_possible: false,
        }
    }

    /// A result without a value.
    #[inline]
    pub fn no_type(data_flow: DataFlowInfo) -> Self {
        Self::new(None, data_flow)
    }

    /// A result whose evaluation may jump out with `jump_flow`.
    #[inline]
    pub fn with_jump(ty: Option<DataType>, data_flow: DataFlowInfo, jump_flow: DataFlowInfo) -> Self {
        Self {
            ty,
            data_flow,
            jump_out_possible: true,
            jump_flow,
        }
    }

    /// The same result with a different type.
    #[inline]
    pub fn replace_type(mut self, ty: Option<DataType>) -> Self {
        self.ty = ty;
        self
    }

    /// The same result with different outgoing facts.
    #[inline]
    pub fn replace_data_flow(mut self, data_flow: DataFlowInfo) -> Self {
        self.data_flow = data_flow;
        self
    }

    /// The type, or the error type when there is none.
    pub fn type_or_error(&self) -> DataType {
        self.ty.clone().unwrap_or_else(DataType::error)
    }
}
