//! Call argument generation.
//!
//! After a call is resolved, its arguments are lowered parameter by
//! parameter: explicit arguments are evaluated through the
//! [`ExpressionCodegen`] backend, omitted ones are noted in a
//! [`DefaultCallArgs`] record for the synthetic "with defaults" overload,
//! and vararg packs become deferred [`StackValue`]s the caller forces when
//! it needs them.
//!
//! # Example
//!
//! ```ignore
//! let mut generator = CallBasedArgumentGenerator::new(&params, &types)?;
//! let generated = generator.generate(&resolved.value_arguments, &mut backend)?;
//! let masks = generated.defaults.to_masks(params.len());
//! ```

mod call_based;

pub use call_based::CallBasedArgumentGenerator;

use tern_core::{CodegenError, DataType, NodeId};
use tracing::trace;

use crate::call::ResolvedValueArgument;

type Result<T> = std::result::Result<T, CodegenError>;

// ============================================================================
// Backend
// ============================================================================

/// The expression code generator arguments are lowered into.
pub trait ExpressionCodegen {
    /// Evaluate the expression at `node`, leaving a value of type `ty`.
    fn gen_expression(&mut self, node: NodeId, ty: &DataType) -> Result<()>;

    /// Pack the last `count` values into an array of `element_type`.
    fn pack_varargs(&mut self, element_type: &DataType, count: usize) -> Result<()>;

    fn should_mark_line_numbers(&self) -> bool;

    fn set_should_mark_line_numbers(&mut self, mark: bool);
}

/// Lowers a resolved argument mapping.
pub trait ArgumentGenerator {
    /// Generate one entry per parameter, in declaration order.
    fn generate(
        &mut self,
        arguments: &[ResolvedValueArgument],
        codegen: &mut dyn ExpressionCodegen,
    ) -> Result<GeneratedArguments>;
}

// ============================================================================
// Deferred values
// ============================================================================

/// A value the backend can produce on demand, with its static type known
/// up front.
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
    /// Trailing arguments packed into the vararg array of parameter `index`.
    Varargs {
        index: usize,
        element_type: DataType,
        array_type: DataType,
        arguments: Vec<Option<NodeId>>,
    },
}

impl StackValue {
    /// The type of the produced value.
    pub fn ty(&self) -> &DataType {
        match self {
            StackValue::Varargs { array_type, .. } => array_type,
        }
    }

    /// Produce the value.
    pub fn put(&self, codegen: &mut dyn ExpressionCodegen) -> Result<()> {
        match self {
            StackValue::Varargs {
                index,
                element_type,
                arguments,
                ..
            } => {
                for argument in arguments {
                    let node = argument.ok_or(CodegenError::MissingArgumentExpression { index: *index })?;
                    codegen.gen_expression(node, element_type)?;
                }
                trace!(index, count = arguments.len(), "vararg array packed");
                codegen.pack_varargs(element_type, arguments.len())
            }
        }
    }
}

/// What one parameter received.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValueArgument {
    /// Evaluated during generation.
    Evaluated { ty: DataType },
    /// Left to the declared default.
    Default,
    /// Not yet produced.
    Deferred(StackValue),
}

/// The outcome of generating a call's arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedArguments {
    /// One entry per parameter, by index.
    pub arguments: Vec<GeneratedValueArgument>,
    pub defaults: DefaultCallArgs,
}

impl GeneratedArguments {
    /// Deferred values with their parameter index, in parameter order.
    pub fn deferred(&self) -> impl Iterator<Item = (usize, &StackValue)> {
        self.arguments.iter().enumerate().filter_map(|(i, a)| match a {
            GeneratedValueArgument::Deferred(value) => Some((i, value)),
            _ => None,
        })
    }

    /// Force every deferred value, in parameter order.
    pub fn put_deferred(&self, codegen: &mut dyn ExpressionCodegen) -> Result<()> {
        for (_, value) in self.deferred() {
            value.put(codegen)?;
        }
        Ok(())
    }
}

// ============================================================================
// Default-argument record
// ============================================================================

/// Indices of parameters left to their default, strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefaultCallArgs {
    indices: Vec<usize>,
}

impl DefaultCallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `index`. Indices must arrive in increasing order.
    pub fn record(&mut self, index: usize) -> Result<()> {
        if let Some(&last) = self.indices.last()
            && index <= last
        {
            return Err(CodegenError::DefaultOutOfOrder { index, last });
        }
        self.indices.push(index);
        Ok(())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The record as 32-bit masks for a call with `parameter_count`
    /// parameters: bit `i % 32` of mask `i / 32` is set for each default.
    pub fn to_masks(&self, parameter_count: usize) -> Vec<u32> {
        let mut masks = vec![0u32; parameter_count.div_ceil(32)];
        for &index in &self.indices {
            if let Some(mask) = masks.get_mut(index / 32) {
                *mask |= 1 << (index % 32);
            }
        }
        masks
    }
}
