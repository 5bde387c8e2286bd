//! Internal error types.
//!
//! These errors signal contract violations between components (a parser and
//! resolver out of sync, mismatched list lengths, a state that cannot be
//! reached). They abort the current operation and propagate with `?`.
//! Problems in the user's program are never errors in this sense; they are
//! recorded as [`Diagnostic`](crate::Diagnostic)s.
//!
//! ## Error Hierarchy
//!
//! ```text
//! TernError (top-level wrapper)
//! ├── ResolutionError - name/call/qualified resolution
//! ├── RegistryError   - external descriptor cache
//! └── CodegenError    - argument generation
//! ```

use thiserror::Error;

use crate::{DescriptorId, NodeId};

// ============================================================================
// Resolution Errors
// ============================================================================

/// Contract violations raised by the resolution engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// A package was reached through an instance, which the chain walk
    /// rules out.
    #[error("{node}: package reached through an instance reference")]
    PackageViaInstance { node: NodeId },

    /// Syntax the grammar guarantees is absent.
    #[error("{node}: missing {what}")]
    MissingSyntax { node: NodeId, what: &'static str },

    /// A collaborator handed back a descriptor id the table does not hold.
    #[error("unknown descriptor {id}")]
    UnknownDescriptor { id: DescriptorId },

    /// An internal error (should not happen in correct code).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ResolutionError {
    pub fn internal(message: impl Into<String>) -> Self {
        ResolutionError::Internal {
            message: message.into(),
        }
    }
}

// ============================================================================
// Registry Errors
// ============================================================================

/// Contract violations raised by the descriptor cache.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// The provider returned a reference to a declaration it does not describe.
    #[error("unknown declaration: {name}")]
    UnknownDeclaration { name: String },

    /// A key left the uninitialized state twice.
    #[error("cache slot for '{key}' already reserved")]
    SlotAlreadyReserved { key: String },

    /// A slot was marked ready without being reserved.
    #[error("cache slot for '{key}' was never reserved")]
    SlotNotReserved { key: String },

    /// A descriptor expected to be a class is something else.
    #[error("'{name}' is not a class")]
    NotAClass { name: String },

    #[error("unknown descriptor {id}")]
    UnknownDescriptor { id: DescriptorId },

    /// An internal error (should not happen in correct code).
    #[error("internal error: {message}")]
    Internal { message: String },
}

// ============================================================================
// Codegen Errors
// ============================================================================

/// Contract violations raised while generating call arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    /// Parameter list and parameter-type list differ in length.
    #[error("{parameters} parameters but {types} parameter types")]
    ParameterTypeMismatch { parameters: usize, types: usize },

    /// The argument mapping does not cover the parameter list.
    #[error("expected {expected} resolved arguments, got {got}")]
    ArgumentCountMismatch { expected: usize, got: usize },

    /// An expression or vararg argument has no syntax node.
    #[error("argument {index} has no expression")]
    MissingArgumentExpression { index: usize },

    /// A default was recorded out of order or twice.
    #[error("default for parameter {index} recorded after parameter {last}")]
    DefaultOutOfOrder { index: usize, last: usize },

    /// The backend cannot produce this argument.
    #[error("argument {index} is not supported by the backend")]
    UnsupportedArgument { index: usize },

    /// Failure reported by the expression backend.
    #[error("backend error: {message}")]
    Backend { message: String },
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// The unified error type for all tern components.
///
/// Each variant uses `#[from]` so `?` converts component errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TernError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl TernError {
    pub fn is_resolution(&self) -> bool {
        matches!(self, TernError::Resolution(_))
    }

    pub fn is_registry(&self) -> bool {
        matches!(self, TernError::Registry(_))
    }

    pub fn is_codegen(&self) -> bool {
        matches!(self, TernError::Codegen(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_display() {
        let err = ResolutionError::PackageViaInstance {
            node: NodeId::new(3),
        };
        assert_eq!(format!("{err}"), "node_3: package reached through an instance reference");
        assert_eq!(
            format!("{}", ResolutionError::internal("bad state")),
            "internal error: bad state"
        );
    }

    #[test]
    fn codegen_error_display() {
        let err = CodegenError::ParameterTypeMismatch {
            parameters: 3,
            types: 2,
        };
        assert_eq!(format!("{err}"), "3 parameters but 2 parameter types");
    }

    #[test]
    fn unified_conversion() {
        fn fails() -> Result<(), TernError> {
            Err(RegistryError::NotAClass { name: "x".into() })?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(err.is_registry());
        assert!(!err.is_codegen());
        assert_eq!(err.to_string(), "'x' is not a class");
    }
}
