//! Structured user-facing diagnostics.
//!
//! Resolution never fails on bad user code. It records a [`Diagnostic`]
//! (kind, node, span) into the binding trace and carries on. Each
//! [`DiagnosticKind`] carries its parameters as data; turning them into
//! messages is left to whoever renders the diagnostics.

use std::fmt;

use crate::{DataType, DescriptorId, NodeId, Span};

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The program is invalid.
    Error,
    /// The program is valid but probably not what was meant.
    Warning,
}

/// What went wrong, with its structured parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// A function name used without an argument list.
    FunctionCallExpected {
        name: String,
        has_value_parameters: bool,
    },
    /// A value that is not a function was called.
    FunctionExpected { name: String, ty: DataType },
    /// An annotation class constructed outside an annotation literal.
    AnnotationClassConstructorCall { class: DescriptorId },
    /// An enum class constructed directly.
    EnumClassConstructorCall { class: DescriptorId },
    /// A sealed class constructed directly.
    SealedClassConstructorCall { class: DescriptorId },
    /// A nested class reached through an instance instead of its container.
    NestedClassAccessedViaInstanceReference { class: DescriptorId },
    /// The right of a dot is neither a name nor a call.
    IllegalSelector,
    /// `?.` on a receiver that cannot be null.
    UnnecessarySafeCall { receiver_type: DataType },
    /// `?.` on `super`.
    UnexpectedSafeCall,
    /// A name no candidate matched.
    UnresolvedReference { name: String },
    /// Several candidates matched equally well.
    OverloadResolutionAmbiguity { name: String },
    /// The expression's type does not conform to the expected type.
    TypeMismatch { expected: DataType, actual: DataType },
}

impl DiagnosticKind {
    /// Stable identifier of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::FunctionCallExpected { .. } => "FUNCTION_CALL_EXPECTED",
            DiagnosticKind::FunctionExpected { .. } => "FUNCTION_EXPECTED",
            DiagnosticKind::AnnotationClassConstructorCall { .. } => "ANNOTATION_CLASS_CONSTRUCTOR_CALL",
            DiagnosticKind::EnumClassConstructorCall { .. } => "ENUM_CLASS_CONSTRUCTOR_CALL",
            DiagnosticKind::SealedClassConstructorCall { .. } => "SEALED_CLASS_CONSTRUCTOR_CALL",
            DiagnosticKind::NestedClassAccessedViaInstanceReference { .. } => {
                "NESTED_CLASS_ACCESSED_VIA_INSTANCE_REFERENCE"
            }
            DiagnosticKind::IllegalSelector => "ILLEGAL_SELECTOR",
            DiagnosticKind::UnnecessarySafeCall { .. } => "UNNECESSARY_SAFE_CALL",
            DiagnosticKind::UnexpectedSafeCall => "UNEXPECTED_SAFE_CALL",
            DiagnosticKind::UnresolvedReference { .. } => "UNRESOLVED_REFERENCE",
            DiagnosticKind::OverloadResolutionAmbiguity { .. } => "OVERLOAD_RESOLUTION_AMBIGUITY",
            DiagnosticKind::TypeMismatch { .. } => "TYPE_MISMATCH",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnnecessarySafeCall { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A diagnostic attached to one syntax node.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub node: NodeId,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, node: NodeId, span: Span) -> Self {
        Self { kind, node, span }
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {level}: {}", self.span, self.kind)
    }
}
