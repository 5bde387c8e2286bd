//! Collaborators the resolution engine consumes.
//!
//! Overload resolution lives in [`crate::overload`]; the rest is here.

use tern_core::{
    CompileTimeConstant, DataType, DescriptorId, NodeId, Qualifier, Receiver, ResolutionError,
    TypeInfo,
};
use tern_syntax::{Expr, IdentExpr};

use crate::context::ResolutionContext;
use crate::trace::BindingTrace;

/// Resolves names to packages and classes.
pub trait QualifierResolver {
    /// Resolve `name` as a package or class.
    ///
    /// With [`Receiver::None`] the name is looked up from the top; with a
    /// qualifier receiver it is looked up inside that qualifier; with an
    /// expression receiver only nested classes of the value's class apply.
    fn resolve_name_as_qualifier(
        &self,
        name: &IdentExpr<'_>,
        receiver: &Receiver,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Option<Qualifier>, ResolutionError>;

    /// Validate a qualifier used on its own, not as a receiver.
    fn resolve_as_standalone(
        &self,
        qualifier: Qualifier,
        node: NodeId,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), ResolutionError>;

    /// Validate a qualifier used as the receiver of a selector that bound
    /// to `selector_target`.
    fn resolve_as_receiver(
        &self,
        qualifier: Qualifier,
        node: NodeId,
        selector_target: Option<DescriptorId>,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), ResolutionError>;
}

/// Evaluates compile-time constants.
pub trait ConstantEvaluator {
    fn evaluate(
        &self,
        expr: Expr<'_>,
        trace: &dyn BindingTrace,
        expected_type: Option<&DataType>,
    ) -> Option<CompileTimeConstant>;
}

/// A constant evaluator that never folds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConstantFolding;

impl ConstantEvaluator for NoConstantFolding {
    fn evaluate(&self, _: Expr<'_>, _: &dyn BindingTrace, _: Option<&DataType>) -> Option<CompileTimeConstant> {
        None
    }
}

/// Types expressions the engine does not handle itself (literals, `super`,
/// lambdas, operators).
pub trait ExpressionTyper {
    fn type_of(&self, expr: Expr<'_>, ctx: &mut ResolutionContext<'_>) -> Result<TypeInfo, ResolutionError>;
}
