//! Name, call and qualified-expression resolution.
//!
//! The [`CallExpressionResolver`] decides what a name, a call or a dotted
//! chain denotes. Every strategy runs on a trial trace
//! ([`ResolutionContext::trial`]) and exactly one trial per expression is
//! committed:
//!
//! - [`resolve_simple_name`](CallExpressionResolver::resolve_simple_name):
//!   variable, then zero-argument call, then package/class qualifier
//! - [`resolve_call_expression`](CallExpressionResolver::resolve_call_expression):
//!   function call, then implicit `invoke` on a variable
//! - [`resolve_qualified_expression`](CallExpressionResolver::resolve_qualified_expression):
//!   the chain walk, link by link, left to right
//!
//! # Example
//!
//! ```ignore
//! let resolver = CallExpressionResolver::new(&table, &overloads, &qualifiers, &checker, &typer);
//! let mut trace = Trace::new();
//! let mut ctx = ResolutionContext::new(&mut trace);
//! let info = resolver.resolve_expression(expr, &mut ctx)?;
//! ```

mod calls;
mod identifiers;
mod member;

use tern_core::{
    DataType, Descriptor, DescriptorId, DescriptorTable, Diagnostic, DiagnosticKind, FlowValue,
    NodeId, Receiver, ResolutionError, Span, TypeChecker, TypeInfo,
};
use tern_syntax::Expr;
use tracing::trace;

use crate::call::Call;
use crate::context::ResolutionContext;
use crate::options::ResolverOptions;
use crate::overload::{CandidateFilter, OverloadResolver, OverloadResult, ResultCode};
use crate::services::{ConstantEvaluator, ExpressionTyper, NoConstantFolding, QualifierResolver};
use crate::trace::{BindingTrace, TraceRecord};

type Result<T> = std::result::Result<T, ResolutionError>;

/// Resolves names, calls and qualified expressions.
///
/// Holds the session's descriptor table and the collaborators it consults;
/// the trace travels in the [`ResolutionContext`] of each call.
pub struct CallExpressionResolver<'s> {
    table: &'s DescriptorTable,
    overloads: &'s dyn OverloadResolver,
    qualifiers: &'s dyn QualifierResolver,
    type_checker: &'s dyn TypeChecker,
    constants: &'s dyn ConstantEvaluator,
    expressions: &'s dyn ExpressionTyper,
    options: ResolverOptions,
}

impl<'s> CallExpressionResolver<'s> {
    /// Create a resolver with default options and no constant folding.
    pub fn new(
        table: &'s DescriptorTable,
        overloads: &'s dyn OverloadResolver,
        qualifiers: &'s dyn QualifierResolver,
        type_checker: &'s dyn TypeChecker,
        expressions: &'s dyn ExpressionTyper,
    ) -> Self {
        Self {
            table,
            overloads,
            qualifiers,
            type_checker,
            constants: &NoConstantFolding,
            expressions,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_constant_evaluator(mut self, constants: &'s dyn ConstantEvaluator) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn table(&self) -> &'s DescriptorTable {
        self.table
    }

    /// Resolve any expression without an explicit receiver.
    ///
    /// Names and calls go through the strategies here, qualified chains
    /// through the chain walk, everything else to the expression typer. The
    /// result is recorded on the expression's node.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_expression<'ast>(&self, expr: Expr<'ast>, ctx: &mut ResolutionContext<'_>) -> Result<TypeInfo> {
        let lhs_of_dot = ctx.lhs_of_dot && matches!(expr, Expr::Ident(_));
        let mut ctx = ctx.reborrow().with_lhs_of_dot(lhs_of_dot);
        let info = match expr {
            Expr::Ident(name) => self.resolve_simple_name(name, Receiver::None, false, &mut ctx)?,
            Expr::Call(call) => self.resolve_call_expression(call, Receiver::None, false, &mut ctx)?,
            Expr::Member(member) => return self.resolve_qualified_expression(member, &mut ctx),
            Expr::Paren(paren) => self.resolve_expression(*paren.expr, &mut ctx)?,
            other => return self.expressions.type_of(other, &mut ctx),
        };
        ctx.trace.record(TraceRecord::TypeInfo {
            node: expr.id(),
            info: info.clone(),
        });
        Ok(info)
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    fn descriptor(&self, id: DescriptorId) -> Result<&'s Descriptor> {
        self.table
            .get(id)
            .ok_or(ResolutionError::UnknownDescriptor { id })
    }

    /// Ask the overload service, then record what it decided.
    ///
    /// A single result binds the callee and records the resolved call; a
    /// missing name or an ambiguity is reported.
    fn run_overload(
        &self,
        call: &Call<'_>,
        filter: CandidateFilter,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<OverloadResult> {
        let result = self.overloads.resolve(call, filter, ctx)?;
        let callee = call.callee.deparenthesize();
        let name = call.callee_name().unwrap_or_default();
        trace!(node = %call.node, name, %filter, code = ?result.code(), "overload result");

        match result.code() {
            ResultCode::NameNotFound => ctx.trace.report(Diagnostic::new(
                DiagnosticKind::UnresolvedReference { name: name.to_string() },
                callee.id(),
                callee.span(),
            )),
            ResultCode::Ambiguity => ctx.trace.report(Diagnostic::new(
                DiagnosticKind::OverloadResolutionAmbiguity { name: name.to_string() },
                callee.id(),
                callee.span(),
            )),
            _ => {}
        }

        if let Some(resolved) = result.resulting_call() {
            ctx.trace.record(TraceRecord::ReferenceTarget {
                node: callee.id(),
                descriptor: resolved.candidate,
            });
            ctx.trace.record(TraceRecord::ResolvedCall {
                node: call.node,
                call: resolved.clone(),
            });
        }
        Ok(result)
    }

    /// Whether the single result is an object standing in for its class.
    fn is_fake_object(&self, result: &OverloadResult) -> Result<bool> {
        match result.resulting_call() {
            Some(call) => Ok(self.descriptor(call.candidate)?.is_object_qualifier()),
            None => Ok(false),
        }
    }

    /// Report a mismatch between `ty` and the expected type, if any.
    fn check_type(&self, ty: Option<&DataType>, node: NodeId, span: Span, ctx: &mut ResolutionContext<'_>) {
        let (Some(actual), Some(expected)) = (ty, ctx.expected_type.as_ref()) else {
            return;
        };
        if actual.is_error() || expected.is_error() || self.type_checker.is_subtype_of(actual, expected) {
            return;
        }
        let kind = DiagnosticKind::TypeMismatch {
            expected: expected.clone(),
            actual: actual.clone(),
        };
        ctx.trace.report(Diagnostic::new(kind, node, span));
    }

    /// The flow value of a receiver expression: the variable it reads when
    /// it reads one, otherwise the expression itself.
    fn flow_value(&self, receiver: Expr<'_>, trace: &dyn BindingTrace) -> FlowValue {
        let reference = match receiver.deparenthesize() {
            Expr::Member(member) => member.selector.id(),
            other => other.id(),
        };
        match trace.reference_target(reference) {
            Some(id) if matches!(self.table.get(id), Some(Descriptor::Variable(_))) => FlowValue::Variable(id),
            _ => FlowValue::Expression(receiver.id()),
        }
    }
}
