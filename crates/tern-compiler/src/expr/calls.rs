//! Call expression resolution.
//!
//! Resolves `f(args)`, `f<T>` and `f { }` forms:
//! - Function candidates first; constructors of annotation, enum and sealed
//!   classes are reported
//! - Failing that, a callee name that is a value is reported as not callable
//! - A control escape inside an argument carries over to the call's result

use tern_core::{
    ConstructorDescriptor, DataType, Descriptor, Diagnostic, DiagnosticKind, Qualifier, Receiver,
    ResolutionError, TypeInfo,
};
use tern_syntax::{CallExpr, Expr};
use tracing::debug;

use super::{CallExpressionResolver, Result};
use crate::call::{Call, ResolvedCall};
use crate::context::ResolutionContext;
use crate::overload::CandidateFilter;

impl<'s> CallExpressionResolver<'s> {
    /// Resolve a call expression and check its type against the expected
    /// type when the context is independent.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_call_expression<'ast>(
        &self,
        call: &'ast CallExpr<'ast>,
        receiver: Receiver,
        safe: bool,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<TypeInfo> {
        let info = self.resolve_call_without_final_check(call, receiver, safe, ctx)?;
        if ctx.is_independent() {
            self.check_type(info.ty.as_ref(), call.id, call.span, ctx);
        }
        Ok(info)
    }

    /// Resolve a call expression; the caller checks the type.
    pub(super) fn resolve_call_without_final_check<'ast>(
        &self,
        call_expr: &'ast CallExpr<'ast>,
        receiver: Receiver,
        safe: bool,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<TypeInfo> {
        let mut ctx = ctx.reborrow().with_lhs_of_dot(false);
        let call = Call::from_call(call_expr, receiver.clone(), safe);

        let (function, function_delta) = ctx.trial("function call", |trial| {
            self.run_overload(&call, CandidateFilter::Functions, trial)
        });
        let function = function?;
        if !function.is_nothing() {
            ctx.commit(function_delta);
            let resolved = function.resulting_call();
            let descriptor = match resolved {
                Some(resolved) => Some(self.descriptor(resolved.candidate)?),
                None => None,
            };

            if call_expr.value_args.is_none() && call_expr.lambda_args.is_empty() {
                // only type arguments
                let has_value_parameters = descriptor.is_none_or(|d| !d.value_parameters().is_empty());
                ctx.trace.report(Diagnostic::new(
                    DiagnosticKind::FunctionCallExpected {
                        name: call.callee_name().unwrap_or_default().to_string(),
                        has_value_parameters,
                    },
                    call_expr.id,
                    call_expr.span,
                ));
            }

            let Some(resolved) = resolved else {
                return Ok(TypeInfo::no_type(ctx.data_flow.clone()));
            };
            if let Some(Descriptor::Constructor(constructor)) = descriptor {
                self.check_constructor_call(constructor, call_expr, &mut ctx)?;
            }
            return Ok(self.call_type_info(resolved, &call, &ctx));
        }

        if let Expr::Ident(callee) = *call_expr.callee
            && call_expr.type_args.is_none()
        {
            let ((variable, qualifier), variable_delta) = ctx.trial("variable with invoke", |trial| {
                let outcome = self.resolve_variable(callee, &receiver, safe, false, trial);
                (outcome, trial.trace.qualifier(callee.id))
            });
            let variable = variable?;
            if variable.is_found() && !qualifier.is_some_and(Qualifier::is_package) {
                debug!(node = %call_expr.id, name = callee.name(), "callee is a value, not a function");
                ctx.commit(variable_delta);
                let ty = variable.ty().cloned().unwrap_or_else(DataType::error);
                ctx.trace.report(Diagnostic::new(
                    DiagnosticKind::FunctionExpected {
                        name: callee.name().to_string(),
                        ty,
                    },
                    callee.id,
                    callee.span,
                ));
                return Ok(TypeInfo::no_type(ctx.data_flow.clone()));
            }
        }

        ctx.commit(function_delta);
        Ok(TypeInfo::no_type(ctx.data_flow.clone()))
    }

    /// Report direct construction of annotation, enum and sealed classes.
    ///
    /// At most one report per call.
    fn check_constructor_call(
        &self,
        constructor: &ConstructorDescriptor,
        call: &CallExpr<'_>,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<()> {
        let owner = constructor.owner;
        let class = self
            .table
            .class(owner)
            .ok_or(ResolutionError::UnknownDescriptor { id: owner })?;

        let kind = if class.is_annotation() {
            (!ctx.in_annotation_argument).then_some(DiagnosticKind::AnnotationClassConstructorCall { class: owner })
        } else if class.is_enum() {
            Some(DiagnosticKind::EnumClassConstructorCall { class: owner })
        } else if class.is_sealed() {
            Some(DiagnosticKind::SealedClassConstructorCall { class: owner })
        } else {
            None
        };
        if let Some(kind) = kind {
            debug!(node = %call.id, class = %class.name, diagnostic = kind.name(), "illegal constructor call");
            ctx.trace.report(Diagnostic::new(kind, call.id, call.span));
        }
        Ok(())
    }

    /// Result of a resolved call.
    ///
    /// The first argument that may jump out makes the call jump out too,
    /// with that argument's jump flow; later arguments are not consulted.
    fn call_type_info(&self, resolved: &ResolvedCall, call: &Call<'_>, ctx: &ResolutionContext<'_>) -> TypeInfo {
        let result_flow = resolved.data_flow.result.clone();
        for argument in call.argument_expressions() {
            if let Some(info) = ctx.trace.type_info(argument.id())
                && info.jump_out_possible
            {
                debug!(node = %call.node, argument = %argument.id(), "argument may jump out");
                return TypeInfo::with_jump(resolved.return_type.clone(), result_flow, info.jump_flow.clone());
            }
        }
        TypeInfo::new(resolved.return_type.clone(), result_flow)
    }
}
