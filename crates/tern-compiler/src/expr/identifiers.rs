//! Bare name resolution.
//!
//! A name is tried as a variable, then as a call without arguments, then as
//! a package or class qualifier. Each attempt runs on its own trial trace;
//! the first that applies is committed and the others are dropped.

use tern_core::{DataType, Diagnostic, DiagnosticKind, Qualifier, Receiver, TypeInfo};
use tern_syntax::IdentExpr;
use tracing::debug;

use super::{CallExpressionResolver, Result};
use crate::call::Call;
use crate::context::ResolutionContext;
use crate::overload::CandidateFilter;
use crate::trace::TraceRecord;

/// Outcome of resolving a name as a variable.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum VariableOutcome {
    /// Candidates exist; the type is known when there is a single one.
    Resolved(Option<DataType>),
    /// An object standing in for its class, followed by a dot. Treated as a
    /// qualifier first, the object's type is the fallback.
    Deferred(Option<DataType>),
    Unresolved,
}

impl VariableOutcome {
    /// Candidates were found, final or not.
    pub(super) fn is_found(&self) -> bool {
        !matches!(self, VariableOutcome::Unresolved)
    }

    pub(super) fn ty(&self) -> Option<&DataType> {
        match self {
            VariableOutcome::Resolved(ty) | VariableOutcome::Deferred(ty) => ty.as_ref(),
            VariableOutcome::Unresolved => None,
        }
    }
}

impl<'s> CallExpressionResolver<'s> {
    /// Resolve a bare name, optionally against a receiver.
    ///
    /// Never fails for unresolved user code: when nothing applies the
    /// variable attempt, with its unresolved-reference report, is committed
    /// and the result has no type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_simple_name<'ast>(
        &self,
        name: &'ast IdentExpr<'ast>,
        receiver: Receiver,
        safe: bool,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<TypeInfo> {
        let lhs_of_dot = ctx.lhs_of_dot;
        let mut ctx = ctx.reborrow().with_lhs_of_dot(false);
        let flow = ctx.data_flow.clone();

        // 1. variable
        let (variable, variable_delta) = ctx.trial("variable", |trial| {
            self.resolve_variable(name, &receiver, safe, lhs_of_dot, trial)
        });
        let variable = variable?;
        if let VariableOutcome::Resolved(ty) = &variable {
            debug!(node = %name.id, name = name.name(), "name resolved as variable");
            ctx.commit(variable_delta);
            return Ok(TypeInfo::new(ty.clone(), flow));
        }

        // 2. function called without arguments
        let call = Call::name(name, receiver.clone(), safe);
        let (function, function_delta) = ctx.trial("function", |trial| {
            self.run_overload(&call, CandidateFilter::Functions, trial)
        });
        let function = function?;
        if !function.is_nothing() {
            let descriptor = match function.resulting_call() {
                Some(resolved) => Some(self.descriptor(resolved.candidate)?),
                None => None,
            };
            if !descriptor.is_some_and(|d| d.is_constructor()) {
                debug!(node = %name.id, name = name.name(), "name resolved as function");
                ctx.commit(function_delta);
                let has_value_parameters = descriptor.is_none_or(|d| !d.value_parameters().is_empty());
                ctx.trace.report(Diagnostic::new(
                    DiagnosticKind::FunctionCallExpected {
                        name: name.name().to_string(),
                        has_value_parameters,
                    },
                    name.id,
                    name.span,
                ));
                let ty = function.resulting_call().and_then(|c| c.return_type.clone());
                return Ok(TypeInfo::new(ty, flow));
            }
        }

        // 3. package or class
        let (qualifier, qualifier_delta) = ctx.trial("qualifier", |trial| -> Result<Option<Qualifier>> {
            let Some(qualifier) = self.qualifiers.resolve_name_as_qualifier(name, &receiver, trial)? else {
                return Ok(None);
            };
            trial.trace.record(TraceRecord::Qualifier {
                node: name.id,
                qualifier,
            });
            self.qualifiers.resolve_as_standalone(qualifier, name.id, trial)?;
            Ok(Some(qualifier))
        });
        if let Some(qualifier) = qualifier? {
            debug!(node = %name.id, name = name.name(), %qualifier, "name resolved as qualifier");
            ctx.commit(qualifier_delta);
            return Ok(TypeInfo::no_type(flow));
        }

        debug!(node = %name.id, name = name.name(), deferred = variable.is_found(), "no strategy applied");
        ctx.commit(variable_delta);
        Ok(TypeInfo::new(variable.ty().cloned(), flow))
    }

    /// Resolve `name` against variable-like candidates.
    pub(super) fn resolve_variable<'ast>(
        &self,
        name: &'ast IdentExpr<'ast>,
        receiver: &Receiver,
        safe: bool,
        lhs_of_dot: bool,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<VariableOutcome> {
        let call = Call::name(name, receiver.clone(), safe);
        let result = self.run_overload(&call, CandidateFilter::Variables, ctx)?;
        if result.is_nothing() {
            return Ok(VariableOutcome::Unresolved);
        }
        let ty = result.resulting_call().and_then(|c| c.return_type.clone());
        if lhs_of_dot && self.is_fake_object(&result)? {
            return Ok(VariableOutcome::Deferred(ty));
        }
        Ok(VariableOutcome::Resolved(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_type() {
        let resolved = VariableOutcome::Resolved(Some(DataType::unit()));
        assert!(resolved.is_found());
        assert_eq!(resolved.ty(), Some(&DataType::unit()));

        let deferred = VariableOutcome::Deferred(None);
        assert!(deferred.is_found());
        assert_eq!(deferred.ty(), None);

        assert!(!VariableOutcome::Unresolved.is_found());
    }
}
