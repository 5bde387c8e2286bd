//! Qualified expression resolution.
//!
//! `a.b?.c` is unrolled into links `(a, b)` and `(a.b, c)`, leftmost first.
//! The longest prefix of names denoting packages and classes is resolved up
//! front as qualifiers; the remaining links are walked left to right, each
//! selector resolved against the previous link's result.

use tern_core::{
    DataFlowInfo, Diagnostic, DiagnosticKind, Qualifier, Receiver, ResolutionError, TypeInfo,
};
use tern_syntax::{Expr, IdentExpr, MemberExpr};
use tracing::{debug, trace};

use super::{CallExpressionResolver, Result};
use crate::call::Call;
use crate::context::{ContextDependency, ResolutionContext};
use crate::overload::CandidateFilter;
use crate::trace::TraceRecord;

/// Per-chain state carried from one link to the next.
struct ChainState {
    /// Result of the previous selector; the receiver of the next link.
    receiver: TypeInfo,
    /// Result of the chain so far.
    result: TypeInfo,
    /// Facts that hold whether or not safe calls short-circuited.
    unconditional_flow: DataFlowInfo,
}

impl ChainState {
    fn new(receiver: TypeInfo) -> Self {
        Self {
            unconditional_flow: receiver.data_flow.clone(),
            result: receiver.clone(),
            receiver,
        }
    }
}

/// Links of a chain, leftmost first, and the expression they start from.
fn unroll<'ast>(expr: &'ast MemberExpr<'ast>) -> (Expr<'ast>, Vec<&'ast MemberExpr<'ast>>) {
    let mut links = vec![expr];
    let mut head = *expr.receiver;
    while let Expr::Member(member) = head {
        links.push(member);
        head = *member.receiver;
    }
    links.reverse();
    (head, links)
}

impl<'s> CallExpressionResolver<'s> {
    /// Resolve a qualified expression such as `a.b.c` or `a?.b()`.
    ///
    /// The result is the terminal link's type info.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_qualified_expression<'ast>(
        &self,
        expr: &'ast MemberExpr<'ast>,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<TypeInfo> {
        let (head, links) = unroll(expr);
        let start = self.resolve_qualifier_prefix(head, &links, ctx)?;
        let links = &links[start..];
        let Some(first) = links.first() else {
            return Err(ResolutionError::internal("qualified expression without links"));
        };

        let receiver = if ctx.trace.qualifier(first.receiver.id()).is_some() {
            TypeInfo::no_type(ctx.data_flow.clone())
        } else {
            let mut head_ctx = ctx
                .reborrow()
                .with_expected_type(None)
                .with_dependency(ContextDependency::Independent)
                .with_lhs_of_dot(true);
            self.resolve_expression(*first.receiver, &mut head_ctx)?
        };

        let mut state = ChainState::new(receiver);
        let last = links.len() - 1;
        for (index, link) in links.iter().enumerate() {
            if let Some(folded) = self.resolve_link(link, index == last, &mut state, ctx)? {
                return Ok(folded);
            }
        }
        Ok(state.result)
    }

    /// Resolve the leading packages and classes of a chain as qualifiers.
    ///
    /// Returns the index of the first link to walk: the one whose receiver
    /// is the last qualifier.
    fn resolve_qualifier_prefix<'ast>(
        &self,
        head: Expr<'ast>,
        links: &[&'ast MemberExpr<'ast>],
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<usize> {
        let Expr::Ident(name) = head else {
            return Ok(0);
        };
        if ctx.trace.qualifier(name.id).is_none() {
            if self.is_value(name, ctx)? {
                return Ok(0);
            }
            let Some(qualifier) = self.qualifiers.resolve_name_as_qualifier(name, &Receiver::None, ctx)? else {
                return Ok(0);
            };
            ctx.trace.record(TraceRecord::Qualifier {
                node: name.id,
                qualifier,
            });
        }
        let Some(mut qualifier) = ctx.trace.qualifier(name.id) else {
            return Ok(0);
        };

        // The terminal selector is never part of the prefix.
        let Some((_, candidates)) = links.split_last() else {
            return Ok(0);
        };
        let mut start = 0;
        for link in candidates {
            let Expr::Ident(selector) = *link.selector else {
                break;
            };
            if link.safe {
                break;
            }
            let receiver = Receiver::Qualifier {
                node: link.receiver.id(),
                qualifier,
            };
            let Some(next) = self.qualifiers.resolve_name_as_qualifier(selector, &receiver, ctx)? else {
                break;
            };
            ctx.trace.record(TraceRecord::Qualifier {
                node: selector.id,
                qualifier: next,
            });
            ctx.trace.record(TraceRecord::Qualifier {
                node: link.id,
                qualifier: next,
            });
            qualifier = next;
            start += 1;
        }
        trace!(node = %name.id, prefix = start, "qualifier prefix resolved");
        Ok(start)
    }

    /// Whether a chain head name denotes a value rather than a scope.
    fn is_value<'ast>(&self, name: &'ast IdentExpr<'ast>, ctx: &mut ResolutionContext<'_>) -> Result<bool> {
        let call = Call::name(name, Receiver::None, false);
        let (result, _discarded) = ctx.trial("value probe", |trial| {
            self.overloads.resolve(&call, CandidateFilter::Variables, trial)
        });
        let result = result?;
        if result.is_nothing() || result.has_wrong_receiver() {
            return Ok(false);
        }
        Ok(!self.is_fake_object(&result)?)
    }

    /// Walk one link. Returns `Some` when the chain folded to a constant.
    fn resolve_link<'ast>(
        &self,
        link: &'ast MemberExpr<'ast>,
        last: bool,
        state: &mut ChainState,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Option<TypeInfo>> {
        let receiver_node = link.receiver.id();
        let receiver_qualifier = ctx.trace.qualifier(receiver_node);
        let receiver_type = state.receiver.type_or_error();
        let receiver = match receiver_qualifier {
            Some(qualifier) => Receiver::Qualifier {
                node: receiver_node,
                qualifier,
            },
            None => Receiver::Expression {
                node: receiver_node,
                ty: receiver_type.clone(),
            },
        };

        // Receiver: pick the facts the selector runs under.
        let mut flow = if receiver_type.nullable && !link.safe {
            state.unconditional_flow.clone()
        } else {
            state.receiver.data_flow.clone()
        };
        if link.safe && matches!(receiver, Receiver::Expression { .. }) {
            let value = self.flow_value(*link.receiver, &*ctx.trace);
            if flow.can_be_null(value, &receiver_type) {
                flow = flow.disequate_with_null(value);
            } else if link.receiver.is_super() {
                ctx.trace.report(Diagnostic::new(DiagnosticKind::UnexpectedSafeCall, link.id, link.span));
            } else if self.options.report_unnecessary_safe_call {
                ctx.trace.report(Diagnostic::new(
                    DiagnosticKind::UnnecessarySafeCall {
                        receiver_type: receiver_type.clone(),
                    },
                    link.id,
                    link.span,
                ));
            }
        }

        let (expected_type, dependency) = if last {
            (ctx.expected_type.clone(), ctx.dependency)
        } else {
            (None, ContextDependency::Independent)
        };
        let mut link_ctx = ctx
            .reborrow()
            .with_expected_type(expected_type)
            .with_dependency(dependency)
            .with_data_flow(flow)
            .with_lhs_of_dot(false);

        // Selector.
        let selector_info = match *link.selector {
            Expr::Call(call) => self.resolve_call_without_final_check(call, receiver.clone(), link.safe, &mut link_ctx)?,
            Expr::Ident(name) => self.resolve_simple_name(name, receiver.clone(), link.safe, &mut link_ctx)?,
            other => {
                link_ctx.trace.report(Diagnostic::new(DiagnosticKind::IllegalSelector, other.id(), other.span()));
                TypeInfo::no_type(link_ctx.data_flow.clone())
            }
        };

        let mut selector_type = selector_info.ty.clone();
        state.receiver = selector_info;
        if link.safe && receiver_type.nullable && let Some(ty) = selector_type.take() {
            let ty = ty.make_nullable();
            selector_type = Some(ty.clone());
            state.receiver = state.receiver.clone().replace_type(Some(ty));
        }
        if let Some(ty) = selector_type {
            link_ctx.trace.record(TraceRecord::Type {
                node: link.selector.id(),
                ty,
            });
        }
        state.result = state.receiver.clone().replace_data_flow(state.unconditional_flow.clone());
        if !link.safe {
            state.unconditional_flow = state.receiver.data_flow.clone();
        }

        // A qualifier receiver learns which member it led to.
        if let Some(qualifier) = receiver_qualifier {
            let callee = match link.selector.deparenthesize() {
                Expr::Call(call) => call.callee.deparenthesize(),
                other => other,
            };
            let target = link_ctx.trace.reference_target(callee.id());
            self.qualifiers
                .resolve_as_receiver(qualifier, receiver_node, target, &mut link_ctx)?;
        }

        if let Some(qualifier) = link_ctx.trace.qualifier(link.selector.id())
            && link_ctx.trace.qualifier(link.id).is_none()
        {
            link_ctx.trace.record(TraceRecord::Qualifier {
                node: link.id,
                qualifier,
            });
        }

        if self.options.check_nested_class_access {
            self.check_nested_class_access(link, &mut link_ctx)?;
        }

        if self.options.fold_constants
            && last
            && let Some(constant) = self.constants.evaluate(
                Expr::Member(link),
                &*link_ctx.trace,
                link_ctx.expected_type.as_ref(),
            )
            && constant.is_pure
        {
            debug!(node = %link.id, "qualified expression folded to a constant");
            let info = TypeInfo::new(Some(constant.ty.clone()), link_ctx.data_flow.clone());
            if link_ctx.is_independent() {
                self.check_type(info.ty.as_ref(), link.id, link.span, &mut link_ctx);
            }
            link_ctx.trace.record(TraceRecord::ConstantValue {
                node: link.id,
                constant,
            });
            link_ctx.trace.record(TraceRecord::TypeInfo {
                node: link.id,
                info: info.clone(),
            });
            return Ok(Some(info));
        }

        if link_ctx.is_independent() {
            let result_type = state.result.ty.clone();
            self.check_type(result_type.as_ref(), link.id, link.span, &mut link_ctx);
        }

        if !link_ctx.trace.is_processed(link.id) {
            link_ctx.trace.record(TraceRecord::Processed { node: link.id });
            link_ctx.trace.record(TraceRecord::TypeInfo {
                node: link.id,
                info: state.result.clone(),
            });
            link_ctx.trace.record(TraceRecord::DataFlowInfo {
                node: link.id,
                flow: state.unconditional_flow.clone(),
            });
        }
        Ok(None)
    }

    /// `a.B` where `a` is a value and `B` a nested class.
    fn check_nested_class_access(&self, link: &MemberExpr<'_>, ctx: &mut ResolutionContext<'_>) -> Result<()> {
        if ctx.trace.qualifier(link.receiver.id()).is_some() {
            return Ok(());
        }
        match ctx.trace.qualifier(link.id) {
            None => Ok(()),
            Some(Qualifier::Class(class)) => {
                let selector = link.selector;
                ctx.trace.report(Diagnostic::new(
                    DiagnosticKind::NestedClassAccessedViaInstanceReference { class },
                    selector.id(),
                    selector.span(),
                ));
                Ok(())
            }
            Some(Qualifier::Package(_)) => Err(ResolutionError::PackageViaInstance { node: link.id }),
        }
    }
}
