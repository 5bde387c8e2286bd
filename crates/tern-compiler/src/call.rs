//! Call sites and their resolutions.

use tern_core::{DataFlowInfo, DataType, DescriptorId, NodeId, Receiver, Span};
use tern_syntax::{Argument, CallExpr, Expr, IdentExpr, TypeArg};

// ============================================================================
// Call
// ============================================================================

/// An unresolved call site.
///
/// A bare name is a call too: a property access or a zero-argument call of
/// the name, depending on which candidates the overload service is asked
/// for.
#[derive(Debug, Clone, PartialEq)]
pub struct Call<'ast> {
    /// The call element: the call expression, or the name itself.
    pub node: NodeId,
    pub span: Span,
    /// The expression being called.
    pub callee: Expr<'ast>,
    pub receiver: Receiver,
    /// Reached through `?.`.
    pub safe: bool,
    /// `None` when the call has no type argument list.
    pub type_args: Option<&'ast [TypeArg<'ast>]>,
    /// `None` when the call has no parenthesized argument list.
    pub value_args: Option<&'ast [Argument<'ast>]>,
    pub lambda_args: &'ast [&'ast Expr<'ast>],
}

impl<'ast> Call<'ast> {
    /// A bare name, with no arguments.
    pub fn name(ident: &'ast IdentExpr<'ast>, receiver: Receiver, safe: bool) -> Self {
        Self {
            node: ident.id,
            span: ident.span,
            callee: Expr::Ident(ident),
            receiver,
            safe,
            type_args: None,
            value_args: None,
            lambda_args: &[],
        }
    }

    /// A call expression.
    pub fn from_call(call: &'ast CallExpr<'ast>, receiver: Receiver, safe: bool) -> Self {
        Self {
            node: call.id,
            span: call.span,
            callee: *call.callee,
            receiver,
            safe,
            type_args: call.type_args,
            value_args: call.value_args,
            lambda_args: call.lambda_args,
        }
    }

    /// The callee's name when it is a simple name.
    pub fn callee_name(&self) -> Option<&'ast str> {
        self.callee.deparenthesize().as_ident().map(IdentExpr::name)
    }

    pub fn value_arguments(&self) -> &'ast [Argument<'ast>] {
        self.value_args.unwrap_or(&[])
    }

    /// Argument expressions in source order: value arguments, then lambdas.
    pub fn argument_expressions(&self) -> impl Iterator<Item = &'ast Expr<'ast>> + use<'ast> {
        self.value_arguments()
            .iter()
            .filter_map(|a| a.value)
            .chain(self.lambda_args.iter().copied())
    }

    pub fn has_explicit_type_arguments(&self) -> bool {
        self.type_args.is_some()
    }
}

// ============================================================================
// Resolved call
// ============================================================================

/// How one formal parameter receives its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValueArgument {
    /// The argument expression with this node, `None` after a syntax error.
    Expression(Option<NodeId>),
    /// No argument given; the declared default applies.
    Default,
    /// Zero or more arguments packed into the vararg array.
    Varargs(Vec<Option<NodeId>>),
}

impl ResolvedValueArgument {
    pub fn is_default(&self) -> bool {
        matches!(self, ResolvedValueArgument::Default)
    }
}

/// Flow facts around argument evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataFlowForArguments {
    /// Facts before the first argument.
    pub initial: DataFlowInfo,
    /// Facts after the last argument.
    pub result: DataFlowInfo,
    /// Facts on the escape path, when an argument may jump out.
    pub jump: Option<DataFlowInfo>,
}

/// A call bound to a single declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub call: NodeId,
    /// The chosen declaration.
    pub candidate: DescriptorId,
    pub receiver: Receiver,
    /// Resulting return type, after substitution.
    pub return_type: Option<DataType>,
    /// One entry per formal parameter, by parameter index.
    pub value_arguments: Vec<ResolvedValueArgument>,
    pub data_flow: DataFlowForArguments,
}

impl ResolvedCall {
    pub fn new(call: NodeId, candidate: DescriptorId, return_type: Option<DataType>) -> Self {
        Self {
            call,
            candidate,
            receiver: Receiver::None,
            return_type,
            value_arguments: Vec::new(),
            data_flow: DataFlowForArguments::default(),
        }
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<ResolvedValueArgument>) -> Self {
        self.value_arguments = arguments;
        self
    }

    pub fn with_data_flow(mut self, initial: DataFlowInfo, result: DataFlowInfo) -> Self {
        self.data_flow = DataFlowForArguments {
            initial,
            result,
            jump: self.data_flow.jump.take(),
        };
        self
    }

    pub fn with_jump_flow(mut self, jump: DataFlowInfo) -> Self {
        self.data_flow.jump = Some(jump);
        self
    }
}
