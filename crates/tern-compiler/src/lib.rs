//! Tern resolution engine
//!
//! Decides what names, calls and dotted chains denote, and lowers the
//! arguments of resolved calls.
//!
//! ## Architecture
//!
//! - Every strategy runs against a speculative [`TemporaryTrace`] layered
//!   over the session's [`Trace`]; exactly one trial per expression is
//!   committed
//! - Overload resolution, qualifier lookup, type checking, constant folding
//!   and the typing of other expressions are collaborators behind traits
//! - Contract violations are `Err`; problems in user code are diagnostics
//!   in the trace
//!
//! ## Modules
//!
//! - [`call`]: call views and resolved calls
//! - [`codegen`]: argument generation for resolved calls
//! - [`context`]: resolution context and trials
//! - [`expr`]: name, call and qualified-expression resolution
//! - [`overload`]: the overload resolution collaborator
//! - [`services`]: the other collaborators
//! - [`trace`]: binding trace and trial overlays

pub mod call;
pub mod codegen;
pub mod context;
pub mod expr;
mod options;
pub mod overload;
pub mod services;
pub mod trace;

pub use call::{Call, DataFlowForArguments, ResolvedCall, ResolvedValueArgument};
pub use codegen::{
    ArgumentGenerator, CallBasedArgumentGenerator, DefaultCallArgs, ExpressionCodegen, GeneratedArguments,
    GeneratedValueArgument, StackValue,
};
pub use context::{ContextDependency, ResolutionContext};
pub use expr::CallExpressionResolver;
pub use options::ResolverOptions;
pub use overload::{CandidateFilter, OverloadResolver, OverloadResult, ResultCode};
pub use services::{ConstantEvaluator, ExpressionTyper, NoConstantFolding, QualifierResolver};
pub use trace::{BindingTrace, TemporaryTrace, Trace, TraceDelta, TraceRecord};
