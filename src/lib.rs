//! Tern: name and call resolution for a statically typed compiler front end.
//!
//! This crate re-exports the workspace's layers:
//!
//! - [`core`]: identities, types, descriptors, diagnostics and errors
//! - [`syntax`]: the arena-allocated expression tree
//! - [`registry`]: the descriptor resolution cache over external declarations
//! - [`compiler`]: the resolution engine and argument generation
//!
//! and hosts the logging setup in [`tracing_config`].
//!
//! # Example
//!
//! ```
//! use tern::prelude::*;
//!
//! let mut trace = Trace::new();
//! let ctx = ResolutionContext::new(&mut trace);
//! assert!(ctx.is_independent());
//! ```

pub mod tracing_config;

pub use tern_compiler as compiler;
pub use tern_core as core;
pub use tern_registry as registry;
pub use tern_syntax as syntax;

pub use tracing_config::{LogFormat, init_tracing};

/// The names most callers need.
pub mod prelude {
    pub use tern_compiler::{
        ArgumentGenerator, BindingTrace, Call, CallBasedArgumentGenerator, CallExpressionResolver,
        CandidateFilter, ConstantEvaluator, ContextDependency, DefaultCallArgs, ExpressionCodegen,
        ExpressionTyper, OverloadResolver, OverloadResult, QualifierResolver, ResolutionContext,
        ResolvedCall, ResolvedValueArgument, ResolverOptions, Trace, TraceRecord,
    };
    pub use tern_core::{
        DataFlowInfo, DataType, Descriptor, DescriptorId, DescriptorTable, Diagnostic, DiagnosticKind,
        NodeId, QualifiedName, Qualifier, Receiver, TernError, TypeInfo,
    };
    pub use tern_registry::{DescriptorResolver, ExternalDeclarationProvider, InMemoryProvider};
    pub use tern_syntax::{AstBuilder, Expr};
}
