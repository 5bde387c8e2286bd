//! Expression syntax for tern.
//!
//! Parsing is not part of this crate: trees are built with [`AstBuilder`]
//! by a front end (or by tests) and then handed to resolution. Nodes are
//! allocated in a bumpalo arena and borrowed as `&'ast` references.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use tern_syntax::AstBuilder;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//!
//! // f(g(), h())
//! let call = ast.call(
//!     ast.name("f"),
//!     &[ast.call(ast.name("g"), &[]), ast.call(ast.name("h"), &[])],
//! );
//! assert_eq!(call.as_call().map(|c| c.argument_expressions().count()), Some(2));
//! ```

pub mod ast;

pub use ast::{
    Argument, AstBuilder, CallExpr, Expr, Ident, IdentExpr, LiteralExpr, LiteralKind, MemberExpr,
    OpaqueExpr, ParenExpr, SuperExpr, TypeArg,
};
