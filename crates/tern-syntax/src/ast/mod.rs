//! Abstract Syntax Tree (AST) for resolvable expressions.
//!
//! This module provides:
//! - Expression node definitions ([`expr`])
//! - [`AstBuilder`] for allocating trees into a bumpalo arena
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use tern_syntax::{AstBuilder, Expr};
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let expr = ast.safe_member(ast.name("user"), ast.name("email"));
//! assert!(matches!(expr, Expr::Member(m) if m.safe));
//! ```

mod builder;
pub mod expr;

pub use builder::AstBuilder;
pub use expr::*;

use tern_core::Span;

/// An identifier with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}
