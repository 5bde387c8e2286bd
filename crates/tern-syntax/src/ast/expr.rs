//! Expression AST nodes consumed by resolution.
//!
//! Provides nodes for:
//! - Names (`foo`)
//! - Calls (`f(a, b)`, `f<T>`, `f { ... }`)
//! - Member access (`a.b`, `a?.b`), left associative so `a.b.c` is
//!   `Member(Member(a, b), c)`
//! - Literals, `super`, parentheses
//! - Opaque expressions (lambdas, operators, ...) typed by an external typer
//!
//! Every node carries the [`NodeId`] the binding trace keys its records by.

use crate::ast::Ident;
use tern_core::{NodeId, Span};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal value
    Literal(&'ast LiteralExpr<'ast>),
    /// Simple name reference
    Ident(&'ast IdentExpr<'ast>),
    /// Call with optional type and value arguments
    Call(&'ast CallExpr<'ast>),
    /// Member access (`.` or `?.`)
    Member(&'ast MemberExpr<'ast>),
    /// `super`
    Super(&'ast SuperExpr),
    /// Parenthesized expression
    Paren(&'ast ParenExpr<'ast>),
    /// Anything resolution does not look inside
    Opaque(&'ast OpaqueExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the node id of this expression.
    pub fn id(&self) -> NodeId {
        match self {
            Self::Literal(e) => e.id,
            Self::Ident(e) => e.id,
            Self::Call(e) => e.id,
            Self::Member(e) => e.id,
            Self::Super(e) => e.id,
            Self::Paren(e) => e.id,
            Self::Opaque(e) => e.id,
        }
    }

    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Ident(e) => e.span,
            Self::Call(e) => e.span,
            Self::Member(e) => e.span,
            Self::Super(e) => e.span,
            Self::Paren(e) => e.span,
            Self::Opaque(e) => e.span,
        }
    }

    pub fn as_ident(&self) -> Option<&'ast IdentExpr<'ast>> {
        match self {
            Self::Ident(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&'ast CallExpr<'ast>> {
        match self {
            Self::Call(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&'ast MemberExpr<'ast>> {
        match self {
            Self::Member(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn is_super(&self) -> bool {
        matches!(self, Self::Super(_))
    }

    /// Strip any number of enclosing parentheses.
    pub fn deparenthesize(&self) -> Expr<'ast> {
        let mut expr = *self;
        while let Self::Paren(p) = expr {
            expr = *p.expr;
        }
        expr
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub id: NodeId,
    pub kind: LiteralKind<'ast>,
    pub span: Span,
}

/// The kind of literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind<'ast> {
    Int(i64),
    Double(f64),
    Bool(bool),
    Char(char),
    String(&'ast str),
    Null,
}

/// A simple name expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentExpr<'ast> {
    pub id: NodeId,
    pub ident: Ident<'ast>,
    pub span: Span,
}

impl<'ast> IdentExpr<'ast> {
    #[inline]
    pub fn name(&self) -> &'ast str {
        self.ident.name
    }
}

/// An explicit type argument, e.g. the `String` in `listOf<String>()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeArg<'ast> {
    pub name: Ident<'ast>,
    pub nullable: bool,
    pub span: Span,
}

/// One value argument of a call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argument<'ast> {
    /// Name, for `f(x = 1)`.
    pub name: Option<Ident<'ast>>,
    /// Whether the argument is spread into a vararg (`f(*xs)`).
    pub spread: bool,
    /// The argument expression. Absent only after a syntax error.
    pub value: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

/// A call expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub id: NodeId,
    /// The called expression; usually a name.
    pub callee: &'ast Expr<'ast>,
    /// Explicit type arguments, `None` when no `<...>` was written.
    pub type_args: Option<&'ast [TypeArg<'ast>]>,
    /// Value arguments, `None` when no parenthesized list was written.
    pub value_args: Option<&'ast [Argument<'ast>]>,
    /// Trailing lambdas written after the argument list.
    pub lambda_args: &'ast [&'ast Expr<'ast>],
    pub span: Span,
}

impl<'ast> CallExpr<'ast> {
    /// The callee's name, when the callee is a simple name.
    pub fn callee_name(&self) -> Option<&'ast IdentExpr<'ast>> {
        self.callee.as_ident()
    }

    /// Argument expressions in source order, parenthesized ones first.
    pub fn argument_expressions(&self) -> impl Iterator<Item = &'ast Expr<'ast>> + use<'ast> {
        let values = self.value_args.unwrap_or(&[]);
        values
            .iter()
            .filter_map(|a| a.value)
            .chain(self.lambda_args.iter().copied())
    }
}

/// A member access `receiver.selector` or `receiver?.selector`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberExpr<'ast> {
    pub id: NodeId,
    pub receiver: &'ast Expr<'ast>,
    /// A name or a call in well-formed code.
    pub selector: &'ast Expr<'ast>,
    /// `?.` rather than `.`
    pub safe: bool,
    pub span: Span,
}

/// The `super` keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperExpr {
    pub id: NodeId,
    pub span: Span,
}

/// A parenthesized expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    pub id: NodeId,
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

/// An expression resolution treats as a black box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpaqueExpr<'ast> {
    pub id: NodeId,
    /// Free-form description, e.g. `"lambda"` or `"this"`.
    pub label: &'ast str,
    pub span: Span,
}
