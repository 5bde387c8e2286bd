//! Arena-backed construction of expression trees.
//!
//! [`AstBuilder`] allocates nodes in a bumpalo arena and hands out dense
//! [`NodeId`]s in creation order. Spans are synthesized from a running
//! offset so every node has a distinct, properly nested location.

use std::cell::Cell;

use bumpalo::Bump;
use tern_core::{NodeId, Span};

use super::expr::{
    Argument, CallExpr, Expr, IdentExpr, LiteralExpr, LiteralKind, MemberExpr, OpaqueExpr,
    ParenExpr, SuperExpr, TypeArg,
};
use super::Ident;

/// Builds expressions into an arena.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use tern_syntax::AstBuilder;
///
/// let arena = Bump::new();
/// let ast = AstBuilder::new(&arena);
///
/// // java.util.List.of(1)
/// let call = ast.call(ast.name("of"), &[ast.int(1)]);
/// let expr = ast.member(ast.dotted("java.util.List"), call);
/// assert!(expr.as_member().is_some());
/// ```
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_id: Cell<u32>,
    offset: Cell<u32>,
    line: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_id: Cell::new(0),
            offset: Cell::new(0),
            line: Cell::new(1),
        }
    }

    /// The arena nodes are allocated in.
    pub fn arena(&self) -> &'ast Bump {
        self.arena
    }

    /// Set the line subsequent leaves are placed on.
    pub fn set_line(&self, line: u32) {
        self.line.set(line);
    }

    /// Number of nodes created so far.
    pub fn node_count(&self) -> u32 {
        self.next_id.get()
    }

    fn next_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId::new(id)
    }

    fn leaf_span(&self, width: usize) -> Span {
        let start = self.offset.get();
        let end = start + width.max(1) as u32;
        // one byte of separation between leaves
        self.offset.set(end + 1);
        Span::new(start, end, self.line.get())
    }

    fn ident(&self, name: &str) -> Ident<'ast> {
        let span = self.leaf_span(name.len());
        Ident::new(self.arena.alloc_str(name), span)
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    /// A simple name.
    pub fn name(&self, name: &str) -> &'ast Expr<'ast> {
        let ident = self.ident(name);
        let node = self.arena.alloc(IdentExpr {
            id: self.next_id(),
            ident,
            span: ident.span,
        });
        self.arena.alloc(Expr::Ident(node))
    }

    fn literal(&self, kind: LiteralKind<'ast>, width: usize) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(LiteralExpr {
            id: self.next_id(),
            kind,
            span: self.leaf_span(width),
        });
        self.arena.alloc(Expr::Literal(node))
    }

    pub fn int(&self, value: i64) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Int(value), value.to_string().len())
    }

    pub fn boolean(&self, value: bool) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Bool(value), if value { 4 } else { 5 })
    }

    pub fn string(&self, value: &str) -> &'ast Expr<'ast> {
        let value: &'ast str = self.arena.alloc_str(value);
        self.literal(LiteralKind::String(value), value.len() + 2)
    }

    pub fn null(&self) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Null, 4)
    }

    /// `super`
    pub fn super_(&self) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(SuperExpr {
            id: self.next_id(),
            span: self.leaf_span(5),
        });
        self.arena.alloc(Expr::Super(node))
    }

    /// An opaque expression, e.g. `ast.opaque("lambda")`.
    pub fn opaque(&self, label: &str) -> &'ast Expr<'ast> {
        let label: &'ast str = self.arena.alloc_str(label);
        let node = self.arena.alloc(OpaqueExpr {
            id: self.next_id(),
            label,
            span: self.leaf_span(label.len()),
        });
        self.arena.alloc(Expr::Opaque(node))
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// A positional argument.
    pub fn arg(&self, value: &'ast Expr<'ast>) -> Argument<'ast> {
        Argument {
            name: None,
            spread: false,
            value: Some(value),
            span: value.span(),
        }
    }

    /// A named argument `name = value`.
    pub fn named_arg(&self, name: &str, value: &'ast Expr<'ast>) -> Argument<'ast> {
        let name = self.ident(name);
        Argument {
            name: Some(name),
            spread: false,
            value: Some(value),
            span: name.span.merge(value.span()),
        }
    }

    /// A spread argument `*value`.
    pub fn spread_arg(&self, value: &'ast Expr<'ast>) -> Argument<'ast> {
        Argument {
            name: None,
            spread: true,
            value: Some(value),
            span: value.span(),
        }
    }

    /// An argument whose expression failed to parse.
    pub fn missing_arg(&self) -> Argument<'ast> {
        Argument {
            name: None,
            spread: false,
            value: None,
            span: self.leaf_span(0),
        }
    }

    /// A type argument.
    pub fn type_arg(&self, name: &str) -> TypeArg<'ast> {
        let name = self.ident(name);
        TypeArg {
            name,
            nullable: false,
            span: name.span,
        }
    }

    // ========================================================================
    // Calls
    // ========================================================================

    /// `callee(args...)` with positional arguments.
    pub fn call(&self, callee: &'ast Expr<'ast>, args: &[&'ast Expr<'ast>]) -> &'ast Expr<'ast> {
        let args: Vec<_> = args.iter().map(|&a| self.arg(a)).collect();
        self.call_with(callee, None, Some(&args), &[])
    }

    /// `callee(args...)` with prepared arguments.
    pub fn call_args(&self, callee: &'ast Expr<'ast>, args: &[Argument<'ast>]) -> &'ast Expr<'ast> {
        self.call_with(callee, None, Some(args), &[])
    }

    /// `callee<T...>` without an argument list.
    pub fn call_type_args_only(&self, callee: &'ast Expr<'ast>, type_args: &[&str]) -> &'ast Expr<'ast> {
        let type_args: Vec<_> = type_args.iter().map(|t| self.type_arg(t)).collect();
        self.call_with(callee, Some(&type_args), None, &[])
    }

    /// `callee { lambda }` without an argument list.
    pub fn call_trailing_lambda(&self, callee: &'ast Expr<'ast>, lambda: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        self.call_with(callee, None, None, &[lambda])
    }

    /// A call with every part spelled out.
    pub fn call_with(
        &self,
        callee: &'ast Expr<'ast>,
        type_args: Option<&[TypeArg<'ast>]>,
        value_args: Option<&[Argument<'ast>]>,
        lambda_args: &[&'ast Expr<'ast>],
    ) -> &'ast Expr<'ast> {
        let mut span = callee.span();
        for arg in value_args.unwrap_or(&[]) {
            span = span.merge(arg.span);
        }
        for lambda in lambda_args {
            span = span.merge(lambda.span());
        }
        let node = self.arena.alloc(CallExpr {
            id: self.next_id(),
            callee,
            type_args: type_args.map(|t| &*self.arena.alloc_slice_copy(t)),
            value_args: value_args.map(|a| &*self.arena.alloc_slice_copy(a)),
            lambda_args: self.arena.alloc_slice_copy(lambda_args),
            span,
        });
        self.arena.alloc(Expr::Call(node))
    }

    // ========================================================================
    // Member access
    // ========================================================================

    /// `receiver.selector`
    pub fn member(&self, receiver: &'ast Expr<'ast>, selector: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        self.member_with(receiver, selector, false)
    }

    /// `receiver?.selector`
    pub fn safe_member(&self, receiver: &'ast Expr<'ast>, selector: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        self.member_with(receiver, selector, true)
    }

    fn member_with(&self, receiver: &'ast Expr<'ast>, selector: &'ast Expr<'ast>, safe: bool) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(MemberExpr {
            id: self.next_id(),
            receiver,
            selector,
            safe,
            span: receiver.span().merge(selector.span()),
        });
        self.arena.alloc(Expr::Member(node))
    }

    /// A chain of names, `"a.b.c"` giving `(a.b).c`.
    ///
    /// An empty path gives a single empty name.
    pub fn dotted(&self, path: &str) -> &'ast Expr<'ast> {
        let mut segments = path.split('.');
        let mut expr = self.name(segments.next().unwrap_or(""));
        for segment in segments {
            expr = self.member(expr, self.name(segment));
        }
        expr
    }

    /// `(expr)`
    pub fn paren(&self, expr: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(ParenExpr {
            id: self.next_id(),
            expr,
            span: expr.span(),
        });
        self.arena.alloc(Expr::Paren(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_ordered() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let a = ast.name("a");
        let b = ast.name("b");
        let m = ast.member(a, b);
        assert_eq!(a.id(), NodeId::new(0));
        assert_eq!(b.id(), NodeId::new(1));
        assert_eq!(m.id(), NodeId::new(2));
        assert_eq!(ast.node_count(), 3);
    }

    #[test]
    fn dotted_is_left_associative() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let expr = ast.dotted("a.b.c");
        let outer = expr.as_member().unwrap();
        assert_eq!(outer.selector.as_ident().unwrap().name(), "c");
        let inner = outer.receiver.as_member().unwrap();
        assert_eq!(inner.receiver.as_ident().unwrap().name(), "a");
        assert_eq!(inner.selector.as_ident().unwrap().name(), "b");
    }

    #[test]
    fn member_span_covers_both_sides() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let a = ast.name("foo");
        let b = ast.name("bar");
        let m = ast.member(a, b);
        assert!(m.span().contains(a.span()));
        assert!(m.span().contains(b.span()));
    }

    #[test]
    fn call_shapes() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);

        let plain = ast.call(ast.name("f"), &[ast.int(1), ast.int(2)]);
        let plain = plain.as_call().unwrap();
        assert_eq!(plain.value_args.map(|a| a.len()), Some(2));
        assert!(plain.type_args.is_none());
        assert_eq!(plain.callee_name().map(|n| n.name()), Some("f"));

        let generic = ast.call_type_args_only(ast.name("g"), &["String"]);
        let generic = generic.as_call().unwrap();
        assert!(generic.value_args.is_none());
        assert_eq!(generic.type_args.map(|t| t.len()), Some(1));

        let lambda = ast.call_trailing_lambda(ast.name("run"), ast.opaque("lambda"));
        let lambda = lambda.as_call().unwrap();
        assert!(lambda.value_args.is_none());
        assert_eq!(lambda.argument_expressions().count(), 1);
    }

    #[test]
    fn deparenthesize_strips_nesting() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let x = ast.name("x");
        let wrapped = ast.paren(ast.paren(x));
        assert_eq!(wrapped.deparenthesize().id(), x.id());
    }

    #[test]
    fn lines_are_recorded() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let first = ast.name("a");
        ast.set_line(7);
        let second = ast.name("b");
        assert_eq!(first.span().line, 1);
        assert_eq!(second.span().line, 7);
    }
}
