//! Benchmarks for the descriptor cache and qualified-expression resolution.
//!
//! - Cache: cold builds of a class hierarchy, warm lookups of built classes
//! - Chains: package-qualified calls and long member chains

#[path = "../tests/common/mod.rs"]
mod common;

use bumpalo::Bump;
use common::{Fixture, Scope};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tern::compiler::{ResolutionContext, Trace};
use tern::core::{BuiltinType, ClassKind, DataType, Modality, QualifiedName, Qualifier, StructuralTypeChecker, ValueParameter};
use tern::registry::{DescriptorResolver, InMemoryProvider, RawClass, RawMethod, RawModifiers, RawParameter, RawType};
use tern::syntax::AstBuilder;

/// `n` classes in a line, each extending the previous and taking it as a
/// constructor parameter, plus one method per class.
fn hierarchy(n: usize) -> InMemoryProvider {
    let mut provider = InMemoryProvider::new();
    for i in 0..n {
        let name = format!("bench.C{i}");
        let mut class = RawClass::new(&name, RawModifiers::empty());
        if i > 0 {
            class.extends.push(RawType::class(&format!("bench.C{}", i - 1)));
        }
        class.constructors.push(RawMethod {
            name: "<init>".into(),
            parameters: vec![RawParameter::named("self", RawType::class(&name))],
            return_type: RawType::Primitive(BuiltinType::Unit),
            modifiers: RawModifiers::empty(),
        });
        provider = provider.with_class(class).with_method(
            &name,
            RawMethod {
                name: "size".into(),
                parameters: Vec::new(),
                return_type: RawType::Primitive(BuiltinType::Int),
                modifiers: RawModifiers::empty(),
            },
        );
    }
    provider
}

fn cache_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/classes");
    let checker = StructuralTypeChecker;

    for n in [10usize, 100, 500] {
        let provider = hierarchy(n);
        let leaf = QualifiedName::from_dotted(&format!("bench.C{}", n - 1));
        group.throughput(Throughput::Elements(n as u64));

        // the leaf pulls in the whole hierarchy through its supertypes
        group.bench_with_input(BenchmarkId::new("cold", n), &leaf, |b, leaf| {
            b.iter(|| {
                let mut resolver = DescriptorResolver::new(&provider, &checker);
                black_box(resolver.resolve_class(black_box(leaf)).ok().flatten())
            });
        });

        let names: Vec<QualifiedName> = (0..n)
            .map(|i| QualifiedName::from_dotted(&format!("bench.C{i}")))
            .collect();
        let mut resolver = DescriptorResolver::new(&provider, &checker);
        let _ = resolver.resolve_class(&leaf);
        group.bench_with_input(BenchmarkId::new("warm", n), &names, |b, names| {
            b.iter(|| {
                for name in names {
                    black_box(resolver.resolve_class(black_box(name)).ok().flatten());
                }
            });
        });
    }
    group.finish();
}

fn member_benchmarks(c: &mut Criterion) {
    let checker = StructuralTypeChecker;
    let provider = hierarchy(50);
    let names: Vec<QualifiedName> = (0..50)
        .map(|i| QualifiedName::from_dotted(&format!("bench.C{i}")))
        .collect();

    c.bench_function("registry/members/first_lookup", |b| {
        b.iter(|| {
            let mut resolver = DescriptorResolver::new(&provider, &checker);
            for name in &names {
                if let Ok(Some(class)) = resolver.resolve_class(name) {
                    black_box(resolver.member_functions(class, "size").ok());
                }
            }
        });
    });
}

/// `java.util.List.of(1, 2, 3)` against a fixture declaring the packages.
fn package_chain_fixture() -> Fixture {
    let mut fx = Fixture::new();
    let java = fx.package("java");
    let util = fx.package("java.util");
    let list = fx.class("java.util.List", ClassKind::Interface, Modality::Abstract);
    fx.qualifier(Scope::Top, "java", Qualifier::Package(java));
    fx.qualifier(Scope::Static(java), "util", Qualifier::Package(util));
    fx.qualifier(Scope::Static(util), "List", Qualifier::Class(list));
    fx.function(
        Scope::Static(list),
        "of",
        vec![ValueParameter::varargs("elements", 0, DataType::any())],
        DataType::class(list),
    );
    fx
}

/// `v.next.next ... .next` over a self-referential node class.
fn member_chain_fixture() -> Fixture {
    let mut fx = Fixture::new();
    let node = fx.class("bench.Node", ClassKind::Class, Modality::Final);
    fx.variable(Scope::Top, "v", DataType::class(node));
    fx.variable(Scope::Instance(node), "next", DataType::class(node));
    fx
}

fn chain_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("compiler/chains");

    let fx = package_chain_fixture();
    group.bench_function("package_qualified_call", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let ast = AstBuilder::new(&arena);
            let call = ast.call(ast.name("of"), &[ast.int(1), ast.int(2), ast.int(3)]);
            let expr = ast.member(ast.dotted("java.util.List"), call);
            let mut trace = Trace::new();
            let mut ctx = ResolutionContext::new(&mut trace);
            black_box(fx.resolver().resolve_expression(*expr, &mut ctx).ok())
        });
    });

    let fx = member_chain_fixture();
    for depth in [1usize, 8, 32] {
        let source = format!("v{}", ".next".repeat(depth));
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("member_chain", depth), &source, |b, source| {
            b.iter(|| {
                let arena = Bump::new();
                let ast = AstBuilder::new(&arena);
                let expr = ast.dotted(source);
                let mut trace = Trace::new();
                let mut ctx = ResolutionContext::new(&mut trace);
                black_box(fx.resolver().resolve_expression(*expr, &mut ctx).ok())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, cache_benchmarks, member_benchmarks, chain_benchmarks);
criterion_main!(benches);
