//! Nearby-call correlation benchmarks.
//!
//! Measures the scan over blocks of increasing size, with and without
//! accessor-chain comparison.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use javelin::binder::{BinderState, TypeDecl};
use javelin::checker::{
    CheckerContext, CheckerOptions, MethodMatcher, check_compilation_unit,
    has_nearby_correlated_call, time_checks,
};
use javelin::parser::NodeIndex;
use javelin::parser::parser::{NodeArena, TreeBuilder};

const MESSAGE: &str = "bench.Message";

/// A method with `statements` unrelated calls followed by a nanos call whose
/// seconds partner is the last statement.
fn build_block(statements: usize) -> (NodeArena, NodeIndex, NodeIndex) {
    let mut b = TreeBuilder::new("bench/Bench.java", "bench");
    b.import("com.google.protobuf.Timestamp");
    let param = b.parameter("Message", "m");
    let mut stmts = Vec::with_capacity(statements + 2);
    for i in 0..statements {
        let name = format!("v{i}");
        let call = b.var_chain("m", &["getChild", "getOther"]);
        stmts.push(b.local_var("Object", &name, Some(call)));
    }
    let nanos = b.var_chain("m", &["getChild", "getTimestamp", "getNanos"]);
    stmts.push(b.expr_stmt(nanos));
    let secs = b.var_chain("m", &["getChild", "getTimestamp", "getSeconds"]);
    stmts.push(b.expr_stmt(secs));
    let body = b.block(stmts);
    let method = b.method("run", vec![param], "void", Some(body));
    let class = b.class("Bench", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);
    (arena, root, nanos)
}

fn binder_for(arena: &NodeArena, root: NodeIndex) -> BinderState {
    let mut binder = BinderState::with_default_library();
    binder.declare_library_type(
        TypeDecl::new(MESSAGE)
            .extends("com.google.protobuf.GeneratedMessage")
            .method("getChild", &[], MESSAGE)
            .method("getOther", &[], "java.lang.Object")
            .method("getTimestamp", &[], "com.google.protobuf.Timestamp"),
    );
    binder.bind_compilation_unit(arena, root);
    binder
}

fn bench_correlation(c: &mut Criterion) {
    let seconds = MethodMatcher::instance_method()
        .on_exact_class("com.google.protobuf.Timestamp")
        .named("getSeconds");
    let options = CheckerOptions::default();
    let mut group = c.benchmark_group("nearby_correlation");

    for size in [10usize, 100, 1_000] {
        let (arena, root, nanos) = build_block(size);
        let binder = binder_for(&arena, root);
        let ctx = CheckerContext::new(&arena, &binder, root, &options);

        group.bench_with_input(BenchmarkId::new("same_variable", size), &size, |b, _| {
            b.iter(|| has_nearby_correlated_call(&ctx, black_box(nanos), &seconds, false))
        });
        group.bench_with_input(BenchmarkId::new("chains", size), &size, |b, _| {
            b.iter(|| has_nearby_correlated_call(&ctx, black_box(nanos), &seconds, true))
        });
    }
    group.finish();
}

fn bench_check_unit(c: &mut Criterion) {
    let options = CheckerOptions::default();
    let checks = time_checks();
    let (arena, root, _) = build_block(1_000);
    let binder = binder_for(&arena, root);
    let ctx = CheckerContext::new(&arena, &binder, root, &options);

    c.bench_function("check_compilation_unit_1000", |b| {
        b.iter(|| check_compilation_unit(black_box(&ctx), &checks))
    });
}

criterion_group!(benches, bench_correlation, bench_check_unit);
criterion_main!(benches);
