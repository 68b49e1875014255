use super::*;
use crate::test_fixtures::{Fixture, TEST_MESSAGE, builder, in_method};
use javelin_parser::parser::TreeBuilder;

#[test]
fn test_get_receiver_shapes() {
    let mut b = builder(&[]);
    let a = b.ident("a");
    let on_ident = b.call_on(a, "foo", vec![]);
    let a2 = b.ident("a");
    let ab = b.field_access(a2, "b");
    let on_field = b.call_on(ab, "foo", vec![]);
    let inner = b.var_chain("a", &["bar"]);
    let on_call = b.call_on(inner, "foo", vec![]);
    let this = b.this_expr();
    let on_this = b.call_on(this, "foo", vec![]);
    let bare = b.call("foo", vec![]);
    let lit = b.literal("1");
    let (arena, _) = b.finish(vec![]);

    assert_eq!(get_receiver(&arena, on_ident), Some(a));
    assert_eq!(get_receiver(&arena, on_field), Some(ab));
    assert_eq!(get_receiver(&arena, ab), Some(a2));
    assert_eq!(get_receiver(&arena, on_call), Some(inner));
    assert_eq!(get_receiver(&arena, on_this), Some(this));
    assert_eq!(get_receiver(&arena, bare), None);
    assert_eq!(get_receiver(&arena, lit), None);
    assert_eq!(get_receiver(&arena, NodeIndex::NONE), None);
}

/// Class `TestCase { Duration field; void run(Duration p, Duration q) { ... } }`.
struct Names {
    fixture: Fixture,
    p1: NodeIndex,
    p2: NodeIndex,
    q: NodeIndex,
    field: NodeIndex,
    this_field: NodeIndex,
    this_field2: NodeIndex,
    call: NodeIndex,
    unresolved: NodeIndex,
}

fn names() -> Names {
    let mut b = TreeBuilder::new("test/TestCase.java", "test");
    b.import("java.time.Duration");
    let field_decl = b.field("Duration", "field", None);
    let param_p = b.parameter("Duration", "p");
    let param_q = b.parameter("Duration", "q");
    let p1 = b.ident("p");
    let p2 = b.ident("p");
    let q = b.ident("q");
    let field = b.ident("field");
    let this_a = b.this_expr();
    let this_field = b.field_access(this_a, "field");
    let this_b = b.this_expr();
    let this_field2 = b.field_access(this_b, "field");
    let call = b.var_chain("p", &["getNano"]);
    let unresolved = b.ident("missing");
    let stmts = [p1, p2, q, field, this_field, this_field2, call, unresolved]
        .into_iter()
        .map(|expr| b.expr_stmt(expr))
        .collect();
    let body = b.block(stmts);
    let method = b.method("run", vec![param_p, param_q], "void", Some(body));
    let class = b.class("TestCase", &[], vec![field_decl, method]);
    Names {
        fixture: Fixture::bind(b.finish(vec![class])),
        p1,
        p2,
        q,
        field,
        this_field,
        this_field2,
        call,
        unresolved,
    }
}

#[test]
fn test_same_variable_identifiers() {
    let n = names();
    let ctx = n.fixture.ctx();
    assert!(same_variable(&ctx, n.p1, n.p2));
    assert!(!same_variable(&ctx, n.p1, n.q));
    assert!(!same_variable(&ctx, n.unresolved, n.unresolved));
}

#[test]
fn test_same_variable_this_aliasing() {
    let n = names();
    let ctx = n.fixture.ctx();
    assert!(same_variable(&ctx, n.field, n.this_field));
    assert!(same_variable(&ctx, n.this_field, n.field));
    assert!(same_variable(&ctx, n.this_field, n.this_field2));
}

#[test]
fn test_same_variable_rejects_calls() {
    let n = names();
    let ctx = n.fixture.ctx();
    assert!(!same_variable(&ctx, n.call, n.call));
    assert!(!same_variable(&ctx, n.call, n.p1));
}

#[test]
fn test_same_variable_field_access_compares_qualifiers() {
    let mut b = builder(&[]);
    let holder = b.parameter("Holder", "h");
    let other = b.parameter("Holder", "g");
    let h1 = b.ident("h");
    let h_value = b.field_access(h1, "value");
    let h2 = b.ident("h");
    let h_value2 = b.field_access(h2, "value");
    let g = b.ident("g");
    let g_value = b.field_access(g, "value");
    let stmts = vec![
        b.expr_stmt(h_value),
        b.expr_stmt(h_value2),
        b.expr_stmt(g_value),
    ];
    let body = b.block(stmts);
    let method = b.method("run", vec![holder, other], "void", Some(body));
    let value = b.field("int", "value", None);
    let holder_class = b.class("Holder", &[], vec![value, method]);
    let fixture = Fixture::bind(b.finish(vec![holder_class]));
    let ctx = fixture.ctx();

    assert!(same_variable(&ctx, h_value, h_value2));
    assert!(!same_variable(&ctx, h_value, g_value));
}

#[test]
fn test_same_variable_type_qualified_constants() {
    let mut b = builder(&["java.time.Duration", "java.time.Instant"]);
    let ty1 = b.ident("Duration");
    let zero1 = b.field_access(ty1, "ZERO");
    let ty2 = b.ident("Duration");
    let zero2 = b.field_access(ty2, "ZERO");
    let ty3 = b.ident("Instant");
    let epoch = b.field_access(ty3, "EPOCH");
    let stmts = vec![b.expr_stmt(zero1), b.expr_stmt(zero2), b.expr_stmt(epoch)];
    let fixture = in_method(b, vec![], stmts);
    let ctx = fixture.ctx();

    assert!(same_variable(&ctx, zero1, zero2));
    assert!(!same_variable(&ctx, zero1, epoch));
    assert!(!same_variable(&ctx, ty1, zero1));
}

#[test]
fn test_same_variable_this_is_per_class_body() {
    let mut b = builder(&[]);
    let this_a = b.this_expr();
    let this_b = b.this_expr();
    let inner_this = b.this_expr();
    let inner_stmt = b.expr_stmt(inner_this);
    let inner_body = b.block(vec![inner_stmt]);
    let run = b.method("run", vec![], "void", Some(inner_body));
    let anon = b.new_class("Runnable", vec![], Some(vec![run]));
    let stmts = vec![b.expr_stmt(this_a), b.expr_stmt(this_b), b.expr_stmt(anon)];
    let fixture = in_method(b, vec![], stmts);
    let ctx = fixture.ctx();

    assert!(same_variable(&ctx, this_a, this_b));
    assert!(!same_variable(&ctx, this_a, inner_this));
}

#[test]
fn test_root_assignable() {
    let mut b = builder(&[TEST_MESSAGE, "com.google.protobuf.Timestamp"]);
    let param = b.parameter("TestMessage", "m");
    let chained = b.var_chain("m", &["getChild", "getTestTimestamp"]);
    let ty = b.ident("Timestamp");
    let static_chain = b.call_chain(ty, &["getDefaultInstance", "getNanos"]);
    let this = b.this_expr();
    let on_this = b.call_on(this, "toString", vec![]);
    let bare = b.call("toString", vec![]);
    let stmts = vec![
        b.expr_stmt(chained),
        b.expr_stmt(static_chain),
        b.expr_stmt(on_this),
        b.expr_stmt(bare),
    ];
    let fixture = in_method(b, vec![param], stmts);
    let ctx = fixture.ctx();

    let root = get_root_assignable(&ctx, chained).unwrap();
    assert_eq!(ctx.arena.identifier_text(root), Some("m"));
    assert_eq!(get_root_assignable(&ctx, static_chain), None);
    assert_eq!(get_root_assignable(&ctx, on_this), None);
    assert_eq!(get_root_assignable(&ctx, bare), None);
    assert_eq!(get_root_assignable(&ctx, root), None);
}

#[test]
fn test_root_assignable_through_this_field() {
    let mut b = builder(&["com.google.protobuf.Timestamp"]);
    let field = b.field("Timestamp", "ts", None);
    let this = b.this_expr();
    let this_ts = b.field_access(this, "ts");
    let call = b.call_on(this_ts, "getNanos", vec![]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("TestCase", &[], vec![field, method]);
    let fixture = Fixture::bind(b.finish(vec![class]));
    let ctx = fixture.ctx();

    assert_eq!(get_root_assignable(&ctx, call), Some(this_ts));
}
