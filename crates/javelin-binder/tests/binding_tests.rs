//! Tests for `BinderState::bind_compilation_unit`.

use javelin_binder::{BinderState, DeclarationResolver, symbol_flags};
use javelin_parser::NodeIndex;
use javelin_parser::parser::TreeBuilder;

fn method_symbol_name(binder: &BinderState, idx: NodeIndex) -> Option<String> {
    let id = binder.resolve(idx)?;
    binder.symbol(id).map(|s| s.escaped_name.clone())
}

#[test]
fn test_locals_and_parameters_resolve_to_declarations() {
    let mut b = TreeBuilder::new("Test.java", "com.example");
    b.import("java.time.Duration");
    let param = b.parameter("Duration", "d");
    let use_d = b.ident("d");
    let call = b.call_on(use_d, "getNano", vec![]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![stmt]);
    let method = b.method("run", vec![param], "void", Some(body));
    let class = b.class("Test", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::with_default_library();
    binder.bind_compilation_unit(&arena, root);

    let d_sym = binder.resolve(use_d).expect("d resolves");
    let sym = binder.symbol(d_sym).expect("symbol");
    assert!(sym.has_any_flags(symbol_flags::PARAMETER));
    assert_eq!(sym.type_name, "java.time.Duration");
    assert_eq!(sym.declarations, vec![param]);

    let get_nano = binder.resolve(call).expect("call resolves");
    let method_sym = binder.symbol(get_nano).expect("method");
    assert!(method_sym.is_method());
    assert_eq!(method_sym.owner.as_deref(), Some("java.time.Duration"));
    assert_eq!(binder.expression_type(call), Some("int"));
}

#[test]
fn test_imports_disambiguate_simple_names() {
    let mut b = TreeBuilder::new("Test.java", "com.example");
    b.import("com.google.protobuf.Duration");
    let local = b.local_var("Duration", "d", None);
    let use_d = b.ident("d");
    let call = b.call_on(use_d, "getNanos", vec![]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![local, stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::with_default_library();
    binder.bind_compilation_unit(&arena, root);

    let owner = binder
        .resolve(call)
        .and_then(|id| binder.symbol(id))
        .and_then(|s| s.owner.clone());
    assert_eq!(owner.as_deref(), Some("com.google.protobuf.Duration"));
}

#[test]
fn test_field_via_this_and_simple_name_share_symbol() {
    let mut b = TreeBuilder::new("Test.java", "");
    let field = b.field("int", "count", None);
    let simple = b.ident("count");
    let stmt_a = b.expr_stmt(simple);
    let this = b.this_expr();
    let qualified = b.field_access(this, "count");
    let stmt_b = b.expr_stmt(qualified);
    let body = b.block(vec![stmt_a, stmt_b]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![field, method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::new();
    binder.bind_compilation_unit(&arena, root);

    let a = binder.resolve(simple).expect("simple name");
    let b_sym = binder.resolve(qualified).expect("this.count");
    assert_eq!(a, b_sym);
    assert!(binder.symbol(a).is_some_and(|s| s.has_any_flags(symbol_flags::FIELD)));
}

#[test]
fn test_shadowing_local_hides_field() {
    let mut b = TreeBuilder::new("Test.java", "");
    let field = b.field("int", "x", None);
    let local = b.local_var("int", "x", None);
    let use_x = b.ident("x");
    let stmt = b.expr_stmt(use_x);
    let body = b.block(vec![local, stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![field, method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::new();
    binder.bind_compilation_unit(&arena, root);

    let sym = binder.resolve(use_x).and_then(|id| binder.symbol(id)).expect("x");
    assert!(sym.has_any_flags(symbol_flags::LOCAL));
    assert_eq!(sym.declarations, vec![local]);
}

#[test]
fn test_block_scoped_locals_do_not_leak() {
    let mut b = TreeBuilder::new("Test.java", "");
    let inner_local = b.local_var("int", "y", None);
    let inner = b.block(vec![inner_local]);
    let use_y = b.ident("y");
    let stmt = b.expr_stmt(use_y);
    let body = b.block(vec![inner, stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::new();
    binder.bind_compilation_unit(&arena, root);
    assert!(binder.resolve(use_y).is_none());
}

#[test]
fn test_static_call_through_type_name() {
    let mut b = TreeBuilder::new("Test.java", "");
    b.import("com.google.protobuf.Timestamp");
    let call = b.var_chain("Timestamp", &["getDefaultInstance", "getNanos"]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::with_default_library();
    binder.bind_compilation_unit(&arena, root);

    assert_eq!(method_symbol_name(&binder, call).as_deref(), Some("getNanos"));
    let root_ident = arena
        .get(call)
        .and_then(|n| arena.get_method_invocation(n))
        .and_then(|c| arena.get(c.method_select))
        .and_then(|n| arena.get_field_access(n))
        .and_then(|fa| arena.get(fa.expression))
        .and_then(|n| arena.get_method_invocation(n))
        .and_then(|c| arena.get(c.method_select))
        .and_then(|n| arena.get_field_access(n))
        .map(|fa| fa.expression)
        .expect("Timestamp identifier");
    let class_sym = binder.resolve(root_ident).and_then(|id| binder.symbol(id)).expect("class");
    assert!(class_sym.has_any_flags(symbol_flags::CLASS));
}

#[test]
fn test_bare_call_resolves_against_enclosing_class() {
    let mut b = TreeBuilder::new("Test.java", "pkg");
    let helper_body = b.block(vec![]);
    let helper = b.method("helper", vec![], "void", Some(helper_body));
    let call = b.call("helper", vec![]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![helper, method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::new();
    binder.bind_compilation_unit(&arena, root);

    let sym = binder.resolve(call).and_then(|id| binder.symbol(id)).expect("helper");
    assert_eq!(sym.owner.as_deref(), Some("pkg.Test"));
    assert_eq!(binder.class_qualified_name(class), Some("pkg.Test"));
}

#[test]
fn test_anonymous_class_inherits_supertype_members() {
    let mut b = TreeBuilder::new("Test.java", "pkg");
    let base_method_body = b.block(vec![]);
    let base_method = b.method("tick", vec![], "void", Some(base_method_body));
    let base = b.class("Base", &[], vec![base_method]);

    let call = b.call("tick", vec![]);
    let stmt = b.expr_stmt(call);
    let inner_body = b.block(vec![stmt]);
    let run = b.method("run", vec![], "void", Some(inner_body));
    let anon = b.new_class("Base", vec![], Some(vec![run]));
    let field = b.field("Base", "b", Some(anon));
    let outer = b.class("Outer", &[], vec![field]);
    let (arena, root) = b.finish(vec![base, outer]);

    let mut binder = BinderState::new();
    binder.bind_compilation_unit(&arena, root);

    let sym = binder.resolve(call).and_then(|id| binder.symbol(id)).expect("tick");
    assert_eq!(sym.owner.as_deref(), Some("pkg.Base"));
    assert!(binder.is_descendant_of("pkg.Outer$1", "pkg.Base"));
}

#[test]
fn test_lambda_parameters_scoped_to_lambda() {
    let mut b = TreeBuilder::new("Test.java", "");
    let param = b.parameter("", "v");
    let inside = b.ident("v");
    let lambda = b.lambda(vec![param], inside);
    let stmt_lambda = b.expr_stmt(lambda);
    let outside = b.ident("v");
    let stmt_outside = b.expr_stmt(outside);
    let body = b.block(vec![stmt_lambda, stmt_outside]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::new();
    binder.bind_compilation_unit(&arena, root);

    assert!(binder.resolve(inside).is_some());
    assert!(binder.resolve(outside).is_none());
}

#[test]
fn test_unresolved_receiver_leaves_call_unbound() {
    let mut b = TreeBuilder::new("Test.java", "");
    let call = b.var_chain("unknown", &["getNano"]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("Test", &[], vec![method]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::with_default_library();
    binder.bind_compilation_unit(&arena, root);
    assert!(binder.resolve(call).is_none());
}

#[test]
fn test_unit_declarations_do_not_outlive_the_unit() {
    let mut b = TreeBuilder::new("Timestamp.java", "com.google.protobuf");
    let shadow = b.class("Timestamp", &[], vec![]);
    let helper = b.class("Helper", &[], vec![]);
    let (shadow_arena, shadow_root) = b.finish(vec![shadow, helper]);

    let mut binder = BinderState::with_default_library();
    let library_symbols = binder.symbols.len();
    let timestamp = binder.type_symbol("com.google.protobuf.Timestamp");
    assert!(binder.find_method("com.google.protobuf.Timestamp", "getNanos", 0).is_some());

    binder.bind_compilation_unit(&shadow_arena, shadow_root);
    assert!(binder.has_type("com.google.protobuf.Helper"));
    assert!(binder.find_method("com.google.protobuf.Timestamp", "getNanos", 0).is_none());

    let mut b = TreeBuilder::new("Test.java", "pkg");
    let class = b.class("Test", &[], vec![]);
    let (arena, root) = b.finish(vec![class]);
    binder.bind_compilation_unit(&arena, root);

    assert!(!binder.has_type("com.google.protobuf.Helper"));
    assert_eq!(binder.type_symbol("com.google.protobuf.Timestamp"), timestamp);
    assert!(binder.find_method("com.google.protobuf.Timestamp", "getNanos", 0).is_some());
    assert_eq!(binder.symbols.len(), library_symbols + 1);
}

#[test]
fn test_library_types_declared_between_units_survive() {
    let mut b = TreeBuilder::new("Test.java", "pkg");
    let class = b.class("Test", &[], vec![]);
    let (arena, root) = b.finish(vec![class]);

    let mut binder = BinderState::with_default_library();
    binder.bind_compilation_unit(&arena, root);
    binder.declare_library_type(
        javelin_binder::TypeDecl::new("com.example.Event").method("getTime", &[], "long"),
    );
    assert!(!binder.has_type("pkg.Test"));

    binder.bind_compilation_unit(&arena, root);
    assert!(binder.has_type("pkg.Test"));
    assert!(binder.find_method("com.example.Event", "getTime", 0).is_some());
    binder.bind_compilation_unit(&arena, root);
    assert!(binder.find_method("com.example.Event", "getTime", 0).is_some());
}
