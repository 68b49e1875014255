use super::*;
use javelin_parser::parser::TreeBuilder;

fn unit() -> TreeBuilder {
    TreeBuilder::new("test/TestCase.java", "test")
}

#[test]
fn test_block_statements_are_nearby() {
    let mut b = unit();
    let call = b.var_chain("d", &["getNano"]);
    let s1 = b.expr_stmt(call);
    let other = b.var_chain("d", &["getSeconds"]);
    let s2 = b.expr_stmt(other);
    let body = b.block(vec![s1, s2]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("TestCase", &[], vec![method]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::Block);
    assert_eq!(scope.nodes, vec![s1, s2]);
    assert_eq!(scope.boundary, body);
}

#[test]
fn test_innermost_block_wins_over_class() {
    let mut b = unit();
    let call = b.var_chain("d", &["getNano"]);
    let inner_stmt = b.expr_stmt(call);
    let inner = b.block(vec![inner_stmt]);
    let cond = b.literal("true");
    let if_stmt = b.if_stmt(cond, inner, None);
    let outer_call = b.var_chain("d", &["getSeconds"]);
    let outer_stmt = b.expr_stmt(outer_call);
    let body = b.block(vec![outer_stmt, if_stmt]);
    let method = b.method("run", vec![], "void", Some(body));
    let init = b.var_chain("d", &["getSeconds"]);
    let field = b.field("long", "seconds", Some(init));
    let class = b.class("TestCase", &[], vec![field, method]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::Block);
    assert_eq!(scope.nodes, vec![inner_stmt]);
    assert_eq!(scope.boundary, inner);
}

#[test]
fn test_class_field_initializers() {
    let mut b = unit();
    let init_a = b.var_chain("D", &["getSeconds"]);
    let field_a = b.field("long", "seconds", Some(init_a));
    let field_b = b.field("long", "empty", None);
    let call = b.var_chain("D", &["getNano"]);
    let field_c = b.field("int", "nanos", Some(call));
    let method = b.method("run", vec![], "void", None);
    let class = b.class("TestCase", &[], vec![field_a, field_b, method, field_c]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::ClassFields);
    assert_eq!(scope.nodes, vec![init_a, call]);
    assert_eq!(scope.boundary, class);
}

#[test]
fn test_call_directly_in_lambda_has_empty_scope() {
    let mut b = unit();
    let call = b.var_chain("d", &["getNano"]);
    let lambda = b.lambda(vec![], call);
    let local = b.local_var("Runnable", "r", Some(lambda));
    let sibling = b.var_chain("d", &["getSeconds"]);
    let s2 = b.expr_stmt(sibling);
    let body = b.block(vec![local, s2]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("TestCase", &[], vec![method]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::Lambda);
    assert!(scope.is_empty());
    assert_eq!(scope.boundary, NodeIndex::NONE);
}

#[test]
fn test_lambda_block_body_has_empty_scope() {
    let mut b = unit();
    let call = b.var_chain("d", &["getNano"]);
    let stmt = b.expr_stmt(call);
    let sibling = b.var_chain("d", &["getSeconds"]);
    let s2 = b.expr_stmt(sibling);
    let lambda_body = b.block(vec![stmt, s2]);
    let lambda = b.lambda(vec![], lambda_body);
    let outer = b.expr_stmt(lambda);
    let body = b.block(vec![outer]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("TestCase", &[], vec![method]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::Lambda);
    assert!(scope.is_empty());
}

#[test]
fn test_block_inside_lambda_body_is_still_a_block() {
    let mut b = unit();
    let call = b.var_chain("d", &["getNano"]);
    let stmt = b.expr_stmt(call);
    let inner = b.block(vec![stmt]);
    let cond = b.literal("true");
    let if_stmt = b.if_stmt(cond, inner, None);
    let lambda_body = b.block(vec![if_stmt]);
    let lambda = b.lambda(vec![], lambda_body);
    let outer = b.expr_stmt(lambda);
    let body = b.block(vec![outer]);
    let method = b.method("run", vec![], "void", Some(body));
    let class = b.class("TestCase", &[], vec![method]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::Block);
    assert_eq!(scope.nodes, vec![stmt]);
}

#[test]
fn test_anonymous_class_fields() {
    let mut b = unit();
    let call = b.var_chain("D", &["getNano"]);
    let anon_field = b.field("long", "nanos", Some(call));
    let new_object = b.new_class("Object", vec![], Some(vec![anon_field]));
    let outer_init = b.var_chain("D", &["getSeconds"]);
    let outer_field = b.field("long", "seconds", Some(outer_init));
    let obj_field = b.field("Object", "obj", Some(new_object));
    let class = b.class("TestCase", &[], vec![outer_field, obj_field]);
    let (arena, _) = b.finish(vec![class]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::ClassFields);
    assert_eq!(scope.nodes, vec![call]);
    assert_ne!(scope.boundary, class);
}

#[test]
fn test_unenclosed_and_root_have_empty_scope() {
    let mut b = unit();
    let call = b.var_chain("d", &["getNano"]);
    let (arena, root) = b.finish(vec![call]);

    let scope = find_nearby_scope(&arena, call);
    assert_eq!(scope.origin, ScopeOrigin::Unenclosed);
    assert!(scope.is_empty());

    let scope = find_nearby_scope(&arena, root);
    assert_eq!(scope.origin, ScopeOrigin::Unenclosed);
    assert!(scope.is_empty());
}

#[test]
fn test_scope_ignores_sibling_content() {
    let build = |with_extra: bool| {
        let mut b = unit();
        let call = b.var_chain("d", &["getNano"]);
        let stmt = b.expr_stmt(call);
        let mut stmts = vec![stmt];
        if with_extra {
            let extra = b.var_chain("e", &["getSeconds"]);
            stmts.push(b.expr_stmt(extra));
        }
        let body = b.block(stmts);
        let method = b.method("run", vec![], "void", Some(body));
        let class = b.class("TestCase", &[], vec![method]);
        let (arena, _) = b.finish(vec![class]);
        find_nearby_scope(&arena, call).origin
    };
    assert_eq!(build(false), build(true));
}
