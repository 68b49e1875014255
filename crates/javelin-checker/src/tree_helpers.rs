//! Structural helpers over calls and member selects.

use crate::context::CheckerContext;
use javelin_common::limits::MAX_TREE_WALK_ITERATIONS;
use javelin_parser::NodeIndex;
use javelin_parser::parser::{NodeArena, SyntaxKind};

/// Explicit receiver of a call or member select.
///
/// `a.foo()` -> `a`, `a.b.foo()` -> `a.b`, `a.bar().foo()` -> `a.bar()`,
/// `a.b.c` -> `a.b`, `this.foo()` -> `this`, `Type.staticCall()` -> `Type`.
/// Bare calls (`foo()`) and every other node kind yield `None`.
pub fn get_receiver(arena: &NodeArena, idx: NodeIndex) -> Option<NodeIndex> {
    let node = arena.get(idx)?;
    match node.kind {
        SyntaxKind::MethodInvocation => {
            let call = arena.get_method_invocation(node)?;
            let select = arena.get(call.method_select)?;
            if select.kind == SyntaxKind::Identifier {
                return None;
            }
            get_receiver(arena, call.method_select)
        }
        SyntaxKind::FieldAccess => arena.get_field_access(node).map(|fa| fa.expression),
        _ => None,
    }
}

/// Whether two expressions denote the same variable.
///
/// Only identifiers, field accesses and `this` are compared; anything else
/// is `false`, as is any unresolved name. `x` and `this.x` alias when both
/// resolve to the same field. Two `this` expressions are the same variable
/// when they sit in the same class body. A `false` answer does not prove
/// the expressions refer to different storage.
pub fn same_variable(ctx: &CheckerContext<'_>, a: NodeIndex, b: NodeIndex) -> bool {
    let arena = ctx.arena;
    let (Some(node_a), Some(node_b)) = (arena.get(a), arena.get(b)) else {
        return false;
    };
    if node_a.kind == SyntaxKind::ThisExpression && node_b.kind == SyntaxKind::ThisExpression {
        return enclosing_class(arena, a).is_some_and(|class| enclosing_class(arena, b) == Some(class));
    }
    let is_name = |kind: SyntaxKind| matches!(kind, SyntaxKind::Identifier | SyntaxKind::FieldAccess);
    if !is_name(node_a.kind) || !is_name(node_b.kind) {
        return false;
    }

    let (Some(sym_a), Some(sym_b)) = (ctx.symbol_id(a), ctx.symbol_id(b)) else {
        return false;
    };
    if sym_a != sym_b {
        return false;
    }

    match (node_a.kind, node_b.kind) {
        (SyntaxKind::Identifier, SyntaxKind::Identifier) => true,
        (SyntaxKind::FieldAccess, SyntaxKind::FieldAccess) => {
            match (arena.get_field_access(node_a), arena.get_field_access(node_b)) {
                (Some(fa), Some(fb)) => same_qualifier(ctx, fa.expression, fb.expression),
                _ => false,
            }
        }
        (SyntaxKind::FieldAccess, _) => arena
            .get_field_access(node_a)
            .is_some_and(|fa| is_this(arena, fa.expression)),
        (_, SyntaxKind::FieldAccess) => arena
            .get_field_access(node_b)
            .is_some_and(|fb| is_this(arena, fb.expression)),
        _ => false,
    }
}

fn same_qualifier(ctx: &CheckerContext<'_>, a: NodeIndex, b: NodeIndex) -> bool {
    (is_this(ctx.arena, a) && is_this(ctx.arena, b)) || same_variable(ctx, a, b)
}

/// Nearest class declaration (anonymous bodies included) above `idx`.
fn enclosing_class(arena: &NodeArena, idx: NodeIndex) -> Option<NodeIndex> {
    let mut current = arena.parent_of(idx)?;
    for _ in 0..MAX_TREE_WALK_ITERATIONS {
        if arena.get(current)?.kind == SyntaxKind::ClassDeclaration {
            return Some(current);
        }
        current = arena.parent_of(current)?;
    }
    None
}

fn is_this(arena: &NodeArena, idx: NodeIndex) -> bool {
    arena
        .get(idx)
        .is_some_and(|node| node.kind == SyntaxKind::ThisExpression)
}

/// Root variable of a call chain.
///
/// `a.trim().intern()` -> `a`, `a.b.trim().intern()` -> `a.b`,
/// `this.value.foo()` -> `this.value`. `None` for bare calls, for roots
/// that are not variables (`String.format()`, `this.foo()`) and for
/// anything that is not a call.
pub fn get_root_assignable(ctx: &CheckerContext<'_>, call: NodeIndex) -> Option<NodeIndex> {
    let arena = ctx.arena;
    let node = arena.get(call)?;
    let data = arena.get_method_invocation(node)?;
    if arena.get(data.method_select)?.kind == SyntaxKind::Identifier {
        return None;
    }

    let mut current = call;
    while let Some(invocation) = arena
        .get(current)
        .and_then(|n| arena.get_method_invocation(n))
    {
        current = invocation.method_select;
        if let Some(select) = arena.get(current).and_then(|n| arena.get_field_access(n)) {
            current = select.expression;
        }
    }

    ctx.symbol_of(current)
        .is_some_and(|sym| sym.is_variable())
        .then_some(current)
}

#[cfg(test)]
#[path = "../tests/tree_helpers_tests.rs"]
mod tests;
