//! Scope Finding Module
//!
//! Decides which nodes count as "nearby" for a call site. The decision is a
//! function of the ancestor chain only; sibling content is never inspected.
//!
//! Walking up from the immediate parent, the first matching rule wins:
//! - a lambda, or a block that is a lambda body: nothing is nearby
//! - any other block: that block's statements
//! - a class: the initializers of the class's own field declarations
//!
//! Reaching the root (or the walk limit) yields an empty scope.

use javelin_common::limits::MAX_TREE_WALK_ITERATIONS;
use javelin_parser::NodeIndex;
use javelin_parser::parser::{NodeAccess, NodeArena, SyntaxKind};
use tracing::trace;

/// Which rule produced a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeOrigin {
    Block,
    ClassFields,
    /// Inside a lambda; deliberately empty
    Lambda,
    /// No enclosing block or class
    Unenclosed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NearbyScope {
    pub origin: ScopeOrigin,
    /// Roots to scan, in source order
    pub nodes: Vec<NodeIndex>,
    /// The block or class that bounds the scope, `NONE` when empty
    pub boundary: NodeIndex,
}

impl NearbyScope {
    fn empty(origin: ScopeOrigin) -> NearbyScope {
        NearbyScope {
            origin,
            nodes: Vec::new(),
            boundary: NodeIndex::NONE,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Find the nodes that are "nearby" `idx`.
pub fn find_nearby_scope(arena: &NodeArena, idx: NodeIndex) -> NearbyScope {
    let mut current = arena.parent_of(idx);
    let mut iterations = 0;

    while let Some(ancestor) = current {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS {
            break;
        }
        let Some(node) = arena.get(ancestor) else {
            break;
        };

        match node.kind {
            SyntaxKind::LambdaExpression => {
                trace!(node = idx.0, lambda = ancestor.0, "call inside lambda");
                return NearbyScope::empty(ScopeOrigin::Lambda);
            }
            SyntaxKind::Block => {
                let parent_kind = arena.parent_of(ancestor).and_then(|p| arena.kind(p));
                if parent_kind == Some(SyntaxKind::LambdaExpression) {
                    trace!(node = idx.0, block = ancestor.0, "call inside lambda body");
                    return NearbyScope::empty(ScopeOrigin::Lambda);
                }
                let nodes = arena
                    .get_block(node)
                    .map(|block| block.statements.nodes.clone())
                    .unwrap_or_default();
                return NearbyScope {
                    origin: ScopeOrigin::Block,
                    nodes,
                    boundary: ancestor,
                };
            }
            SyntaxKind::ClassDeclaration => {
                let nodes = arena
                    .get_class(node)
                    .map(|class| field_initializers(arena, class.members.iter()))
                    .unwrap_or_default();
                return NearbyScope {
                    origin: ScopeOrigin::ClassFields,
                    nodes,
                    boundary: ancestor,
                };
            }
            _ => {}
        }
        current = arena.parent_of(ancestor);
    }

    NearbyScope::empty(ScopeOrigin::Unenclosed)
}

/// Initializer expressions of the field declarations among `members`.
fn field_initializers(
    arena: &NodeArena,
    members: impl Iterator<Item = NodeIndex>,
) -> Vec<NodeIndex> {
    members
        .filter_map(|member| {
            let node = arena.get(member)?;
            let var = arena.get_variable(node)?;
            var.initializer.into_option()
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/scope_finder_tests.rs"]
mod tests;
