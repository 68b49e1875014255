//! Nearby-call correlation.
//!
//! Answers "is there a call matching M, on the same receiver as this call,
//! in nearby code?". Checks use it to verify that a call with awkward edge
//! cases (`getSeconds()`) is accompanied by its sibling (`getNano()`).
//!
//! Receivers correlate when they are the same variable, or, in chain mode,
//! when both calls hang off the same root variable through identical chains
//! of pure accessors (`a.getB().getC().getSeconds()` and
//! `a.getB().getC().getNanos()`).

use crate::accessor_chain::extract_accessor_chain;
use crate::context::CheckerContext;
use crate::matchers::Matcher;
use crate::scope_finder::find_nearby_scope;
use crate::tree_helpers::{get_receiver, get_root_assignable, same_variable};
use javelin_common::limits::MAX_SCAN_NODES;
use javelin_parser::NodeIndex;
use javelin_parser::parser::{NodeAccess, SyntaxKind};
use tracing::{debug, trace};

/// A configured nearby-call search.
pub struct NearbyCallQuery<'m> {
    secondary: &'m dyn Matcher,
    accessor: Option<&'m dyn Matcher>,
}

impl<'m> NearbyCallQuery<'m> {
    /// Same-variable correlation only.
    pub fn new(secondary: &'m dyn Matcher) -> NearbyCallQuery<'m> {
        NearbyCallQuery {
            secondary,
            accessor: None,
        }
    }

    /// Also correlate through accessor chains, where `accessor` decides which
    /// calls are pure accessors.
    pub fn with_chains(mut self, accessor: &'m dyn Matcher) -> NearbyCallQuery<'m> {
        self.accessor = Some(accessor);
        self
    }

    /// Whether a call matching the secondary matcher with a related receiver
    /// exists near `primary`.
    pub fn run(&self, ctx: &CheckerContext<'_>, primary: NodeIndex) -> bool {
        let scope = find_nearby_scope(ctx.arena, primary);
        if scope.is_empty() {
            debug!(primary = primary.0, origin = ?scope.origin, "no nearby scope");
            return false;
        }

        let primary_receiver = get_receiver(ctx.arena, primary);
        let mut stack: Vec<NodeIndex> = scope.nodes.iter().rev().copied().collect();
        let mut visited = 0usize;

        while let Some(idx) = stack.pop() {
            visited += 1;
            if visited > MAX_SCAN_NODES {
                debug!(primary = primary.0, "scan limit reached");
                return false;
            }
            let Some(node) = ctx.arena.get(idx) else {
                continue;
            };

            match node.kind {
                // Separate scopes: evaluated later or elsewhere.
                SyntaxKind::LambdaExpression
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::ClassDeclaration => continue,
                SyntaxKind::NewClass => {
                    if let Some(new_class) = ctx.arena.get_new_class(node) {
                        stack.extend(new_class.arguments.iter().rev());
                    }
                    continue;
                }
                SyntaxKind::MethodInvocation => {
                    if self.correlates(ctx, primary, primary_receiver, idx) {
                        debug!(primary = primary.0, secondary = idx.0, "correlated call found");
                        return true;
                    }
                }
                _ => {}
            }

            stack.extend(ctx.arena.get_children(idx).into_iter().rev());
        }

        trace!(primary = primary.0, visited, "no correlated call");
        false
    }

    fn correlates(
        &self,
        ctx: &CheckerContext<'_>,
        primary: NodeIndex,
        primary_receiver: Option<NodeIndex>,
        secondary: NodeIndex,
    ) -> bool {
        if !self.secondary.matches(secondary, ctx) {
            return false;
        }
        let Some(secondary_receiver) = get_receiver(ctx.arena, secondary) else {
            return false;
        };

        if let Some(primary_receiver) = primary_receiver
            && same_variable(ctx, primary_receiver, secondary_receiver)
        {
            return true;
        }

        match self.accessor {
            Some(accessor) => chains_match(ctx, primary, secondary, accessor),
            None => false,
        }
    }
}

/// Both calls hang off the same root variable through equal accessor chains.
fn chains_match(
    ctx: &CheckerContext<'_>,
    primary: NodeIndex,
    secondary: NodeIndex,
    accessor: &dyn Matcher,
) -> bool {
    let (Some(primary_root), Some(secondary_root)) = (
        get_root_assignable(ctx, primary),
        get_root_assignable(ctx, secondary),
    ) else {
        return false;
    };
    if !same_variable(ctx, primary_root, secondary_root) {
        return false;
    }

    match (
        extract_accessor_chain(ctx, primary, accessor),
        extract_accessor_chain(ctx, secondary, accessor),
    ) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether a call matching `secondary` with a related receiver exists near
/// `primary`. With `check_chains`, accessor chains are compared using the
/// accessor family configured in the context's options.
pub fn has_nearby_correlated_call(
    ctx: &CheckerContext<'_>,
    primary: NodeIndex,
    secondary: &dyn Matcher,
    check_chains: bool,
) -> bool {
    let query = NearbyCallQuery::new(secondary);
    if check_chains {
        query.with_chains(ctx.accessor_matcher()).run(ctx, primary)
    } else {
        query.run(ctx, primary)
    }
}

#[cfg(test)]
#[path = "../tests/nearby_callers_tests.rs"]
mod tests;
