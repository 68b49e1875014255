//! Accessor-chain extraction.
//!
//! `x.getA().getB().getC().getSeconds()` peels to `[getC, getB, getA, x]`:
//! the declaration of each receiver, outermost call first, ending in the
//! root. Two chains are equal iff they have the same length and pairwise
//! identical declarations.

use crate::context::CheckerContext;
use crate::matchers::Matcher;
use crate::tree_helpers::get_receiver;
use javelin_binder::SymbolId;
use javelin_common::limits::MAX_ACCESSOR_CHAIN_LENGTH;
use javelin_parser::NodeIndex;
use smallvec::SmallVec;
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorChain(SmallVec<[SymbolId; 4]>);

impl AccessorChain {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[SymbolId] {
        &self.0
    }

    /// Declaration of the root expression (last element).
    pub fn root(&self) -> Option<SymbolId> {
        self.0.last().copied()
    }
}

/// Extract the accessor chain below `expr`.
///
/// Every invocation visited, `expr` itself included, must be a
/// zero-argument call with an explicit receiver accepted by `accessor`.
/// `None` when `expr` is not a call, when any visited call fails that test,
/// or when a receiver does not resolve.
pub fn extract_accessor_chain(
    ctx: &CheckerContext<'_>,
    expr: NodeIndex,
    accessor: &dyn Matcher,
) -> Option<AccessorChain> {
    let arena = ctx.arena;
    let mut chain = SmallVec::new();
    let mut current = expr;

    while let Some(call) = arena
        .get(current)
        .and_then(|node| arena.get_method_invocation(node))
    {
        if chain.len() >= MAX_ACCESSOR_CHAIN_LENGTH {
            trace!(expr = expr.0, "accessor chain too long");
            return None;
        }
        if !call.arguments.is_empty() || !accessor.matches(current, ctx) {
            trace!(expr = expr.0, call = current.0, "not an accessor");
            return None;
        }
        let receiver = get_receiver(arena, current)?;
        chain.push(ctx.symbol_id(receiver)?);
        current = receiver;
    }

    // Empty only when `expr` was not a call.
    if chain.is_empty() {
        None
    } else {
        Some(AccessorChain(chain))
    }
}

#[cfg(test)]
#[path = "../tests/accessor_chain_tests.rs"]
mod tests;
