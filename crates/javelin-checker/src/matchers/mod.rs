//! Matcher algebra.
//!
//! A `Matcher` is a pure predicate over one node. Matchers never look at
//! nodes other than the one they are given except through composition
//! (`argument`, `receiver_of_invocation`), hold no mutable state and can be
//! shared freely across threads.
//!
//! Facts that cannot be established (an unresolved symbol, a missing
//! argument) make a primitive matcher return `false`.

mod method;

pub use method::{MethodKind, MethodMatcher};

use crate::context::CheckerContext;
use crate::tree_helpers::get_receiver;
use javelin_binder::Symbol;
use javelin_parser::NodeIndex;
use javelin_parser::parser::SyntaxKind;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;

pub trait Matcher: Send + Sync {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool;
}

pub type BoxedMatcher = Box<dyn Matcher>;

impl<M: Matcher + ?Sized> Matcher for &M {
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        (**self).matches(idx, ctx)
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        (**self).matches(idx, ctx)
    }
}

impl<M: Matcher + ?Sized> Matcher for Arc<M> {
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        (**self).matches(idx, ctx)
    }
}

/// Adapter turning a closure into a matcher.
pub struct FnMatcher<F>(F);

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(NodeIndex, &CheckerContext<'_>) -> bool + Send + Sync,
{
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        (self.0)(idx, ctx)
    }
}

pub fn from_fn<F>(f: F) -> FnMatcher<F>
where
    F: Fn(NodeIndex, &CheckerContext<'_>) -> bool + Send + Sync,
{
    FnMatcher(f)
}

/// Combinator methods available on every matcher.
pub trait MatcherExt: Matcher + Sized {
    fn and<M: Matcher>(self, other: M) -> And<Self, M> {
        And(self, other)
    }

    fn or<M: Matcher>(self, other: M) -> Or<Self, M> {
        Or(self, other)
    }

    fn negate(self) -> Not<Self> {
        Not(self)
    }

    fn boxed(self) -> BoxedMatcher
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<M: Matcher> MatcherExt for M {}

// =============================================================================
// Combinators
// =============================================================================

pub struct And<A, B>(A, B);

impl<A: Matcher, B: Matcher> Matcher for And<A, B> {
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        self.0.matches(idx, ctx) && self.1.matches(idx, ctx)
    }
}

pub struct Or<A, B>(A, B);

impl<A: Matcher, B: Matcher> Matcher for Or<A, B> {
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        self.0.matches(idx, ctx) || self.1.matches(idx, ctx)
    }
}

pub struct Not<M>(M);

impl<M: Matcher> Matcher for Not<M> {
    #[inline]
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        !self.0.matches(idx, ctx)
    }
}

/// True iff every matcher matches; evaluated left to right, stopping at the
/// first `false`. An empty list matches everything.
pub struct AllOf(Vec<BoxedMatcher>);

impl Matcher for AllOf {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        self.0.iter().all(|m| m.matches(idx, ctx))
    }
}

/// True iff some matcher matches; evaluated left to right, stopping at the
/// first `true`. An empty list matches nothing.
pub struct AnyOf(Vec<BoxedMatcher>);

impl Matcher for AnyOf {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        self.0.iter().any(|m| m.matches(idx, ctx))
    }
}

pub fn all_of(matchers: Vec<BoxedMatcher>) -> AllOf {
    AllOf(matchers)
}

pub fn any_of(matchers: Vec<BoxedMatcher>) -> AnyOf {
    AnyOf(matchers)
}

pub fn not<M: Matcher>(matcher: M) -> Not<M> {
    Not(matcher)
}

pub struct Constant(bool);

impl Matcher for Constant {
    #[inline]
    fn matches(&self, _idx: NodeIndex, _ctx: &CheckerContext<'_>) -> bool {
        self.0
    }
}

pub fn anything() -> Constant {
    Constant(true)
}

pub fn nothing() -> Constant {
    Constant(false)
}

// =============================================================================
// Primitives
// =============================================================================

pub struct KindIs(SmallVec<[SyntaxKind; 2]>);

impl Matcher for KindIs {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        ctx.arena
            .get(idx)
            .is_some_and(|node| self.0.contains(&node.kind))
    }
}

pub fn kind_is(kind: SyntaxKind) -> KindIs {
    KindIs(smallvec::smallvec![kind])
}

pub fn kind_any_of(kinds: &[SyntaxKind]) -> KindIs {
    KindIs(SmallVec::from_slice(kinds))
}

/// Argument list of a method invocation or instance creation.
fn invocation_arguments<'a>(
    ctx: &CheckerContext<'a>,
    idx: NodeIndex,
) -> Option<&'a javelin_parser::NodeList> {
    let arena = ctx.arena;
    let node = arena.get(idx)?;
    match node.kind {
        SyntaxKind::MethodInvocation => arena.get_method_invocation(node).map(|c| &c.arguments),
        SyntaxKind::NewClass => arena.get_new_class(node).map(|n| &n.arguments),
        _ => None,
    }
}

pub struct Argument<M> {
    position: usize,
    matcher: M,
}

impl<M: Matcher> Matcher for Argument<M> {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        invocation_arguments(ctx, idx)
            .and_then(|args| args.get(self.position))
            .is_some_and(|arg| self.matcher.matches(arg, ctx))
    }
}

/// Applies `matcher` to the argument at `position`; `false` when the node has
/// fewer arguments or is not a call.
pub fn argument<M: Matcher>(position: usize, matcher: M) -> Argument<M> {
    Argument { position, matcher }
}

pub struct ArgumentCount(usize);

impl Matcher for ArgumentCount {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        invocation_arguments(ctx, idx).is_some_and(|args| args.len() == self.0)
    }
}

pub fn argument_count(count: usize) -> ArgumentCount {
    ArgumentCount(count)
}

pub struct ReceiverOfInvocation<M>(M);

impl<M: Matcher> Matcher for ReceiverOfInvocation<M> {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        get_receiver(ctx.arena, idx).is_some_and(|receiver| self.0.matches(receiver, ctx))
    }
}

/// Applies `matcher` to the explicit receiver of a call; `false` for bare calls.
pub fn receiver_of_invocation<M: Matcher>(matcher: M) -> ReceiverOfInvocation<M> {
    ReceiverOfInvocation(matcher)
}

pub struct PackageStartsWith(String);

impl Matcher for PackageStartsWith {
    fn matches(&self, _idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        ctx.package_name.starts_with(self.0.as_str())
    }
}

/// The package of the compilation unit being checked starts with `prefix`.
pub fn package_starts_with(prefix: impl Into<String>) -> PackageStartsWith {
    PackageStartsWith(prefix.into())
}

pub struct PackageMatches(Regex);

impl Matcher for PackageMatches {
    fn matches(&self, _idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        self.0.is_match(ctx.package_name)
    }
}

pub fn package_matches(pattern: Regex) -> PackageMatches {
    PackageMatches(pattern)
}

pub struct SymbolMatcher<F>(F);

impl<F> Matcher for SymbolMatcher<F>
where
    F: Fn(&Symbol, &CheckerContext<'_>) -> bool + Send + Sync,
{
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        ctx.symbol_of(idx).is_some_and(|sym| (self.0)(sym, ctx))
    }
}

/// Applies `predicate` to the declaration `idx` resolves to; `false` when
/// unresolved.
pub fn symbol_matcher<F>(predicate: F) -> SymbolMatcher<F>
where
    F: Fn(&Symbol, &CheckerContext<'_>) -> bool + Send + Sync,
{
    SymbolMatcher(predicate)
}

/// The node resolves to a static declaration.
pub fn is_static() -> SymbolMatcher<impl Fn(&Symbol, &CheckerContext<'_>) -> bool + Send + Sync> {
    symbol_matcher(|sym, _| sym.is_static())
}

#[cfg(test)]
#[path = "../../tests/matchers_tests.rs"]
mod tests;
