//! Centralized limits for tree walks.
//!
//! The engine never recurses over the syntax tree on the call stack; walks are
//! iterative and bounded by these constants. When a bound is hit the walk
//! gives up and the caller treats the result as "nothing found".

/// Maximum number of ancestors visited when walking up the parent chain.
///
/// Used by the scope resolver and the binder's enclosing-class lookups. A
/// well-formed tree is far shallower than this; hitting it means the parent
/// links contain a cycle.
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;

/// Maximum number of nodes the nearby-call scanner visits for one query.
///
/// A single block or class field list rarely exceeds a few thousand nodes.
/// Generated code can, and the scan answers `false` once the budget is spent.
pub const MAX_SCAN_NODES: usize = 100_000;

/// Maximum length of an accessor chain (`a.getB().getC()...`).
///
/// Longer chains are treated as "not a chain".
pub const MAX_ACCESSOR_CHAIN_LENGTH: usize = 256;

/// Maximum number of supertype hops followed by member lookup and
/// descendant-of tests.
pub const MAX_SUPERTYPE_DEPTH: usize = 64;
