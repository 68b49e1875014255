//! Matching and correlation engine for the javelin analysis engine.
//!
//! This crate is organized into several submodules:
//! - `matchers` - the `Matcher` trait, combinators and `MethodMatcher`
//! - `context` - `CheckerContext` shared by matchers and checks
//! - `tree_helpers` - receivers, same-variable test, chain roots
//! - `scope_finder` - which nodes count as "nearby" a call
//! - `accessor_chain` - accessor-chain extraction
//! - `nearby_callers` - the nearby-call correlation engine
//! - `config` - checker options and accessor families
//! - `dispatch` - `MethodInvocationCheck` and the per-unit driver
//! - `time_checkers` - seconds/nanos pairing checks

pub mod accessor_chain;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod matchers;
pub mod nearby_callers;
pub mod scope_finder;
pub mod time_checkers;
pub mod tree_helpers;

#[cfg(test)]
mod test_fixtures;

pub use accessor_chain::{AccessorChain, extract_accessor_chain};
pub use config::{AccessorFamilyConfig, CheckerOptions, default_accessor_matcher};
pub use context::CheckerContext;
pub use dispatch::{MethodInvocationCheck, check_compilation_unit};
pub use matchers::{BoxedMatcher, Matcher, MatcherExt, MethodKind, MethodMatcher};
pub use nearby_callers::{NearbyCallQuery, has_nearby_correlated_call};
pub use scope_finder::{NearbyScope, ScopeOrigin, find_nearby_scope};
pub use time_checkers::{
    JavaDurationGetSecondsGetNano, JavaInstantGetSecondsGetNano, ProtoDurationGetSecondsGetNano,
    ProtoTimestampGetSecondsGetNano, time_checks,
};
