//! `MethodMatcher`: matches calls by the identity of the invoked method.
//!
//! ```ignore
//! let get_nano = MethodMatcher::instance_method()
//!     .on_exact_class("java.time.Duration")
//!     .named("getNano");
//! ```
//!
//! The node may be a method invocation or its method select; both resolve to
//! the invoked method. Constraints are checked in the order they were added
//! and evaluation stops at the first failing one.

use super::Matcher;
use crate::context::CheckerContext;
use javelin_binder::Symbol;
use javelin_parser::NodeIndex;
use regex::Regex;
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Instance,
    Static,
    Any,
}

#[derive(Clone, Debug)]
enum Constraint {
    /// Declaring type is exactly one of these
    ExactClass(SmallVec<[String; 2]>),
    /// Declaring type is (a subtype of) one of these
    DescendantOf(SmallVec<[String; 2]>),
    Named(SmallVec<[String; 2]>),
    NameMatching(Regex),
    ExcludingNames(SmallVec<[String; 2]>),
    Parameters(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct MethodMatcher {
    kind: MethodKind,
    constraints: Vec<Constraint>,
}

impl MethodMatcher {
    pub fn instance_method() -> MethodMatcher {
        MethodMatcher {
            kind: MethodKind::Instance,
            constraints: Vec::new(),
        }
    }

    pub fn static_method() -> MethodMatcher {
        MethodMatcher {
            kind: MethodKind::Static,
            constraints: Vec::new(),
        }
    }

    pub fn any_method() -> MethodMatcher {
        MethodMatcher {
            kind: MethodKind::Any,
            constraints: Vec::new(),
        }
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    pub fn on_exact_class(mut self, class_name: &str) -> MethodMatcher {
        self.constraints
            .push(Constraint::ExactClass(smallvec::smallvec![class_name.to_string()]));
        self
    }

    pub fn on_class_any(mut self, class_names: &[&str]) -> MethodMatcher {
        self.constraints.push(Constraint::ExactClass(
            class_names.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn on_descendant_of(mut self, class_name: &str) -> MethodMatcher {
        self.constraints
            .push(Constraint::DescendantOf(smallvec::smallvec![class_name.to_string()]));
        self
    }

    pub fn on_descendant_of_any(mut self, class_names: &[&str]) -> MethodMatcher {
        self.constraints.push(Constraint::DescendantOf(
            class_names.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    /// Match a single simple method name.
    ///
    /// # Panics
    ///
    /// When `name` contains a parameter list; use `with_parameters` for that.
    pub fn named(mut self, name: &str) -> MethodMatcher {
        assert!(
            !name.contains('(') && !name.contains(')'),
            "method name `{name}` must not include parameters; use with_parameters"
        );
        self.constraints
            .push(Constraint::Named(smallvec::smallvec![name.to_string()]));
        self
    }

    pub fn named_any_of(mut self, names: &[&str]) -> MethodMatcher {
        for name in names {
            assert!(
                !name.contains('(') && !name.contains(')'),
                "method name `{name}` must not include parameters; use with_parameters"
            );
        }
        self.constraints
            .push(Constraint::Named(names.iter().map(|n| n.to_string()).collect()));
        self
    }

    /// Match names against `pattern`. The pattern is not anchored implicitly.
    pub fn with_name_matching(mut self, pattern: Regex) -> MethodMatcher {
        self.constraints.push(Constraint::NameMatching(pattern));
        self
    }

    /// Reject these exact names.
    pub fn excluding_names(mut self, names: &[&str]) -> MethodMatcher {
        self.constraints.push(Constraint::ExcludingNames(
            names.iter().map(|n| n.to_string()).collect(),
        ));
        self
    }

    /// Exact parameter types, in order; `&[]` matches zero-parameter methods.
    pub fn with_parameters(mut self, parameter_types: &[&str]) -> MethodMatcher {
        self.constraints.push(Constraint::Parameters(
            parameter_types.iter().map(|p| p.to_string()).collect(),
        ));
        self
    }

    fn kind_matches(&self, sym: &Symbol) -> bool {
        match self.kind {
            MethodKind::Instance => !sym.is_static(),
            MethodKind::Static => sym.is_static(),
            MethodKind::Any => true,
        }
    }

    fn constraint_matches(constraint: &Constraint, sym: &Symbol, ctx: &CheckerContext<'_>) -> bool {
        match constraint {
            Constraint::ExactClass(classes) => sym
                .owner
                .as_deref()
                .is_some_and(|owner| classes.iter().any(|c| c == owner)),
            Constraint::DescendantOf(ancestors) => sym.owner.as_deref().is_some_and(|owner| {
                ancestors
                    .iter()
                    .any(|ancestor| ctx.resolver.is_descendant_of(owner, ancestor))
            }),
            Constraint::Named(names) => names.iter().any(|n| *n == sym.escaped_name),
            Constraint::NameMatching(pattern) => pattern.is_match(&sym.escaped_name),
            Constraint::ExcludingNames(names) => !names.iter().any(|n| *n == sym.escaped_name),
            Constraint::Parameters(types) => sym.parameter_types == *types,
        }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, idx: NodeIndex, ctx: &CheckerContext<'_>) -> bool {
        let Some(sym) = ctx.symbol_of(idx) else {
            return false;
        };
        if !sym.is_method() || !self.kind_matches(sym) {
            return false;
        }
        self.constraints
            .iter()
            .all(|constraint| Self::constraint_matches(constraint, sym, ctx))
    }
}
