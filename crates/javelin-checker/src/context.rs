//! Per-unit checking context shared by matchers and the correlation engine.

use crate::config::CheckerOptions;
use crate::matchers::MethodMatcher;
use javelin_binder::{DeclarationResolver, Symbol, SymbolId};
use javelin_parser::NodeIndex;
use javelin_parser::parser::NodeArena;

/// Everything a matcher may consult: the tree, the declaration resolver and
/// facts about the compilation unit being checked. Read-only.
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub resolver: &'a dyn DeclarationResolver,
    /// The `CompilationUnit` node
    pub root: NodeIndex,
    pub file_name: &'a str,
    /// Dotted package of the unit, empty for the default package
    pub package_name: &'a str,
    pub options: &'a CheckerOptions,
}

impl<'a> CheckerContext<'a> {
    /// Context for the compilation unit rooted at `root`.
    pub fn new(
        arena: &'a NodeArena,
        resolver: &'a dyn DeclarationResolver,
        root: NodeIndex,
        options: &'a CheckerOptions,
    ) -> CheckerContext<'a> {
        let (file_name, package_name) = arena
            .enclosing_compilation_unit(root)
            .map(|cu| (cu.file_name.as_str(), cu.package_name.as_str()))
            .unwrap_or(("", ""));

        CheckerContext {
            arena,
            resolver,
            root,
            file_name,
            package_name,
            options,
        }
    }

    /// Matcher deciding which calls count as pure accessors in chain mode.
    pub fn accessor_matcher(&self) -> &'a MethodMatcher {
        self.options.accessor_matcher()
    }

    #[inline]
    pub fn symbol_id(&self, idx: NodeIndex) -> Option<SymbolId> {
        self.resolver.resolve(idx)
    }

    #[inline]
    pub fn symbol_of(&self, idx: NodeIndex) -> Option<&'a Symbol> {
        let id = self.resolver.resolve(idx)?;
        self.resolver.symbol(id)
    }
}
