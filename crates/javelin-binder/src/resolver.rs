use crate::symbols::{Symbol, SymbolId};
use javelin_parser::NodeIndex;

/// Resolves tree nodes to declarations.
///
/// This is the only view of binding information the checker layer uses.
/// Unresolvable nodes yield `None`; that is never an error.
pub trait DeclarationResolver {
    /// Declaration a node refers to (identifier, field access, method
    /// select or method invocation).
    fn resolve(&self, idx: NodeIndex) -> Option<SymbolId>;

    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// Whether `type_name` is `ancestor` or a (transitive) subtype of it.
    /// Both names are qualified.
    fn is_descendant_of(&self, type_name: &str, ancestor: &str) -> bool;
}
