//! Binder state: symbol table, type table and node-to-symbol map.

use crate::lib_loader;
use crate::resolver::DeclarationResolver;
use crate::symbols::{Symbol, SymbolArena, SymbolId, symbol_flags};
use crate::types::{TypeDecl, simple_name};
use javelin_common::limits::MAX_SUPERTYPE_DEPTH;
use javelin_parser::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::trace;

/// A known type: its class symbol, direct supertypes and members by name.
#[derive(Clone, Debug)]
pub(crate) struct TypeEntry {
    pub(crate) symbol: SymbolId,
    /// Qualified where resolvable, as written otherwise
    pub(crate) supertypes: Vec<String>,
    pub(crate) members: FxHashMap<String, SmallVec<[SymbolId; 2]>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// Qualified name of the class whose body this is
    Class(String),
    Method,
    Block,
    Lambda,
}

#[derive(Clone, Debug)]
pub(crate) struct Scope {
    pub(crate) kind: ScopeKind,
    pub(crate) locals: FxHashMap<String, SymbolId>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind) -> Scope {
        Scope {
            kind,
            locals: FxHashMap::default(),
        }
    }
}

/// Library-only declarations, restored before each unit is bound.
#[derive(Clone, Debug)]
pub(crate) struct LibraryBaseline {
    symbol_count: usize,
    types: FxHashMap<String, TypeEntry>,
    simple_names: FxHashMap<String, SmallVec<[String; 2]>>,
}

pub struct BinderState {
    pub symbols: SymbolArena,
    /// Symbol per node index (identifiers, field accesses, method selects,
    /// method invocations, declaration names)
    pub node_symbols: FxHashMap<u32, SymbolId>,
    /// Static type per expression node, qualified where resolvable
    pub(crate) expr_types: FxHashMap<u32, String>,
    pub(crate) types: FxHashMap<String, TypeEntry>,
    pub(crate) simple_names: FxHashMap<String, SmallVec<[String; 2]>>,
    // Per compilation unit
    pub(crate) package_name: String,
    pub(crate) imports: Vec<String>,
    pub(crate) class_names: FxHashMap<u32, String>,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) anonymous_count: u32,
    /// `None` until the first unit is bound, and again after a library type
    /// is declared
    pub(crate) library: Option<LibraryBaseline>,
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState {
            symbols: SymbolArena::new(),
            node_symbols: FxHashMap::default(),
            expr_types: FxHashMap::default(),
            types: FxHashMap::default(),
            simple_names: FxHashMap::default(),
            package_name: String::new(),
            imports: Vec::new(),
            class_names: FxHashMap::default(),
            scopes: Vec::new(),
            anonymous_count: 0,
            library: None,
        }
    }

    /// A binder with the bundled library declarations already registered.
    pub fn with_default_library() -> BinderState {
        let mut binder = BinderState::new();
        lib_loader::load_into(&mut binder, lib_loader::default_library());
        binder
    }

    /// Register a library type and its members.
    ///
    /// Declarations of a previously bound unit are dropped first, so library
    /// types never depend on which units were bound before.
    pub fn declare_library_type(&mut self, decl: TypeDecl) {
        self.reset_to_library();
        self.library = None;
        let qualified = decl.qualified_name.clone();
        let mut class_symbol = Symbol::new(symbol_flags::CLASS, decl.simple_name());
        class_symbol.type_name = qualified.clone();
        let class_id = self.symbols.alloc(class_symbol);
        self.register_type(&qualified, class_id, decl.supertypes);

        for field in decl.fields {
            let mut flags = symbol_flags::FIELD;
            if field.is_static {
                flags |= symbol_flags::STATIC;
            }
            let mut sym = Symbol::new(flags, field.name.as_str());
            sym.owner = Some(qualified.clone());
            sym.type_name = field.type_name;
            let id = self.symbols.alloc(sym);
            self.add_member(&qualified, &field.name, id);
        }

        for method in decl.methods {
            let mut flags = symbol_flags::METHOD;
            if method.is_static {
                flags |= symbol_flags::STATIC;
            }
            let mut sym = Symbol::new(flags, method.name.as_str());
            sym.owner = Some(qualified.clone());
            sym.type_name = method.return_type;
            sym.parameter_types = method.parameter_types;
            let id = self.symbols.alloc(sym);
            self.add_member(&qualified, &method.name, id);
        }
        trace!(type_name = %qualified, "declared library type");
    }

    /// Forget everything a bound unit added: its types, symbols and node maps.
    pub(crate) fn reset_to_library(&mut self) {
        if let Some(base) = &self.library {
            self.symbols.truncate(base.symbol_count);
            self.types = base.types.clone();
            self.simple_names = base.simple_names.clone();
        }
        self.node_symbols.clear();
        self.expr_types.clear();
        self.class_names.clear();
        self.scopes.clear();
        self.anonymous_count = 0;
        self.package_name.clear();
        self.imports.clear();
    }

    /// Record the current, library-only state as the baseline.
    pub(crate) fn capture_library(&mut self) {
        self.library = Some(LibraryBaseline {
            symbol_count: self.symbols.len(),
            types: self.types.clone(),
            simple_names: self.simple_names.clone(),
        });
    }

    pub(crate) fn register_type(&mut self, qualified: &str, symbol: SymbolId, supertypes: Vec<String>) {
        self.types.insert(
            qualified.to_string(),
            TypeEntry {
                symbol,
                supertypes,
                members: FxHashMap::default(),
            },
        );
        let simple = simple_name(qualified);
        if simple.is_empty() {
            return;
        }
        let entry = self.simple_names.entry(simple.to_string()).or_default();
        if !entry.iter().any(|q| q == qualified) {
            entry.push(qualified.to_string());
        }
    }

    pub(crate) fn add_member(&mut self, owner: &str, name: &str, symbol: SymbolId) {
        if let Some(entry) = self.types.get_mut(owner) {
            entry.members.entry(name.to_string()).or_default().push(symbol);
        }
    }

    /// Whether a type with this qualified name is known.
    pub fn has_type(&self, qualified: &str) -> bool {
        self.types.contains_key(qualified)
    }

    /// Resolve a type name as written in the current unit.
    ///
    /// Order: exact qualified name, single-type imports, same package,
    /// `java.lang`, then a unique simple name among all known types.
    pub fn resolve_type_name(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        if self.types.contains_key(name) {
            return Some(name.to_string());
        }
        if let Some(import) = self.imports.iter().find(|i| simple_name(i) == name) {
            return Some(import.clone());
        }
        if !self.package_name.is_empty() {
            let in_package = format!("{}.{}", self.package_name, name);
            if self.types.contains_key(&in_package) {
                return Some(in_package);
            }
        }
        let in_lang = format!("java.lang.{name}");
        if self.types.contains_key(&in_lang) {
            return Some(in_lang);
        }
        match self.simple_names.get(name) {
            Some(candidates) if candidates.len() == 1 => candidates.first().cloned(),
            _ => None,
        }
    }

    /// Qualified form of a written type, or the written form when unknown.
    pub(crate) fn qualify(&self, written: &str) -> String {
        self.resolve_type_name(written)
            .unwrap_or_else(|| written.to_string())
    }

    /// Breadth-first walk over `type_name` and its supertypes, stopping at
    /// the first entry for which `visit` returns `Some`.
    fn find_in_hierarchy<T>(
        &self,
        type_name: &str,
        mut visit: impl FnMut(&str, &TypeEntry) -> Option<T>,
    ) -> Option<T> {
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        queue.push_back((type_name, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth > MAX_SUPERTYPE_DEPTH || !seen.insert(current) {
                continue;
            }
            let Some(entry) = self.types.get(current) else {
                continue;
            };
            if let Some(found) = visit(current, entry) {
                return Some(found);
            }
            for supertype in &entry.supertypes {
                queue.push_back((supertype.as_str(), depth + 1));
            }
        }
        None
    }

    /// Field `name` declared on `type_name` or inherited.
    pub fn find_field(&self, type_name: &str, name: &str) -> Option<SymbolId> {
        self.find_in_hierarchy(type_name, |_, entry| {
            entry.members.get(name)?.iter().copied().find(|&id| {
                self.symbols
                    .get(id)
                    .is_some_and(|sym| sym.has_any_flags(symbol_flags::FIELD))
            })
        })
    }

    /// Method `name` taking `arity` arguments, declared on `type_name` or
    /// inherited. The first overload with matching arity wins.
    pub fn find_method(&self, type_name: &str, name: &str, arity: usize) -> Option<SymbolId> {
        self.find_in_hierarchy(type_name, |_, entry| {
            entry.members.get(name)?.iter().copied().find(|&id| {
                self.symbols
                    .get(id)
                    .is_some_and(|sym| sym.is_method() && sym.parameter_types.len() == arity)
            })
        })
    }

    /// Whether `type_name` is `ancestor` or one of its transitive subtypes.
    pub fn is_subtype_of(&self, type_name: &str, ancestor: &str) -> bool {
        if type_name == ancestor {
            return true;
        }
        self.find_in_hierarchy(type_name, |current, _| (current == ancestor).then_some(()))
            .is_some()
    }

    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn get_node_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    /// Static type recorded for an expression node.
    pub fn expression_type(&self, node: NodeIndex) -> Option<&str> {
        self.expr_types.get(&node.0).map(String::as_str)
    }

    /// Qualified name given to a class declaration node of the bound unit.
    pub fn class_qualified_name(&self, class_idx: NodeIndex) -> Option<&str> {
        self.class_names.get(&class_idx.0).map(String::as_str)
    }

    /// Class symbol of a known type.
    pub fn type_symbol(&self, qualified: &str) -> Option<SymbolId> {
        self.types.get(qualified).map(|entry| entry.symbol)
    }
}

impl DeclarationResolver for BinderState {
    fn resolve(&self, idx: NodeIndex) -> Option<SymbolId> {
        self.get_node_symbol(idx)
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.get_symbol(id)
    }

    fn is_descendant_of(&self, type_name: &str, ancestor: &str) -> bool {
        self.is_subtype_of(type_name, ancestor)
    }
}
