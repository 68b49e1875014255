//! Symbols and the symbol arena.

use javelin_parser::NodeIndex;

/// Identity of a declaration.
///
/// Two references denote the same declaration iff they resolve to the same
/// `SymbolId`. The numeric value carries no ordering meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const CLASS: u32 = 1 << 0;
    pub const METHOD: u32 = 1 << 1;
    pub const FIELD: u32 = 1 << 2;
    pub const LOCAL: u32 = 1 << 3;
    pub const PARAMETER: u32 = 1 << 4;
    pub const STATIC: u32 = 1 << 5;

    /// Anything a value can be assigned to.
    pub const VARIABLE: u32 = FIELD | LOCAL | PARAMETER;
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub flags: u32,
    pub escaped_name: String,
    /// Qualified name of the declaring type, `None` for classes and locals
    pub owner: Option<String>,
    /// Declared type of a variable, return type of a method, or the
    /// qualified name of a class
    pub type_name: String,
    /// Parameter types of a method, as declared
    pub parameter_types: Vec<String>,
    /// Declaring nodes in the bound tree (empty for library symbols)
    pub declarations: Vec<NodeIndex>,
}

impl Symbol {
    pub fn new(flags: u32, escaped_name: impl Into<String>) -> Symbol {
        Symbol {
            flags,
            escaped_name: escaped_name.into(),
            owner: None,
            type_name: String::new(),
            parameter_types: Vec::new(),
            declarations: Vec::new(),
        }
    }

    #[inline]
    pub fn has_any_flags(&self, flags: u32) -> bool {
        (self.flags & flags) != 0
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        self.has_any_flags(symbol_flags::METHOD)
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        self.has_any_flags(symbol_flags::VARIABLE)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.has_any_flags(symbol_flags::STATIC)
    }
}

/// Dense storage for symbols, indexed by `SymbolId`.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    /// Drop every symbol allocated at or after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.symbols.truncate(len);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, sym)| (SymbolId(i as u32), sym))
    }
}
