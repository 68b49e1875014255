//! Declaration binder for the javelin analysis engine.
//!
//! The binder assigns a `SymbolId` to every resolvable reference in a tree:
//! - `symbols` - `SymbolId`, `Symbol`, `SymbolArena` and `symbol_flags`
//! - `types` - library type declarations (`TypeDecl`)
//! - `state` - `BinderState`, the per-unit binder and type table
//! - `resolver` - the `DeclarationResolver` capability consumed by checks
//! - `lib_loader` - JSON loading of library type declarations

pub mod lib_loader;
mod resolver;
pub mod state;
mod state_node_binding;
pub mod symbols;
pub mod types;

pub use resolver::DeclarationResolver;
pub use state::BinderState;
pub use symbols::{Symbol, SymbolArena, SymbolId, symbol_flags};
pub use types::{FieldDecl, MethodDecl, TypeDecl};
