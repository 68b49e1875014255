//! Syntax tree model for the javelin analysis engine.
//!
//! This crate provides the node arena every analysis reads from:
//! - `NodeIndex` / `NodeList` - handles into the arena
//! - `SyntaxKind` - the closed set of node kinds
//! - `NodeArena` - typed data pools with parent links
//! - `NodeAccess` - generic read-only access used by tree walks
//! - `TreeBuilder` - bottom-up construction of compilation units

pub mod parser;

pub use parser::{NodeIndex, NodeList};
