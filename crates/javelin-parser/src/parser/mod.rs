//! Node arena, node kinds and tree construction.

mod base;
pub mod builder;
pub mod node;
mod node_access;
mod node_arena;

pub use base::{NodeIndex, NodeList};
pub use builder::TreeBuilder;
pub use node::{NodeArena, SyntaxKind};
pub use node_access::NodeAccess;

/// Node flags stored in `Node::flags`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    /// `static` member or static nested class.
    pub const STATIC: u16 = 1 << 0;
    /// `final` declaration.
    pub const FINAL: u16 = 1 << 1;
    /// Variable declaration that is a method or lambda parameter.
    pub const PARAMETER: u16 = 1 << 2;
}
