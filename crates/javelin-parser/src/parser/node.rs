//! Node and data pool definitions.
//!
//! A `Node` is a small fixed-size header (kind, flags, span, data index). The
//! kind-specific payload lives in a typed pool on the `NodeArena`, addressed by
//! `data_index`. Parent links live in `extended_info`, parallel to `nodes`.

use super::base::{NodeIndex, NodeList};

/// The closed set of node kinds.
///
/// Tree walks switch over this enum directly; every rule about which kinds
/// bound a scope or are skipped by a scan is a `match` arm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    ClassDeclaration,
    MethodDeclaration,
    VariableDeclaration,
    Block,
    LambdaExpression,
    NewClass,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    MethodInvocation,
    FieldAccess,
    Identifier,
    ThisExpression,
    Literal,
    BinaryExpression,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxKind,
    /// `node_flags` bits
    pub flags: u16,
    /// Start position in source
    pub pos: u32,
    /// End position in source
    pub end: u32,
    /// Index into the kind-specific pool (`Node::NO_DATA` = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: SyntaxKind, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        (self.flags & flag) != 0
    }
}

/// Per-node information that is not part of the compact header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

// =============================================================================
// Data pools
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralData {
    pub text: String,
}

/// `expression.name`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAccessData {
    pub expression: NodeIndex,
    /// Identifier node holding the member name
    pub name: NodeIndex,
}

/// `method_select(arguments)`, where `method_select` is either an identifier
/// (bare call) or a field access (call with explicit receiver).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInvocationData {
    pub method_select: NodeIndex,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockData {
    pub statements: NodeList,
}

/// `(parameters) -> body`, where `body` is a block or an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LambdaData {
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassData {
    /// Identifier node, `NONE` for anonymous class bodies
    pub name: NodeIndex,
    /// Names of extended/implemented types as written
    pub supertypes: Vec<String>,
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDeclData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub return_type: String,
    /// Block, `NONE` for abstract methods
    pub body: NodeIndex,
}

/// Field, local variable or parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableData {
    pub name: NodeIndex,
    /// Declared type as written, empty for inferred lambda parameters
    pub type_name: String,
    pub initializer: NodeIndex,
}

/// `new Type(arguments) { body }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClassData {
    pub type_name: String,
    pub arguments: NodeList,
    /// Anonymous class declaration, `NONE` without a body
    pub body: NodeIndex,
}

/// Expression and return statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStatementData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: String,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationUnitData {
    pub file_name: String,
    /// Dotted package name, empty for the default package
    pub package_name: String,
    /// Single-type imports, fully qualified
    pub imports: Vec<String>,
    pub members: NodeList,
}

/// Arena owning every node of one tree.
///
/// Nodes are created bottom-up: children exist before their parent, and each
/// `add_*` constructor records the new node as parent of its children.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub field_accesses: Vec<FieldAccessData>,
    pub method_invocations: Vec<MethodInvocationData>,
    pub blocks: Vec<BlockData>,
    pub lambdas: Vec<LambdaData>,
    pub classes: Vec<ClassData>,
    pub methods: Vec<MethodDeclData>,
    pub variables: Vec<VariableData>,
    pub new_classes: Vec<NewClassData>,
    pub statements: Vec<StatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub compilation_units: Vec<CompilationUnitData>,
}
