//! NodeArena access methods and the NodeAccess trait.
//!
//! This module contains all node access/query methods and the NodeAccess
//! trait used by generic tree walks.

use super::base::NodeIndex;
use super::node::*;
use smallvec::SmallVec;

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of a node, `None` for the root or an unknown index.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.get_extended(index)
            .and_then(|ext| ext.parent.into_option())
    }

    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == SyntaxKind::Identifier {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data() && node.kind == SyntaxKind::Literal {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_field_access(&self, node: &Node) -> Option<&FieldAccessData> {
        if node.has_data() && node.kind == SyntaxKind::FieldAccess {
            self.field_accesses.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_method_invocation(&self, node: &Node) -> Option<&MethodInvocationData> {
        if node.has_data() && node.kind == SyntaxKind::MethodInvocation {
            self.method_invocations.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == SyntaxKind::Block {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_lambda(&self, node: &Node) -> Option<&LambdaData> {
        if node.has_data() && node.kind == SyntaxKind::LambdaExpression {
            self.lambdas.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_class(&self, node: &Node) -> Option<&ClassData> {
        if node.has_data() && node.kind == SyntaxKind::ClassDeclaration {
            self.classes.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_method(&self, node: &Node) -> Option<&MethodDeclData> {
        if node.has_data() && node.kind == SyntaxKind::MethodDeclaration {
            self.methods.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable(&self, node: &Node) -> Option<&VariableData> {
        if node.has_data() && node.kind == SyntaxKind::VariableDeclaration {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_new_class(&self, node: &Node) -> Option<&NewClassData> {
        if node.has_data() && node.kind == SyntaxKind::NewClass {
            self.new_classes.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get expression/return statement data.
    #[inline]
    pub fn get_statement(&self, node: &Node) -> Option<&StatementData> {
        if node.has_data()
            && matches!(
                node.kind,
                SyntaxKind::ExpressionStatement | SyntaxKind::ReturnStatement
            )
        {
            self.statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_if_statement(&self, node: &Node) -> Option<&IfStatementData> {
        if node.has_data() && node.kind == SyntaxKind::IfStatement {
            self.if_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == SyntaxKind::BinaryExpression {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_compilation_unit(&self, node: &Node) -> Option<&CompilationUnitData> {
        if node.has_data() && node.kind == SyntaxKind::CompilationUnit {
            self.compilation_units.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Text of an identifier node by index.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|ident| ident.escaped_text.as_str())
    }

    /// Walk up to the root and return its compilation unit data.
    pub fn enclosing_compilation_unit(&self, index: NodeIndex) -> Option<&CompilationUnitData> {
        let mut current = index;
        for _ in 0..javelin_common::limits::MAX_TREE_WALK_ITERATIONS {
            let node = self.get(current)?;
            if node.kind == SyntaxKind::CompilationUnit {
                return self.get_compilation_unit(node);
            }
            current = self.parent_of(current)?;
        }
        None
    }
}

// =============================================================================
// NodeAccess trait
// =============================================================================

/// Read-only access to a tree, independent of how it is stored.
pub trait NodeAccess {
    /// Get the syntax kind of a node
    fn kind(&self, index: NodeIndex) -> Option<SyntaxKind>;

    /// Get the source position range
    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)>;

    /// Get literal value text (if this is a literal node)
    fn get_literal_text(&self, index: NodeIndex) -> Option<&str>;

    /// Get children of a node in source order
    fn get_children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 8]>;
}

impl NodeAccess for NodeArena {
    fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind)
    }

    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get(index).map(|n| (n.pos, n.end))
    }

    fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_literal(node).map(|lit| lit.text.as_str())
    }

    fn get_children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 8]> {
        let mut children = SmallVec::new();
        let Some(node) = self.get(index) else {
            return children;
        };

        let mut push = |idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        match node.kind {
            SyntaxKind::CompilationUnit => {
                if let Some(data) = self.get_compilation_unit(node) {
                    data.members.iter().for_each(&mut push);
                }
            }
            SyntaxKind::ClassDeclaration => {
                if let Some(data) = self.get_class(node) {
                    push(data.name);
                    data.members.iter().for_each(&mut push);
                }
            }
            SyntaxKind::MethodDeclaration => {
                if let Some(data) = self.get_method(node) {
                    push(data.name);
                    data.parameters.iter().for_each(&mut push);
                    push(data.body);
                }
            }
            SyntaxKind::VariableDeclaration => {
                if let Some(data) = self.get_variable(node) {
                    push(data.name);
                    push(data.initializer);
                }
            }
            SyntaxKind::Block => {
                if let Some(data) = self.get_block(node) {
                    data.statements.iter().for_each(&mut push);
                }
            }
            SyntaxKind::LambdaExpression => {
                if let Some(data) = self.get_lambda(node) {
                    data.parameters.iter().for_each(&mut push);
                    push(data.body);
                }
            }
            SyntaxKind::NewClass => {
                if let Some(data) = self.get_new_class(node) {
                    data.arguments.iter().for_each(&mut push);
                    push(data.body);
                }
            }
            SyntaxKind::ExpressionStatement | SyntaxKind::ReturnStatement => {
                if let Some(data) = self.get_statement(node) {
                    push(data.expression);
                }
            }
            SyntaxKind::IfStatement => {
                if let Some(data) = self.get_if_statement(node) {
                    push(data.condition);
                    push(data.then_statement);
                    push(data.else_statement);
                }
            }
            SyntaxKind::MethodInvocation => {
                if let Some(data) = self.get_method_invocation(node) {
                    push(data.method_select);
                    data.arguments.iter().for_each(&mut push);
                }
            }
            SyntaxKind::FieldAccess => {
                if let Some(data) = self.get_field_access(node) {
                    push(data.expression);
                    push(data.name);
                }
            }
            SyntaxKind::BinaryExpression => {
                if let Some(data) = self.get_binary_expr(node) {
                    push(data.left);
                    push(data.right);
                }
            }
            SyntaxKind::Identifier | SyntaxKind::ThisExpression | SyntaxKind::Literal => {}
        }

        children
    }
}
