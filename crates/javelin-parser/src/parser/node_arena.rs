//! NodeArena creation methods (add_* methods).
//!
//! This module contains all node creation and initialization methods for the NodeArena.

use super::base::{NodeIndex, NodeList};
use super::node::*;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    /// Set the parent for a single child node.
    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if !child.is_none() {
            // Children are always created before their parent, so the slot exists.
            if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
                info.parent = parent;
            }
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    /// Push a header and its (empty) extended info, returning the new index.
    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    /// Set `node_flags` bits on an existing node.
    pub fn add_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a node without payload (`this`)
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    /// Add an identifier node
    pub fn add_identifier(&mut self, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.push_node(Node::with_data(SyntaxKind::Identifier, pos, end, data_index))
    }

    /// Add a literal node
    pub fn add_literal(&mut self, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(Node::with_data(SyntaxKind::Literal, pos, end, data_index))
    }

    /// Add a member select (`expression.name`)
    pub fn add_field_access(&mut self, pos: u32, end: u32, data: FieldAccessData) -> NodeIndex {
        let expression = data.expression;
        let name = data.name;

        let data_index = self.field_accesses.len() as u32;
        self.field_accesses.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::FieldAccess,
            pos,
            end,
            data_index,
        ));

        self.set_parent(expression, parent);
        self.set_parent(name, parent);

        parent
    }

    /// Add a method invocation
    pub fn add_method_invocation(
        &mut self,
        pos: u32,
        end: u32,
        data: MethodInvocationData,
    ) -> NodeIndex {
        let method_select = data.method_select;
        let arguments = data.arguments.clone();

        let data_index = self.method_invocations.len() as u32;
        self.method_invocations.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::MethodInvocation,
            pos,
            end,
            data_index,
        ));

        self.set_parent(method_select, parent);
        self.set_parent_list(&arguments, parent);

        parent
    }

    /// Add a block node
    pub fn add_block(&mut self, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let statements = data.statements.clone();

        let data_index = self.blocks.len() as u32;
        self.blocks.push(data);
        let parent = self.push_node(Node::with_data(SyntaxKind::Block, pos, end, data_index));

        self.set_parent_list(&statements, parent);

        parent
    }

    /// Add a lambda expression
    pub fn add_lambda(&mut self, pos: u32, end: u32, data: LambdaData) -> NodeIndex {
        let parameters = data.parameters.clone();
        let body = data.body;

        let data_index = self.lambdas.len() as u32;
        self.lambdas.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::LambdaExpression,
            pos,
            end,
            data_index,
        ));

        self.set_parent_list(&parameters, parent);
        self.set_parent(body, parent);

        parent
    }

    /// Add a class declaration (named or anonymous body)
    pub fn add_class(&mut self, pos: u32, end: u32, data: ClassData) -> NodeIndex {
        let name = data.name;
        let members = data.members.clone();

        let data_index = self.classes.len() as u32;
        self.classes.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::ClassDeclaration,
            pos,
            end,
            data_index,
        ));

        self.set_parent(name, parent);
        self.set_parent_list(&members, parent);

        parent
    }

    /// Add a method declaration
    pub fn add_method(&mut self, pos: u32, end: u32, data: MethodDeclData) -> NodeIndex {
        let name = data.name;
        let parameters = data.parameters.clone();
        let body = data.body;

        let data_index = self.methods.len() as u32;
        self.methods.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::MethodDeclaration,
            pos,
            end,
            data_index,
        ));

        self.set_parent(name, parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(body, parent);

        parent
    }

    /// Add a variable declaration (field, local or parameter)
    pub fn add_variable(&mut self, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let name = data.name;
        let initializer = data.initializer;

        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::VariableDeclaration,
            pos,
            end,
            data_index,
        ));

        self.set_parent(name, parent);
        self.set_parent(initializer, parent);

        parent
    }

    /// Add an instance creation, optionally with an anonymous class body
    pub fn add_new_class(&mut self, pos: u32, end: u32, data: NewClassData) -> NodeIndex {
        let arguments = data.arguments.clone();
        let body = data.body;

        let data_index = self.new_classes.len() as u32;
        self.new_classes.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::NewClass,
            pos,
            end,
            data_index,
        ));

        self.set_parent_list(&arguments, parent);
        self.set_parent(body, parent);

        parent
    }

    /// Add an expression or return statement.
    pub fn add_statement(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: StatementData,
    ) -> NodeIndex {
        debug_assert!(
            matches!(
                kind,
                SyntaxKind::ExpressionStatement | SyntaxKind::ReturnStatement
            ),
            "add_statement called with {kind:?}"
        );
        let expression = data.expression;

        let data_index = self.statements.len() as u32;
        self.statements.push(data);
        let parent = self.push_node(Node::with_data(kind, pos, end, data_index));

        self.set_parent(expression, parent);

        parent
    }

    /// Add an if statement
    pub fn add_if_statement(&mut self, pos: u32, end: u32, data: IfStatementData) -> NodeIndex {
        let condition = data.condition;
        let then_statement = data.then_statement;
        let else_statement = data.else_statement;

        let data_index = self.if_statements.len() as u32;
        self.if_statements.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::IfStatement,
            pos,
            end,
            data_index,
        ));

        self.set_parent(condition, parent);
        self.set_parent(then_statement, parent);
        self.set_parent(else_statement, parent);

        parent
    }

    /// Add a binary expression
    pub fn add_binary_expr(&mut self, pos: u32, end: u32, data: BinaryExprData) -> NodeIndex {
        let left = data.left;
        let right = data.right;

        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::BinaryExpression,
            pos,
            end,
            data_index,
        ));

        self.set_parent(left, parent);
        self.set_parent(right, parent);

        parent
    }

    /// Add the root node of a tree
    pub fn add_compilation_unit(
        &mut self,
        pos: u32,
        end: u32,
        data: CompilationUnitData,
    ) -> NodeIndex {
        let members = data.members.clone();

        let data_index = self.compilation_units.len() as u32;
        self.compilation_units.push(data);
        let parent = self.push_node(Node::with_data(
            SyntaxKind::CompilationUnit,
            pos,
            end,
            data_index,
        ));

        self.set_parent_list(&members, parent);

        parent
    }
}
