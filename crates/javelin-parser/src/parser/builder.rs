//! Programmatic tree construction.
//!
//! `TreeBuilder` wraps a `NodeArena` and hands out positions from a monotonic
//! cursor. Nodes are built bottom-up, so a parent span always covers the spans
//! of its children.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_flags;
use tracing::trace;

pub struct TreeBuilder {
    arena: NodeArena,
    cursor: u32,
    file_name: String,
    package_name: String,
    imports: Vec<String>,
}

impl TreeBuilder {
    pub fn new(file_name: impl Into<String>, package_name: impl Into<String>) -> TreeBuilder {
        TreeBuilder {
            arena: NodeArena::new(),
            cursor: 0,
            file_name: file_name.into(),
            package_name: package_name.into(),
            imports: Vec::new(),
        }
    }

    /// Add a single-type import (`import java.time.Duration;`).
    pub fn import(&mut self, qualified_name: &str) -> &mut TreeBuilder {
        self.imports.push(qualified_name.to_string());
        self
    }

    /// Read access to the nodes built so far.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    fn leaf_span(&mut self, width: u32) -> (u32, u32) {
        let pos = self.cursor;
        let end = pos + width.max(1);
        self.cursor = end + 1;
        (pos, end)
    }

    /// Span starting at the earliest child and ending at the cursor.
    fn enclosing_span(&mut self, children: &[NodeIndex]) -> (u32, u32) {
        let pos = children
            .iter()
            .filter_map(|&child| self.arena.get(child))
            .map(|node| node.pos)
            .min()
            .unwrap_or(self.cursor);
        let end = self.cursor;
        self.cursor = end + 1;
        (pos, end)
    }

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        let (pos, end) = self.leaf_span(name.len() as u32);
        self.arena.add_identifier(
            pos,
            end,
            IdentifierData {
                escaped_text: name.to_string(),
            },
        )
    }

    pub fn this_expr(&mut self) -> NodeIndex {
        let (pos, end) = self.leaf_span(4);
        self.arena.add_token(SyntaxKind::ThisExpression, pos, end)
    }

    pub fn literal(&mut self, text: &str) -> NodeIndex {
        let (pos, end) = self.leaf_span(text.len() as u32);
        self.arena.add_literal(
            pos,
            end,
            LiteralData {
                text: text.to_string(),
            },
        )
    }

    /// `expression.name`
    pub fn field_access(&mut self, expression: NodeIndex, name: &str) -> NodeIndex {
        let name = self.ident(name);
        let (pos, end) = self.enclosing_span(&[expression, name]);
        self.arena
            .add_field_access(pos, end, FieldAccessData { expression, name })
    }

    /// Bare call `name(args)`.
    pub fn call(&mut self, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        let method_select = self.ident(name);
        self.invocation(method_select, arguments)
    }

    /// `receiver.name(args)`
    pub fn call_on(
        &mut self,
        receiver: NodeIndex,
        name: &str,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        let method_select = self.field_access(receiver, name);
        self.invocation(method_select, arguments)
    }

    fn invocation(&mut self, method_select: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        let mut children = Vec::with_capacity(arguments.len() + 1);
        children.push(method_select);
        children.extend_from_slice(&arguments);
        let (pos, end) = self.enclosing_span(&children);
        self.arena.add_method_invocation(
            pos,
            end,
            MethodInvocationData {
                method_select,
                arguments: NodeList::from_vec(arguments),
            },
        )
    }

    /// Zero-argument call chain: `root.a().b().c()` for `names = ["a", "b", "c"]`.
    ///
    /// Returns `root` unchanged when `names` is empty.
    pub fn call_chain(&mut self, root: NodeIndex, names: &[&str]) -> NodeIndex {
        names
            .iter()
            .fold(root, |receiver, name| self.call_on(receiver, name, Vec::new()))
    }

    /// Zero-argument call chain rooted at a simple name.
    pub fn var_chain(&mut self, root: &str, names: &[&str]) -> NodeIndex {
        let root = self.ident(root);
        self.call_chain(root, names)
    }

    pub fn expr_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.enclosing_span(&[expression]);
        self.arena.add_statement(
            SyntaxKind::ExpressionStatement,
            pos,
            end,
            StatementData { expression },
        )
    }

    /// `return expression;`, pass `NodeIndex::NONE` for a bare `return;`.
    pub fn return_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.enclosing_span(&[expression]);
        self.arena.add_statement(
            SyntaxKind::ReturnStatement,
            pos,
            end,
            StatementData { expression },
        )
    }

    fn variable(&mut self, type_name: &str, name: &str, initializer: Option<NodeIndex>) -> NodeIndex {
        let name = self.ident(name);
        let initializer = initializer.unwrap_or(NodeIndex::NONE);
        let (pos, end) = self.enclosing_span(&[name, initializer]);
        self.arena.add_variable(
            pos,
            end,
            VariableData {
                name,
                type_name: type_name.to_string(),
                initializer,
            },
        )
    }

    /// Local variable declaration statement.
    pub fn local_var(
        &mut self,
        type_name: &str,
        name: &str,
        initializer: Option<NodeIndex>,
    ) -> NodeIndex {
        self.variable(type_name, name, initializer)
    }

    /// Method or lambda parameter. An empty `type_name` means inferred.
    pub fn parameter(&mut self, type_name: &str, name: &str) -> NodeIndex {
        let param = self.variable(type_name, name, None);
        self.arena.add_flags(param, node_flags::PARAMETER);
        param
    }

    /// Instance field declaration (class member).
    pub fn field(
        &mut self,
        type_name: &str,
        name: &str,
        initializer: Option<NodeIndex>,
    ) -> NodeIndex {
        self.variable(type_name, name, initializer)
    }

    /// `static` field declaration.
    pub fn static_field(
        &mut self,
        type_name: &str,
        name: &str,
        initializer: Option<NodeIndex>,
    ) -> NodeIndex {
        let field = self.variable(type_name, name, initializer);
        self.arena.add_flags(field, node_flags::STATIC);
        field
    }

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.enclosing_span(&statements);
        self.arena.add_block(
            pos,
            end,
            BlockData {
                statements: NodeList::from_vec(statements),
            },
        )
    }

    /// `(parameters) -> body`, with `body` a block or an expression.
    pub fn lambda(&mut self, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        let mut children = parameters.clone();
        children.push(body);
        let (pos, end) = self.enclosing_span(&children);
        self.arena.add_lambda(
            pos,
            end,
            LambdaData {
                parameters: NodeList::from_vec(parameters),
                body,
            },
        )
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: Option<NodeIndex>,
    ) -> NodeIndex {
        let else_statement = else_statement.unwrap_or(NodeIndex::NONE);
        let (pos, end) = self.enclosing_span(&[condition, then_statement, else_statement]);
        self.arena.add_if_statement(
            pos,
            end,
            IfStatementData {
                condition,
                then_statement,
                else_statement,
            },
        )
    }

    pub fn binary(&mut self, left: NodeIndex, operator: &str, right: NodeIndex) -> NodeIndex {
        let (pos, end) = self.enclosing_span(&[left, right]);
        self.arena.add_binary_expr(
            pos,
            end,
            BinaryExprData {
                left,
                operator: operator.to_string(),
                right,
            },
        )
    }

    /// Method declaration; `body` is `None` for abstract methods.
    pub fn method(
        &mut self,
        name: &str,
        parameters: Vec<NodeIndex>,
        return_type: &str,
        body: Option<NodeIndex>,
    ) -> NodeIndex {
        let name = self.ident(name);
        let body = body.unwrap_or(NodeIndex::NONE);
        let mut children = vec![name];
        children.extend_from_slice(&parameters);
        children.push(body);
        let (pos, end) = self.enclosing_span(&children);
        self.arena.add_method(
            pos,
            end,
            MethodDeclData {
                name,
                parameters: NodeList::from_vec(parameters),
                return_type: return_type.to_string(),
                body,
            },
        )
    }

    /// Named class declaration.
    pub fn class(&mut self, name: &str, supertypes: &[&str], members: Vec<NodeIndex>) -> NodeIndex {
        let name = self.ident(name);
        let mut children = vec![name];
        children.extend_from_slice(&members);
        let (pos, end) = self.enclosing_span(&children);
        self.arena.add_class(
            pos,
            end,
            ClassData {
                name,
                supertypes: supertypes.iter().map(|s| s.to_string()).collect(),
                members: NodeList::from_vec(members),
            },
        )
    }

    /// `new Type(args)`, with an anonymous class body when `body` is given.
    pub fn new_class(
        &mut self,
        type_name: &str,
        arguments: Vec<NodeIndex>,
        body: Option<Vec<NodeIndex>>,
    ) -> NodeIndex {
        let body = match body {
            Some(members) => {
                let (pos, end) = self.enclosing_span(&members);
                self.arena.add_class(
                    pos,
                    end,
                    ClassData {
                        name: NodeIndex::NONE,
                        supertypes: vec![type_name.to_string()],
                        members: NodeList::from_vec(members),
                    },
                )
            }
            None => NodeIndex::NONE,
        };
        let mut children = arguments.clone();
        children.push(body);
        let (pos, end) = self.enclosing_span(&children);
        self.arena.add_new_class(
            pos,
            end,
            NewClassData {
                type_name: type_name.to_string(),
                arguments: NodeList::from_vec(arguments),
                body,
            },
        )
    }

    /// Set `node_flags` bits on an already built node.
    pub fn with_flags(&mut self, index: NodeIndex, flags: u16) -> NodeIndex {
        self.arena.add_flags(index, flags);
        index
    }

    /// Close the compilation unit and hand back the arena and its root.
    pub fn finish(mut self, members: Vec<NodeIndex>) -> (NodeArena, NodeIndex) {
        let (pos, end) = self.enclosing_span(&members);
        let root = self.arena.add_compilation_unit(
            pos,
            end,
            CompilationUnitData {
                file_name: self.file_name,
                package_name: self.package_name,
                imports: self.imports,
                members: NodeList::from_vec(members),
            },
        );
        trace!(nodes = self.arena.len(), "built compilation unit");
        (self.arena, root)
    }
}
