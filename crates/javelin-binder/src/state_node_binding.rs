//! Node binding: declaration collection and the scope-stack walk.

use crate::state::{BinderState, Scope, ScopeKind};
use crate::symbols::{Symbol, SymbolId, symbol_flags};
use javelin_common::limits::MAX_TREE_WALK_ITERATIONS;
use javelin_parser::NodeIndex;
use javelin_parser::parser::node::NodeArena;
use javelin_parser::parser::{NodeAccess, SyntaxKind, node_flags};
use tracing::{debug, debug_span, trace};

impl BinderState {
    /// Bind one compilation unit.
    ///
    /// Registers every class of the unit (anonymous bodies included) with
    /// its members, then walks the tree resolving references. Everything a
    /// previously bound unit added is discarded first; only library types
    /// carry over.
    pub fn bind_compilation_unit(&mut self, arena: &NodeArena, root: NodeIndex) {
        let _span = debug_span!("bind_compilation_unit", root = root.0).entered();

        self.reset_to_library();
        if self.library.is_none() {
            self.capture_library();
        }

        let Some(cu) = arena.get(root).and_then(|node| arena.get_compilation_unit(node)) else {
            debug!("root is not a compilation unit");
            return;
        };
        self.package_name = cu.package_name.clone();
        self.imports = cu.imports.clone();

        let classes = self.collect_class_declarations(arena, root);
        for &class_idx in &classes {
            self.declare_class_members(arena, class_idx);
        }

        self.bind_node(arena, root);
        debug!(
            classes = classes.len(),
            bound = self.node_symbols.len(),
            "bound compilation unit"
        );
    }

    /// Pass 1: name every class declaration, outer classes first.
    fn collect_class_declarations(&mut self, arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
        let mut classes = Vec::new();
        let mut stack = vec![root];

        while let Some(idx) = stack.pop() {
            let Some(node) = arena.get(idx) else {
                continue;
            };
            if let Some(class) = arena.get_class(node) {
                let enclosing = self.enclosing_class_name(arena, idx);
                let qualified = match arena.identifier_text(class.name) {
                    Some(name) => match enclosing {
                        Some(outer) => format!("{outer}.{name}"),
                        None if self.package_name.is_empty() => name.to_string(),
                        None => format!("{}.{}", self.package_name, name),
                    },
                    None => {
                        self.anonymous_count += 1;
                        format!("{}${}", enclosing.unwrap_or_default(), self.anonymous_count)
                    }
                };

                let simple = arena.identifier_text(class.name).unwrap_or_default();
                let mut sym = Symbol::new(symbol_flags::CLASS, simple);
                sym.type_name = qualified.clone();
                sym.declarations.push(idx);
                if node.has_flag(node_flags::STATIC) {
                    sym.flags |= symbol_flags::STATIC;
                }
                let id = self.symbols.alloc(sym);
                if class.name.is_some() {
                    self.node_symbols.insert(class.name.0, id);
                }
                // Supertypes are resolved in pass 2 once every name is known.
                self.register_type(&qualified, id, Vec::new());
                trace!(class = %qualified, "registered class");
                self.class_names.insert(idx.0, qualified);
                classes.push(idx);
            }

            // Reverse so that source order is preserved on pop.
            let children = arena.get_children(idx);
            stack.extend(children.into_iter().rev());
        }
        classes
    }

    fn enclosing_class_name(&self, arena: &NodeArena, idx: NodeIndex) -> Option<String> {
        let mut current = arena.parent_of(idx)?;
        for _ in 0..MAX_TREE_WALK_ITERATIONS {
            if arena.kind(current) == Some(SyntaxKind::ClassDeclaration) {
                return self.class_names.get(&current.0).cloned();
            }
            current = arena.parent_of(current)?;
        }
        None
    }

    /// Pass 2: resolve supertypes and declare fields and methods.
    fn declare_class_members(&mut self, arena: &NodeArena, class_idx: NodeIndex) {
        let Some(class) = arena.get(class_idx).and_then(|node| arena.get_class(node)) else {
            return;
        };
        let Some(qualified) = self.class_names.get(&class_idx.0).cloned() else {
            return;
        };

        let mut supertypes: Vec<String> =
            class.supertypes.iter().map(|s| self.qualify(s)).collect();
        if supertypes.is_empty() && self.has_type("java.lang.Object") {
            supertypes.push("java.lang.Object".to_string());
        }
        if let Some(entry) = self.types.get_mut(&qualified) {
            entry.supertypes = supertypes;
        }

        for member in class.members.iter() {
            let Some(node) = arena.get(member) else {
                continue;
            };
            let is_static = node.has_flag(node_flags::STATIC);

            if let Some(var) = arena.get_variable(node) {
                let Some(name) = arena.identifier_text(var.name) else {
                    continue;
                };
                let mut flags = symbol_flags::FIELD;
                if is_static {
                    flags |= symbol_flags::STATIC;
                }
                let mut sym = Symbol::new(flags, name);
                sym.owner = Some(qualified.clone());
                sym.type_name = self.qualify(&var.type_name);
                sym.declarations.push(member);
                let id = self.symbols.alloc(sym);
                self.node_symbols.insert(var.name.0, id);
                self.add_member(&qualified, name, id);
            } else if let Some(method) = arena.get_method(node) {
                let Some(name) = arena.identifier_text(method.name) else {
                    continue;
                };
                let mut flags = symbol_flags::METHOD;
                if is_static {
                    flags |= symbol_flags::STATIC;
                }
                let parameter_types = method
                    .parameters
                    .iter()
                    .filter_map(|param| {
                        let param_node = arena.get(param)?;
                        arena
                            .get_variable(param_node)
                            .map(|v| self.qualify(&v.type_name))
                    })
                    .collect();
                let mut sym = Symbol::new(flags, name);
                sym.owner = Some(qualified.clone());
                sym.type_name = self.qualify(&method.return_type);
                sym.parameter_types = parameter_types;
                sym.declarations.push(member);
                let id = self.symbols.alloc(sym);
                self.node_symbols.insert(method.name.0, id);
                self.add_member(&qualified, name, id);
            }
        }
    }

    // =========================================================================
    // Scope-stack walk
    // =========================================================================

    fn push_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare a local or parameter in the innermost scope.
    fn declare_local(
        &mut self,
        arena: &NodeArena,
        decl_idx: NodeIndex,
        flags: u32,
    ) -> Option<SymbolId> {
        let node = arena.get(decl_idx)?;
        let var = arena.get_variable(node)?;
        let name = arena.identifier_text(var.name)?;

        let mut sym = Symbol::new(flags, name);
        sym.type_name = self.qualify(&var.type_name);
        sym.declarations.push(decl_idx);
        let id = self.symbols.alloc(sym);
        self.node_symbols.insert(var.name.0, id);
        if let Some(scope) = self.scopes.last_mut() {
            scope.locals.insert(name.to_string(), id);
        }
        Some(id)
    }

    fn declare_parameters(&mut self, arena: &NodeArena, parameters: &[NodeIndex]) {
        for &param in parameters {
            self.declare_local(arena, param, symbol_flags::PARAMETER);
        }
    }

    fn innermost_class(&self) -> Option<&str> {
        self.scopes.iter().rev().find_map(|scope| match &scope.kind {
            ScopeKind::Class(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Resolve a simple name: locals and parameters first, then fields of
    /// enclosing classes (innermost outwards), then type names.
    fn resolve_simple_name(&self, name: &str) -> Option<SymbolId> {
        for scope in self.scopes.iter().rev() {
            if let Some(&id) = scope.locals.get(name) {
                return Some(id);
            }
            if let ScopeKind::Class(class_name) = &scope.kind
                && let Some(id) = self.find_field(class_name, name)
            {
                return Some(id);
            }
        }
        let qualified = self.resolve_type_name(name)?;
        self.type_symbol(&qualified)
    }

    /// Resolve a bare call against the enclosing classes, innermost first.
    fn resolve_bare_method(&self, name: &str, arity: usize) -> Option<SymbolId> {
        self.scopes.iter().rev().find_map(|scope| match &scope.kind {
            ScopeKind::Class(class_name) => self.find_method(class_name, name, arity),
            _ => None,
        })
    }

    fn record(&mut self, idx: NodeIndex, symbol: Option<SymbolId>) {
        if let Some(id) = symbol {
            self.node_symbols.insert(idx.0, id);
        }
    }

    fn symbol_type(&self, symbol: Option<SymbolId>) -> Option<String> {
        let sym = self.symbols.get(symbol?)?;
        if sym.type_name.is_empty() {
            None
        } else {
            Some(sym.type_name.clone())
        }
    }

    /// Bind a declaration or statement node.
    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            SyntaxKind::CompilationUnit => {
                if let Some(cu) = arena.get_compilation_unit(node) {
                    for member in cu.members.iter() {
                        self.bind_node(arena, member);
                    }
                }
            }
            SyntaxKind::ClassDeclaration => {
                let Some(class) = arena.get_class(node) else {
                    return;
                };
                let Some(qualified) = self.class_names.get(&idx.0).cloned() else {
                    return;
                };
                self.push_scope(ScopeKind::Class(qualified));
                for member in class.members.iter() {
                    self.bind_node(arena, member);
                }
                self.pop_scope();
            }
            SyntaxKind::MethodDeclaration => {
                let Some(method) = arena.get_method(node) else {
                    return;
                };
                self.push_scope(ScopeKind::Method);
                self.declare_parameters(arena, &method.parameters.nodes);
                self.bind_node(arena, method.body);
                self.pop_scope();
            }
            SyntaxKind::VariableDeclaration => {
                let Some(var) = arena.get_variable(node) else {
                    return;
                };
                if node.has_flag(node_flags::PARAMETER) {
                    return;
                }
                self.bind_expression(arena, var.initializer);
                let is_field = arena
                    .parent_of(idx)
                    .and_then(|parent| arena.kind(parent))
                    == Some(SyntaxKind::ClassDeclaration);
                if !is_field {
                    self.declare_local(arena, idx, symbol_flags::LOCAL);
                }
            }
            SyntaxKind::Block => {
                let Some(block) = arena.get_block(node) else {
                    return;
                };
                self.push_scope(ScopeKind::Block);
                for stmt in block.statements.iter() {
                    self.bind_node(arena, stmt);
                }
                self.pop_scope();
            }
            SyntaxKind::ExpressionStatement | SyntaxKind::ReturnStatement => {
                if let Some(stmt) = arena.get_statement(node) {
                    self.bind_expression(arena, stmt.expression);
                }
            }
            SyntaxKind::IfStatement => {
                if let Some(if_stmt) = arena.get_if_statement(node) {
                    self.bind_expression(arena, if_stmt.condition);
                    self.bind_node(arena, if_stmt.then_statement);
                    self.bind_node(arena, if_stmt.else_statement);
                }
            }
            _ => {
                self.bind_expression(arena, idx);
            }
        }
    }

    /// Bind an expression and return its static type, if known.
    fn bind_expression(&mut self, arena: &NodeArena, idx: NodeIndex) -> Option<String> {
        let node = arena.get(idx)?;

        let ty = match node.kind {
            SyntaxKind::Identifier => {
                let name = arena.identifier_text(idx)?;
                let symbol = self.resolve_simple_name(name);
                self.record(idx, symbol);
                self.symbol_type(symbol)
            }
            SyntaxKind::ThisExpression => self.innermost_class().map(str::to_string),
            SyntaxKind::Literal => {
                let text = arena.get_literal_text(idx)?;
                if text.starts_with('"') {
                    Some("java.lang.String".to_string())
                } else if text == "true" || text == "false" {
                    Some("boolean".to_string())
                } else {
                    None
                }
            }
            SyntaxKind::FieldAccess => {
                let access = arena.get_field_access(node)?;
                let receiver_type = self.bind_expression(arena, access.expression);
                let name = arena.identifier_text(access.name)?;
                let symbol = receiver_type
                    .as_deref()
                    .and_then(|ty| self.find_field(ty, name));
                self.record(access.name, symbol);
                self.record(idx, symbol);
                self.symbol_type(symbol)
            }
            SyntaxKind::MethodInvocation => {
                let call = arena.get_method_invocation(node)?;
                for arg in call.arguments.iter() {
                    self.bind_expression(arena, arg);
                }
                let arity = call.arguments.len();
                let select = arena.get(call.method_select)?;

                let symbol = match select.kind {
                    SyntaxKind::Identifier => {
                        let name = arena.identifier_text(call.method_select)?;
                        self.resolve_bare_method(name, arity)
                    }
                    SyntaxKind::FieldAccess => {
                        let access = arena.get_field_access(select)?;
                        let receiver_type = self.bind_expression(arena, access.expression);
                        let name = arena.identifier_text(access.name)?;
                        let symbol = receiver_type
                            .as_deref()
                            .and_then(|ty| self.find_method(ty, name, arity));
                        self.record(access.name, symbol);
                        symbol
                    }
                    _ => None,
                };
                if symbol.is_none() {
                    trace!(call = idx.0, "unresolved method invocation");
                }
                self.record(call.method_select, symbol);
                self.record(idx, symbol);
                self.symbol_type(symbol)
            }
            SyntaxKind::LambdaExpression => {
                let lambda = arena.get_lambda(node)?;
                self.push_scope(ScopeKind::Lambda);
                self.declare_parameters(arena, &lambda.parameters.nodes);
                if arena.kind(lambda.body) == Some(SyntaxKind::Block) {
                    self.bind_node(arena, lambda.body);
                } else {
                    self.bind_expression(arena, lambda.body);
                }
                self.pop_scope();
                None
            }
            SyntaxKind::NewClass => {
                let new_class = arena.get_new_class(node)?;
                for arg in new_class.arguments.iter() {
                    self.bind_expression(arena, arg);
                }
                self.bind_node(arena, new_class.body);
                Some(self.qualify(&new_class.type_name))
            }
            SyntaxKind::BinaryExpression => {
                let binary = arena.get_binary_expr(node)?;
                self.bind_expression(arena, binary.left);
                self.bind_expression(arena, binary.right);
                match binary.operator.as_str() {
                    "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||" => {
                        Some("boolean".to_string())
                    }
                    _ => None,
                }
            }
            _ => {
                self.bind_node(arena, idx);
                None
            }
        };

        if let Some(ty) = &ty {
            self.expr_types.insert(idx.0, ty.clone());
        }
        ty
    }
}
