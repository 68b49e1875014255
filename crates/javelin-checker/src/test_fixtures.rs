//! Shared fixtures for the crate's unit tests.

use crate::config::CheckerOptions;
use crate::context::CheckerContext;
use javelin_binder::{BinderState, TypeDecl};
use javelin_parser::NodeIndex;
use javelin_parser::parser::{NodeArena, TreeBuilder};

pub(crate) const TEST_MESSAGE: &str = "test.proto.TestMessage";
pub(crate) const PLAIN_HOLDER: &str = "test.plain.Holder";

/// Library types used by the tests on top of the bundled JDK and protobuf
/// declarations.
pub(crate) fn test_types() -> Vec<TypeDecl> {
    vec![
        TypeDecl::new(TEST_MESSAGE)
            .extends("com.google.protobuf.GeneratedMessage")
            .method("getTestTimestamp", &[], "com.google.protobuf.Timestamp")
            .method("getTestDuration", &[], "com.google.protobuf.Duration")
            .method("getChild", &[], TEST_MESSAGE)
            .method("getChildAt", &["int"], TEST_MESSAGE)
            .method("compute", &[], TEST_MESSAGE),
        TypeDecl::new(PLAIN_HOLDER)
            .extends("java.lang.Object")
            .method("getTimestamp", &[], "com.google.protobuf.Timestamp"),
    ]
}

/// A bound compilation unit.
pub(crate) struct Fixture {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub binder: BinderState,
    pub options: CheckerOptions,
}

impl Fixture {
    /// Bind the output of `TreeBuilder::finish` with the default library plus
    /// `test_types()`.
    pub fn bind((arena, root): (NodeArena, NodeIndex)) -> Fixture {
        let mut binder = BinderState::with_default_library();
        for decl in test_types() {
            binder.declare_library_type(decl);
        }
        binder.bind_compilation_unit(&arena, root);
        Fixture {
            arena,
            root,
            binder,
            options: CheckerOptions::default(),
        }
    }

    pub fn ctx(&self) -> CheckerContext<'_> {
        CheckerContext::new(&self.arena, &self.binder, self.root, &self.options)
    }
}

/// Builder for `package test;` with the given imports.
pub(crate) fn builder(imports: &[&str]) -> TreeBuilder {
    let mut b = TreeBuilder::new("test/TestCase.java", "test");
    for import in imports {
        b.import(import);
    }
    b
}

/// Wrap `statements` as the body of `void run(params)` in class `TestCase`
/// and bind the unit.
pub(crate) fn in_method(
    mut b: TreeBuilder,
    params: Vec<NodeIndex>,
    statements: Vec<NodeIndex>,
) -> Fixture {
    let body = b.block(statements);
    let method = b.method("run", params, "void", Some(body));
    let class = b.class("TestCase", &[], vec![method]);
    Fixture::bind(b.finish(vec![class]))
}
