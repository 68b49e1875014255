//! One-call analysis of a compilation unit.

use anyhow::{Context, Result};
use javelin_binder::{BinderState, TypeDecl};
use javelin_checker::{CheckerContext, CheckerOptions, MethodInvocationCheck, time_checks};
use javelin_common::Diagnostic;
use javelin_parser::NodeIndex;
use javelin_parser::parser::NodeArena;
use std::path::Path;
use tracing::{debug, info_span};

/// Checks plus the binder they resolve against.
///
/// The binder keeps library types between units. Each call to `analyze`
/// starts from the library alone, so a unit's findings never depend on the
/// units analysed before it.
pub struct Analyzer {
    binder: BinderState,
    options: CheckerOptions,
    checks: Vec<&'static dyn MethodInvocationCheck>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(CheckerOptions::default())
    }
}

impl Analyzer {
    /// Bundled library types and the seconds/nanos checks.
    pub fn new(options: CheckerOptions) -> Analyzer {
        Analyzer {
            binder: BinderState::with_default_library(),
            options,
            checks: time_checks().to_vec(),
        }
    }

    pub fn from_options_file(path: &Path) -> Result<Analyzer> {
        let options = CheckerOptions::from_file(path)?;
        Ok(Analyzer::new(options))
    }

    /// Make library types outside the bundled set visible to the binder.
    pub fn declare_types(&mut self, decls: impl IntoIterator<Item = TypeDecl>) -> &mut Analyzer {
        for decl in decls {
            self.binder.declare_library_type(decl);
        }
        self
    }

    pub fn with_check(&mut self, check: &'static dyn MethodInvocationCheck) -> &mut Analyzer {
        self.checks.push(check);
        self
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Bind the unit rooted at `root` and run every enabled check.
    pub fn analyze(&mut self, arena: &NodeArena, root: NodeIndex) -> Vec<Diagnostic> {
        let _span = info_span!("analyze", root = root.0).entered();
        self.binder.bind_compilation_unit(arena, root);
        let ctx = CheckerContext::new(arena, &self.binder, root, &self.options);
        let diagnostics = javelin_checker::check_compilation_unit(&ctx, &self.checks);
        debug!(file = ctx.file_name, findings = diagnostics.len(), "analysis done");
        diagnostics
    }
}

/// Diagnostics as a JSON array with camelCase keys.
pub fn diagnostics_to_json(diagnostics: &[Diagnostic]) -> Result<String> {
    serde_json::to_string_pretty(diagnostics).context("failed to serialize diagnostics")
}
