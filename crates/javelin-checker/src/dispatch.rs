//! Check dispatch.
//!
//! Walks one compilation unit and offers every method invocation to each
//! enabled `MethodInvocationCheck`.

use crate::context::CheckerContext;
use javelin_common::Diagnostic;
use javelin_parser::NodeIndex;
use javelin_parser::parser::{NodeAccess, SyntaxKind};
use tracing::{debug, debug_span, trace};

/// A check that inspects method invocations.
pub trait MethodInvocationCheck: Send + Sync {
    /// Stable check name, used in diagnostics and in `disabledChecks`.
    fn name(&self) -> &'static str;

    /// A finding for `call`, or `None` when the call is fine.
    fn match_method_invocation(
        &self,
        ctx: &CheckerContext<'_>,
        call: NodeIndex,
    ) -> Option<Diagnostic>;
}

/// Report a finding spanning `idx`.
pub(crate) fn diagnostic_at(
    ctx: &CheckerContext<'_>,
    check_name: &str,
    idx: NodeIndex,
    message: &str,
) -> Option<Diagnostic> {
    let (pos, end) = ctx.arena.pos_end(idx)?;
    Some(Diagnostic::warning(
        check_name,
        ctx.file_name,
        pos,
        end.saturating_sub(pos),
        message,
    ))
}

/// Run `checks` over every method invocation in the unit, in source order.
pub fn check_compilation_unit(
    ctx: &CheckerContext<'_>,
    checks: &[&dyn MethodInvocationCheck],
) -> Vec<Diagnostic> {
    let _span = debug_span!("check_compilation_unit", file = ctx.file_name).entered();

    let enabled: Vec<&dyn MethodInvocationCheck> = checks
        .iter()
        .copied()
        .filter(|check| ctx.options.is_check_enabled(check.name()))
        .collect();
    if enabled.is_empty() {
        debug!("all checks disabled");
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    let mut stack = vec![ctx.root];
    let mut visited = 0usize;

    while let Some(idx) = stack.pop() {
        visited += 1;
        if ctx.arena.kind(idx) == Some(SyntaxKind::MethodInvocation) {
            for check in &enabled {
                if let Some(diagnostic) = check.match_method_invocation(ctx, idx) {
                    trace!(check = check.name(), call = idx.0, "finding");
                    diagnostics.push(diagnostic);
                }
            }
        }
        stack.extend(ctx.arena.get_children(idx).into_iter().rev());
    }

    debug!(findings = diagnostics.len(), visited, "checked unit");
    diagnostics
}
