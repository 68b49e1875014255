//! javelin: matching and correlation engine for Java static analysis.
//!
//! The workspace is organized into several crates, re-exported here:
//! - `common` - diagnostics and walk limits
//! - `parser` - the syntax tree arena and `TreeBuilder`
//! - `binder` - symbols, library types and the `DeclarationResolver`
//! - `checker` - matchers, the nearby-call correlation engine and checks
//!
//! `analysis` runs the bundled checks over one compilation unit, and
//! `tracing_config` sets up logging for hosts.

pub use javelin_binder as binder;
pub use javelin_checker as checker;
pub use javelin_common as common;
pub use javelin_parser as parser;

pub mod analysis;
pub mod tracing_config;

pub use analysis::{Analyzer, diagnostics_to_json};
pub use javelin_common::{Diagnostic, DiagnosticCategory};
