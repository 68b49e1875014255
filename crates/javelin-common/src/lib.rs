//! Common types and utilities for the javelin analysis engine.
//!
//! This crate provides foundational types used across all javelin crates:
//! - Diagnostics produced by checks (`Diagnostic`, `DiagnosticCategory`)
//! - Walk limits shared by the binder and checker

// Centralized limits and thresholds
pub mod limits;

// Diagnostics reported by checks
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};
