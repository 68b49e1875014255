//! Lib Loader - declarations of library types the analysed code calls into.
//!
//! Library types are described in JSON (an array of `TypeDecl`, camelCase keys)
//! and registered on a `BinderState` before binding. A default set covering
//! `java.time` and the protobuf runtime is bundled with the crate.

use crate::state::BinderState;
use crate::types::TypeDecl;
use tracing::{debug, warn};

const BUNDLED_LIBRARY: &str = include_str!("../lib/library_types.json");

/// Parse a JSON array of type declarations.
pub fn parse_type_decls(json: &str) -> serde_json::Result<Vec<TypeDecl>> {
    serde_json::from_str(json)
}

/// The bundled declarations (`java.lang.Object`, `java.time.Duration`,
/// `java.time.Instant`, protobuf `GeneratedMessage`/`GeneratedMessageLite`,
/// `Duration` and `Timestamp`).
pub fn default_library() -> Vec<TypeDecl> {
    match parse_type_decls(BUNDLED_LIBRARY) {
        Ok(decls) => decls,
        Err(err) => {
            warn!(error = %err, "bundled library declarations failed to parse");
            Vec::new()
        }
    }
}

/// Register declarations on a binder. Later declarations of the same
/// qualified name replace earlier ones.
pub fn load_into(binder: &mut BinderState, decls: impl IntoIterator<Item = TypeDecl>) {
    let mut count = 0usize;
    for decl in decls {
        binder.declare_library_type(decl);
        count += 1;
    }
    debug!(count, "library types declared");
}

#[cfg(test)]
#[path = "../tests/lib_loader_tests.rs"]
mod tests;
