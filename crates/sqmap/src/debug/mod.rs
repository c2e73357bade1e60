//! Compile-time debug instrumentation.
//!
//! [`DebugOptions`] are attached to a [`crate::Table`] or to a single descriptor. When
//! enabled, the table times the compile, optionally prefixes `EXPLAIN ANALYZE `, emits
//! the requested output through `tracing` and calls the user's [`CompileHook`].
//!
//! # Example
//! ```
//! use sqmap::{DebugOptions, Table, TracingHook};
//!
//! let users = Table::new("users").debug(
//!     DebugOptions::enabled()
//!         .print_query()
//!         .hook(TracingHook::new().no_truncate()),
//! );
//! # let _ = users;
//! ```

mod hook;
mod options;

#[cfg(test)]
mod tests;

pub use hook::{CompileHook, TracingHook};
pub use options::DebugOptions;

use crate::compile::Compiled;
use hook::emit_at_level;
use std::time::Duration;
use tracing::Level;

/// Prepended to the final text when [`DebugOptions::explain`] is set.
pub const EXPLAIN_PREFIX: &str = "EXPLAIN ANALYZE ";

/// Truncate a string to at most `max_bytes`, on a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Emit the requested output for a compiled statement and invoke the hook.
///
/// No-op unless `options.enabled`.
pub(crate) fn report(options: &DebugOptions, compiled: &Compiled) {
    if !options.enabled {
        return;
    }
    let elapsed = compiled.elapsed.unwrap_or(Duration::ZERO);
    let kind = compiled.kind.as_str();

    if options.wants_query() {
        emit_at_level!(options.level, target: "sqmap::sql", kind, sql = %compiled.sql, "SQL query");
    }
    if options.wants_params() {
        emit_at_level!(options.level, target: "sqmap::sql", kind, params = ?compiled.params, "Params");
    }
    if options.wants_timing() {
        emit_at_level!(
            options.level,
            target: "sqmap::sql",
            kind,
            elapsed_us = elapsed.as_micros() as u64,
            "Query was parsed and built"
        );
    }
    if let Some(hook) = &options.hook {
        hook.on_compiled(&compiled.sql, &compiled.params, elapsed);
    }
}
