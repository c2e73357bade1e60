use super::truncate_sql_bytes;
use crate::value::Value;
use std::time::Duration;
use tracing::Level;

/// Observer invoked after a statement is compiled with debugging enabled.
///
/// `sql` is the final text (including any `EXPLAIN ANALYZE ` prefix) and `elapsed` the
/// compile time.
pub trait CompileHook: Send + Sync {
    fn on_compiled(&self, sql: &str, params: &[Value], elapsed: Duration);
}

impl<F> CompileHook for F
where
    F: Fn(&str, &[Value], Duration) + Send + Sync,
{
    fn on_compiled(&self, sql: &str, params: &[Value], elapsed: Duration) {
        self(sql, params, elapsed)
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

pub(crate) use emit_at_level;

/// A [`CompileHook`] that logs every compiled statement through `tracing`.
///
/// Unlike the print flags of [`super::DebugOptions`], this always emits the statement,
/// its parameter count and compile time under the `sqmap::sql` target.
#[derive(Debug, Clone)]
pub struct TracingHook {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl CompileHook for TracingHook {
    fn on_compiled(&self, sql: &str, params: &[Value], elapsed: Duration) {
        let sql = self.truncate_sql(sql);
        emit_at_level!(
            self.level,
            target: "sqmap::sql",
            param_count = params.len(),
            elapsed_us = elapsed.as_micros() as u64,
            sql = %sql,
        );
    }
}
