use super::hook::CompileHook;
use std::fmt;
use std::sync::Arc;
use tracing::Level;

/// Per-table or per-statement debug options.
///
/// Nothing is timed, printed or skipped unless `enabled` is set. Print flags are
/// independent; `print_all` turns all three on.
#[derive(Clone)]
pub struct DebugOptions {
    pub enabled: bool,
    /// Log the final SQL text.
    pub print_query: bool,
    /// Log the parameter list.
    pub print_params: bool,
    /// Log the compile time.
    pub print_timing: bool,
    pub print_all: bool,
    /// Prefix the final text with `EXPLAIN ANALYZE `.
    pub explain: bool,
    /// Compile and report, but return an empty row list instead of executing.
    pub dry_run: bool,
    /// Tracing event level for printed output.
    pub level: Level,
    /// Receives `(sql, params, elapsed)` after every compile.
    pub hook: Option<Arc<dyn CompileHook>>,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            print_query: false,
            print_params: false,
            print_timing: false,
            print_all: false,
            explain: false,
            dry_run: false,
            level: Level::DEBUG,
            hook: None,
        }
    }
}

impl fmt::Debug for DebugOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOptions")
            .field("enabled", &self.enabled)
            .field("print_query", &self.print_query)
            .field("print_params", &self.print_params)
            .field("print_timing", &self.print_timing)
            .field("print_all", &self.print_all)
            .field("explain", &self.explain)
            .field("dry_run", &self.dry_run)
            .field("level", &self.level)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl DebugOptions {
    /// Create disabled options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled options with nothing printed.
    pub fn enabled() -> Self {
        Self::new().enable()
    }

    pub fn enable(mut self) -> Self {
        self.enabled = true;
        self
    }

    pub fn disable(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn print_query(mut self) -> Self {
        self.print_query = true;
        self
    }

    pub fn print_params(mut self) -> Self {
        self.print_params = true;
        self
    }

    pub fn print_timing(mut self) -> Self {
        self.print_timing = true;
        self
    }

    /// Print query, params and timing.
    pub fn print_all(mut self) -> Self {
        self.print_all = true;
        self
    }

    pub fn explain(mut self) -> Self {
        self.explain = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Install a hook. Closures `Fn(&str, &[Value], Duration)` work directly.
    pub fn hook(mut self, hook: impl CompileHook + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub(crate) fn wants_query(&self) -> bool {
        self.print_all || self.print_query
    }

    pub(crate) fn wants_params(&self) -> bool {
        self.print_all || self.print_params
    }

    pub(crate) fn wants_timing(&self) -> bool {
        self.print_all || self.print_timing
    }

    /// Whether execution should be skipped after compiling.
    pub fn skips_execution(&self) -> bool {
        self.enabled && self.dry_run
    }
}
