//! Error types for sqmap

use thiserror::Error;

/// Result type alias for sqmap operations
pub type SqmResult<T> = Result<T, SqmError>;

/// Error types for compiling and executing statements
#[derive(Debug, Error)]
pub enum SqmError {
    /// The statement descriptor is structurally invalid.
    ///
    /// Raised at compile time, before any SQL text exists or the executor is called.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Query execution error, propagated unmodified from the driver
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A migration step failed; its transaction has been rolled back
    #[error("Migration '{name}' failed: {source}")]
    Migration {
        name: String,
        #[source]
        source: Box<SqmError>,
    },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// More rows than the caller allowed for
    #[error("Too many rows: expected {expected}, got {got}")]
    TooManyRows { expected: usize, got: usize },

    /// Row count does not match the expected count
    #[error("Unexpected row count: expected {expected}, got {got}")]
    RowCount { expected: usize, got: usize },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqmError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Wrap the error of a failed migration step.
    pub fn migration(name: impl Into<String>, source: SqmError) -> Self {
        Self::Migration {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// SQLSTATE code reported by the database, if this error carries one.
    ///
    /// Looks through [`SqmError::Migration`] to the failing step.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Query(err) => err.code().map(|code| code.code()),
            Self::Migration { source, .. } => source.sql_state(),
            _ => None,
        }
    }

    /// Whether the database reported that the referenced table does not exist (`42P01`).
    pub fn is_undefined_table(&self) -> bool {
        self.sql_state() == Some("42P01")
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for SqmError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
