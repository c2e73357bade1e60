//! Statement compiler.
//!
//! Compiling is a pure function of `(descriptor, format, schema, table)`: parse the
//! descriptor into fragments with one [`ParamCursor`], then assemble the fragments in
//! fixed clause order. Nothing here touches a connection or prints anything.
//!
//! # Example
//! ```
//! use sqmap::compile::Compiler;
//! use sqmap::{Format, InsertQuery, record};
//!
//! let compiler = Compiler::new(Format::POSTGRES, "public", "users");
//! let compiled = compiler
//!     .insert(&InsertQuery::new(["a", "b"]).row(record! { "a" => 1, "b" => 2 }))
//!     .unwrap();
//! assert_eq!(compiled.sql, r#"INSERT INTO "public"."users" ("a", "b") VALUES ($1, $2);"#);
//! ```

mod assemble;
mod cursor;
mod parse;
mod resolve;


pub use assemble::{assemble_delete, assemble_insert, assemble_select, assemble_update};
pub use cursor::ParamCursor;
pub use parse::{
    ParsedDelete, ParsedInsert, ParsedSelect, ParsedUpdate, PredicateGroups, parse_delete,
    parse_insert, parse_select, parse_update,
};

use crate::error::SqmResult;
use crate::format::Format;
use crate::query::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use crate::value::Value;
use std::fmt;
use std::time::Duration;
use tokio_postgres::types::ToSql;

/// The kind of statement a descriptor compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Insert,
    Select,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Insert => "INSERT",
            StatementKind::Select => "SELECT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub kind: StatementKind,
    pub sql: String,
    pub params: Vec<Value>,
    /// Time spent compiling; set only when debugging is enabled.
    pub elapsed: Option<Duration>,
}

impl Compiled {
    pub(crate) fn new(kind: StatementKind, sql: String, params: Vec<Value>) -> Self {
        Self {
            kind,
            sql,
            params,
            elapsed: None,
        }
    }

    /// Parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Compiles descriptors for one `schema.table` under one [`Format`].
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    pub format: Format,
    pub schema: &'a str,
    pub table: &'a str,
}

impl<'a> Compiler<'a> {
    pub fn new(format: Format, schema: &'a str, table: &'a str) -> Self {
        Self {
            format,
            schema,
            table,
        }
    }

    pub fn insert(&self, query: &InsertQuery) -> SqmResult<Compiled> {
        let parsed = parse_insert(query, self.format)?;
        let sql = assemble_insert(&parsed, self.format, self.schema, self.table);
        Ok(Compiled::new(StatementKind::Insert, sql, parsed.params))
    }

    pub fn select(&self, query: &SelectQuery) -> SqmResult<Compiled> {
        let parsed = parse_select(query, self.format)?;
        let sql = assemble_select(&parsed, self.format, self.schema, self.table);
        Ok(Compiled::new(StatementKind::Select, sql, parsed.params))
    }

    pub fn update(&self, query: &UpdateQuery) -> SqmResult<Compiled> {
        let parsed = parse_update(query, self.format)?;
        let sql = assemble_update(&parsed, self.format, self.schema, self.table);
        Ok(Compiled::new(StatementKind::Update, sql, parsed.params))
    }

    pub fn delete(&self, query: &DeleteQuery) -> SqmResult<Compiled> {
        let parsed = parse_delete(query, self.format)?;
        let sql = assemble_delete(&parsed, self.format, self.schema, self.table);
        Ok(Compiled::new(StatementKind::Delete, sql, parsed.params))
    }
}
