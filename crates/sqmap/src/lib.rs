//! # sqmap
//!
//! A parameterized SQL statement compiler for Postgres-style backends.
//!
//! ## Features
//!
//! - **No interpolation**: every value becomes a placeholder plus an entry in the parameter list
//! - **Typed descriptors**: `InsertQuery` / `SelectQuery` / `UpdateQuery` / `DeleteQuery`
//! - **Pluggable dialects**: `$1`, `?1`, zero-based or named placeholders via [`Format`]
//! - **Safe defaults**: UPDATE and DELETE require a predicate
//! - **Debug instrumentation**: timing, `EXPLAIN ANALYZE`, dry runs and hooks, logged with `tracing`
//! - **Migrations**: named, run-once migrations recorded in a bootstrap table
//!
//! ## Example
//!
//! ```
//! use sqmap::{Cond, InsertQuery, SelectQuery, Table, Token, record};
//!
//! let users = Table::new("users");
//!
//! let insert = users
//!     .compile_insert(
//!         &InsertQuery::new(["email", "name"])
//!             .row(record! { "email" => "a@x.com", "name" => "alice" })
//!             .returning_cols(["id"]),
//!     )
//!     .unwrap();
//! assert_eq!(
//!     insert.sql,
//!     r#"INSERT INTO "public"."users" ("email", "name") VALUES ($1, $2) RETURNING "id";"#
//! );
//!
//! let select = users
//!     .compile_select(
//!         &SelectQuery::new(["id"])
//!             .where_tokens([
//!                 Token::Item(Cond::eq("email", "a@x.com")),
//!                 Token::or(),
//!                 Token::Item(Cond::eq("name", "alice")),
//!             ])
//!             .limit(1),
//!     )
//!     .unwrap();
//! assert_eq!(
//!     select.sql,
//!     r#"SELECT "id" FROM "public"."users" WHERE "email"=$1 OR "name"=$2 LIMIT $3;"#
//! );
//! assert_eq!(select.params.len(), 3);
//! ```
//!
//! Executing goes through [`GenericClient`], implemented for `tokio_postgres::Client`,
//! `tokio_postgres::Transaction` and (feature `pool`) `deadpool_postgres::Client`:
//!
//! ```ignore
//! let rows = users.select(&client, &query).await?;
//! ```

pub mod client;
pub mod compile;
pub mod condition;
pub mod debug;
pub mod error;
pub mod format;
pub mod migrate;
pub mod prelude;
pub mod query;
pub mod row;
pub mod table;
pub mod transaction;
pub mod value;

pub use client::GenericClient;
pub use compile::{Compiled, Compiler, StatementKind};
pub use condition::{
    BetweenOp, CompOp, Cond, Connector, InList, InOp, Like, LikeOp, OrderType, Token,
};
pub use debug::{CompileHook, DebugOptions, TracingHook};
pub use error::{SqmError, SqmResult};
pub use format::{Format, Indexing};
pub use migrate::{Migration, MigrationConfig, MigrationStep};
pub use query::{
    DeleteQuery, InsertQuery, Order, Predicates, Returning, SelectQuery, Shift, UpdateQuery, Where,
};
pub use row::{FromRow, RowExt, expect_one, expect_rows, map_rows};
pub use table::Table;
pub use value::{Record, Value};
