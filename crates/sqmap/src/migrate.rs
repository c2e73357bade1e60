//! Named, run-once schema migrations tracked in a bootstrap table.
//!
//! The runner reads the names already recorded in the migrations table, then applies every
//! migration it has not seen, in the order given. Each migration runs in its own
//! transaction together with the insert that records it, so a failure leaves neither the
//! schema change nor the record behind.
//!
//! # Example
//!
//! ```ignore
//! use sqmap::migrate::{self, Migration, MigrationConfig};
//!
//! # async fn demo(client: &mut tokio_postgres::Client) -> sqmap::SqmResult<()> {
//! let migrations = [
//!     Migration::sql("create_users", r#"CREATE TABLE "users" ("id" BIGSERIAL PRIMARY KEY, "email" TEXT)"#),
//!     Migration::sql("index_users_email", r#"CREATE INDEX ON "users" ("email")"#),
//! ];
//! let applied = migrate::run(client, &MigrationConfig::default(), &migrations).await?;
//! # let _ = applied;
//! # Ok(()) }
//! ```

use crate::client::GenericClient;
use crate::error::{SqmError, SqmResult};
use crate::format::Format;
use crate::query::{InsertQuery, Order, SelectQuery};
use crate::record;
use crate::row::RowExt;
use crate::table::{DEFAULT_SCHEMA, Table};
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tokio_postgres::Transaction;

pub const DEFAULT_MIGRATION_TABLE: &str = "sqmap_migrations";
pub const DEFAULT_INITIAL_MIGRATION: &str = "init_db";

/// Where applied migrations are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub table: String,
    pub schema: String,
    /// Name recorded when the migrations table is first created.
    pub initial_migration_name: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_MIGRATION_TABLE.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            initial_migration_name: DEFAULT_INITIAL_MIGRATION.to_string(),
        }
    }
}

impl MigrationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn initial_migration_name(mut self, name: impl Into<String>) -> Self {
        self.initial_migration_name = name.into();
        self
    }

    fn bootstrap_table(&self) -> Table {
        Table::new(self.table.as_str()).schema(self.schema.as_str())
    }

    /// DDL for the bootstrap table.
    pub fn create_table_sql(&self) -> String {
        let f = Format::POSTGRES;
        format!(
            "CREATE TABLE IF NOT EXISTS {}.{} (\
             \"id\" INT GENERATED ALWAYS AS IDENTITY PRIMARY KEY, \
             \"created\" TIMESTAMP DEFAULT NOW(), \
             \"name\" TEXT UNIQUE);",
            f.quote(&self.schema),
            f.quote(&self.table)
        )
    }
}

/// Future returned by [`MigrationStep::run`].
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = SqmResult<()>> + Send + 'a>>;

/// A migration body written in Rust.
///
/// ```ignore
/// struct Backfill;
///
/// impl MigrationStep for Backfill {
///     fn run<'a>(&'a self, tx: &'a Transaction<'_>) -> StepFuture<'a> {
///         Box::pin(async move {
///             tx.batch_execute(r#"UPDATE "users" SET "active" = TRUE"#).await?;
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait MigrationStep: Send + Sync {
    fn run<'a>(&'a self, tx: &'a Transaction<'_>) -> StepFuture<'a>;
}

enum Body {
    Sql(String),
    Step(Box<dyn MigrationStep>),
}

/// One named migration.
pub struct Migration {
    pub name: String,
    body: Body,
}

impl Migration {
    /// Plain SQL, run with `batch_execute` (may contain several statements).
    pub fn sql(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Body::Sql(sql.into()),
        }
    }

    pub fn step(name: impl Into<String>, step: impl MigrationStep + 'static) -> Self {
        Self {
            name: name.into(),
            body: Body::Step(Box::new(step)),
        }
    }

    async fn apply(&self, tx: &Transaction<'_>) -> SqmResult<()> {
        match &self.body {
            Body::Sql(sql) => GenericClient::batch_execute(tx, sql).await,
            Body::Step(step) => step.run(tx).await,
        }
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            Body::Sql(sql) => sql.as_str(),
            Body::Step(_) => "<step>",
        };
        f.debug_struct("Migration")
            .field("name", &self.name)
            .field("body", &body)
            .finish()
    }
}

async fn load_applied<C: GenericClient>(client: &C, table: &Table) -> SqmResult<Vec<String>> {
    let rows = table
        .select(client, &SelectQuery::new(["name"]).order(Order::asc("id")))
        .await?;
    let mut names = Vec::with_capacity(rows.len());
    for row in &rows {
        if let Some(name) = row.try_get_column::<Option<String>>("name")? {
            names.push(name);
        }
    }
    Ok(names)
}

fn record_insert(name: &str) -> InsertQuery {
    InsertQuery::new(["name"]).row(record! { "name" => name })
}

/// Names recorded in the migrations table, in the order they were applied.
///
/// Returns an empty list when the table does not exist yet.
pub async fn applied<C: GenericClient>(client: &C, config: &MigrationConfig) -> SqmResult<Vec<String>> {
    match load_applied(client, &config.bootstrap_table()).await {
        Err(err) if err.is_undefined_table() => Ok(Vec::new()),
        other => other,
    }
}

/// Apply every migration not yet recorded, in order. Returns the names applied by this call.
///
/// Creates the migrations table (recording `initial_migration_name`) on first use. Stops at
/// the first failing migration, whose transaction is rolled back, and returns
/// [`SqmError::Migration`].
pub async fn run(
    client: &mut tokio_postgres::Client,
    config: &MigrationConfig,
    migrations: &[Migration],
) -> SqmResult<Vec<String>> {
    let table = config.bootstrap_table();

    let loaded = load_applied(&*client, &table).await;
    let recorded = match loaded {
        Ok(names) => names,
        Err(err) if err.is_undefined_table() => {
            tracing::info!(
                target: "sqmap::migrate",
                schema = %config.schema,
                table = %config.table,
                "Creating migrations table"
            );
            let create = config.create_table_sql();
            let initial = record_insert(&config.initial_migration_name);
            crate::transaction!(client, tx, {
                GenericClient::batch_execute(&tx, &create).await?;
                table.insert(&tx, &initial).await?;
                Ok(())
            })?;
            load_applied(&*client, &table).await?
        }
        Err(err) => return Err(err),
    };

    let mut seen: HashSet<String> = recorded.into_iter().collect();
    let mut newly_applied = Vec::new();
    for migration in migrations {
        if seen.contains(&migration.name) {
            continue;
        }
        let insert = record_insert(&migration.name);
        crate::transaction!(client, tx, {
            migration.apply(&tx).await?;
            table.insert(&tx, &insert).await?;
            Ok(())
        })
        .map_err(|err| SqmError::migration(migration.name.as_str(), err))?;

        tracing::info!(
            target: "sqmap::migrate",
            migration = %migration.name,
            "Migration was executed successfully"
        );
        seen.insert(migration.name.clone());
        newly_applied.push(migration.name.clone());
    }
    Ok(newly_applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = MigrationConfig::default();
        assert_eq!(config.table, "sqmap_migrations");
        assert_eq!(config.schema, "public");
        assert_eq!(config.initial_migration_name, "init_db");
    }

    #[test]
    fn create_table_sql_is_quoted() {
        let sql = MigrationConfig::new()
            .schema("ops")
            .table("history")
            .create_table_sql();
        assert!(sql.starts_with(r#"CREATE TABLE IF NOT EXISTS "ops"."history" ("#));
        assert!(sql.contains(r#""id" INT GENERATED ALWAYS AS IDENTITY PRIMARY KEY"#));
        assert!(sql.contains(r#""created" TIMESTAMP DEFAULT NOW()"#));
        assert!(sql.ends_with(r#""name" TEXT UNIQUE);"#));
    }

    #[test]
    fn bootstrap_statements() {
        let config = MigrationConfig::new().schema("ops");
        let table = config.bootstrap_table();
        let select = table
            .compile_select(&SelectQuery::new(["name"]).order(Order::asc("id")))
            .unwrap();
        assert_eq!(
            select.sql,
            r#"SELECT "name" FROM "ops"."sqmap_migrations" ORDER BY "id" ASC;"#
        );
        let insert = table.compile_insert(&record_insert("init_db")).unwrap();
        assert_eq!(
            insert.sql,
            r#"INSERT INTO "ops"."sqmap_migrations" ("name") VALUES ($1);"#
        );
    }

    #[test]
    fn migration_debug_hides_step() {
        struct Noop;
        impl MigrationStep for Noop {
            fn run<'a>(&'a self, _tx: &'a Transaction<'_>) -> StepFuture<'a> {
                Box::pin(async { Ok(()) })
            }
        }
        let rendered = format!("{:?}", Migration::step("noop", Noop));
        assert!(rendered.contains("<step>"));
        let rendered = format!("{:?}", Migration::sql("a", "SELECT 1"));
        assert!(rendered.contains("SELECT 1"));
    }
}
