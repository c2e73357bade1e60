//! Table binding: the public compile-and-execute surface.
//!
//! A [`Table`] fixes the table name plus defaults for schema, [`Format`] and
//! [`DebugOptions`]. Each statement kind has a `compile_*` method returning
//! [`Compiled`] and an async method that compiles and runs it on a [`GenericClient`].
//!
//! # Example
//!
//! ```
//! use sqmap::{SelectQuery, Table, record};
//!
//! let users = Table::new("users").schema("app");
//! let compiled = users
//!     .compile_select(&SelectQuery::new(["id", "email"]).where_eq(record! { "id" => 7 }))
//!     .unwrap();
//! assert_eq!(compiled.sql, r#"SELECT "id", "email" FROM "app"."users" WHERE "id"=$1;"#);
//! ```

use crate::client::GenericClient;
use crate::compile::{Compiled, Compiler};
use crate::debug::{self, DebugOptions, EXPLAIN_PREFIX};
use crate::error::SqmResult;
use crate::format::Format;
use crate::query::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use crate::row::{FromRow, map_rows};
use crate::value::Value;
use std::time::Instant;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Schema used when neither the table nor the statement names one.
pub const DEFAULT_SCHEMA: &str = "public";

/// A table plus its compile defaults.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    /// Default schema; a descriptor's own `schema` wins.
    pub schema: String,
    pub format: Format,
    /// Default debug options; a descriptor's own `debug` wins.
    pub debug: DebugOptions,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            format: Format::POSTGRES,
            debug: DebugOptions::default(),
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn debug(mut self, debug: DebugOptions) -> Self {
        self.debug = debug;
        self
    }

    fn debug_for<'a>(&'a self, query_debug: Option<&'a DebugOptions>) -> &'a DebugOptions {
        query_debug.unwrap_or(&self.debug)
    }

    /// Compile with the effective schema, then time, prefix and report per `debug`.
    fn instrument(
        &self,
        schema: Option<&str>,
        debug: &DebugOptions,
        compile: impl FnOnce(&Compiler<'_>) -> SqmResult<Compiled>,
    ) -> SqmResult<Compiled> {
        let compiler = Compiler::new(
            self.format,
            schema.unwrap_or(&self.schema),
            &self.name,
        );
        if !debug.enabled {
            return compile(&compiler);
        }

        let start = Instant::now();
        let mut compiled = compile(&compiler)?;
        compiled.elapsed = Some(start.elapsed());
        if debug.explain {
            compiled.sql.insert_str(0, EXPLAIN_PREFIX);
        }
        debug::report(debug, &compiled);
        Ok(compiled)
    }

    pub fn compile_insert(&self, query: &InsertQuery) -> SqmResult<Compiled> {
        let debug = self.debug_for(query.debug.as_ref());
        self.instrument(query.schema.as_deref(), debug, |c| c.insert(query))
    }

    pub fn compile_select(&self, query: &SelectQuery) -> SqmResult<Compiled> {
        let debug = self.debug_for(query.debug.as_ref());
        self.instrument(query.schema.as_deref(), debug, |c| c.select(query))
    }

    pub fn compile_update(&self, query: &UpdateQuery) -> SqmResult<Compiled> {
        let debug = self.debug_for(query.debug.as_ref());
        self.instrument(query.schema.as_deref(), debug, |c| c.update(query))
    }

    pub fn compile_delete(&self, query: &DeleteQuery) -> SqmResult<Compiled> {
        let debug = self.debug_for(query.debug.as_ref());
        self.instrument(query.schema.as_deref(), debug, |c| c.delete(query))
    }

    async fn run<C: GenericClient>(
        client: &C,
        compiled: &Compiled,
        debug: &DebugOptions,
    ) -> SqmResult<Vec<Row>> {
        if debug.skips_execution() {
            return Ok(Vec::new());
        }
        client.query(&compiled.sql, &compiled.params_ref()).await
    }

    pub async fn insert<C: GenericClient>(
        &self,
        client: &C,
        query: &InsertQuery,
    ) -> SqmResult<Vec<Row>> {
        let compiled = self.compile_insert(query)?;
        Self::run(client, &compiled, self.debug_for(query.debug.as_ref())).await
    }

    pub async fn select<C: GenericClient>(
        &self,
        client: &C,
        query: &SelectQuery,
    ) -> SqmResult<Vec<Row>> {
        let compiled = self.compile_select(query)?;
        Self::run(client, &compiled, self.debug_for(query.debug.as_ref())).await
    }

    /// [`Table::select`] then map every row through [`FromRow`].
    pub async fn select_as<T: FromRow, C: GenericClient>(
        &self,
        client: &C,
        query: &SelectQuery,
    ) -> SqmResult<Vec<T>> {
        let rows = self.select(client, query).await?;
        map_rows(&rows)
    }

    pub async fn update<C: GenericClient>(
        &self,
        client: &C,
        query: &UpdateQuery,
    ) -> SqmResult<Vec<Row>> {
        let compiled = self.compile_update(query)?;
        Self::run(client, &compiled, self.debug_for(query.debug.as_ref())).await
    }

    pub async fn delete<C: GenericClient>(
        &self,
        client: &C,
        query: &DeleteQuery,
    ) -> SqmResult<Vec<Row>> {
        let compiled = self.compile_delete(query)?;
        Self::run(client, &compiled, self.debug_for(query.debug.as_ref())).await
    }

    /// Run hand-written SQL with a [`Value`] parameter list.
    ///
    /// The text is passed through untouched; debug options do not apply.
    pub async fn sql<C: GenericClient>(
        client: &C,
        sql: &str,
        params: &[Value],
    ) -> SqmResult<Vec<Row>> {
        let params: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        client.query(sql, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Cond, Token};
    use crate::error::SqmError;
    use crate::record;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Records every statement it is asked to run and returns no rows.
    #[derive(Default)]
    struct DummyClient {
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl DummyClient {
        fn calls(&self) -> Vec<(String, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GenericClient for DummyClient {
        async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<Vec<Row>> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), params.len()));
            Ok(Vec::new())
        }

        async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<u64> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), params.len()));
            Ok(0)
        }

        async fn batch_execute(&self, sql: &str) -> SqmResult<()> {
            self.calls.lock().unwrap().push((sql.to_string(), 0));
            Ok(())
        }
    }

    fn users() -> Table {
        Table::new("users")
    }

    #[test]
    fn defaults() {
        let t = users();
        assert_eq!(t.schema, "public");
        assert_eq!(t.format, Format::POSTGRES);
        assert!(!t.debug.enabled);
    }

    #[test]
    fn query_schema_overrides_table_default() {
        let t = users().schema("app");
        let q = DeleteQuery::new()
            .where_eq(record! { "id" => 1 })
            .schema("archive");
        assert_eq!(
            t.compile_delete(&q).unwrap().sql,
            r#"DELETE FROM "archive"."users" WHERE "id"=$1;"#
        );
        let q = DeleteQuery::new().where_eq(record! { "id" => 1 });
        assert_eq!(
            t.compile_delete(&q).unwrap().sql,
            r#"DELETE FROM "app"."users" WHERE "id"=$1;"#
        );
    }

    #[test]
    fn table_format_applies() {
        let t = users().format(Format::POSITIONAL);
        let compiled = t
            .compile_update(
                &UpdateQuery::new(record! { "name" => "x" }).where_eq(record! { "id" => 1 }),
            )
            .unwrap();
        assert_eq!(
            compiled.sql,
            r#"UPDATE "public"."users" SET "name"=?1 WHERE "id"=?2;"#
        );
    }

    #[test]
    fn elapsed_only_when_enabled() {
        let q = SelectQuery::new(["*"]);
        assert_eq!(users().compile_select(&q).unwrap().elapsed, None);

        let t = users().debug(DebugOptions::enabled());
        assert!(t.compile_select(&q).unwrap().elapsed.is_some());
    }

    #[test]
    fn explain_prefixes_final_text() {
        let t = users().debug(DebugOptions::enabled().explain());
        let compiled = t.compile_select(&SelectQuery::new(["id"])).unwrap();
        assert_eq!(
            compiled.sql,
            r#"EXPLAIN ANALYZE SELECT "id" FROM "public"."users";"#
        );

        // explain without enabled does nothing
        let t = users().debug(DebugOptions::new().explain());
        let compiled = t.compile_select(&SelectQuery::new(["id"])).unwrap();
        assert!(compiled.sql.starts_with("SELECT"));
    }

    #[test]
    fn hook_sees_final_text_and_params() {
        let seen: Arc<Mutex<Vec<(String, usize, Duration)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let t = users().debug(DebugOptions::enabled().explain().hook(
            move |sql: &str, params: &[Value], elapsed: Duration| {
                sink.lock()
                    .unwrap()
                    .push((sql.to_string(), params.len(), elapsed));
            },
        ));
        let compiled = t
            .compile_insert(&InsertQuery::new(["a"]).row(record! { "a" => 1 }))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, compiled.sql);
        assert!(seen[0].0.starts_with(EXPLAIN_PREFIX));
        assert_eq!(seen[0].1, 1);
        assert_eq!(Some(seen[0].2), compiled.elapsed);
    }

    #[test]
    fn query_debug_overrides_table_debug() {
        let t = users().debug(DebugOptions::enabled().explain());
        let q = SelectQuery::new(["id"]).debug(DebugOptions::new());
        let compiled = t.compile_select(&q).unwrap();
        assert!(!compiled.sql.starts_with(EXPLAIN_PREFIX));
        assert_eq!(compiled.elapsed, None);
    }

    #[tokio::test]
    async fn select_runs_compiled_statement() {
        let client = DummyClient::default();
        let q = SelectQuery::new(["id", "name"]).where_tokens([
            Token::Item(Cond::eq("email", "a@x.com")),
            Token::and(),
            Token::Item(Cond::ne("name", "bob")),
        ]);
        let rows = users().select(&client, &q).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(
            client.calls(),
            vec![(
                r#"SELECT "id", "name" FROM "public"."users" WHERE "email"=$1 AND "name"!=$2;"#
                    .to_string(),
                2
            )]
        );
    }

    #[tokio::test]
    async fn dry_run_skips_executor() {
        let client = DummyClient::default();
        let t = users().debug(DebugOptions::enabled().dry_run());
        let rows = t
            .insert(&client, &InsertQuery::new(["a"]).row(record! { "a" => 1 }))
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn validation_error_never_reaches_executor() {
        let client = DummyClient::default();
        let err = users()
            .update(&client, &UpdateQuery::new(record! { "a" => 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, SqmError::Validation(ref m) if m == "missing predicate"));

        let err = users()
            .delete(&client, &DeleteQuery::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn raw_sql_passthrough() {
        let client = DummyClient::default();
        Table::sql(&client, "SELECT $1::int + $2::int", &[Value::Int(1), Value::Int(2)])
            .await
            .unwrap();
        assert_eq!(
            client.calls(),
            vec![("SELECT $1::int + $2::int".to_string(), 2)]
        );
    }
}
