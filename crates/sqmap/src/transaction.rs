//! Transaction helper macro.
//!
//! Pass the transaction (`tokio_postgres::Transaction`) into anything that accepts a
//! [`crate::GenericClient`], e.g. [`crate::Table::insert`].
//!
//! # Example
//!
//! ```ignore
//! use sqmap::{InsertQuery, SqmResult, Table, record};
//!
//! # async fn demo(client: &mut tokio_postgres::Client) -> SqmResult<()> {
//! let accounts = Table::new("accounts");
//! sqmap::transaction!(client, tx, {
//!     accounts
//!         .insert(&tx, &InsertQuery::new(["owner"]).row(record! { "owner" => "alice" }))
//!         .await?;
//!     Ok(())
//! })?;
//! # Ok(()) }
//! ```

/// Runs the given block inside a database transaction.
///
/// - Begins a transaction via `$client.transaction().await`.
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`.
///
/// The block must evaluate to `sqmap::SqmResult<T>`; the whole macro evaluates to
/// `SqmResult<T>`, with begin and commit failures reported as [`crate::SqmError::Query`].
#[macro_export]
macro_rules! transaction {
    ($client:expr, $tx:ident, $body:block) => {
        match ($client).transaction().await {
            Err(begin_err) => Err($crate::SqmError::from(begin_err)),
            Ok($tx) => {
                let __sqmap_tx_body_result: $crate::SqmResult<_> = async { $body }.await;
                match __sqmap_tx_body_result {
                    Ok(value) => match $tx.commit().await {
                        Ok(()) => Ok(value),
                        Err(commit_err) => Err($crate::SqmError::from(commit_err)),
                    },
                    Err(error) => match $tx.rollback().await {
                        Ok(()) => Err(error),
                        Err(rollback_err) => Err($crate::SqmError::Other(format!(
                            "{error} (rollback failed: {rollback_err})"
                        ))),
                    },
                }
            }
        }
    };
}
