//! Row mapping traits and row-count assertions

use crate::error::{SqmError, SqmResult};
use tokio_postgres::Row;

/// Trait for types that can be constructed from a database row.
///
/// # Example
///
/// ```
/// use sqmap::{FromRow, RowExt, SqmResult};
/// use tokio_postgres::Row;
///
/// struct User {
///     id: i64,
///     email: Option<String>,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> SqmResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             email: row.try_get_column("email")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> SqmResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning SqmError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> SqmResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> SqmResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| SqmError::decode(column, e.to_string()))
    }
}

/// Map every row through [`FromRow`].
pub fn map_rows<T: FromRow>(rows: &[Row]) -> SqmResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

/// Require exactly `expected` rows.
///
/// Returns [`SqmError::RowCount`] on any other count.
pub fn expect_rows<T>(rows: Vec<T>, expected: usize) -> SqmResult<Vec<T>> {
    if rows.len() == expected {
        Ok(rows)
    } else {
        Err(SqmError::RowCount {
            expected,
            got: rows.len(),
        })
    }
}

/// Require exactly one row.
///
/// Semantics:
/// - 0 rows: returns [`SqmError::NotFound`]
/// - 1 row: returns that row
/// - multiple rows: returns [`SqmError::TooManyRows`]
pub fn expect_one<T>(rows: Vec<T>) -> SqmResult<T> {
    let got = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), got) {
        (None, _) => Err(SqmError::not_found("Expected 1 row, got 0")),
        (Some(row), 1) => Ok(row),
        (Some(_), got) => Err(SqmError::TooManyRows { expected: 1, got }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_rows_exact_count() {
        assert_eq!(expect_rows(vec![1, 2], 2).unwrap(), vec![1, 2]);
        assert!(matches!(
            expect_rows(vec![1, 2, 3], 2),
            Err(SqmError::RowCount {
                expected: 2,
                got: 3
            })
        ));
        assert!(expect_rows(Vec::<i32>::new(), 0).unwrap().is_empty());
    }

    #[test]
    fn expect_one_semantics() {
        assert_eq!(expect_one(vec!["a"]).unwrap(), "a");
        assert!(expect_one(Vec::<i32>::new()).unwrap_err().is_not_found());
        assert!(matches!(
            expect_one(vec![1, 2]),
            Err(SqmError::TooManyRows {
                expected: 1,
                got: 2
            })
        ));
    }
}
