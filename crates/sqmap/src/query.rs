//! Typed statement descriptors.
//!
//! A descriptor says *what* a statement should do; [`crate::compile`] turns it into SQL
//! text and a parameter list. Descriptors are plain data with public fields and consuming
//! builder methods, so both styles work:
//!
//! ```
//! use sqmap::{Cond, SelectQuery, Token, record};
//!
//! let by_email = SelectQuery::new(["id", "name"])
//!     .where_tokens([
//!         Token::Item(Cond::eq("email", "a@x.com")),
//!         Token::and(),
//!         Token::Item(Cond::ne("name", "bob")),
//!     ])
//!     .limit(10);
//!
//! let by_id = SelectQuery::new(["*"]).where_eq(record! { "id" => 1 });
//! # let _ = (by_email, by_id);
//! ```

use crate::condition::{BetweenOp, CompOp, Cond, InList, Like, OrderType, Token, has_items};
use crate::debug::DebugOptions;
use crate::value::Record;

/// `WHERE` descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    /// Equality shorthand: every pair of `record` becomes `"col" op value`, joined by
    /// `between`.
    Target {
        record: Record,
        op: CompOp,
        between: BetweenOp,
    },
    /// Explicit predicate/connector sequence, rendered left to right.
    Tokens(Vec<Token<Cond>>),
}

impl Where {
    /// Equality shorthand joined by `AND`.
    pub fn target(record: Record) -> Self {
        Self::target_with(record, CompOp::Eq, BetweenOp::And)
    }

    /// Shorthand with a shared operator and connector.
    pub fn target_with(record: Record, op: CompOp, between: BetweenOp) -> Self {
        Where::Target {
            record,
            op,
            between,
        }
    }

    pub fn tokens(tokens: impl IntoIterator<Item = Token<Cond>>) -> Self {
        Where::Tokens(tokens.into_iter().collect())
    }

    /// Whether this descriptor renders at least one predicate.
    pub fn has_predicate(&self) -> bool {
        match self {
            Where::Target { record, .. } => !record.is_empty(),
            Where::Tokens(tokens) => has_items(tokens),
        }
    }
}

impl From<Record> for Where {
    fn from(record: Record) -> Self {
        Where::target(record)
    }
}

impl From<Vec<Token<Cond>>> for Where {
    fn from(tokens: Vec<Token<Cond>>) -> Self {
        Where::Tokens(tokens)
    }
}

/// `RETURNING` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Returning {
    /// `RETURNING *`
    All,
    /// `RETURNING "a", "b"`
    Columns(Vec<String>),
}

impl Returning {
    pub fn columns<S: Into<String>>(cols: impl IntoIterator<Item = S>) -> Self {
        Returning::Columns(cols.into_iter().map(Into::into).collect())
    }
}

/// `ORDER BY "by" ASC|DESC`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub by: String,
    pub direction: OrderType,
}

impl Order {
    pub fn new(by: impl Into<String>, direction: OrderType) -> Self {
        Self {
            by: by.into(),
            direction,
        }
    }

    pub fn asc(by: impl Into<String>) -> Self {
        Self::new(by, OrderType::Asc)
    }

    pub fn desc(by: impl Into<String>) -> Self {
        Self::new(by, OrderType::Desc)
    }
}

/// `LIMIT` / `OFFSET`. Negative values are skipped when compiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shift {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Shift {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }
}

/// The `WHERE` / `IN` / `LIKE` groups shared by select, update and delete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicates {
    pub where_clause: Option<Where>,
    pub in_clause: Option<Vec<Token<InList>>>,
    pub like_clause: Option<Vec<Token<Like>>>,
    /// Connector placed between the groups. Defaults to `AND`.
    pub between: BetweenOp,
}

impl Predicates {
    /// Whether at least one group renders a predicate.
    pub fn is_present(&self) -> bool {
        self.where_clause.as_ref().is_some_and(Where::has_predicate)
            || self.in_clause.as_deref().is_some_and(has_items)
            || self.like_clause.as_deref().is_some_and(has_items)
    }
}

/// Builder methods for descriptors that carry [`Predicates`].
macro_rules! impl_predicate_builders {
    ($ty:ty) => {
        impl $ty {
            /// Set the `WHERE` group.
            pub fn filter(mut self, clause: impl Into<Where>) -> Self {
                self.predicates.where_clause = Some(clause.into());
                self
            }

            /// `WHERE` equality shorthand.
            pub fn where_eq(self, record: Record) -> Self {
                self.filter(Where::target(record))
            }

            /// `WHERE` predicate/connector sequence.
            pub fn where_tokens(self, tokens: impl IntoIterator<Item = Token<Cond>>) -> Self {
                self.filter(Where::tokens(tokens))
            }

            /// Set the `IN` group.
            pub fn in_list(mut self, tokens: impl IntoIterator<Item = Token<InList>>) -> Self {
                self.predicates.in_clause = Some(tokens.into_iter().collect());
                self
            }

            /// Set the `LIKE` group.
            pub fn like(mut self, tokens: impl IntoIterator<Item = Token<Like>>) -> Self {
                self.predicates.like_clause = Some(tokens.into_iter().collect());
                self
            }

            /// Connector between the `WHERE`, `IN` and `LIKE` groups.
            pub fn between(mut self, op: BetweenOp) -> Self {
                self.predicates.between = op;
                self
            }
        }
    };
}

/// Builder methods shared by every descriptor.
macro_rules! impl_common_builders {
    ($ty:ty) => {
        impl $ty {
            /// Override the table's default schema for this statement.
            pub fn schema(mut self, schema: impl Into<String>) -> Self {
                self.schema = Some(schema.into());
                self
            }

            /// Override the table's debug options for this statement.
            pub fn debug(mut self, debug: DebugOptions) -> Self {
                self.debug = Some(debug);
                self
            }
        }
    };
}

macro_rules! impl_returning_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn returning(mut self, returning: Returning) -> Self {
                self.returning = Some(returning);
                self
            }

            /// `RETURNING *`
            pub fn returning_all(self) -> Self {
                self.returning(Returning::All)
            }

            pub fn returning_cols<S: Into<String>>(self, cols: impl IntoIterator<Item = S>) -> Self {
                self.returning(Returning::columns(cols))
            }
        }
    };
}

/// INSERT descriptor.
#[derive(Debug, Clone, Default)]
pub struct InsertQuery {
    /// Columns to insert, in emission order. Row keys outside this list are ignored.
    pub cols: Vec<String>,
    pub rows: Vec<Record>,
    pub returning: Option<Returning>,
    pub schema: Option<String>,
    pub debug: Option<DebugOptions>,
}

impl InsertQuery {
    pub fn new<S: Into<String>>(cols: impl IntoIterator<Item = S>) -> Self {
        Self {
            cols: cols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn row(mut self, row: Record) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Record>) -> Self {
        self.rows.extend(rows);
        self
    }
}

impl_common_builders!(InsertQuery);
impl_returning_builders!(InsertQuery);

/// SELECT descriptor.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    /// Requested columns; `"*"` is emitted unquoted.
    pub cols: Vec<String>,
    pub predicates: Predicates,
    pub order: Option<Order>,
    pub shift: Option<Shift>,
    pub schema: Option<String>,
    pub debug: Option<DebugOptions>,
}

impl SelectQuery {
    pub fn new<S: Into<String>>(cols: impl IntoIterator<Item = S>) -> Self {
        Self {
            cols: cols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn order_by(self, by: impl Into<String>, direction: OrderType) -> Self {
        self.order(Order::new(by, direction))
    }

    pub fn shift(mut self, shift: Shift) -> Self {
        self.shift = Some(shift);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.shift.get_or_insert_with(Shift::default).limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.shift.get_or_insert_with(Shift::default).offset = Some(offset);
        self
    }
}

impl_common_builders!(SelectQuery);
impl_predicate_builders!(SelectQuery);

/// UPDATE descriptor.
#[derive(Debug, Clone, Default)]
pub struct UpdateQuery {
    /// Assignments, emitted in insertion order.
    pub set: Record,
    pub predicates: Predicates,
    pub returning: Option<Returning>,
    pub schema: Option<String>,
    pub debug: Option<DebugOptions>,
}

impl UpdateQuery {
    pub fn new(set: Record) -> Self {
        Self {
            set,
            ..Self::default()
        }
    }
}

impl_common_builders!(UpdateQuery);
impl_predicate_builders!(UpdateQuery);
impl_returning_builders!(UpdateQuery);

/// DELETE descriptor.
#[derive(Debug, Clone, Default)]
pub struct DeleteQuery {
    pub predicates: Predicates,
    pub returning: Option<Returning>,
    pub schema: Option<String>,
    pub debug: Option<DebugOptions>,
}

impl DeleteQuery {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_common_builders!(DeleteQuery);
impl_predicate_builders!(DeleteQuery);
impl_returning_builders!(DeleteQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Connector;
    use crate::record;

    #[test]
    fn predicates_presence() {
        assert!(!Predicates::default().is_present());

        let only_connectors = Predicates {
            where_clause: Some(Where::Tokens(vec![Token::Connector(Connector::And)])),
            ..Predicates::default()
        };
        assert!(!only_connectors.is_present());

        let empty_target = Predicates {
            where_clause: Some(Where::target(Record::new())),
            ..Predicates::default()
        };
        assert!(!empty_target.is_present());

        let with_like = Predicates {
            like_clause: Some(vec![Like::like("name", "a%").into()]),
            ..Predicates::default()
        };
        assert!(with_like.is_present());
    }

    #[test]
    fn limit_and_offset_share_shift() {
        let q = SelectQuery::new(["*"]).offset(20).limit(10);
        assert_eq!(q.shift, Some(Shift::new(Some(10), Some(20))));
    }

    #[test]
    fn builders_fill_fields() {
        let q = UpdateQuery::new(record! { "name" => "x" })
            .where_eq(record! { "id" => 1 })
            .between(BetweenOp::Or)
            .returning_cols(["id"])
            .schema("app");
        assert_eq!(q.schema.as_deref(), Some("app"));
        assert_eq!(q.returning, Some(Returning::Columns(vec!["id".into()])));
        assert_eq!(q.predicates.between, BetweenOp::Or);
        assert!(q.predicates.is_present());
    }
}
