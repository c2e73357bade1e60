//! Predicate building blocks: operators, connectors and token sequences.
//!
//! A predicate group is a `Vec<Token<T>>`: items (one comparison each) interleaved with
//! [`Connector`]s. The group is rendered strictly left to right; nothing is grouped,
//! reordered or parenthesized.
//!
//! # Example
//! ```
//! use sqmap::{CompOp, Connector, Cond, Token};
//!
//! let tokens = vec![
//!     Token::Item(Cond::new("email", CompOp::Eq, "a@x.com")),
//!     Token::Connector(Connector::And),
//!     Token::Item(Cond::new("name", CompOp::Ne, "bob")),
//! ];
//! # let _: Vec<Token<Cond>> = tokens;
//! ```

use crate::value::Value;
use std::fmt;

/// Comparison operator used by `WHERE` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompOp {
    /// `=`
    #[default]
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
}

impl CompOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompOp::Eq => "=",
            CompOp::Ne => "!=",
            CompOp::Lt => "<",
            CompOp::Lte => "<=",
            CompOp::Gt => ">",
            CompOp::Gte => ">=",
        }
    }
}

/// Connector placed between whole predicate groups (`WHERE`, `IN`, `LIKE`), and between
/// the pairs of an equality-shorthand record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BetweenOp {
    #[default]
    And,
    Or,
}

impl BetweenOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetweenOp::And => "AND",
            BetweenOp::Or => "OR",
        }
    }
}

/// Connector token inside a predicate sequence.
///
/// `And`/`Or` join the items around them. `Not` is a prefix: it negates whatever follows
/// it, so `[p1, And, Not, p2]` renders as `p1 AND NOT p2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    And,
    Or,
    Not,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
            Connector::Not => "NOT",
        }
    }
}

impl From<BetweenOp> for Connector {
    fn from(op: BetweenOp) -> Self {
        match op {
            BetweenOp::And => Connector::And,
            BetweenOp::Or => Connector::Or,
        }
    }
}

/// List membership operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InOp {
    In,
    NotIn,
}

impl InOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            InOp::In => "IN",
            InOp::NotIn => "NOT IN",
        }
    }
}

/// Pattern matching operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeOp {
    Like,
    NotLike,
    /// Case-insensitive LIKE (PostgreSQL ILIKE)
    Ilike,
    NotIlike,
}

impl LikeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeOp::Like => "LIKE",
            LikeOp::NotLike => "NOT LIKE",
            LikeOp::Ilike => "ILIKE",
            LikeOp::NotIlike => "NOT ILIKE",
        }
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    #[default]
    Asc,
    Desc,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Asc => "ASC",
            OrderType::Desc => "DESC",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(CompOp, BetweenOp, Connector, InOp, LikeOp, OrderType);

/// One element of a predicate sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<T> {
    Item(T),
    Connector(Connector),
}

impl<T> Token<T> {
    pub fn and() -> Self {
        Token::Connector(Connector::And)
    }

    pub fn or() -> Self {
        Token::Connector(Connector::Or)
    }

    pub fn not() -> Self {
        Token::Connector(Connector::Not)
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Token::Item(_))
    }
}

/// Whether a token sequence contains at least one item (i.e. renders a predicate).
pub(crate) fn has_items<T>(tokens: &[Token<T>]) -> bool {
    tokens.iter().any(Token::is_item)
}

/// `"column" op value`
#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub column: String,
    pub op: CompOp,
    pub value: Value,
}

impl Cond {
    pub fn new(column: impl Into<String>, op: CompOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompOp::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompOp::Ne, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompOp::Lt, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompOp::Lte, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompOp::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompOp::Gte, value)
    }
}

impl From<Cond> for Token<Cond> {
    fn from(cond: Cond) -> Self {
        Token::Item(cond)
    }
}

/// `"column" IN (values...)`
#[derive(Debug, Clone, PartialEq)]
pub struct InList {
    pub column: String,
    pub op: InOp,
    pub values: Vec<Value>,
}

impl InList {
    pub fn new<V: Into<Value>>(
        column: impl Into<String>,
        op: InOp,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            column: column.into(),
            op,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn in_list<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(column, InOp::In, values)
    }

    pub fn not_in<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(column, InOp::NotIn, values)
    }
}

impl From<InList> for Token<InList> {
    fn from(item: InList) -> Self {
        Token::Item(item)
    }
}

/// `"column" LIKE pattern`
#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub column: String,
    pub op: LikeOp,
    pub pattern: Value,
}

impl Like {
    pub fn new(column: impl Into<String>, op: LikeOp, pattern: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            pattern: pattern.into(),
        }
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(column, LikeOp::Like, pattern)
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(column, LikeOp::Ilike, pattern)
    }

    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(column, LikeOp::NotLike, pattern)
    }

    pub fn not_ilike(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(column, LikeOp::NotIlike, pattern)
    }
}

impl From<Like> for Token<Like> {
    fn from(item: Like) -> Self {
        Token::Item(item)
    }
}
