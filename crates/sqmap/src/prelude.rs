//! Convenient imports for typical `sqmap` usage.
//!
//! ```ignore
//! use sqmap::prelude::*;
//! ```

pub use crate::{
    BetweenOp, CompOp, Cond, DebugOptions, DeleteQuery, Format, FromRow, GenericClient, InList,
    InsertQuery, Like, Order, OrderType, Record, RowExt, SelectQuery, SqmError, SqmResult, Table,
    Token, UpdateQuery, Value, Where, record,
};
