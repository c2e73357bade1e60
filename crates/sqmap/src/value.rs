//! Parameter values and insertion-ordered records.
//!
//! [`Value`] is the scalar that fills a compiled statement's parameter list. It encodes
//! itself through [`ToSql`], adapting to the parameter type Postgres inferred for the
//! placeholder (e.g. an integer bound to an `int4` column is sent as 4 bytes).
//!
//! [`Record`] keeps `(column, value)` pairs in insertion order. Rows, `SET` lists and the
//! equality-shorthand `WHERE` form all iterate a record in that order.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde::ser::Serializer;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};
use uuid::Uuid;

/// A single statement parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL `NULL`. Also used for a column an insert row does not carry.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    TextArray(Vec<String>),
    IntArray(Vec<i64>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

type EncodeResult = Result<IsNull, Box<dyn Error + Sync + Send>>;

fn encode<T: ToSql>(value: &T, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    if !T::accepts(ty) {
        return Err(format!(
            "cannot encode {} as Postgres type {ty}",
            std::any::type_name::<T>()
        )
        .into());
    }
    value.to_sql(ty, out)
}

fn encode_int(v: i64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::INT2 => encode(&i16::try_from(v)?, ty, out),
        Type::INT4 => encode(&i32::try_from(v)?, ty, out),
        Type::FLOAT4 => encode(&(v as f32), ty, out),
        Type::FLOAT8 => encode(&(v as f64), ty, out),
        _ => encode(&v, ty, out),
    }
}

fn encode_int_array(v: &[i64], ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::INT2_ARRAY => {
            let narrowed = v
                .iter()
                .map(|n| i16::try_from(*n))
                .collect::<Result<Vec<_>, _>>()?;
            encode(&narrowed, ty, out)
        }
        Type::INT4_ARRAY => {
            let narrowed = v
                .iter()
                .map(|n| i32::try_from(*n))
                .collect::<Result<Vec<_>, _>>()?;
            encode(&narrowed, ty, out)
        }
        _ => encode(&v, ty, out),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> EncodeResult {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => encode(v, ty, out),
            Value::Int(v) => encode_int(*v, ty, out),
            Value::Float(v) => match *ty {
                Type::FLOAT4 => encode(&(*v as f32), ty, out),
                _ => encode(v, ty, out),
            },
            Value::Text(v) => encode(v, ty, out),
            Value::Bytes(v) => encode(v, ty, out),
            Value::Json(v) => encode(v, ty, out),
            Value::Date(v) => encode(v, ty, out),
            Value::Timestamp(v) => encode(v, ty, out),
            Value::TimestampTz(v) => encode(v, ty, out),
            Value::Uuid(v) => encode(v, ty, out),
            Value::TextArray(v) => encode(v, ty, out),
            Value::IntArray(v) => encode_int_array(v, ty, out),
        }
    }

    // The concrete check happens per variant in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    Vec<u8> => Bytes,
    serde_json::Value => Json,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Uuid => Uuid,
    Vec<String> => TextArray,
    Vec<i64> => IntArray,
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::TextArray(v.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Insertion-ordered `(column, value)` pairs.
///
/// Setting an existing column replaces its value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value (builder form).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Build a [`Record`] from `column => value` pairs, preserving their order.
///
/// ```
/// let row = sqmap::record! { "name" => "alice", "age" => 30 };
/// assert_eq!(row.columns().collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $( record.set($column, $value); )+
        record
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_insertion_order() {
        let r = Record::new().with("b", 1).with("a", 2).with("c", 3);
        assert_eq!(r.columns().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn record_set_replaces_in_place() {
        let mut r = crate::record! { "a" => 1, "b" => 2 };
        r.set("a", "x");
        assert_eq!(r.columns().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(r.get("a"), Some(&Value::Text("x".into())));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5)), Value::Int(5));
    }

    #[test]
    fn record_serializes_as_map() {
        let r = crate::record! { "id" => 1, "name" => "bob", "gone" => Value::Null };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"bob","gone":null}"#);
    }

    #[test]
    fn int_narrows_to_column_type() {
        let mut out = BytesMut::new();
        Value::Int(7).to_sql(&Type::INT4, &mut out).unwrap();
        assert_eq!(out.len(), 4);

        let mut out = BytesMut::new();
        Value::Int(7).to_sql(&Type::INT8, &mut out).unwrap();
        assert_eq!(out.len(), 8);

        let mut out = BytesMut::new();
        assert!(Value::Int(i64::MAX).to_sql(&Type::INT4, &mut out).is_err());
    }

    #[test]
    fn mismatched_type_is_rejected() {
        let mut out = BytesMut::new();
        assert!(Value::Bool(true).to_sql(&Type::TEXT, &mut out).is_err());
        assert!(matches!(
            Value::Null.to_sql(&Type::TEXT, &mut out),
            Ok(IsNull::Yes)
        ));
    }
}
