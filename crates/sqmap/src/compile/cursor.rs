//! Per-statement parameter cursor.

use crate::format::Format;
use crate::value::Value;

/// Running placeholder index plus the parameter sink for one statement.
///
/// Every resolver of a statement borrows the same cursor, so placeholders stay contiguous
/// across the `SET`, `WHERE`, `IN`, `LIKE` and `LIMIT/OFFSET` fragments.
#[derive(Debug)]
pub struct ParamCursor {
    format: Format,
    next: usize,
    params: Vec<Value>,
}

impl ParamCursor {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            next: format.first_index(),
            params: Vec::new(),
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Index the next placeholder will get.
    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Write the next placeholder for `column` into `out` and record `value`.
    pub fn bind(&mut self, out: &mut String, column: &str, value: Value) {
        self.format.write_placeholder(out, self.next, column);
        self.next += 1;
        self.params.push(value);
    }

    /// Write `column` quoted with the format's quote character.
    pub(crate) fn quote_into(&self, out: &mut String, column: &str) {
        self.format.write_quoted(out, column);
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Indexing;

    #[test]
    fn bind_advances_index() {
        let mut cursor = ParamCursor::new(Format::POSTGRES);
        let mut out = String::new();
        cursor.bind(&mut out, "a", Value::Int(1));
        out.push_str(", ");
        cursor.bind(&mut out, "b", Value::Int(2));
        assert_eq!(out, "$1, $2");
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.into_params(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn zero_based_cursor() {
        let mut cursor = ParamCursor::new(Format::new("@", Indexing::ZeroBased, '"'));
        let mut out = String::new();
        cursor.bind(&mut out, "a", Value::Null);
        assert_eq!(out, "@0");
        assert_eq!(cursor.len(), 1);
    }
}
