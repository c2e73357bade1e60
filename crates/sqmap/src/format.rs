//! Placeholder and identifier-quoting conventions.
//!
//! A [`Format`] decides how a parameter placeholder is spelled (`$1`, `?1`, `$name`, ...)
//! and which character wraps identifiers. It is chosen once per compiled statement, so a
//! single statement never mixes indexing modes.
//!
//! # Example
//! ```
//! use sqmap::{Format, Indexing};
//!
//! assert_eq!(Format::POSTGRES.placeholder(3, "id"), "$3");
//! assert_eq!(Format::NAMED.placeholder(3, "id"), "$id");
//! assert_eq!(Format::POSTGRES.quote("email"), r#""email""#);
//!
//! let zero = Format::new("@p", Indexing::ZeroBased, '`');
//! assert_eq!(zero.placeholder(0, "id"), "@p0");
//! ```

use std::fmt::Write as _;

/// How placeholders are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indexing {
    /// `prefix0`, `prefix1`, ...
    ZeroBased,
    /// `prefix1`, `prefix2`, ...
    OneBased,
    /// `prefix<column>`
    Named,
}

/// A placeholder and quoting convention for a SQL backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    pub prefix: &'static str,
    pub indexing: Indexing,
    pub quote: char,
}

impl Format {
    /// `$1, $2, ...` with double-quoted identifiers (PostgreSQL wire protocol).
    pub const POSTGRES: Format = Format::new("$", Indexing::OneBased, '"');

    /// `?1, ?2, ...` with double-quoted identifiers (positional binding).
    pub const POSITIONAL: Format = Format::new("?", Indexing::OneBased, '"');

    /// `$column` with double-quoted identifiers.
    pub const NAMED: Format = Format::new("$", Indexing::Named, '"');

    pub const fn new(prefix: &'static str, indexing: Indexing, quote: char) -> Self {
        Self {
            prefix,
            indexing,
            quote,
        }
    }

    /// Index of the first placeholder in a statement.
    pub const fn first_index(&self) -> usize {
        match self.indexing {
            Indexing::ZeroBased => 0,
            Indexing::OneBased | Indexing::Named => 1,
        }
    }

    /// Render the placeholder for parameter `index` bound to `column`.
    pub fn placeholder(&self, index: usize, column: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + column.len().max(4));
        self.write_placeholder(&mut out, index, column);
        out
    }

    pub(crate) fn write_placeholder(&self, out: &mut String, index: usize, column: &str) {
        out.push_str(self.prefix);
        match self.indexing {
            Indexing::ZeroBased | Indexing::OneBased => {
                let _ = write!(out, "{index}");
            }
            Indexing::Named => out.push_str(column),
        }
    }

    /// Quote an identifier, doubling any embedded quote character.
    pub fn quote(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_quoted(&mut out, name);
        out
    }

    pub(crate) fn write_quoted(&self, out: &mut String, name: &str) {
        out.push(self.quote);
        for ch in name.chars() {
            if ch == self.quote {
                out.push(ch);
            }
            out.push(ch);
        }
        out.push(self.quote);
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::POSTGRES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(Format::POSTGRES.placeholder(1, "id"), "$1");
        assert_eq!(Format::POSITIONAL.placeholder(12, "id"), "?12");
        assert_eq!(Format::NAMED.placeholder(1, "user_id"), "$user_id");
    }

    #[test]
    fn zero_based_starts_at_zero() {
        let f = Format::new(":", Indexing::ZeroBased, '"');
        assert_eq!(f.first_index(), 0);
        assert_eq!(f.placeholder(0, "x"), ":0");
        assert_eq!(Format::POSTGRES.first_index(), 1);
    }

    #[test]
    fn quote_escapes_embedded_quote() {
        assert_eq!(Format::POSTGRES.quote("name"), r#""name""#);
        assert_eq!(Format::POSTGRES.quote(r#"a"b"#), r#""a""b""#);
        let backtick = Format::new("?", Indexing::OneBased, '`');
        assert_eq!(backtick.quote("a`b"), "`a``b`");
    }

    #[test]
    fn default_is_postgres() {
        assert_eq!(Format::default(), Format::POSTGRES);
    }
}
