//! Statement parsers: validate a descriptor and build its fragments.
//!
//! Parsers run the resolvers in the order their fragments appear in the final text
//! (`SET` → `WHERE` → `IN` → `LIKE` → `LIMIT/OFFSET`), which keeps the Nth placeholder
//! bound to the Nth parameter.

use super::cursor::ParamCursor;
use super::resolve::{resolve_in, resolve_like, resolve_shift, resolve_where};
use crate::condition::{BetweenOp, InList, Token};
use crate::error::{SqmError, SqmResult};
use crate::format::Format;
use crate::query::{DeleteQuery, InsertQuery, Predicates, Returning, SelectQuery, UpdateQuery};
use crate::value::Value;

/// Fragments of a parsed INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInsert {
    /// `("a", "b")`
    pub columns: String,
    /// `($1, $2), ($3, $4)`
    pub values: String,
    pub returning: Option<String>,
    pub params: Vec<Value>,
}

/// Fragments of a parsed SELECT.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSelect {
    pub columns: String,
    pub groups: PredicateGroups,
    pub order: Option<String>,
    pub shift: Option<String>,
    pub params: Vec<Value>,
}

/// Fragments of a parsed UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUpdate {
    /// `"a"=$1, "b"=$2`
    pub assignments: String,
    pub groups: PredicateGroups,
    pub returning: Option<String>,
    pub params: Vec<Value>,
}

/// Fragments of a parsed DELETE.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDelete {
    pub groups: PredicateGroups,
    pub returning: Option<String>,
    pub params: Vec<Value>,
}

/// Rendered `WHERE` / `IN` / `LIKE` groups and the connector between them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredicateGroups {
    pub where_clause: Option<String>,
    pub in_clause: Option<String>,
    pub like_clause: Option<String>,
    pub between: BetweenOp,
}

impl PredicateGroups {
    /// Present groups in statement order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [&self.where_clause, &self.in_clause, &self.like_clause]
            .into_iter()
            .filter_map(|g| g.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

fn check_in_lists(tokens: Option<&[Token<InList>]>) -> SqmResult<()> {
    let Some(tokens) = tokens else {
        return Ok(());
    };
    for token in tokens {
        if let Token::Item(item) = token {
            if item.values.is_empty() {
                return Err(SqmError::validation(format!(
                    "empty in-list for column \"{}\"",
                    item.column
                )));
            }
        }
    }
    Ok(())
}

fn resolve_groups(predicates: &Predicates, cursor: &mut ParamCursor) -> PredicateGroups {
    PredicateGroups {
        where_clause: predicates
            .where_clause
            .as_ref()
            .and_then(|w| resolve_where(w, cursor)),
        in_clause: predicates
            .in_clause
            .as_deref()
            .and_then(|t| resolve_in(t, cursor)),
        like_clause: predicates
            .like_clause
            .as_deref()
            .and_then(|t| resolve_like(t, cursor)),
        between: predicates.between,
    }
}

fn quoted_list<S: AsRef<str>>(cols: &[S], format: Format) -> String {
    let mut out = String::new();
    for (i, col) in cols.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        format.write_quoted(&mut out, col.as_ref());
    }
    out
}

fn resolve_returning(returning: Option<&Returning>, format: Format) -> SqmResult<Option<String>> {
    match returning {
        None => Ok(None),
        Some(Returning::All) => Ok(Some("*".to_string())),
        Some(Returning::Columns(cols)) if cols.is_empty() => {
            Err(SqmError::validation("empty returning columns"))
        }
        Some(Returning::Columns(cols)) => Ok(Some(quoted_list(cols, format))),
    }
}

pub fn parse_insert(query: &InsertQuery, format: Format) -> SqmResult<ParsedInsert> {
    if query.cols.is_empty() {
        return Err(SqmError::validation("empty columns"));
    }
    if query.rows.is_empty() {
        return Err(SqmError::validation("empty rows"));
    }

    let columns = format!("({})", quoted_list(&query.cols, format));

    let mut cursor = ParamCursor::new(format);
    let mut values = String::new();
    for (r, row) in query.rows.iter().enumerate() {
        if r > 0 {
            values.push_str(", ");
        }
        values.push('(');
        for (c, col) in query.cols.iter().enumerate() {
            if c > 0 {
                values.push_str(", ");
            }
            let value = row.get(col).cloned().unwrap_or(Value::Null);
            cursor.bind(&mut values, col, value);
        }
        values.push(')');
    }

    Ok(ParsedInsert {
        columns,
        values,
        returning: resolve_returning(query.returning.as_ref(), format)?,
        params: cursor.into_params(),
    })
}

pub fn parse_select(query: &SelectQuery, format: Format) -> SqmResult<ParsedSelect> {
    if query.cols.is_empty() {
        return Err(SqmError::validation("empty columns"));
    }
    check_in_lists(query.predicates.in_clause.as_deref())?;

    let mut columns = String::new();
    for (i, col) in query.cols.iter().enumerate() {
        if i > 0 {
            columns.push_str(", ");
        }
        if col == "*" {
            columns.push('*');
        } else {
            format.write_quoted(&mut columns, col);
        }
    }

    let mut cursor = ParamCursor::new(format);
    let groups = resolve_groups(&query.predicates, &mut cursor);
    let order = query.order.as_ref().map(|order| {
        format!(
            "ORDER BY {} {}",
            format.quote(&order.by),
            order.direction.as_str()
        )
    });
    let shift = query
        .shift
        .as_ref()
        .and_then(|shift| resolve_shift(shift, &mut cursor));

    Ok(ParsedSelect {
        columns,
        groups,
        order,
        shift,
        params: cursor.into_params(),
    })
}

pub fn parse_update(query: &UpdateQuery, format: Format) -> SqmResult<ParsedUpdate> {
    if query.set.is_empty() {
        return Err(SqmError::validation("empty set"));
    }
    if !query.predicates.is_present() {
        return Err(SqmError::validation("missing predicate"));
    }
    check_in_lists(query.predicates.in_clause.as_deref())?;

    let mut cursor = ParamCursor::new(format);
    let mut assignments = String::new();
    for (i, (col, value)) in query.set.iter().enumerate() {
        if i > 0 {
            assignments.push_str(", ");
        }
        cursor.quote_into(&mut assignments, col);
        assignments.push('=');
        cursor.bind(&mut assignments, col, value.clone());
    }
    let groups = resolve_groups(&query.predicates, &mut cursor);

    Ok(ParsedUpdate {
        assignments,
        groups,
        returning: resolve_returning(query.returning.as_ref(), format)?,
        params: cursor.into_params(),
    })
}

pub fn parse_delete(query: &DeleteQuery, format: Format) -> SqmResult<ParsedDelete> {
    if !query.predicates.is_present() {
        return Err(SqmError::validation("missing predicate"));
    }
    check_in_lists(query.predicates.in_clause.as_deref())?;

    let mut cursor = ParamCursor::new(format);
    let groups = resolve_groups(&query.predicates, &mut cursor);

    Ok(ParsedDelete {
        groups,
        returning: resolve_returning(query.returning.as_ref(), format)?,
        params: cursor.into_params(),
    })
}
