//! Predicate resolvers: `WHERE`, `IN`, `LIKE` and `LIMIT/OFFSET` fragments.
//!
//! Each resolver writes its fragment and binds values through the shared [`ParamCursor`],
//! so calling them in statement order keeps placeholder numbering contiguous. Resolvers
//! never fail; a descriptor that renders nothing yields `None`.

use super::cursor::ParamCursor;
use crate::condition::{Cond, InList, Like, Token};
use crate::query::{Shift, Where};

/// Render a token sequence left to right, single-space separated.
///
/// Everything after the last item is dropped, so a group never ends in a connector.
fn render_tokens<T>(
    tokens: &[Token<T>],
    cursor: &mut ParamCursor,
    mut render_item: impl FnMut(&T, &mut String, &mut ParamCursor),
) -> Option<String> {
    let last_item = tokens.iter().rposition(Token::is_item)?;

    let mut out = String::new();
    for token in &tokens[..=last_item] {
        if !out.is_empty() {
            out.push(' ');
        }
        match token {
            Token::Item(item) => render_item(item, &mut out, &mut *cursor),
            Token::Connector(connector) => out.push_str(connector.as_str()),
        }
    }
    Some(out)
}

fn render_cond(cond: &Cond, out: &mut String, cursor: &mut ParamCursor) {
    cursor.quote_into(out, &cond.column);
    out.push_str(cond.op.as_str());
    cursor.bind(out, &cond.column, cond.value.clone());
}

/// `"a"=$1 AND "b"!=$2`
pub(crate) fn resolve_where(clause: &Where, cursor: &mut ParamCursor) -> Option<String> {
    match clause {
        Where::Target {
            record,
            op,
            between,
        } => {
            if record.is_empty() {
                return None;
            }
            let mut out = String::new();
            for (i, (column, value)) in record.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                    out.push_str(between.as_str());
                    out.push(' ');
                }
                cursor.quote_into(&mut out, column);
                out.push_str(op.as_str());
                cursor.bind(&mut out, column, value.clone());
            }
            Some(out)
        }
        Where::Tokens(tokens) => render_tokens(tokens, cursor, render_cond),
    }
}

/// `"id" IN ($1, $2) OR "tag" NOT IN ($3)`
pub(crate) fn resolve_in(tokens: &[Token<InList>], cursor: &mut ParamCursor) -> Option<String> {
    render_tokens(tokens, cursor, |item, out, cursor| {
        cursor.quote_into(out, &item.column);
        out.push(' ');
        out.push_str(item.op.as_str());
        out.push_str(" (");
        for (i, value) in item.values.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            cursor.bind(out, &item.column, value.clone());
        }
        out.push(')');
    })
}

/// `"name" LIKE $1 AND "email" ILIKE $2`
pub(crate) fn resolve_like(tokens: &[Token<Like>], cursor: &mut ParamCursor) -> Option<String> {
    render_tokens(tokens, cursor, |item, out, cursor| {
        cursor.quote_into(out, &item.column);
        out.push(' ');
        out.push_str(item.op.as_str());
        out.push(' ');
        cursor.bind(out, &item.column, item.pattern.clone());
    })
}

/// `LIMIT $1 OFFSET $2`; negative or absent values are skipped.
pub(crate) fn resolve_shift(shift: &Shift, cursor: &mut ParamCursor) -> Option<String> {
    let mut out = String::new();
    if let Some(limit) = shift.limit.filter(|n| *n >= 0) {
        out.push_str("LIMIT ");
        cursor.bind(&mut out, "limit", limit.into());
    }
    if let Some(offset) = shift.offset.filter(|n| *n >= 0) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str("OFFSET ");
        cursor.bind(&mut out, "offset", offset.into());
    }
    (!out.is_empty()).then_some(out)
}
