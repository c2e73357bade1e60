//! Statement assemblers: concatenate parsed fragments into final SQL text.

use super::parse::{ParsedDelete, ParsedInsert, ParsedSelect, ParsedUpdate, PredicateGroups};
use crate::format::Format;

fn push_table(sql: &mut String, format: Format, schema: &str, table: &str) {
    format.write_quoted(sql, schema);
    sql.push('.');
    format.write_quoted(sql, table);
}

/// The first present group opens `WHERE`; later groups are joined with `between`.
fn push_groups(sql: &mut String, groups: &PredicateGroups) {
    for (i, group) in groups.iter().enumerate() {
        sql.push(' ');
        if i == 0 {
            sql.push_str("WHERE ");
        } else {
            sql.push_str(groups.between.as_str());
            sql.push(' ');
        }
        sql.push_str(group);
    }
}

fn push_returning(sql: &mut String, returning: Option<&str>) {
    if let Some(returning) = returning {
        sql.push_str(" RETURNING ");
        sql.push_str(returning);
    }
}

/// `INSERT INTO "schema"."table" (cols) VALUES (...), (...)[ RETURNING ...];`
pub fn assemble_insert(parsed: &ParsedInsert, format: Format, schema: &str, table: &str) -> String {
    let mut sql = String::with_capacity(32 + parsed.columns.len() + parsed.values.len());
    sql.push_str("INSERT INTO ");
    push_table(&mut sql, format, schema, table);
    sql.push(' ');
    sql.push_str(&parsed.columns);
    sql.push_str(" VALUES ");
    sql.push_str(&parsed.values);
    push_returning(&mut sql, parsed.returning.as_deref());
    sql.push(';');
    sql
}

/// `SELECT cols FROM "schema"."table"[ WHERE ...][ ORDER BY ...][ LIMIT ... OFFSET ...];`
pub fn assemble_select(parsed: &ParsedSelect, format: Format, schema: &str, table: &str) -> String {
    let mut sql = String::with_capacity(64 + parsed.columns.len());
    sql.push_str("SELECT ");
    sql.push_str(&parsed.columns);
    sql.push_str(" FROM ");
    push_table(&mut sql, format, schema, table);
    push_groups(&mut sql, &parsed.groups);
    if let Some(order) = &parsed.order {
        sql.push(' ');
        sql.push_str(order);
    }
    if let Some(shift) = &parsed.shift {
        sql.push(' ');
        sql.push_str(shift);
    }
    sql.push(';');
    sql
}

/// `UPDATE "schema"."table" SET ...[ WHERE ...][ RETURNING ...];`
pub fn assemble_update(parsed: &ParsedUpdate, format: Format, schema: &str, table: &str) -> String {
    let mut sql = String::with_capacity(64 + parsed.assignments.len());
    sql.push_str("UPDATE ");
    push_table(&mut sql, format, schema, table);
    sql.push_str(" SET ");
    sql.push_str(&parsed.assignments);
    push_groups(&mut sql, &parsed.groups);
    push_returning(&mut sql, parsed.returning.as_deref());
    sql.push(';');
    sql
}

/// `DELETE FROM "schema"."table"[ WHERE ...][ RETURNING ...];`
pub fn assemble_delete(parsed: &ParsedDelete, format: Format, schema: &str, table: &str) -> String {
    let mut sql = String::with_capacity(64);
    sql.push_str("DELETE FROM ");
    push_table(&mut sql, format, schema, table);
    push_groups(&mut sql, &parsed.groups);
    push_returning(&mut sql, parsed.returning.as_deref());
    sql.push(';');
    sql
}
