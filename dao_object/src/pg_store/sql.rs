//! PostgreSQL statement rendering
//!
//! Turns finalized conditions and statements into SQL text with `$n` parameters
//! plus the values to bind, in order. Nothing here touches a connection.
//!
//! Written rows travel as one `jsonb` parameter each and are unpacked with
//! `jsonb_populate_record`, so every cell takes the type of its table column.

use crate::errors::DaoError;
use crate::query_builder::{Arg, Condition, SelectStatement, PLACEHOLDER};
use crate::traits::Row;
use crate::validation::{ValidatedColumnName, ValidatedTableName};
use serde_json::Value;
use std::fmt::Write;

/// SQL text with its positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PgStatement {
    pub sql: String,
    pub params: Vec<Arg>,
}

impl PgStatement {
    fn next_param(&mut self, arg: Arg) -> String {
        self.params.push(arg);
        format!("${}", self.params.len())
    }

    /// Append `condition` with its `?` placeholders renumbered after the
    /// parameters already collected.
    ///
    /// An [`Arg::List`] becomes a parenthesized list with one parameter per
    /// element; an empty list becomes `(NULL)`, which matches nothing. Every
    /// other argument, JSON arrays included, is a single parameter.
    fn push_condition(&mut self, condition: &Condition) -> Result<(), DaoError> {
        let placeholders = condition.placeholder_count();
        if placeholders != condition.args.len() {
            return Err(DaoError::PlaceholderMismatch {
                placeholders,
                args: condition.args.len(),
            });
        }

        let mut args = condition.args.iter().cloned();
        let mut in_literal = false;
        for c in condition.sql.chars() {
            if c == '\'' {
                in_literal = !in_literal;
            }
            if in_literal || c != PLACEHOLDER {
                self.sql.push(c);
                continue;
            }

            match args.next() {
                Some(Arg::List(items)) if items.is_empty() => self.sql.push_str("(NULL)"),
                Some(Arg::List(items)) => {
                    let list: Vec<String> =
                        items.into_iter().map(|item| self.next_param(item)).collect();
                    let _ = write!(self.sql, "({})", list.join(", "));
                }
                Some(arg) => {
                    let param = self.next_param(arg);
                    self.sql.push_str(&param);
                }
                None => {
                    return Err(DaoError::PlaceholderMismatch {
                        placeholders,
                        args: condition.args.len(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Arguments without any text still go through the placeholder check
    fn push_clause(&mut self, keyword: &str, condition: &Condition) -> Result<(), DaoError> {
        if !condition.is_empty() || !condition.args.is_empty() {
            let _ = write!(self.sql, " {} ", keyword);
            self.push_condition(condition)?;
        }
        Ok(())
    }

    fn push_where(&mut self, condition: &Condition) -> Result<(), DaoError> {
        self.push_clause("WHERE", condition)
    }

    /// `(jsonb_populate_record(NULL::"table", $n))` for one written row
    fn push_record(&mut self, table: &ValidatedTableName, row: &Row) -> String {
        let param = self.next_param(Arg::Value(Value::Object(row.clone())));
        format!("(jsonb_populate_record(NULL::{}, {}))", table.quoted(), param)
    }
}

fn require_condition(
    table: &ValidatedTableName,
    operation: &str,
    condition: &Condition,
) -> Result<(), DaoError> {
    if condition.is_empty() {
        return Err(DaoError::missing_where_clause(table.as_str(), operation));
    }
    Ok(())
}

/// Body of a read: projection, filter, grouping and having, without ordering
/// or paging
fn filtered_select(
    table: &ValidatedTableName,
    statement: &SelectStatement,
) -> Result<PgStatement, DaoError> {
    let mut out = PgStatement::default();
    out.sql.push_str("SELECT ");
    if statement.distinct {
        out.sql.push_str("DISTINCT ");
    }
    let _ = write!(
        out.sql,
        "{} FROM {}",
        statement.projection(),
        table.quoted()
    );

    out.push_where(&statement.condition)?;

    if let Some(group) = &statement.group {
        let _ = write!(out.sql, " GROUP BY {}", group);
    }
    if let Some(having) = &statement.having {
        out.push_clause("HAVING", having)?;
    }
    Ok(out)
}

/// Read returning one JSON object per row in a `record` column
pub fn select(
    table: &ValidatedTableName,
    statement: &SelectStatement,
) -> Result<PgStatement, DaoError> {
    let mut inner = filtered_select(table, statement)?;
    if let Some(order) = &statement.order {
        let _ = write!(inner.sql, " ORDER BY {}", order);
    }
    if let Some(pagination) = statement.pagination.filter(|p| !p.to_sql().is_empty()) {
        let _ = write!(inner.sql, " {}", pagination.to_sql());
    }

    Ok(PgStatement {
        sql: format!(
            "SELECT row_to_json(__row__) AS record FROM ({}) AS __row__",
            inner.sql
        ),
        params: inner.params,
    })
}

/// Row count of the filtered read in a `total` column
pub fn count(
    table: &ValidatedTableName,
    statement: &SelectStatement,
) -> Result<PgStatement, DaoError> {
    let inner = filtered_select(table, statement)?;
    Ok(PgStatement {
        sql: format!("SELECT COUNT(*) AS total FROM ({}) AS __count__", inner.sql),
        params: inner.params,
    })
}

/// Multi-row insert over the union of the rows' columns.
///
/// A column missing from a row, or `null` in it, is written as `DEFAULT`. Each
/// row with at least one value binds one parameter.
pub fn insert(table: &ValidatedTableName, rows: &[Row]) -> Result<PgStatement, DaoError> {
    if rows.is_empty() {
        return Err(DaoError::Store(format!("insert into {} without rows", table)));
    }

    let mut columns: Vec<&String> = Vec::new();
    for row in rows {
        for column in row.keys() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    let mut out = PgStatement::default();
    if columns.is_empty() {
        if rows.len() > 1 {
            return Err(DaoError::Store(format!(
                "insert into {} with no columns in a multi-row batch",
                table
            )));
        }
        out.sql = format!("INSERT INTO {} DEFAULT VALUES", table.quoted());
        return Ok(out);
    }

    let quoted = columns
        .iter()
        .map(|column| ValidatedColumnName::new(column).map(|c| c.quoted()))
        .collect::<Result<Vec<_>, _>>()?;
    let _ = write!(
        out.sql,
        "INSERT INTO {} ({}) VALUES ",
        table.quoted(),
        quoted.join(", ")
    );

    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            out.sql.push_str(", ");
        }
        let has_values = row.values().any(|value| !value.is_null());
        let record = if has_values {
            out.push_record(table, row)
        } else {
            String::new()
        };
        let cells: Vec<String> = columns
            .iter()
            .zip(&quoted)
            .map(|(column, quoted)| match row.get(column.as_str()) {
                None | Some(Value::Null) => "DEFAULT".to_string(),
                Some(_) => format!("{}.{}", record, quoted),
            })
            .collect();
        let _ = write!(out.sql, "({})", cells.join(", "));
    }
    Ok(out)
}

/// `UPDATE ... SET ... WHERE ...`; the SET values share the first parameter.
///
/// A `null` value sets the column to `NULL`.
pub fn update(
    table: &ValidatedTableName,
    values: &Row,
    condition: &Condition,
) -> Result<PgStatement, DaoError> {
    require_condition(table, "update", condition)?;
    if values.is_empty() {
        return Err(DaoError::Store(format!("update of {} without values", table)));
    }

    let columns = values
        .keys()
        .map(|column| ValidatedColumnName::new(column))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = PgStatement::default();
    let record = out.push_record(table, values);
    let assignments: Vec<String> = columns
        .iter()
        .map(|column| format!("{} = {}.{}", column.quoted(), record, column.quoted()))
        .collect();

    let _ = write!(
        out.sql,
        "UPDATE {} SET {}",
        table.quoted(),
        assignments.join(", ")
    );
    out.push_where(condition)?;
    Ok(out)
}

pub fn delete(table: &ValidatedTableName, condition: &Condition) -> Result<PgStatement, DaoError> {
    require_condition(table, "delete", condition)?;

    let mut out = PgStatement::default();
    let _ = write!(out.sql, "DELETE FROM {}", table.quoted());
    out.push_where(condition)?;
    Ok(out)
}
