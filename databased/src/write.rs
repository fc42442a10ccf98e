// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! Write operations: table creation, inserts, updates and deletes.
//!
//! The first change of a session opens its transaction; changes stay in it
//! until the handle commits.

use rusqlite::params_from_iter;
use tracing::info;

use crate::connection::DataBased;
use crate::criteria::{Criteria, quote_ident};
use crate::error::{Error, Result};
use crate::types::Value;

impl DataBased {
    /// Create tables that don't exist yet.
    ///
    /// Each definition has the form `tableName(columnDefinitions)`. Existing
    /// tables are left untouched.
    pub fn create_tables<S: AsRef<str>>(&mut self, definitions: &[S]) -> Result<()> {
        if definitions.is_empty() {
            return Ok(());
        }
        let mut existing = self.get_table_names()?;
        let conn = self.write_conn()?;

        for definition in definitions {
            let definition = definition.as_ref();
            let name = table_name(definition);
            if existing.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                info!("{name} already exists.");
                continue;
            }
            conn.execute(&format!("CREATE TABLE IF NOT EXISTS {definition}"), [])?;
            info!("{name} table created.");
            existing.push(name.to_owned());
        }
        Ok(())
    }

    /// Insert a row supplying a value for every column, in column order.
    ///
    /// Returns the rowid of the new row.
    pub fn add_to_table(&mut self, table: &str, values: &[Value]) -> Result<i64> {
        let expected = self.get_column_names(table)?.len();
        if expected != values.len() {
            return Err(Error::ArityMismatch {
                table: table.to_owned(),
                expected,
                found: values.len(),
            });
        }
        let sql = format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(table),
            placeholders(values.len())
        );
        self.insert(table, &sql, values)
    }

    /// Insert a row into the named columns; columns left out take their
    /// defaults.
    pub fn add_to_table_columns(
        &mut self,
        table: &str,
        columns: &[&str],
        values: &[Value],
    ) -> Result<i64> {
        if columns.len() != values.len() {
            return Err(Error::ArityMismatch {
                table: table.to_owned(),
                expected: columns.len(),
                found: values.len(),
            });
        }
        let column_list = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({column_list}) VALUES ({})",
            quote_ident(table),
            placeholders(values.len())
        );
        self.insert(table, &sql, values)
    }

    fn insert(&mut self, table: &str, sql: &str, values: &[Value]) -> Result<i64> {
        let conn = self.write_conn()?;
        conn.prepare_cached(sql)?.execute(params_from_iter(values))?;
        let id = conn.last_insert_rowid();
        info!("Added \"{}\" to {table} table.", display_values(values));
        Ok(id)
    }

    /// Set `column` to `new_value` on every row matching `criteria`.
    ///
    /// Returns the number of rows changed.
    pub fn update(
        &mut self,
        table: &str,
        column: &str,
        new_value: impl Into<Value>,
        criteria: &Criteria,
    ) -> Result<usize> {
        if criteria.is_empty() {
            return Err(Error::EmptyCriteria {
                operation: "update",
            });
        }
        let new_value = new_value.into();
        let (clause, values) = criteria.to_sql(2);
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE {clause}",
            quote_ident(table),
            quote_ident(column)
        );
        let params = std::iter::once(&new_value).chain(values);

        let changed = self
            .write_conn()?
            .prepare_cached(&sql)?
            .execute(params_from_iter(params))?;
        info!("Updated \"{column}\" to \"{new_value}\" in {changed} row(s) of {table} table where {clause}.");
        Ok(changed)
    }

    /// Delete every row matching `criteria`.
    ///
    /// Returns the number of rows deleted.
    pub fn delete_from(&mut self, table: &str, criteria: &Criteria) -> Result<usize> {
        if criteria.is_empty() {
            return Err(Error::EmptyCriteria {
                operation: "delete",
            });
        }
        let (clause, values) = criteria.to_sql(1);
        let sql = format!("DELETE FROM {} WHERE {clause}", quote_ident(table));

        let deleted = self
            .write_conn()?
            .prepare_cached(&sql)?
            .execute(params_from_iter(values))?;
        info!("Deleted {deleted} row(s) from {table} table where {clause}.");
        Ok(deleted)
    }
}

/// Table name part of a `name(columns)` definition.
fn table_name(definition: &str) -> &str {
    definition
        .split('(')
        .next()
        .unwrap_or(definition)
        .trim()
        .trim_matches('"')
}

fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

fn display_values(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
