// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! Read operations.

use rusqlite::{Statement, params_from_iter};

use crate::connection::DataBased;
use crate::criteria::{Criteria, quote_ident};
use crate::error::Result;
use crate::types::{Row, Value};

impl DataBased {
    /// Names of all user-defined tables.
    pub fn get_table_names(&mut self) -> Result<Vec<String>> {
        let mut stmt = self.conn()?.prepare_cached(
            r#"
            SELECT name FROM sqlite_schema
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            "#,
        )?;

        let mut names = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            names.push(row.get(0)?);
        }
        Ok(names)
    }

    /// Column names of `table` in declaration order.
    pub fn get_column_names(&mut self, table: &str) -> Result<Vec<String>> {
        let sql = format!("SELECT * FROM {} WHERE 1 = 0", quote_ident(table));
        // not cached: a cached `SELECT *` keeps the column list it was
        // prepared with until it is stepped
        let stmt = self.conn()?.prepare(&sql)?;
        Ok(stmt.column_names().into_iter().map(str::to_owned).collect())
    }

    /// Number of rows in `table`.
    pub fn count(&mut self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = self.conn()?.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of rows in `table` matching `criteria`.
    ///
    /// Empty criteria count every row.
    pub fn count_matching(&mut self, table: &str, criteria: &Criteria) -> Result<u64> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let mut params = Vec::new();
        if !criteria.is_empty() {
            let (clause, values) = criteria.to_sql(1);
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
            params = values;
        }
        let count: i64 =
            self.conn()?
                .query_row(&sql, params_from_iter(params), |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Rows of `table` matching `criteria` (all rows when `None` or empty),
    /// ordered ascending by `sort_by` when given.
    pub fn get_rows(
        &mut self,
        table: &str,
        criteria: Option<&Criteria>,
        sort_by: Option<&str>,
    ) -> Result<Vec<Row>> {
        let mut sql = format!("SELECT * FROM {}", quote_ident(table));
        let mut params = Vec::new();
        if let Some(criteria) = criteria.filter(|c| !c.is_empty()) {
            let (clause, values) = criteria.to_sql(1);
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
            params = values;
        }
        if let Some(column) = sort_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(&quote_ident(column));
        }

        let mut stmt = self.conn()?.prepare_cached(&sql)?;
        read_rows(&mut stmt, &params)
    }

    /// Rows of `table` where any of `columns` contains `needle` as a
    /// substring. An empty `columns` searches every column.
    pub fn find(&mut self, table: &str, needle: &str, columns: &[&str]) -> Result<Vec<Row>> {
        let all_columns;
        let columns: Vec<&str> = if columns.is_empty() {
            all_columns = self.get_column_names(table)?;
            all_columns.iter().map(String::as_str).collect()
        } else {
            columns.to_vec()
        };

        let criteria = columns
            .into_iter()
            .fold(Criteria::any(), |criteria, column| {
                criteria.contains(column, needle)
            });
        self.get_rows(table, Some(&criteria), None)
    }
}

/// Collect every result row, decoding values with each column's declared
/// type.
///
/// Columns are read after the first step, once SQLite has re-prepared the
/// statement for any schema change.
fn read_rows(stmt: &mut Statement<'_>, params: &[&Value]) -> Result<Vec<Row>> {
    let mut columns: Option<Vec<(String, Option<String>)>> = None;

    let mut out = Vec::new();
    let mut rows = stmt.query(params_from_iter(params))?;
    while let Some(row) = rows.next()? {
        let columns = columns.get_or_insert_with(|| {
            let stmt: &Statement<'_> = row.as_ref();
            stmt.columns()
                .iter()
                .map(|c| (c.name().to_owned(), c.decl_type().map(str::to_owned)))
                .collect()
        });
        let row = columns
            .iter()
            .enumerate()
            .map(|(i, (name, decl_type))| {
                Ok((
                    name.clone(),
                    Value::from_column(row.get_ref(i)?, decl_type.as_deref()),
                ))
            })
            .collect::<rusqlite::Result<Row>>()?;
        out.push(row);
    }
    Ok(out)
}
