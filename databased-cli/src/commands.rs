// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! The info / find / delete / update commands.

use std::io::Write;

use databased::{Criteria, DataBased, FormatOptions, Row, Value, data_to_string, fit_width};

use crate::args::Args;
use crate::error::{CliError, IoContext};

/// Where command output goes and how rows are rendered.
pub struct Printer<W> {
    out: W,
    json: bool,
    max_col_width: Option<usize>,
    terminal_width: usize,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, json: bool, max_col_width: Option<usize>, terminal_width: usize) -> Self {
        Self {
            out,
            json,
            max_col_width,
            terminal_width,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a status line; suppressed in JSON mode.
    fn note(&mut self, text: &str) -> Result<(), CliError> {
        if self.json {
            return Ok(());
        }
        writeln!(self.out, "{text}").io_context(|| "Failed to write output".to_string())
    }

    /// Print rows, sorted by `sort_key` when the rows have that column.
    fn rows(&mut self, rows: &[Row], sort_key: Option<&str>) -> Result<(), CliError> {
        let sort_key = sort_key
            .filter(|key| rows.first().is_some_and(|row| row.get(key).is_some()))
            .map(str::to_owned);

        if self.json {
            let mut rows = rows.to_vec();
            if let Some(key) = &sort_key {
                rows.sort_by(|a, b| match (a.get(key), b.get(key)) {
                    (Some(a), Some(b)) => a.sql_cmp(b),
                    (a, b) => a.is_some().cmp(&b.is_some()),
                });
            }
            serde_json::to_writer_pretty(&mut self.out, &rows)?;
            return writeln!(self.out).io_context(|| "Failed to write output".to_string());
        }

        let options = FormatOptions {
            sort_key,
            max_col_width: self
                .max_col_width
                .or_else(|| fit_width(rows, self.terminal_width)),
        };
        writeln!(self.out, "{}", data_to_string(rows, &options))
            .io_context(|| "Failed to write output".to_string())
    }
}

/// Run every command requested in `args`, in the order info, find, delete,
/// update.
pub fn run<W: Write>(
    db: &mut DataBased,
    args: &Args,
    printer: &mut Printer<W>,
) -> Result<(), CliError> {
    let sort_by = args.sort_by.as_deref();
    if args.info {
        info(db, &args.tables, sort_by, printer)?;
    }
    if let Some(needle) = &args.find {
        find(db, needle, &args.tables, &args.columns, sort_by, printer)?;
    }
    if !args.delete.is_empty() {
        delete(db, &args.delete, &args.tables, &args.columns, printer)?;
    }
    if let Some(update_args) = &args.update
        && let [old, new] = update_args.as_slice()
    {
        update(db, old, new, &args.tables, &args.columns, printer)?;
    }
    Ok(())
}

fn tables_or_all(db: &mut DataBased, tables: &[String]) -> Result<Vec<String>, CliError> {
    if tables.is_empty() {
        Ok(db.get_table_names()?)
    } else {
        Ok(tables.to_vec())
    }
}

/// Show each table's columns and row count.
pub fn info<W: Write>(
    db: &mut DataBased,
    tables: &[String],
    sort_by: Option<&str>,
    printer: &mut Printer<W>,
) -> Result<(), CliError> {
    printer.note("Getting database info...\n")?;
    let mut results = Vec::new();
    for table in tables_or_all(db, tables)? {
        let count = db.count(&table)?;
        let columns = db.get_column_names(&table)?;
        results.push(
            Row::new()
                .with("table name", table)
                .with("columns", columns.join(", "))
                .with("number of rows", Value::Integer(count as i64)),
        );
    }
    printer.rows(&results, sort_by)
}

/// Substring search across tables.
pub fn find<W: Write>(
    db: &mut DataBased,
    needle: &str,
    tables: &[String],
    columns: &[String],
    sort_by: Option<&str>,
    printer: &mut Printer<W>,
) -> Result<(), CliError> {
    printer.note("Finding records... \n")?;
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    for table in tables_or_all(db, tables)? {
        let results = db.find(&table, needle, &columns)?;
        if columns.is_empty() {
            printer.note(&format!(
                "{} results for '{needle}' in '{table}' table:",
                results.len()
            ))?;
        } else {
            printer.note(&format!(
                "{} results for '{needle}' in '{}' column(s) of '{table}' table:",
                results.len(),
                columns.join(", ")
            ))?;
        }
        printer.rows(&results, sort_by)?;
        printer.note("")?;
    }
    Ok(())
}

/// Delete rows of the first table whose first column equals each value.
pub fn delete<W: Write>(
    db: &mut DataBased,
    values: &[String],
    tables: &[String],
    columns: &[String],
    printer: &mut Printer<W>,
) -> Result<(), CliError> {
    let table = tables
        .first()
        .ok_or_else(|| CliError::missing("-t/--tables", "-d/--delete"))?;
    let column = columns
        .first()
        .ok_or_else(|| CliError::missing("-c/--columns", "-d/--delete"))?;
    printer.note("Deleting records... \n")?;

    let mut deleted = 0;
    let mut failed = Vec::new();
    for value in values {
        let criteria = Criteria::new().eq(column.as_str(), Value::infer(value));
        match db.delete_from(table, &criteria)? {
            0 => failed.push(value),
            n => deleted += n,
        }
    }

    printer.note(&format!("Deleted {deleted} record(s) from '{table}' table."))?;
    if !failed.is_empty() {
        printer.note(&format!(
            "Failed to delete the following {} record(s) from '{table}' table:",
            failed.len()
        ))?;
        for value in failed {
            printer.note(&format!("  {value}"))?;
        }
    }
    Ok(())
}

/// Change the first column from `old` to `new` in the first table.
pub fn update<W: Write>(
    db: &mut DataBased,
    old: &str,
    new: &str,
    tables: &[String],
    columns: &[String],
    printer: &mut Printer<W>,
) -> Result<(), CliError> {
    let table = tables
        .first()
        .ok_or_else(|| CliError::missing("-t/--tables", "-u/--update"))?;
    let column = columns
        .first()
        .ok_or_else(|| CliError::missing("-c/--columns", "-u/--update"))?;
    printer.note("Updating record... \n")?;

    let criteria = Criteria::new().eq(column.as_str(), Value::infer(old));
    let changed = db.update(table, column, Value::infer(new), &criteria)?;
    let outcome = if changed > 0 { "Updated" } else { "Failed to update" };
    printer.note(&format!(
        "{outcome} '{column}' column from '{old}' to '{new}' in '{table}' table."
    ))
}
