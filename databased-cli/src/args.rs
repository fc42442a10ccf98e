// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::Parser;

/// Inspect and edit a SQLite database without writing SQL.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "databased", version)]
pub struct Args {
    /// Database file to use
    #[arg(long = "db", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Display table names, their columns, and how many rows they contain.
    /// With -t/--tables only those tables are shown.
    #[arg(short, long)]
    pub info: bool,

    /// Limit commands to these tables
    #[arg(short, long, num_args = 1.., value_name = "TABLE")]
    pub tables: Vec<String>,

    /// Limit commands to these columns
    #[arg(short, long, num_args = 1.., value_name = "COLUMN")]
    pub columns: Vec<String>,

    /// Substring to search for, in every column unless -c/--columns is
    /// given and in every table unless -t/--tables is given
    #[arg(short, long, value_name = "TEXT")]
    pub find: Option<String>,

    /// Delete rows whose first -c/--columns value equals each of these
    /// values, from the first -t/--tables table
    #[arg(short, long, num_args = 1.., value_name = "VALUE")]
    pub delete: Vec<String>,

    /// Change the first -c/--columns value from OLD to NEW in the first
    /// -t/--tables table
    #[arg(short, long, num_args = 2, value_names = ["OLD", "NEW"])]
    pub update: Option<Vec<String>>,

    /// Column to sort results by
    #[arg(short, long, value_name = "COLUMN")]
    pub sort_by: Option<String>,

    /// Print results as JSON instead of grids
    #[arg(long)]
    pub json: bool,

    /// Log to stderr instead of the log file next to the database
    #[arg(long)]
    pub log_stderr: bool,

    /// Configuration file
    #[arg(long, env = "DATABASED_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
