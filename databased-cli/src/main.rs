// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

use clap::Parser;
use databased::DataBased;
use databased_cli::args::Args;
use databased_cli::commands::{self, Printer};
use databased_cli::config::Config;
use databased_cli::error::{CliError, IoContext};
use databased_cli::logging;
use std::io::Write;
use tracing::info;

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let db_path = args
        .db
        .clone()
        .or_else(|| config.database.clone())
        .ok_or(CliError::NoDatabase)?;
    if !db_path.exists() {
        return Err(CliError::DatabaseNotFound(db_path));
    }

    let log_file = (!args.log_stderr).then(|| databased::log_path(&db_path));
    logging::init(log_file.as_deref(), &config.log_level)?;
    info!("Using database at {}", db_path.display());

    let mut db = DataBased::new(&db_path);
    let mut printer = Printer::new(
        std::io::stdout().lock(),
        args.json,
        config.max_col_width,
        terminal_width(),
    );
    commands::run(&mut db, &args, &mut printer)?;
    db.close()?;

    printer
        .into_inner()
        .flush()
        .io_context(|| "Failed to flush output".to_string())
}

/// Terminal width from `COLUMNS`, 80 when unset or invalid.
fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .filter(|&w| w > 0)
        .unwrap_or(80)
}
