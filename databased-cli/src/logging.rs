// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, IoContext};

/// Install the global subscriber, appending to `log_file` or writing to
/// stderr when it is `None`. `RUST_LOG` overrides `default_level`.
pub fn init(log_file: Option<&Path>, default_level: &str) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .io_context(|| format!("Failed to open log file at {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| CliError::Logging(e.to_string()))
}
