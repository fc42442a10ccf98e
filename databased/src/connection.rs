// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! Connection lifecycle.
//!
//! A [`DataBased`] handle opens its connection on first use. Reads run in
//! autocommit mode; the first write starts a transaction that stays open
//! until [`DataBased::commit`], [`DataBased::close`] or drop, so writes of a
//! session become durable together and other handles can keep reading.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    /// Private in-memory database; its contents are lost on close.
    Memory,
}

/// SQLite wrapper that builds queries from table names, column/value pairs
/// and sort columns.
pub struct DataBased {
    location: Location,
    conn: Option<Connection>,
}

impl DataBased {
    /// Create a handle for the database file at `path`.
    ///
    /// Nothing is opened yet; the file is created on first use if absent.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            location: Location::File(path.as_ref().to_owned()),
            conn: None,
        }
    }

    /// Create a handle backed by an in-memory database (for testing).
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: None,
        }
    }

    /// Path of the backing file, `None` for in-memory handles.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Open the connection if it isn't already open.
    pub fn open(&mut self) -> Result<()> {
        self.conn()?;
        Ok(())
    }

    /// Get the raw connection (for advanced usage), opening it if needed.
    pub fn connection(&mut self) -> Result<&Connection> {
        self.conn()
    }

    /// Commit pending writes. A new transaction starts with the next
    /// write.
    pub fn commit(&mut self) -> Result<()> {
        if let Some(conn) = &self.conn
            && !conn.is_autocommit()
        {
            conn.execute_batch("COMMIT")?;
            debug!("Committed {}", self.describe());
        }
        Ok(())
    }

    /// Commit pending writes and release the connection.
    ///
    /// Closing an already closed handle does nothing. Any later operation
    /// reopens the connection.
    pub fn close(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT")?;
        }
        conn.close().map_err(|(_, e)| e)?;
        debug!("Closed {}", self.describe());
        Ok(())
    }

    /// Borrow the open connection, opening it first if needed.
    ///
    /// No transaction is started, so reads don't hold a lock past the
    /// statement.
    pub(crate) fn conn(&mut self) -> Result<&Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };
        Ok(self.conn.insert(conn))
    }

    /// Borrow the connection for a mutating statement, with the session
    /// transaction active.
    pub(crate) fn write_conn(&mut self) -> Result<&Connection> {
        let conn = self.conn()?;
        if conn.is_autocommit() {
            conn.execute_batch("BEGIN")?;
        }
        Ok(conn)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => Connection::open(path).map_err(|e| Error::DatabaseOpen {
                path: path.clone(),
                source: e,
            })?,
            Location::Memory => Connection::open_in_memory()?,
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        debug!("Opened {}", self.describe());
        Ok(conn)
    }

    fn describe(&self) -> String {
        match &self.location {
            Location::File(path) => format!("database at {}", path.display()),
            Location::Memory => "in-memory database".to_string(),
        }
    }
}

impl Drop for DataBased {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close {}: {e}", self.describe());
        }
    }
}

/// Path of the log file kept next to a database: the file name with its
/// dots removed, plus `.log` (`data/app.db` becomes `data/appdb.log`).
pub fn log_path<P: AsRef<Path>>(db_path: P) -> PathBuf {
    let db_path = db_path.as_ref();
    let stem = db_path
        .file_name()
        .map(|name| name.to_string_lossy().replace('.', ""))
        .unwrap_or_default();
    db_path.with_file_name(format!("{stem}.log"))
}
