// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! SQLite wrapper so queries don't need to be written, except table
//! definitions.
//!
//! [`DataBased`] turns table names, column/value pairs and sort columns into
//! parameterized SQL. The connection opens lazily on first use and all
//! writes of a session are committed together on [`DataBased::commit`],
//! [`DataBased::close`] or drop.
//!
//! # Key Features
//!
//! - Idempotent table creation from `name(column definitions)` strings
//! - Inserts, counts, filtered and sorted reads, updates and deletes
//! - `timestamp` columns read back as [`chrono::NaiveDateTime`]
//! - Grid rendering of result rows ([`data_to_string`])
//!
//! # Example
//!
//! ```no_run
//! use databased::{Criteria, DataBased};
//!
//! let mut db = DataBased::new("furniture.db");
//! db.create_tables(&["kitchenTables(numLegs int, topMaterial text, shape text)"])?;
//! db.add_to_table("kitchenTables", &[4.into(), "birch".into(), "round".into()])?;
//!
//! let round = Criteria::new().eq("shape", "round");
//! for row in db.get_rows("kitchenTables", Some(&round), Some("numLegs"))? {
//!     println!("{:?}", row.get("topMaterial"));
//! }
//! db.close()?;
//! # Ok::<(), databased::Error>(())
//! ```

mod connection;
mod criteria;
mod error;
mod format;
mod query;
mod types;
mod write;

pub use connection::{DataBased, log_path};
pub use criteria::{Combine, Condition, Criteria, Op};
pub use error::{Error, Result};
pub use format::{FormatOptions, data_to_string, fit_width};
pub use types::{Row, TIMESTAMP_FORMAT, Value};
