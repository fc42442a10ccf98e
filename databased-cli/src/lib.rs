// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
