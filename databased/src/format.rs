// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! Grid rendering of query results.

use crate::types::{Row, Value};

/// Options for [`data_to_string`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Sort rows by this column before rendering.
    pub sort_key: Option<String>,
    /// Wrap cell text longer than this many characters.
    pub max_col_width: Option<usize>,
}

/// Render rows as a grid, headed by the first row's column names.
///
/// ```text
/// +-----+-------+
/// | a   | b     |
/// +=====+=======+
/// | 1   | birch |
/// +-----+-------+
/// ```
///
/// Returns an empty string when there are no rows.
pub fn data_to_string(rows: &[Row], options: &FormatOptions) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.columns().collect();

    let mut rows: Vec<&Row> = rows.iter().collect();
    if let Some(key) = &options.sort_key {
        static NULL: Value = Value::Null;
        rows.sort_by(|a, b| {
            let a = a.get(key).unwrap_or(&NULL);
            let b = b.get(key).unwrap_or(&NULL);
            a.sql_cmp(b)
        });
    }

    let wrap_cell = |text: &str| match options.max_col_width {
        Some(width) => wrap(text, width.max(1)),
        None => text.lines().map(str::to_owned).collect(),
    };

    let header_cells: Vec<Vec<String>> = headers.iter().map(|&h| wrap_cell(h)).collect();
    let body: Vec<Vec<Vec<String>>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|&h| {
                    let text = row.get(h).map(Value::to_string).unwrap_or_default();
                    wrap_cell(text.as_str())
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            std::iter::once(&header_cells[i])
                .chain(body.iter().map(|row| &row[i]))
                .flat_map(|lines| lines.iter().map(|l| l.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_rule(&mut out, &widths, '-');
    push_line(&mut out, &widths, &header_cells);
    push_rule(&mut out, &widths, '=');
    for row in &body {
        push_line(&mut out, &widths, row);
        push_rule(&mut out, &widths, '-');
    }
    // no trailing newline
    out.pop();
    out
}

/// Widest per-cell limit that lets the longest row fit into three quarters
/// of `terminal_width`. `None` when there are no rows.
pub fn fit_width(rows: &[Row], terminal_width: usize) -> Option<usize> {
    let longest: Vec<usize> = rows
        .iter()
        .map(|row| {
            row.values()
                .map(|v| v.to_string().chars().count())
                .collect::<Vec<_>>()
        })
        .max_by_key(|cells| cells.iter().sum::<usize>())?;

    let budget = terminal_width * 3 / 4;
    let mut width = longest.iter().copied().max().unwrap_or(1).max(1);
    while width > 1 && longest.iter().map(|&c| c.min(width)).sum::<usize>() > budget {
        width -= 1;
    }
    Some(width)
}

fn push_rule(out: &mut String, widths: &[usize], fill: char) {
    out.push('+');
    for &w in widths {
        out.extend(std::iter::repeat_n(fill, w + 2));
        out.push('+');
    }
    out.push('\n');
}

fn push_line(out: &mut String, widths: &[usize], cells: &[Vec<String>]) {
    let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
    for line in 0..height {
        out.push('|');
        for (cell, &w) in cells.iter().zip(widths) {
            let text = cell.get(line).map(String::as_str).unwrap_or("");
            let pad = w - text.chars().count();
            out.push(' ');
            out.push_str(text);
            out.extend(std::iter::repeat_n(' ', pad + 1));
            out.push('|');
        }
        out.push('\n');
    }
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }
            let current_len = current.chars().count();
            if current_len > 0 && current_len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
