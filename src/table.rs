//! Column-ordered table document.
//!
//! Both backing files (tasks and users) are flat tables: an ordered list of
//! column headers plus rows of string cells. The whole table is read and
//! rewritten in full on every mutation. Columns unknown to the running
//! variant must survive a read-modify-write cycle in their original order;
//! missing columns are appended and backfilled, never reordered.

use serde::{Deserialize, Serialize};

/// A flat table of string cells with an ordered header row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Header comparison key: trimmed, case-insensitive
pub fn normalize_header(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column, matching headers case/whitespace-insensitively
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.columns
            .iter()
            .position(|column| normalize_header(column) == wanted)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    pub fn set(&mut self, row: usize, column: &str, value: impl Into<String>) -> bool {
        let Some(index) = self.column_index(column) else {
            return false;
        };
        let Some(cells) = self.rows.get_mut(row) else {
            return false;
        };
        if index >= cells.len() {
            cells.resize(index + 1, String::new());
        }
        cells[index] = value.into();
        true
    }

    /// Append a row; short rows are padded to the column count
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Make sure every wanted column exists, appending missing ones at the
    /// end with `default` in every row. Existing columns keep their position
    /// and contents, including columns no variant knows about.
    pub fn ensure_columns(&mut self, wanted: &[String], default: &str) {
        for name in wanted {
            if self.column_index(name).is_none() {
                self.columns.push(name.clone());
                for row in &mut self.rows {
                    row.resize(self.columns.len() - 1, String::new());
                    row.push(default.to_string());
                }
            }
        }
        self.pad_rows();
    }

    /// Pad every row out to the header width (older files can be ragged)
    pub fn pad_rows(&mut self) {
        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }

    /// Render the table as CSV for download
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(
            self.columns
                .iter()
                .map(|column| csv_escape(column))
                .collect::<Vec<_>>()
                .join(","),
        );
        for row in &self.rows {
            lines.push(
                row.iter()
                    .map(|cell| csv_escape(cell))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }
}

fn should_neutralize(value: &str) -> bool {
    let trimmed = value.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('\'') {
        return false;
    }
    matches!(
        trimmed.chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    )
}

/// Quote a CSV cell, prefixing spreadsheet formula triggers with `'`
pub fn csv_escape(value: &str) -> String {
    let safe = if should_neutralize(value) {
        format!("'{value}")
    } else {
        value.to_string()
    };
    if safe.contains(',') || safe.contains('"') || safe.contains('\n') || safe.contains('\r') {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}
