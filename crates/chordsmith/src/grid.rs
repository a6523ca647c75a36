//! Pasted chord grids.
//!
//! A grid is delimited text: the first non-empty line holds column labels
//! (key names), every following non-empty line is one data row. A line of
//! only spaces is still a row, with a single empty cell. Fields are separated
//! by commas, semicolons, or tabs, in any mix.
//!
//! Rows are addressed in "theory-row" space, inherited from the spreadsheet
//! the layout came from: theory-row 5 is the first data row. Lookups outside
//! the grid yield an empty string, since pasted grids are often incomplete.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::token::root_token;

/// Theory-row number of the first data row.
pub const FIRST_THEORY_ROW: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(['\t', ',', ';'])
        .map(|field| field.trim().to_string())
        .collect()
}

impl GridTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse delimited text. Never fails: blank input gives an empty grid.
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.trim().lines().filter(|line| !line.is_empty());

        let Some(header_line) = lines.next() else {
            debug!("grid text is blank");
            return Self::default();
        };

        let headers = split_fields(header_line);
        let rows: Vec<Vec<String>> = lines.map(split_fields).collect();

        let ragged = rows.iter().filter(|r| r.len() != headers.len()).count();
        if ragged > 0 {
            debug!(
                ragged,
                columns = headers.len(),
                "grid rows differ in width from header"
            );
        }

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// True when there is no header row.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Last theory-row holding data, if any.
    pub fn last_theory_row(&self) -> Option<usize> {
        self.rows.len().checked_sub(1).map(|r| r + FIRST_THEORY_ROW)
    }

    pub fn find_column(&self, key: &str) -> Option<usize> {
        find_column(&self.headers, key)
    }

    /// Root token of each header, in column order. Empty for non-note headers.
    pub fn header_roots(&self) -> Vec<String> {
        self.headers.iter().map(|h| root_token(h)).collect()
    }

    /// First column whose header root is exactly `root`.
    pub fn find_column_by_root(&self, root: &str) -> Option<usize> {
        if root.is_empty() {
            return None;
        }
        self.header_roots().iter().position(|r| r == root)
    }

    /// Cell at a theory-row and zero-based column.
    ///
    /// Returns `""` for rows before [`FIRST_THEORY_ROW`], rows past the end,
    /// columns past the header width, and cells missing from short rows.
    pub fn cell_at(&self, theory_row: usize, column: usize) -> &str {
        let Some(row) = theory_row.checked_sub(FIRST_THEORY_ROW) else {
            return "";
        };
        if column >= self.headers.len() {
            return "";
        }
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Index of the first header equal to `key`, ignoring case and surrounding space.
pub fn find_column(headers: &[String], key: &str) -> Option<usize> {
    let key = key.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(key))
}
