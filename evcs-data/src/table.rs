//! The session table as a display grid.

use crate::aggregate::round2;
use evcs_model::dataset::USER_ID;
use evcs_model::value::parse_finite;
use evcs_model::{CellValue, Row};
use serde::Serialize;

/// Text of the single row shown when the dataset could not be loaded.
pub const ERROR_MESSAGE: &str = "Error loading data. Please try again later.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub text: String,
    /// The first column of every row is emphasized.
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableBody {
    Rows(Vec<Vec<TableCell>>),
    /// One full-width row spanning `colspan` columns.
    Error { colspan: usize, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub body: TableBody,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            body: TableBody::Rows(Vec::new()),
        }
    }
}

impl TableView {
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Error { .. } => 1,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, TableBody::Error { .. })
    }
}

/// Whole numbers print without decimals, everything else with two,
/// rounded half away from zero like the stat cards. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value + 0.0)
    } else {
        format!("{:.2}", round2(value) + 0.0)
    }
}

/// Display text of a cell.
///
/// Numeric strings are formatted like numbers unless they contain a `:`,
/// which keeps clock times such as `08:30` verbatim.
pub fn format_cell(value: &CellValue) -> String {
    match value {
        CellValue::Number(n) if n.is_finite() => format_number(*n),
        CellValue::Text(s) if !s.contains(':') => match parse_finite(s) {
            Some(n) => format_number(n),
            None => s.clone(),
        },
        other => other.to_string(),
    }
}

/// Build the grid for `rows`. `user_id` is never displayed.
pub fn build_table(headers: &[String], rows: &[Row]) -> TableView {
    let headers: Vec<String> = headers
        .iter()
        .filter(|h| h.as_str() != USER_ID)
        .cloned()
        .collect();

    let body = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(index, header)| TableCell {
                    text: format_cell(row.get(header)),
                    emphasized: index == 0,
                })
                .collect()
        })
        .collect();

    TableView {
        headers,
        body: TableBody::Rows(body),
    }
}

/// Replace the body with the fixed error row, keeping the current headers.
pub fn error_table(headers: Vec<String>) -> TableView {
    let colspan = headers.len().max(1);
    TableView {
        headers,
        body: TableBody::Error {
            colspan,
            message: ERROR_MESSAGE.to_string(),
        },
    }
}
