use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as delivered by the backend.
///
/// The session endpoint is loosely typed: numeric columns may arrive as JSON
/// numbers or as numeric strings, so every consumer goes through
/// [`CellValue::as_number`] instead of matching on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    #[default]
    Null,
}

impl CellValue {
    /// Strict numeric view of the cell.
    ///
    /// Numbers and strings whose trimmed content parses as a finite `f64` are
    /// numeric. `"NaN"`, `"inf"`, `"10kWh"` and empty strings are not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_finite(s),
            _ => None,
        }
    }

    /// True for `null` and for strings that are empty after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The cell as a plain label, used for grouping keys such as user ids
    /// and bucket names. Missing cells have no label.
    pub fn as_label(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        Some(self.to_string())
    }
}

/// Parse a string into a finite float, rejecting NaN and infinities.
pub fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}
