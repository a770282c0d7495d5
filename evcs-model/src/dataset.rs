use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Column holding the owner of a charging session. Used for filtering only,
/// never displayed.
pub const USER_ID: &str = "user_id";
/// Bucket column for the energy-by-time-of-day chart.
pub const TIME_OF_DAY: &str = "time_of_day";
/// Bucket column for the sessions-by-day-of-week chart.
pub const DAY_OF_WEEK: &str = "day_of_week";
/// Energy delivered in a session, in kWh.
pub const ENERGY_CONSUMED_KWH: &str = "energy_consumed_kwh";
/// Average charging power of a session, in kW.
pub const CHARGING_RATE_KW: &str = "charging_rate_kw";
/// Session length in decimal hours.
pub const CHARGING_DURATION_HOURS: &str = "charging_duration_hours";

/// Wire value of the "all users" selection.
pub const ALL_USERS: &str = "ALL_USERS";

static MISSING: CellValue = CellValue::Null;

/// One charging session: column name to cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, CellValue>);

impl Row {
    /// Look up a column; absent columns read as `null`.
    pub fn get(&self, column: &str) -> &CellValue {
        self.0.get(column).unwrap_or(&MISSING)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(column.into(), value.into());
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Row(pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }

    /// The owning user of this session, if present.
    pub fn user_id(&self) -> Option<String> {
        self.get(USER_ID).as_label()
    }
}

/// Response of `GET /get_info`: ordered headers plus one row per session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default, rename = "data")]
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Headers shown in the table: everything except `user_id`.
    pub fn display_headers(&self) -> Vec<String> {
        self.headers
            .iter()
            .filter(|h| h.as_str() != USER_ID)
            .cloned()
            .collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Client-side view of the dataset for a user selection.
    ///
    /// Headers are kept as-is (including `user_id`) so the view can be
    /// filtered again later.
    pub fn filter_by_user(&self, filter: &UserFilter) -> Dataset {
        match filter {
            UserFilter::All => self.clone(),
            UserFilter::User(id) => Dataset {
                headers: self.headers.clone(),
                rows: self
                    .rows
                    .iter()
                    .filter(|row| row.user_id().as_deref() == Some(id.as_str()))
                    .cloned()
                    .collect(),
            },
        }
    }

    /// Distinct user ids in first-seen order.
    pub fn user_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(Row::user_id)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Displayable columns holding at least one valid numeric value, in
    /// header order. These are the candidates for the cluster view axes.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.display_headers()
            .into_iter()
            .filter(|h| self.rows.iter().any(|r| r.get(h).as_number().is_some()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The user-filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum UserFilter {
    #[default]
    All,
    User(String),
}

impl UserFilter {
    /// Parse a `<select>` value; the [`ALL_USERS`] sentinel and the empty
    /// string both mean "all users".
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_USERS {
            UserFilter::All
        } else {
            UserFilter::User(value.to_string())
        }
    }

    /// The value used for `<select>` options and the `username` query parameter.
    pub fn as_value(&self) -> &str {
        match self {
            UserFilter::All => ALL_USERS,
            UserFilter::User(id) => id,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, UserFilter::All)
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserFilter::All => f.write_str("All users"),
            UserFilter::User(id) => f.write_str(id),
        }
    }
}
