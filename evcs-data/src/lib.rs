//! Data processing for the charging-session dashboard.
//!
//! Everything in this crate is pure and target-independent so it can be
//! unit tested natively and reused from both the WASM dashboard and the CLI:
//! - `aggregate`: summary statistics and bucketed chart series
//! - `table`: the display grid, including the error row
//! - `chart`: serializable specs handed to the chart back-end
//! - `map`: station grouping, marker colors, popups and bounds
//! - `cluster`: feature-selection validation and scatter partitioning
//! - `users`: ordering of the user filter options
//! - `session`: the dashboard controller state machine
//! - `driver`: async passes over a [`evcs_model::DashboardApi`]

pub mod aggregate;
pub mod chart;
pub mod cluster;
pub mod driver;
pub mod map;
pub mod session;
pub mod table;
pub mod users;
