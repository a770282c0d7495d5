//! Core types and backend contract for EV charging session data.
//!
//! Everything here mirrors the JSON shapes served by the dashboard backend:
//! - `value`: loosely typed cell values (numbers or strings)
//! - `dataset`: charging-session rows plus their column headers
//! - `station`: charging stations shown on the map
//! - `cluster`: the response of the classification endpoint
//! - `api`: the `DashboardApi` trait both transports implement

pub mod api;
pub mod cluster;
pub mod dataset;
pub mod station;
pub mod value;

pub use api::{ApiError, DashboardApi};
pub use cluster::{ClassifyRequest, ClusterResult, LabeledPoint};
pub use dataset::{Dataset, Row, UserFilter};
pub use station::Station;
pub use value::CellValue;
