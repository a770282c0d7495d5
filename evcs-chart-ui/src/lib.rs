//! Shared Dioxus components and JS bridge for the EVCS dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Chart.js and Leaflet draw functions via `js_sys::eval()`
//! - `browser_api`: a `fetch`-backed implementation of the backend contract
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (stat cards, table, selectors, etc.)

pub mod browser_api;
pub mod components;
pub mod js_bridge;
pub mod state;
