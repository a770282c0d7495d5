//! Reusable Dioxus RSX components for the EVCS dashboard.

mod chart_container;
mod chart_header;
mod data_table;
mod error_display;
mod feature_selector;
mod refresh_bar;
mod stat_cards;
mod user_selector;

pub use chart_container::ChartContainer;
pub use chart_header::{ChartHeader, LegendEntry};
pub use data_table::DataTable;
pub use error_display::ErrorDisplay;
pub use feature_selector::FeatureSelector;
pub use refresh_bar::RefreshBar;
pub use stat_cards::StatCards;
pub use user_selector::UserSelector;
