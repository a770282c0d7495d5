//! EV Charging Sessions Dashboard
//!
//! Shows the session table, four stat cards, energy-by-time-of-day and
//! sessions-by-day-of-week charts, a map of charging stations and an
//! optional cluster view over two numeric features.
//!
//! Data flow:
//! 1. On mount (and on every refresh/retry): fetch `/get_info` once and cache
//!    it in the session, then `/get_users`, then the map for the current filter.
//! 2. On user change: re-derive table, stats and charts from the cache and
//!    fetch only the stations for the new filter.
//! 3. On feature change: once both selectors hold distinct features, POST
//!    `/classify` and draw the scatter chart.
//!
//! Every draw goes through a memo so charts and the map are only rebuilt
//! when their spec actually changed.

use chrono::Local;
use evcs_chart_ui::components::{
    ChartContainer, ChartHeader, DataTable, ErrorDisplay, FeatureSelector, LegendEntry, RefreshBar,
    StatCards, UserSelector,
};
use evcs_chart_ui::js_bridge;
use evcs_chart_ui::state::AppState;
use evcs_data::cluster::SelectionError;
use evcs_model::{DashboardApi, UserFilter};
use dioxus::prelude::*;

/// DOM ids of the chart and map containers.
const BAR_CHART_ID: &str = "energy-by-time-chart";
const LINE_CHART_ID: &str = "sessions-by-day-chart";
const SCATTER_CHART_ID: &str = "cluster-chart";
const MAP_ID: &str = "stations-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("evcs-dashboard-root"))
        .launch(App);
}

/// Dataset, user list, then the map for the current filter.
async fn load_all(mut state: AppState) {
    let api = state.api.read().clone();

    let ticket = state.session.write().begin_load();
    let dataset = api.get_info(None).await;
    state
        .session
        .write()
        .complete_load(ticket, dataset, Local::now().time());

    let ticket = state.session.write().begin_users();
    let users = api.get_users().await;
    state.session.write().complete_users(ticket, users);

    let filter = state.session.read().filter().clone();
    let ticket = state.session.write().begin_map_load();
    let stations = api.get_stations(&filter).await;
    state.session.write().complete_map(ticket, stations);
}

/// Client-side filter, then a map fetch scoped to the new user.
async fn change_user(mut state: AppState, filter: UserFilter) {
    let api = state.api.read().clone();
    let ticket = state.session.write().select_user(filter.clone());
    let stations = api.get_stations(&filter).await;
    state.session.write().complete_map(ticket, stations);
}

/// Validate the selectors and run `/classify`.
fn classify(mut state: AppState, feat1: String, feat2: String) {
    let request = state.session.write().request_clusters(&feat1, &feat2);
    match request {
        Ok((ticket, request)) => {
            spawn(async move {
                let api = state.api.read().clone();
                let result = api.classify(&request).await;
                state.session.write().complete_clusters(ticket, result);
            });
        }
        Err(SelectionError::Incomplete) => {}
        Err(e) => {
            log::warn!("[EVCS] rejected feature selection: {}", e);
            if let Some(notice) = state.session.write().dismiss_notice() {
                js_bridge::alert(&notice);
            }
        }
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: load the draw scripts once ───
    use_effect(move || {
        js_bridge::init_charts();
    });

    // ─── Effect 2: full fetch-and-render pass on mount and on every reload request ───
    use_effect(move || {
        let pass = (state.reload)();
        log::info!("[EVCS] starting load pass {}", pass);
        spawn(load_all(state));
    });

    // ─── Effect 3: cluster view once both features are chosen ───
    use_effect(move || {
        let feat1 = (state.feat1)();
        let feat2 = (state.feat2)();
        classify(state, feat1, feat2);
    });

    // ─── Draw effects: one memo per spec, redrawn only when it changes ───
    let bar = use_memo(move || state.session.read().view().bar.clone());
    let line = use_memo(move || state.session.read().view().line.clone());
    let scatter = use_memo(move || state.session.read().view().scatter.clone());
    let map = use_memo(move || state.session.read().view().map.clone());

    use_effect(move || {
        if let Some(spec) = bar() {
            js_bridge::render_bar_chart(BAR_CHART_ID, &spec);
        }
    });
    use_effect(move || {
        if let Some(spec) = line() {
            js_bridge::render_line_chart(LINE_CHART_ID, &spec);
        }
    });
    use_effect(move || match scatter() {
        Some(spec) => js_bridge::render_scatter_chart(SCATTER_CHART_ID, &spec),
        None => js_bridge::destroy_chart(SCATTER_CHART_ID),
    });
    use_effect(move || {
        js_bridge::render_stations_map(MAP_ID, &map());
    });

    let loading = state.is_loading();

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h1 {
                style: "font-size: 22px; margin: 8px 0;",
                "EV Charging Sessions"
            }

            RefreshBar {}

            if let Some(err) = state.error_message() {
                ErrorDisplay {
                    message: err,
                    on_retry: move |_| state.request_reload(),
                }
            }

            StatCards {}

            UserSelector {
                on_change: move |filter: UserFilter| {
                    spawn(change_user(state, filter));
                },
            }

            DataTable {}

            div {
                style: "display: flex; flex-wrap: wrap; gap: 16px;",
                div {
                    style: "flex: 1; min-width: 320px;",
                    ChartHeader {
                        title: "Energy by Time of Day".to_string(),
                        x_axis: "Time of day".to_string(),
                        y_axis: "Energy (kWh)".to_string(),
                    }
                    ChartContainer {
                        id: BAR_CHART_ID.to_string(),
                        loading: loading,
                    }
                }
                div {
                    style: "flex: 1; min-width: 320px;",
                    ChartHeader {
                        title: "Sessions by Day of Week".to_string(),
                        x_axis: "Day of week".to_string(),
                        y_axis: "Sessions".to_string(),
                    }
                    ChartContainer {
                        id: LINE_CHART_ID.to_string(),
                        loading: loading,
                    }
                }
            }

            ChartHeader {
                title: "Charging Stations".to_string(),
                legend: vec![
                    LegendEntry { color: "#16a34a", label: "All visited" },
                    LegendEntry { color: "#dc2626", label: "None visited" },
                    LegendEntry { color: "#f59e0b", label: "Mixed" },
                ],
                note: "Numbers count stations sharing a location.".to_string(),
            }
            ChartContainer {
                id: MAP_ID.to_string(),
                min_height: 420,
            }

            div {
                style: "margin-top: 16px; padding-top: 8px; border-top: 1px solid #e0e0e0;",
                ChartHeader {
                    title: "Session Clusters".to_string(),
                    note: "Pick two different numeric features.".to_string(),
                }
                FeatureSelector {}
                ChartContainer {
                    id: SCATTER_CHART_ID.to_string(),
                    min_height: 400,
                }
            }
        }
    }
}
