//! Async passes running a [`Session`] against a [`DashboardApi`].
//!
//! Each pass runs to completion on the caller's task and suspends only at
//! the awaited fetches. The browser app drives the `Session` ticket methods
//! directly from its signal handlers; these helpers serve callers that can
//! hold the session across awaits (the CLI and tests).

use crate::cluster::SelectionError;
use crate::session::{Phase, Session};
use chrono::Local;
use evcs_model::{DashboardApi, UserFilter};

/// Full fetch-and-render sequence: dataset, user list, then the map.
///
/// The map is fetched even when the dataset fails, matching the independent
/// map reload of the page.
pub async fn load<A: DashboardApi>(api: &A, session: &mut Session) -> Phase {
    let ticket = session.begin_load();
    let dataset = api.get_info(None).await;
    session.complete_load(ticket, dataset, Local::now().time());

    let ticket = session.begin_users();
    let users = api.get_users().await;
    session.complete_users(ticket, users);

    reload_map(api, session).await;
    session.phase().clone()
}

/// The refresh button: the same sequence as the initial load, keeping the
/// current user filter.
pub async fn refresh<A: DashboardApi>(api: &A, session: &mut Session) -> Phase {
    load(api, session).await
}

/// Fetch stations for the current filter and redraw the map.
pub async fn reload_map<A: DashboardApi>(api: &A, session: &mut Session) {
    let filter = session.filter().clone();
    let ticket = session.begin_map_load();
    let stations = api.get_stations(&filter).await;
    session.complete_map(ticket, stations);
}

/// Apply a new user filter: table, stats and charts from the cache, then a
/// scoped map fetch. No dataset request is made.
pub async fn change_user<A: DashboardApi>(api: &A, session: &mut Session, filter: UserFilter) -> Phase {
    let ticket = session.select_user(filter.clone());
    let stations = api.get_stations(&filter).await;
    session.complete_map(ticket, stations);
    session.phase().clone()
}

/// Validate the feature pair and, if valid, fetch and draw the cluster view.
pub async fn classify<A: DashboardApi>(
    api: &A,
    session: &mut Session,
    feat1: &str,
    feat2: &str,
) -> Result<(), SelectionError> {
    let (ticket, request) = session.request_clusters(feat1, feat2)?;
    let result = api.classify(&request).await;
    session.complete_clusters(ticket, result);
    Ok(())
}
