//! Dashboard controller state.
//!
//! A [`Session`] owns everything a dashboard instance needs between
//! interactions: the cached full dataset, the current user filter, the
//! derived [`DashboardView`] and the request bookkeeping. It performs no I/O.
//! Callers issue a request with a `begin_*` method, await the transport, and
//! hand the result back to the matching `complete_*` method together with
//! the [`Ticket`] they were given.
//!
//! Every channel keeps the sequence number of its latest ticket. A response
//! carrying an older ticket was superseded while in flight and is dropped,
//! so a slow request for a previous filter can never overwrite newer state.
//!
//! Phases:
//!
//! ```text
//! Loading --ok--> Ready <--map done-- Filtering
//!    |              |----select_user----^
//!    '----err----> Error ----refresh----> Loading
//! ```

use crate::aggregate::{compute_chart_series, compute_stats, ChartSeries, StatCards, Stats};
use crate::chart::{bar_chart, line_chart, scatter_chart, BarChartSpec, LineChartSpec, ScatterChartSpec};
use crate::cluster::{centroid_points, partition, validate_selection, SelectionError};
use crate::map::{build_map, MapSpec};
use crate::table::{build_table, error_table, TableView};
use crate::users::{user_options, UserOption};
use chrono::NaiveTime;
use evcs_model::{ApiError, ClassifyRequest, ClusterResult, Dataset, Station, UserFilter};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
    /// The table and charts show the new filter; its map is still loading.
    Filtering,
    /// The last dataset fetch failed.
    Error(String),
}

/// Independent request streams. Staleness is tracked per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Dataset,
    Users,
    Stations,
    Clusters,
}

/// Proof of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    channel: Channel,
    seq: u64,
}

impl Ticket {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

/// Whether a completed response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// Everything the UI renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub table: TableView,
    pub stats: Stats,
    pub cards: StatCards,
    pub series: ChartSeries,
    pub bar: Option<BarChartSpec>,
    pub line: Option<LineChartSpec>,
    pub map: MapSpec,
    pub scatter: Option<ScatterChartSpec>,
    pub user_options: Vec<UserOption>,
    pub feature_options: Vec<String>,
    pub last_updated: Option<NaiveTime>,
    /// Blocking message for the user, e.g. an invalid feature selection.
    pub notice: Option<String>,
}

#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    dataset: Option<Dataset>,
    filter: UserFilter,
    users: Option<Vec<String>>,
    pending_classify: Option<ClassifyRequest>,
    view: DashboardView,
    next_seq: u64,
    latest: HashMap<Channel, u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session whose first load is already scoped to `filter`.
    pub fn with_filter(filter: UserFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    /// The cached full dataset, unfiltered.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    fn issue(&mut self, channel: Channel) -> Ticket {
        self.next_seq += 1;
        self.latest.insert(channel, self.next_seq);
        Ticket {
            channel,
            seq: self.next_seq,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.channel) == Some(&ticket.seq)
    }

    fn accept(&self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            return true;
        }
        log::info!("discarding stale {:?} response (ticket {})", ticket.channel, ticket.seq);
        false
    }

    // ───────────────────── Dataset ─────────────────────

    /// Start a full dataset fetch (initial load or refresh).
    pub fn begin_load(&mut self) -> Ticket {
        self.phase = Phase::Loading;
        self.issue(Channel::Dataset)
    }

    /// Apply a `/get_info` result.
    ///
    /// On failure the table body becomes the single error row; stats, charts
    /// and map keep whatever they showed before.
    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: Result<Dataset, ApiError>,
        at: NaiveTime,
    ) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }
        match result {
            Ok(dataset) => {
                log::info!(
                    "loaded {} sessions with {} columns",
                    dataset.len(),
                    dataset.headers.len()
                );
                self.view.feature_options = dataset.numeric_columns();
                self.dataset = Some(dataset);
                self.refresh_user_options();
                self.rederive();
                self.view.last_updated = Some(at);
                self.phase = Phase::Ready;
            }
            Err(e) => {
                log::error!("error fetching data: {}", e);
                let headers = match &self.dataset {
                    Some(ds) => ds.display_headers(),
                    None => self.view.table.headers.clone(),
                };
                self.view.table = error_table(headers);
                self.phase = Phase::Error(e.to_string());
            }
        }
        Applied::Current
    }

    /// Recompute table, stats and charts for the current filter.
    fn rederive(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let view = dataset.filter_by_user(&self.filter);
        let headers = view.display_headers();

        self.view.table = build_table(&view.headers, &view.rows);
        self.view.stats = compute_stats(&view.rows, &headers);
        self.view.cards = self.view.stats.cards();
        self.view.series = compute_chart_series(&view.rows);
        self.view.bar = Some(bar_chart(&self.view.series));
        self.view.line = Some(line_chart(&self.view.series));
    }

    // ───────────────────── Users ─────────────────────

    pub fn begin_users(&mut self) -> Ticket {
        self.issue(Channel::Users)
    }

    /// Apply a `/get_users` result. On failure the options fall back to the
    /// user ids present in the cached dataset.
    pub fn complete_users(&mut self, ticket: Ticket, result: Result<Vec<String>, ApiError>) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }
        match result {
            Ok(users) => self.users = Some(users),
            Err(e) => {
                log::warn!("error fetching users, deriving them from the dataset: {}", e);
                self.users = None;
            }
        }
        self.refresh_user_options();
        Applied::Current
    }

    fn refresh_user_options(&mut self) {
        let users = match (&self.users, &self.dataset) {
            (Some(users), _) => users.clone(),
            (None, Some(ds)) => ds.user_ids(),
            (None, None) => Vec::new(),
        };
        self.view.user_options = user_options(&users);
    }

    // ───────────────────── Filter + map ─────────────────────

    /// Switch the user filter.
    ///
    /// Table, stats and charts are re-derived from the cached dataset right
    /// away; the returned ticket is for the map fetch scoped to the new filter.
    /// While loading or after a failed load the filter is only recorded: the
    /// error row stays until a retry succeeds, and that retry applies it.
    pub fn select_user(&mut self, filter: UserFilter) -> Ticket {
        log::info!("user filter changed to {}", filter);
        self.filter = filter;
        if self.dataset.is_some() && !matches!(self.phase, Phase::Loading | Phase::Error(_)) {
            self.rederive();
            self.phase = Phase::Filtering;
        }
        self.issue(Channel::Stations)
    }

    /// Start a map fetch for the current filter.
    pub fn begin_map_load(&mut self) -> Ticket {
        self.issue(Channel::Stations)
    }

    /// Apply a `/get_stations` result. On failure the previous map stays.
    pub fn complete_map(&mut self, ticket: Ticket, result: Result<Vec<Station>, ApiError>) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }
        match result {
            Ok(stations) => self.view.map = build_map(&stations),
            Err(e) => log::error!("error loading stations for map: {}", e),
        }
        if self.phase == Phase::Filtering {
            self.phase = Phase::Ready;
        }
        Applied::Current
    }

    // ───────────────────── Cluster view ─────────────────────

    /// Validate a feature pair and start a `/classify` request.
    ///
    /// Picking the same feature twice sets a notice and issues nothing.
    pub fn request_clusters(
        &mut self,
        feat1: &str,
        feat2: &str,
    ) -> Result<(Ticket, ClassifyRequest), SelectionError> {
        let request = validate_selection(feat1, feat2).inspect_err(|e| {
            if e.is_user_facing() {
                self.view.notice = Some(e.to_string());
            }
        })?;
        self.pending_classify = Some(request.clone());
        Ok((self.issue(Channel::Clusters), request))
    }

    /// Apply a `/classify` result. Nothing is drawn for a failed or corrupt
    /// response.
    pub fn complete_clusters(&mut self, ticket: Ticket, result: Result<ClusterResult, ApiError>) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }
        let Some(request) = self.pending_classify.take() else {
            return Applied::Stale;
        };
        let scatter = result.and_then(|r| {
            partition(&r, &request.feat1, &request.feat2)
                .map(|parts| scatter_chart(&request.feat1, &request.feat2, &parts, &centroid_points(&r)))
        });
        match scatter {
            Ok(spec) => self.view.scatter = Some(spec),
            Err(e) => {
                log::error!("error classifying {}/{}: {}", request.feat1, request.feat2, e);
                self.view.scatter = None;
            }
        }
        Applied::Current
    }

    /// Clear the blocking notice once the user has acknowledged it.
    pub fn dismiss_notice(&mut self) -> Option<String> {
        self.view.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MarkerColor;
    use crate::table::{TableBody, ERROR_MESSAGE};

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn dataset() -> Dataset {
        serde_json::from_str(
            r#"{
            "headers": ["user_id", "time_of_day", "day_of_week", "energy_consumed_kwh", "charging_rate_kw", "charging_duration_hours"],
            "data": [
                {"user_id": "User_10", "time_of_day": "Evening", "day_of_week": "Monday", "energy_consumed_kwh": 20, "charging_rate_kw": 10, "charging_duration_hours": 2},
                {"user_id": "User_3", "time_of_day": "Morning", "day_of_week": "Friday", "energy_consumed_kwh": "12.5", "charging_rate_kw": 5, "charging_duration_hours": 2.5},
                {"user_id": "User_3", "time_of_day": "Morning", "day_of_week": "Monday", "energy_consumed_kwh": 7.5, "charging_rate_kw": 7, "charging_duration_hours": 1.5}
            ]
        }"#,
        )
        .unwrap()
    }

    fn loaded() -> Session {
        let mut session = Session::new();
        let ticket = session.begin_load();
        session.complete_load(ticket, Ok(dataset()), noon());
        session
    }

    #[test]
    fn starts_loading_with_empty_view() {
        let session = Session::new();
        assert_eq!(session.phase(), &Phase::Loading);
        assert_eq!(session.view().table.row_count(), 0);
        assert!(session.view().bar.is_none());
    }

    #[test]
    fn successful_load_renders_everything() {
        let session = loaded();
        assert_eq!(session.phase(), &Phase::Ready);
        let view = session.view();
        assert_eq!(view.table.row_count(), 3);
        assert_eq!(view.stats.total_sessions, 3);
        assert_eq!(view.stats.total_energy, 40.0);
        assert_eq!(view.cards.avg_duration, "2h:00m");
        assert_eq!(view.bar.as_ref().unwrap().labels, vec!["Morning", "Evening"]);
        assert_eq!(view.line.as_ref().unwrap().labels, vec!["Monday", "Friday"]);
        assert_eq!(view.last_updated, Some(noon()));
        assert_eq!(session.filter(), &UserFilter::All);
        let users: Vec<&str> = view.user_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(users, vec!["ALL_USERS", "User_3", "User_10"]);
        assert_eq!(
            view.feature_options,
            vec!["energy_consumed_kwh", "charging_rate_kw", "charging_duration_hours"]
        );
    }

    #[test]
    fn failed_load_shows_error_row_and_keeps_stats() {
        let mut session = loaded();
        let before = session.view().stats.clone();
        let ticket = session.begin_load();
        session.complete_load(ticket, Err(ApiError::Network("refused".into())), noon());

        assert!(matches!(session.phase(), Phase::Error(_)));
        let view = session.view();
        assert_eq!(view.stats, before);
        assert_eq!(
            view.table.body,
            TableBody::Error {
                colspan: 5,
                message: ERROR_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn user_change_after_failed_refresh_keeps_error_row_until_retry() {
        let mut session = loaded();
        let ticket = session.begin_load();
        session.complete_load(ticket, Err(ApiError::Network("refused".into())), noon());

        let map_ticket = session.select_user(UserFilter::User("User_3".into()));
        assert!(matches!(session.phase(), Phase::Error(_)));
        assert!(matches!(session.view().table.body, TableBody::Error { .. }));
        assert_eq!(session.view().stats.total_sessions, 3);
        assert_eq!(session.complete_map(map_ticket, Ok(Vec::new())), Applied::Current);

        let ticket = session.begin_load();
        session.complete_load(ticket, Ok(dataset()), noon());
        assert_eq!(session.phase(), &Phase::Ready);
        assert_eq!(session.filter(), &UserFilter::User("User_3".into()));
        assert_eq!(session.view().table.row_count(), 2);
        assert_eq!(session.view().stats.total_sessions, 2);
    }

    #[test]
    fn failed_first_load_has_a_single_column_error_row() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        session.complete_load(
            ticket,
            Err(ApiError::Status {
                endpoint: "/get_info".into(),
                status: 500,
            }),
            noon(),
        );
        assert_eq!(session.view().table.row_count(), 1);
        assert!(matches!(
            session.view().table.body,
            TableBody::Error { colspan: 1, .. }
        ));
        assert_eq!(session.view().stats, Stats::default());
    }

    #[test]
    fn select_user_filters_client_side_then_waits_for_map() {
        let mut session = loaded();
        let ticket = session.select_user(UserFilter::User("User_3".into()));
        assert_eq!(session.phase(), &Phase::Filtering);
        assert_eq!(session.view().table.row_count(), 2);
        assert_eq!(session.view().stats.total_energy, 20.0);
        assert_eq!(session.view().stats.avg_rate, 6.0);

        session.complete_map(ticket, Ok(vec![Station::new("ST_1", 38.7, -9.1, true)]));
        assert_eq!(session.phase(), &Phase::Ready);
        assert_eq!(session.view().map.markers[0].color, MarkerColor::Green);
        assert_eq!(session.dataset().unwrap().len(), 3);
    }

    #[test]
    fn map_failure_keeps_previous_map() {
        let mut session = loaded();
        let ticket = session.begin_map_load();
        session.complete_map(ticket, Ok(vec![Station::new("ST_1", 38.7, -9.1, false)]));
        let ticket = session.select_user(UserFilter::User("User_10".into()));
        session.complete_map(ticket, Err(ApiError::Network("down".into())));
        assert_eq!(session.view().map.markers.len(), 1);
        assert_eq!(session.phase(), &Phase::Ready);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut session = loaded();
        let slow = session.select_user(UserFilter::User("User_10".into()));
        let fast = session.select_user(UserFilter::User("User_3".into()));

        assert_eq!(
            session.complete_map(fast, Ok(vec![Station::new("new", 41.0, -8.0, true)])),
            Applied::Current
        );
        assert_eq!(
            session.complete_map(slow, Ok(vec![Station::new("old", 38.0, -9.0, false)])),
            Applied::Stale
        );
        assert!(session.view().map.markers[0].popup_html.contains("new"));

        let first = session.begin_load();
        let second = session.begin_load();
        session.complete_load(second, Ok(dataset()), noon());
        assert_eq!(
            session.complete_load(first, Err(ApiError::Network("late".into())), noon()),
            Applied::Stale
        );
        assert_eq!(session.phase(), &Phase::Ready);
    }

    #[test]
    fn channels_do_not_invalidate_each_other() {
        let mut session = Session::new();
        let users = session.begin_users();
        let load = session.begin_load();
        let map = session.begin_map_load();
        assert_eq!(session.complete_load(load, Ok(dataset()), noon()), Applied::Current);
        assert_eq!(session.complete_map(map, Ok(Vec::new())), Applied::Current);
        assert_eq!(
            session.complete_users(users, Ok(vec!["User_2".into(), "User_1".into()])),
            Applied::Current
        );
        let users: Vec<&str> = session
            .view()
            .user_options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(users, vec!["ALL_USERS", "User_1", "User_2"]);
    }

    #[test]
    fn users_fall_back_to_dataset_ids() {
        let mut session = loaded();
        let ticket = session.begin_users();
        session.complete_users(ticket, Err(ApiError::Network("down".into())));
        assert_eq!(session.view().user_options.len(), 3);
    }

    #[test]
    fn same_feature_sets_notice_and_issues_nothing() {
        let mut session = loaded();
        let err = session
            .request_clusters("energy_consumed_kwh", "energy_consumed_kwh")
            .unwrap_err();
        assert!(matches!(err, SelectionError::SameFeature(_)));
        assert!(session.view().notice.is_some());
        assert!(session.view().scatter.is_none());
        assert!(session.dismiss_notice().is_some());
        assert!(session.view().notice.is_none());
    }

    #[test]
    fn cluster_result_becomes_scatter_spec() {
        let mut session = loaded();
        let (ticket, request) = session
            .request_clusters("energy_consumed_kwh", "charging_rate_kw")
            .unwrap();
        assert_eq!(request.feat2, "charging_rate_kw");
        let result: ClusterResult = serde_json::from_str(
            r#"{"centroids": [[10, 6], [20, 10]], "labeled_data": [
                {"energy_consumed_kwh": 12.5, "charging_rate_kw": 5, "cluster": 0},
                {"energy_consumed_kwh": 7.5, "charging_rate_kw": 7, "cluster": 0},
                {"energy_consumed_kwh": 20, "charging_rate_kw": 10, "cluster": 1}
            ]}"#,
        )
        .unwrap();
        session.complete_clusters(ticket, Ok(result));
        let scatter = session.view().scatter.as_ref().unwrap();
        assert_eq!(scatter.x_label, "energy_consumed_kwh");
        assert_eq!(scatter.datasets.len(), 3);
        assert_eq!(scatter.datasets[0].points.len(), 2);
    }

    #[test]
    fn corrupt_cluster_result_draws_nothing() {
        let mut session = loaded();
        let (ticket, _) = session.request_clusters("a", "b").unwrap();
        let result: ClusterResult =
            serde_json::from_str(r#"{"centroids": [], "labeled_data": [{"a": 1, "b": 2, "cluster": 0}]}"#)
                .unwrap();
        session.complete_clusters(ticket, Ok(result));
        assert!(session.view().scatter.is_none());
    }

    #[test]
    fn empty_dataset_renders_zeroed_charts() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        session.complete_load(ticket, Ok(Dataset::default()), noon());
        let view = session.view();
        assert_eq!(session.phase(), &Phase::Ready);
        assert_eq!(view.stats, Stats::default());
        assert!(view.bar.as_ref().unwrap().values.is_empty());
        assert!(view.line.as_ref().unwrap().values.is_empty());
    }
}
