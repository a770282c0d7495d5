//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::browser_api::BrowserApi;
use dioxus::prelude::*;
use evcs_data::session::{Phase, Session};

/// Shared state of one dashboard instance.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Controller state: cached dataset, filter, derived view
    pub session: Signal<Session>,
    /// Backend transport
    pub api: Signal<BrowserApi>,
    /// First feature of the cluster view ("" until chosen)
    pub feat1: Signal<String>,
    /// Second feature of the cluster view ("" until chosen)
    pub feat2: Signal<String>,
    /// Bumped to request a full fetch-and-render pass
    pub reload: Signal<u32>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            session: Signal::new(Session::new()),
            api: Signal::new(BrowserApi::default()),
            feat1: Signal::new(String::new()),
            feat2: Signal::new(String::new()),
            reload: Signal::new(0),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.session.read().phase(), Phase::Loading)
    }

    /// Message of the last failed dataset fetch.
    pub fn error_message(&self) -> Option<String> {
        match self.session.read().phase() {
            Phase::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Ask the app to run the full fetch-and-render sequence again.
    pub fn request_reload(&mut self) {
        let next = (self.reload)().wrapping_add(1);
        self.reload.set(next);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
