//! Refresh button with the last-updated stamp, or a loading notice before
//! the first successful load.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn RefreshBar() -> Element {
    let mut state = use_context::<AppState>();
    let loading = state.is_loading();
    let stamp = state
        .session
        .read()
        .view()
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string());

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 12px; margin: 8px 0;",
            button {
                id: "refresh-button",
                disabled: loading,
                style: "padding: 6px 14px; cursor: pointer;",
                onclick: move |_| state.request_reload(),
                if loading { "Loading..." } else { "Refresh" }
            }
            {match (stamp, loading) {
                (Some(stamp), _) => rsx! {
                    span {
                        style: "font-size: 12px; color: #888;",
                        "Last updated: {stamp}"
                    }
                },
                (None, true) => rsx! {
                    span {
                        style: "font-size: 12px; color: #666;",
                        "Loading charging sessions..."
                    }
                },
                (None, false) => rsx! {},
            }}
        }
    }
}
