//! The four summary stat cards.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
struct CardProps {
    title: String,
    value: String,
}

#[component]
fn Card(props: CardProps) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-width: 160px; padding: 12px 16px; background: #F5F3FF; border-radius: 6px; border: 1px solid #DDD6FE;",
            div {
                style: "font-size: 12px; color: #6B7280; margin-bottom: 4px;",
                "{props.title}"
            }
            div {
                style: "font-size: 22px; font-weight: bold; color: #4C1D95;",
                "{props.value}"
            }
        }
    }
}

/// Total sessions, total energy, average rate and average duration.
///
/// Cards keep their previous values when a fetch fails.
#[component]
pub fn StatCards() -> Element {
    let state = use_context::<AppState>();
    let cards = state.session.read().view().cards.clone();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; margin: 12px 0;",
            Card { title: "Total Sessions".to_string(), value: cards.total_sessions }
            Card { title: "Total Energy".to_string(), value: cards.total_energy }
            Card { title: "Average Charging Rate".to_string(), value: cards.avg_rate }
            Card { title: "Average Duration".to_string(), value: cards.avg_duration }
        }
    }
}
