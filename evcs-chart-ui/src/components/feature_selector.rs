//! The two feature selectors of the cluster view.

use crate::state::AppState;
use dioxus::prelude::*;

/// Two dropdowns over the dataset's numeric columns. Updates `feat1` and
/// `feat2` in AppState; the app reacts once both are set.
#[component]
pub fn FeatureSelector() -> Element {
    let mut state = use_context::<AppState>();
    let features = state.session.read().view().feature_options.clone();
    let feat1 = (state.feat1)();
    let feat2 = (state.feat2)();

    let on_feat1_change = move |evt: Event<FormData>| {
        state.feat1.set(evt.value());
    };

    let on_feat2_change = move |evt: Event<FormData>| {
        state.feat2.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
            label {
                style: "font-weight: bold;",
                "X feature: "
                select {
                    id: "feat1-select",
                    onchange: on_feat1_change,
                    option { value: "", selected: feat1.is_empty(), "Select a feature" }
                    for feature in features.iter() {
                        option {
                            value: "{feature}",
                            selected: *feature == feat1,
                            "{feature}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "Y feature: "
                select {
                    id: "feat2-select",
                    onchange: on_feat2_change,
                    option { value: "", selected: feat2.is_empty(), "Select a feature" }
                    for feature in features.iter() {
                        option {
                            value: "{feature}",
                            selected: *feature == feat2,
                            "{feature}"
                        }
                    }
                }
            }
        }
    }
}
