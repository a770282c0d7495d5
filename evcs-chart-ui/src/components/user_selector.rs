//! Dropdown selector for the user filter.

use crate::state::AppState;
use dioxus::prelude::*;
use evcs_model::UserFilter;

#[derive(Props, Clone, PartialEq)]
pub struct UserSelectorProps {
    /// Called with the newly selected filter
    pub on_change: EventHandler<UserFilter>,
}

/// User dropdown: "All users" followed by user ids in numeric-suffix order.
#[component]
pub fn UserSelector(props: UserSelectorProps) -> Element {
    let state = use_context::<AppState>();
    let (options, selected) = {
        let session = state.session.read();
        (
            session.view().user_options.clone(),
            session.filter().as_value().to_string(),
        )
    };

    let handler = props.on_change;
    let on_change = move |evt: Event<FormData>| {
        handler.call(UserFilter::from_value(&evt.value()));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "user-select",
                style: "font-weight: bold; margin-right: 8px;",
                "User: "
            }
            select {
                id: "user-select",
                onchange: on_change,
                for option in options.iter() {
                    option {
                        value: "{option.value}",
                        selected: option.value == selected,
                        "{option.label}"
                    }
                }
            }
        }
    }
}
