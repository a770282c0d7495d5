//! Error display component with an optional retry button.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shown as a "Retry" button when set
    #[props(default)]
    pub on_retry: Option<EventHandler<()>>,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let on_retry = props.on_retry;
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; display: flex; align-items: center; gap: 12px;",
            div {
                strong { "Error: " }
                "{props.message}"
            }
            if let Some(handler) = on_retry {
                button {
                    style: "margin-left: auto; padding: 4px 12px; cursor: pointer;",
                    onclick: move |_| handler.call(()),
                    "Retry"
                }
            }
        }
    }
}
