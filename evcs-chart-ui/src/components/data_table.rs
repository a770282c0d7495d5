//! The session table.

use crate::state::AppState;
use dioxus::prelude::*;
use evcs_data::table::TableBody;

const CELL_STYLE: &str = "padding: 6px 10px; border-bottom: 1px solid #E5E7EB; text-align: left;";

fn cell_style(emphasized: bool) -> String {
    if emphasized {
        format!("{CELL_STYLE} font-weight: 600;")
    } else {
        CELL_STYLE.to_string()
    }
}

/// Renders the current table view: a header row and either one row per
/// session or the single full-width error row.
#[component]
pub fn DataTable() -> Element {
    let state = use_context::<AppState>();
    let table = state.session.read().view().table.clone();

    let body = match &table.body {
        TableBody::Rows(rows) => rsx! {
            for row in rows.iter() {
                tr {
                    for cell in row.iter() {
                        td {
                            style: cell_style(cell.emphasized),
                            "{cell.text}"
                        }
                    }
                }
            }
        },
        TableBody::Error { colspan, message } => rsx! {
            tr {
                td {
                    colspan: "{colspan}",
                    style: "{CELL_STYLE} text-align: center; color: #C62828;",
                    "{message}"
                }
            }
        },
    };

    rsx! {
        div {
            style: "overflow-x: auto; max-height: 420px; overflow-y: auto; margin: 12px 0;",
            table {
                id: "sessions-table",
                style: "border-collapse: collapse; width: 100%; font-size: 13px;",
                thead {
                    tr {
                        for header in table.headers.iter() {
                            th {
                                style: "{CELL_STYLE} background: #F9FAFB; position: sticky; top: 0;",
                                "{header}"
                            }
                        }
                    }
                }
                tbody { {body} }
            }
        }
    }
}
