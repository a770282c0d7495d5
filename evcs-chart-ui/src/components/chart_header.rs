//! Title row of a chart panel: axes and an optional legend line.

use dioxus::prelude::*;

/// One colored legend entry, e.g. a marker color of the station map.
#[derive(Clone, PartialEq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// What the x axis buckets or plots, e.g. "Time of day"
    #[props(default)]
    pub x_axis: Option<String>,
    /// Y-axis quantity and unit, e.g. "Energy (kWh)"
    #[props(default)]
    pub y_axis: Option<String>,
    #[props(default)]
    pub legend: Vec<LegendEntry>,
    /// Short hint under the axes
    #[props(default)]
    pub note: Option<String>,
}

fn axes_text(x_axis: Option<&str>, y_axis: Option<&str>) -> Option<String> {
    match (x_axis, y_axis) {
        (Some(x), Some(y)) => Some(format!("{} by {}", y, x.to_lowercase())),
        (Some(x), None) => Some(format!("by {}", x.to_lowercase())),
        (None, Some(y)) => Some(y.to_string()),
        (None, None) => None,
    }
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let axes = axes_text(props.x_axis.as_deref(), props.y_axis.as_deref());

    rsx! {
        div {
            style: "display: flex; align-items: baseline; flex-wrap: wrap; gap: 4px 12px; margin-bottom: 8px;",
            h3 {
                style: "margin: 0; font-size: 16px;",
                "{props.title}"
            }
            if let Some(axes) = axes {
                span {
                    style: "font-size: 12px; color: #666;",
                    "{axes}"
                }
            }
            for entry in props.legend.iter() {
                span {
                    style: "font-size: 12px; color: #444; display: inline-flex; align-items: center; gap: 4px;",
                    span {
                        style: "display: inline-block; width: 10px; height: 10px; border-radius: 50%; background: {entry.color};",
                    }
                    "{entry.label}"
                }
            }
            if let Some(note) = props.note.as_ref() {
                p {
                    style: "flex-basis: 100%; margin: 0; font-size: 11px; color: #888;",
                    "{note}"
                }
            }
        }
    }
}
