//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Chart.js and Leaflet draw functions live in `assets/js/*.js` and are
//! loaded at runtime. They are evaluated as globals (no ES modules) and
//! exposed via `window.*`. Specs are serialized with `serde_json` and
//! spliced into the call as object literals.
//!
//! Every draw call tears down whatever the container held before; chart
//! instances are kept in a JS registry keyed by container id.

use evcs_data::chart::{BarChartSpec, LineChartSpec, ScatterChartSpec};
use evcs_data::map::MapSpec;
use serde::Serialize;

// Embed the draw scripts at compile time
static CHARTS_JS: &str = include_str!("../assets/js/charts.js");
static STATIONS_MAP_JS: &str = include_str!("../assets/js/stations-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('EVCS JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the draw scripts once Chart.js and Leaflet are loaded.
///
/// The scripts are evaluated at global scope via indirect eval inside the
/// polling callback, then each entry point is promoted to `window.*`.
pub fn init_charts() {
    let all_js = [CHARTS_JS, STATIONS_MAP_JS].join("\n");

    let store_js = format!(
        "window.__evcsChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__evcsChartsReady) return;
            var waitForLibs = setInterval(function() {
                if (typeof Chart !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__evcsChartScripts);
                    delete window.__evcsChartScripts;
                    if (typeof renderEvcsBarChart !== 'undefined') window.renderEvcsBarChart = renderEvcsBarChart;
                    if (typeof renderEvcsLineChart !== 'undefined') window.renderEvcsLineChart = renderEvcsLineChart;
                    if (typeof renderEvcsScatterChart !== 'undefined') window.renderEvcsScatterChart = renderEvcsScatterChart;
                    if (typeof destroyEvcsChart !== 'undefined') window.destroyEvcsChart = destroyEvcsChart;
                    if (typeof renderEvcsStationsMap !== 'undefined') window.renderEvcsStationsMap = renderEvcsStationsMap;
                    window.__evcsChartsReady = true;
                    console.log('EVCS charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Script that waits for the draw scripts and the container, then calls
/// `window.<function>(containerId, spec)`.
fn deferred_call(function: &str, container_id: &str, spec_json: &str) -> String {
    let id_literal = serde_json::to_string(container_id).unwrap_or_else(|_| "''".to_string());
    format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__evcsChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({id_literal})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({id_literal}, {spec_json});
                    }} catch(e) {{ console.error('[EVCS] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    )
}

fn render<T: Serialize>(function: &str, container_id: &str, spec: &T) {
    match serde_json::to_string(spec) {
        Ok(json) => call_js(&deferred_call(function, container_id, &json)),
        Err(e) => log::error!("[EVCS] could not serialize spec for {}: {}", function, e),
    }
}

/// Energy per time-of-day bar chart.
pub fn render_bar_chart(container_id: &str, spec: &BarChartSpec) {
    render("renderEvcsBarChart", container_id, spec);
}

/// Sessions per day-of-week line chart.
pub fn render_line_chart(container_id: &str, spec: &LineChartSpec) {
    render("renderEvcsLineChart", container_id, spec);
}

pub fn render_scatter_chart(container_id: &str, spec: &ScatterChartSpec) {
    render("renderEvcsScatterChart", container_id, spec);
}

/// Rebuild the station map from scratch.
pub fn render_stations_map(container_id: &str, spec: &MapSpec) {
    render("renderEvcsStationsMap", container_id, spec);
}

/// Destroy the chart registered for the container and clear it.
pub fn destroy_chart(container_id: &str) {
    let id_literal = serde_json::to_string(container_id).unwrap_or_else(|_| "''".to_string());
    call_js(&format!(
        "if (window.destroyEvcsChart) window.destroyEvcsChart({id}); \
         var el = document.getElementById({id}); if (el) el.innerHTML = '';",
        id = id_literal
    ));
}

/// Blocking notice.
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if window.alert_with_message(message).is_err() {
                log::warn!("[EVCS] alert failed: {}", message);
            }
        }
        None => log::warn!("[EVCS] no window for alert: {}", message),
    }
}
