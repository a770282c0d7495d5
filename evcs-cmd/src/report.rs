//! Plain-text and CSV renderings of a dashboard view for the terminal.

use evcs_data::aggregate::ChartSeries;
use evcs_data::chart::ScatterChartSpec;
use evcs_data::map::MapSpec;
use evcs_data::session::DashboardView;
use evcs_data::table::{TableBody, TableView};
use std::fmt::Write as _;
use std::io::Write;

pub fn render_stats(view: &DashboardView) -> String {
    let cards = &view.cards;
    let mut out = String::new();
    let _ = writeln!(out, "Total sessions:   {}", cards.total_sessions);
    let _ = writeln!(out, "Total energy:     {}", cards.total_energy);
    let _ = writeln!(out, "Average rate:     {}", cards.avg_rate);
    let _ = writeln!(out, "Average duration: {}", cards.avg_duration);
    if let Some(at) = view.last_updated {
        let _ = writeln!(out, "Last updated:     {}", at.format("%H:%M:%S"));
    }
    out.push_str(&render_series(&view.series));
    out
}

fn render_series(series: &ChartSeries) -> String {
    let mut out = String::from("\nEnergy by time of day (kWh)\n");
    for bucket in &series.energy_by_time_of_day {
        let _ = writeln!(out, "  {:<12} {:>10.2}", bucket.label, bucket.value);
    }
    out.push_str("\nSessions by day of week\n");
    for bucket in &series.sessions_by_day_of_week {
        let _ = writeln!(out, "  {:<12} {:>10}", bucket.label, bucket.value);
    }
    out
}

/// Column-aligned text table.
pub fn render_table(table: &TableView) -> String {
    let rows: Vec<Vec<&str>> = match &table.body {
        TableBody::Rows(rows) => rows
            .iter()
            .map(|r| r.iter().map(|c| c.text.as_str()).collect())
            .collect(),
        TableBody::Error { message, .. } => return format!("{}\n", message),
    };

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(table.headers.iter().map(String::as_str).collect()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

/// Write the table as CSV with a header record.
pub fn write_table_csv<W: Write>(table: &TableView, writer: W) -> anyhow::Result<()> {
    let TableBody::Rows(rows) = &table.body else {
        anyhow::bail!("the session table could not be loaded");
    };
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in rows {
        wtr.write_record(row.iter().map(|c| c.text.as_str()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn render_stations(map: &MapSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} marker(s)", map.markers.len());
    for marker in &map.markers {
        let _ = writeln!(
            out,
            "  {:>10.5} {:>10.5}  {:<6}  {} station(s)",
            marker.latitude,
            marker.longitude,
            serde_json::to_value(marker.color)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            marker.label.as_deref().unwrap_or("1")
        );
    }
    if let Some(b) = map.fit_bounds {
        let _ = writeln!(
            out,
            "view: [{:.4}, {:.4}] - [{:.4}, {:.4}]",
            b.south, b.west, b.north, b.east
        );
    }
    out
}

pub fn render_clusters(spec: &ScatterChartSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "x: {}  y: {}", spec.x_label, spec.y_label);
    for dataset in &spec.datasets {
        let _ = writeln!(out, "  {:<12} {} point(s)", dataset.label, dataset.points.len());
    }
    out
}
