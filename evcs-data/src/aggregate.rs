//! Summary statistics and chart series derived from a set of session rows.
//!
//! Averages only count rows holding a valid numeric value for the column;
//! invalid or missing cells are excluded from both the sum and the
//! denominator. Everything is recomputed from scratch on each call.

use evcs_model::dataset::{
    CHARGING_DURATION_HOURS, CHARGING_RATE_KW, DAY_OF_WEEK, ENERGY_CONSUMED_KWH, TIME_OF_DAY,
};
use evcs_model::Row;
use serde::Serialize;
use std::collections::HashMap;

/// Canonical order of the time-of-day buckets.
pub const TIME_OF_DAY_ORDER: [&str; 4] = ["Morning", "Afternoon", "Evening", "Night"];

/// Canonical order of the day-of-week buckets.
pub const DAY_OF_WEEK_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Summary statistics for a set of sessions.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Stats {
    pub total_sessions: usize,
    /// Sum of valid energy values in kWh, rounded to 2 decimals.
    pub total_energy: f64,
    /// Mean charging rate in kW, rounded to 2 decimals.
    pub avg_rate: f64,
    /// Mean duration in decimal hours, unrounded.
    pub avg_duration: f64,
}

/// Display strings for the four stat cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatCards {
    pub total_sessions: String,
    pub total_energy: String,
    pub avg_rate: String,
    pub avg_duration: String,
}

impl Stats {
    pub fn cards(&self) -> StatCards {
        StatCards {
            total_sessions: self.total_sessions.to_string(),
            total_energy: format!("{:.2} kWh", self.total_energy),
            avg_rate: format!("{:.2} kW", self.avg_rate),
            avg_duration: format_duration(self.avg_duration),
        }
    }
}

/// One labelled bar or point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub value: f64,
}

/// The two bucketed series behind the bar and line charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartSeries {
    /// Summed energy per time of day.
    pub energy_by_time_of_day: Vec<Bucket>,
    /// Session count per day of week.
    pub sessions_by_day_of_week: Vec<Bucket>,
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running sum and count of the valid values of one column.
#[derive(Default)]
struct ColumnTotal {
    sum: f64,
    count: usize,
}

impl ColumnTotal {
    fn over(rows: &[Row], headers: &[String], column: &str) -> Self {
        let mut total = ColumnTotal::default();
        if !headers.iter().any(|h| h == column) {
            return total;
        }
        for value in rows.iter().filter_map(|r| r.get(column).as_number()) {
            total.sum += value;
            total.count += 1;
        }
        total
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Compute the summary statistics of `rows`.
///
/// A column missing from `headers` contributes nothing, exactly as if every
/// cell in it were invalid.
pub fn compute_stats(rows: &[Row], headers: &[String]) -> Stats {
    let energy = ColumnTotal::over(rows, headers, ENERGY_CONSUMED_KWH);
    let rate = ColumnTotal::over(rows, headers, CHARGING_RATE_KW);
    let duration = ColumnTotal::over(rows, headers, CHARGING_DURATION_HOURS);

    Stats {
        total_sessions: rows.len(),
        total_energy: round2(energy.sum),
        avg_rate: round2(rate.mean()),
        avg_duration: duration.mean(),
    }
}

/// Format decimal hours as `{h}h:{mm}m`.
///
/// Hours are truncated and the fractional part is rounded to whole minutes;
/// a rounded 60 carries into the hour so `1.9999` reads `2h:00m`.
pub fn format_duration(hours: f64) -> String {
    let hours = if hours.is_finite() && hours > 0.0 { hours } else { 0.0 };
    let mut whole = hours.trunc() as u64;
    let mut minutes = ((hours - hours.trunc()) * 60.0).round() as u64;
    if minutes >= 60 {
        whole += 1;
        minutes -= 60;
    }
    format!("{}h:{:02}m", whole, minutes)
}

/// Accumulates values per label, remembering first-seen order.
#[derive(Default)]
struct BucketAccumulator {
    order: Vec<String>,
    totals: HashMap<String, f64>,
}

impl BucketAccumulator {
    fn add(&mut self, label: String, value: f64) {
        match self.totals.get_mut(&label) {
            Some(total) => *total += value,
            None => {
                self.totals.insert(label.clone(), value);
                self.order.push(label);
            }
        }
    }

    /// Canonical labels first (only those seen), then unrecognized labels in
    /// first-seen order.
    fn into_ordered(mut self, canonical: &[&str]) -> Vec<Bucket> {
        let mut buckets = Vec::with_capacity(self.order.len());
        for label in canonical {
            if let Some(value) = self.totals.remove(*label) {
                buckets.push(Bucket {
                    label: label.to_string(),
                    value,
                });
            }
        }
        for label in self.order {
            if let Some(value) = self.totals.remove(&label) {
                buckets.push(Bucket { label, value });
            }
        }
        buckets
    }
}

/// Bucket energy by time of day and sessions by day of week.
///
/// Energy buckets only count rows with a valid energy value. Rows without a
/// bucket label are skipped. A bucket exists iff some row contributed to it.
pub fn compute_chart_series(rows: &[Row]) -> ChartSeries {
    let mut energy = BucketAccumulator::default();
    let mut sessions = BucketAccumulator::default();

    for row in rows {
        if let (Some(time), Some(kwh)) = (
            row.get(TIME_OF_DAY).as_label(),
            row.get(ENERGY_CONSUMED_KWH).as_number(),
        ) {
            energy.add(time, kwh);
        }
        if let Some(day) = row.get(DAY_OF_WEEK).as_label() {
            sessions.add(day, 1.0);
        }
    }

    ChartSeries {
        energy_by_time_of_day: energy.into_ordered(&TIME_OF_DAY_ORDER),
        sessions_by_day_of_week: sessions.into_ordered(&DAY_OF_WEEK_ORDER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evcs_model::CellValue;

    fn headers() -> Vec<String> {
        [
            "user_id",
            "time_of_day",
            "day_of_week",
            "energy_consumed_kwh",
            "charging_rate_kw",
            "charging_duration_hours",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn session(time: &str, day: &str, energy: CellValue) -> Row {
        Row::from_pairs([
            ("time_of_day", CellValue::from(time)),
            ("day_of_week", CellValue::from(day)),
            ("energy_consumed_kwh", energy),
        ])
    }

    #[test]
    fn mixed_validity_scenario() {
        let rows = vec![
            Row::from_pairs([
                ("energy_consumed_kwh", CellValue::from("10.5")),
                ("charging_rate_kw", CellValue::from("5")),
                ("charging_duration_hours", CellValue::Number(1.5)),
            ]),
            Row::from_pairs([
                ("energy_consumed_kwh", CellValue::from("bad")),
                ("charging_rate_kw", CellValue::from("7")),
                ("charging_duration_hours", CellValue::Number(0.5)),
            ]),
        ];
        let stats = compute_stats(&rows, &headers());
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_energy, 10.5);
        assert_eq!(stats.avg_rate, 6.0);
        assert_eq!(stats.avg_duration, 1.0);

        let cards = stats.cards();
        assert_eq!(cards.total_sessions, "2");
        assert_eq!(cards.total_energy, "10.50 kWh");
        assert_eq!(cards.avg_rate, "6.00 kW");
        assert_eq!(cards.avg_duration, "1h:00m");
    }

    #[test]
    fn averages_exclude_invalid_values_from_the_denominator() {
        let rows = vec![
            Row::from_pairs([("charging_rate_kw", 4.0)]),
            Row::from_pairs([("charging_rate_kw", "n/a")]),
            Row::from_pairs([("charging_rate_kw", 8.0)]),
        ];
        let stats = compute_stats(&rows, &headers());
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.avg_rate, 6.0);
        assert_eq!(stats.avg_duration, 0.0);
    }

    #[test]
    fn totals_are_rounded_to_two_decimals() {
        let rows = vec![
            Row::from_pairs([("energy_consumed_kwh", 1.004), ("charging_rate_kw", 1.0)]),
            Row::from_pairs([("energy_consumed_kwh", 2.003), ("charging_rate_kw", 1.34)]),
        ];
        let stats = compute_stats(&rows, &headers());
        assert_eq!(stats.total_energy, 3.01);
        assert_eq!(stats.avg_rate, 1.17);
    }

    #[test]
    fn columns_missing_from_headers_contribute_nothing() {
        let rows = vec![Row::from_pairs([("energy_consumed_kwh", 5.0)])];
        let stats = compute_stats(&rows, &["time_of_day".to_string()]);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.total_energy, 0.0);
    }

    #[test]
    fn empty_rows_give_zeroed_stats() {
        let stats = compute_stats(&[], &headers());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.cards().avg_duration, "0h:00m");
        assert_eq!(compute_chart_series(&[]), ChartSeries::default());
    }

    #[test]
    fn format_duration_truncates_hours_and_rounds_minutes() {
        assert_eq!(format_duration(1.0), "1h:00m");
        assert_eq!(format_duration(2.25), "2h:15m");
        assert_eq!(format_duration(0.5083), "0h:30m");
        assert_eq!(format_duration(1.9999), "2h:00m");
        assert_eq!(format_duration(f64::NAN), "0h:00m");
    }

    #[test]
    fn time_of_day_buckets_follow_canonical_order() {
        let rows = vec![
            session("Night", "Friday", CellValue::Number(5.0)),
            session("Dawn", "Funday", CellValue::Number(1.0)),
            session("Morning", "Monday", CellValue::Number(10.0)),
            session("Evening", "Monday", CellValue::from("2.5")),
            session("Brunch", "Sunday", CellValue::Number(3.0)),
            session("Morning", "Sunday", CellValue::Number(4.0)),
            session("Dawn", "Friday", CellValue::Number(1.0)),
        ];
        let series = compute_chart_series(&rows);
        let labels: Vec<&str> = series
            .energy_by_time_of_day
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Morning", "Evening", "Night", "Dawn", "Brunch"]);
        assert_eq!(series.energy_by_time_of_day[0].value, 14.0);
        assert_eq!(series.energy_by_time_of_day[3].value, 2.0);

        let days: Vec<(&str, f64)> = series
            .sessions_by_day_of_week
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(
            days,
            vec![("Monday", 2.0), ("Friday", 2.0), ("Sunday", 2.0), ("Funday", 1.0)]
        );
    }

    #[test]
    fn energy_buckets_skip_invalid_energy_but_sessions_still_count() {
        let rows = vec![
            session("Afternoon", "Tuesday", CellValue::from("bad")),
            session("Afternoon", "Tuesday", CellValue::Null),
        ];
        let series = compute_chart_series(&rows);
        assert!(series.energy_by_time_of_day.is_empty());
        assert_eq!(series.sessions_by_day_of_week.len(), 1);
        assert_eq!(series.sessions_by_day_of_week[0].value, 2.0);
    }

    #[test]
    fn zero_energy_bucket_is_kept() {
        let rows = vec![session("Morning", "Monday", CellValue::Number(0.0))];
        let series = compute_chart_series(&rows);
        assert_eq!(series.energy_by_time_of_day.len(), 1);
        assert_eq!(series.energy_by_time_of_day[0].value, 0.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let rows = vec![
            session("Morning", "Monday", CellValue::Number(7.25)),
            session("Night", "Sunday", CellValue::from("3")),
        ];
        assert_eq!(compute_stats(&rows, &headers()), compute_stats(&rows, &headers()));
        assert_eq!(compute_chart_series(&rows), compute_chart_series(&rows));
    }
}
