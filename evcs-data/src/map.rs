//! Station map: one marker per distinct coordinate pair.
//!
//! Stations are grouped by exact `(latitude, longitude)` match, not by
//! proximity. The map back-end tears down its previous map on every
//! [`MapSpec`] it receives.

use evcs_model::Station;
use serde::Serialize;
use std::collections::HashMap;

/// Initial view before markers are fitted: central Portugal.
pub const DEFAULT_CENTER: [f64; 2] = [39.6, -8.0];
pub const DEFAULT_ZOOM: u8 = 7;
/// Fraction of the marker extent added on every side when fitting the view.
pub const BOUNDS_PADDING: f64 = 0.1;

const SINGLE_MARKER_SIZE: u32 = 16;
const GROUP_MARKER_SIZE: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Every station in the group was visited.
    Green,
    /// No station in the group was visited.
    Red,
    /// Mixed.
    Orange,
}

/// Stations sharing exact coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    pub latitude: f64,
    pub longitude: f64,
    pub stations: Vec<Station>,
}

impl LocationGroup {
    pub fn color(&self) -> MarkerColor {
        let visited = self.stations.iter().filter(|s| s.visited).count();
        if visited == self.stations.len() {
            MarkerColor::Green
        } else if visited == 0 {
            MarkerColor::Red
        } else {
            MarkerColor::Orange
        }
    }

    /// Station count shown on the marker; single stations are unlabeled.
    pub fn label(&self) -> Option<String> {
        (self.stations.len() > 1).then(|| self.stations.len().to_string())
    }

    /// Visited stations first; ties keep their original order.
    pub fn visited_first(&self) -> Vec<&Station> {
        let mut sorted: Vec<&Station> = self.stations.iter().collect();
        sorted.sort_by_key(|s| !s.visited);
        sorted
    }

    pub fn popup_html(&self) -> String {
        if let [station] = self.stations.as_slice() {
            return format!(
                "<div class=\"station-popup-single\"><b>{}</b><br>Lat: {}<br>Lon: {}<br>Status: {}</div>",
                escape_html(&station.station_id),
                self.latitude,
                self.longitude,
                status(station.visited)
            );
        }

        let entries: String = self
            .visited_first()
            .iter()
            .map(|s| {
                format!(
                    "<div class=\"station-popup-entry\"><span style=\"color: {};\">&#9679;</span> <b>{}</b> - {}</div>",
                    if s.visited { "green" } else { "red" },
                    escape_html(&s.station_id),
                    status(s.visited)
                )
            })
            .collect();

        format!(
            "<div class=\"station-popup-group\"><div class=\"station-popup-heading\">{} Stations at this location:</div><div class=\"station-popup-list\">{}</div></div>",
            self.stations.len(),
            entries
        )
    }
}

fn status(visited: bool) -> &'static str {
    if visited {
        "Visited"
    } else {
        "Not Visited"
    }
}

/// Minimal escaping for text placed into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Group stations by exact coordinates in first-seen order. Stations
/// without usable coordinates are dropped.
pub fn group_stations(stations: &[Station]) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut dropped = 0usize;

    for station in stations {
        let Some((lat, lon)) = station.coordinates() else {
            dropped += 1;
            continue;
        };
        match index.get(&(lat.to_bits(), lon.to_bits())) {
            Some(&i) => groups[i].stations.push(station.clone()),
            None => {
                index.insert((lat.to_bits(), lon.to_bits()), groups.len());
                groups.push(LocationGroup {
                    latitude: lat,
                    longitude: lon,
                    stations: vec![station.clone()],
                });
            }
        }
    }

    if dropped > 0 {
        log::warn!("map: skipped {} stations without coordinates", dropped);
    }
    groups
}

/// Latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point; `None` for no points.
    pub fn around<I: IntoIterator<Item = (f64, f64)>>(points: I) -> Option<Bounds> {
        points.into_iter().fold(None, |acc, (lat, lon)| {
            Some(match acc {
                None => Bounds {
                    south: lat,
                    west: lon,
                    north: lat,
                    east: lon,
                },
                Some(b) => Bounds {
                    south: b.south.min(lat),
                    west: b.west.min(lon),
                    north: b.north.max(lat),
                    east: b.east.max(lon),
                },
            })
        })
    }

    /// Grow every side by `ratio` of the box's height or width.
    pub fn pad(&self, ratio: f64) -> Bounds {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lon_buffer = (self.east - self.west).abs() * ratio;
        Bounds {
            south: self.south - lat_buffer,
            west: self.west - lon_buffer,
            north: self.north + lat_buffer,
            east: self.east + lon_buffer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub latitude: f64,
    pub longitude: f64,
    pub color: MarkerColor,
    pub label: Option<String>,
    pub size: u32,
    pub popup_html: String,
}

/// Everything the map back-end needs to rebuild the map from scratch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSpec {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<MarkerSpec>,
    /// Padded extent of all markers; absent when there are none.
    pub fit_bounds: Option<Bounds>,
}

impl Default for MapSpec {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            markers: Vec::new(),
            fit_bounds: None,
        }
    }
}

pub fn build_map(stations: &[Station]) -> MapSpec {
    let markers: Vec<MarkerSpec> = group_stations(stations)
        .iter()
        .map(|group| MarkerSpec {
            latitude: group.latitude,
            longitude: group.longitude,
            color: group.color(),
            label: group.label(),
            size: if group.stations.len() > 1 {
                GROUP_MARKER_SIZE
            } else {
                SINGLE_MARKER_SIZE
            },
            popup_html: group.popup_html(),
        })
        .collect();

    let fit_bounds =
        Bounds::around(markers.iter().map(|m| (m.latitude, m.longitude))).map(|b| b.pad(BOUNDS_PADDING));

    MapSpec {
        markers,
        fit_bounds,
        ..MapSpec::default()
    }
}
