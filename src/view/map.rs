//! Map view state.
//!
//! Holds the viewport (centre and zoom) and at most one marker. Rendering
//! produces a text panel plus an OpenStreetMap link that opens the same view
//! in a browser.

use std::fmt::Write as _;

use colored::Colorize;

use crate::config::{MAP_INITIAL_CENTER, MAP_INITIAL_ZOOM, OSM_BASE_URL};
use crate::history::Record;

/// A marker pinned to one record's location.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Id of the record the marker belongs to
    pub record_id: u64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Popup text: the ip on the first line, "city, country" on the second
    pub popup: String,
}

/// Viewport and marker of the map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// Centre as (latitude, longitude)
    pub center: (f64, f64),
    /// Zoom level (OpenStreetMap scale, 0-19)
    pub zoom: u8,
    /// Current marker, if a record is shown
    pub marker: Option<Marker>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: MAP_INITIAL_CENTER,
            zoom: MAP_INITIAL_ZOOM,
            marker: None,
        }
    }
}

impl MapView {
    /// Moves the viewport.
    pub fn fly_to(&mut self, latitude: f64, longitude: f64, zoom: u8) {
        self.center = (latitude, longitude);
        self.zoom = zoom;
    }

    /// Replaces any previous marker with one for `record`.
    pub fn place_marker(&mut self, record: &Record) {
        let place = record.place();
        let popup = if place.is_empty() {
            record.ip.clone()
        } else {
            format!("{}\n{}", record.ip, place)
        };
        self.marker = Some(Marker {
            record_id: record.id,
            latitude: record.latitude,
            longitude: record.longitude,
            popup,
        });
    }

    /// Removes the marker and returns to the initial viewport.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// OpenStreetMap link showing the current viewport (and marker, if any).
    pub fn osm_url(&self) -> String {
        let (lat, lon) = self.center;
        match &self.marker {
            Some(m) => format!(
                "{}?mlat={:.4}&mlon={:.4}#map={}/{:.4}/{:.4}",
                OSM_BASE_URL, m.latitude, m.longitude, self.zoom, lat, lon
            ),
            None => format!("{}#map={}/{:.4}/{:.4}", OSM_BASE_URL, self.zoom, lat, lon),
        }
    }
}

/// Renders the map panel.
pub fn render_map(map: &MapView) -> String {
    let mut out = String::new();
    match &map.marker {
        Some(marker) => {
            let mut lines = marker.popup.lines();
            if let Some(ip) = lines.next() {
                let _ = writeln!(out, "📍 {}", ip.bold());
            }
            for line in lines {
                let _ = writeln!(out, "   {}", line);
            }
            let _ = writeln!(
                out,
                "   {:.4}, {:.4}",
                marker.latitude, marker.longitude
            );
        }
        None => {
            let _ = writeln!(out, "{}", "No location selected.".dimmed());
        }
    }
    let _ = writeln!(out, "   {}", map.osm_url().underline());
    out
}
