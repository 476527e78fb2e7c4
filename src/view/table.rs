//! History table rendering.

use std::fmt::Write as _;

use colored::Colorize;

use crate::config::COORDINATE_PRECISION;
use crate::history::Record;

const HEADERS: [&str; 8] = [
    "ID", "IP", "Country", "City", "ISP", "Timezone", "Latitude", "Longitude",
];

/// Shown when the history has no records at all.
pub const EMPTY_HISTORY: &str = "No lookups yet.";

/// Shown when a filter hides every record.
pub const EMPTY_FILTER: &str = "No records match the filter.";

fn cells(record: &Record) -> [String; 8] {
    [
        record.id.to_string(),
        record.ip.clone(),
        record.country.clone(),
        record.city.clone(),
        record.isp.clone(),
        record.timezone.clone(),
        format!("{:.*}", COORDINATE_PRECISION, record.latitude),
        format!("{:.*}", COORDINATE_PRECISION, record.longitude),
    ]
}

fn format_row(cells: &[String; 8], widths: &[usize; 8]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Renders records as an aligned table.
///
/// The row whose id equals `selected` is prefixed with `>` and highlighted.
/// Coordinates are shown with four decimals. An empty slice renders
/// `EMPTY_HISTORY`.
pub fn render_table(records: &[&Record], selected: Option<u64>) -> String {
    render_rows(records, selected, EMPTY_HISTORY)
}

/// Renders the filtered view of a history.
///
/// Like `render_table`, but an empty result caused by an active filter
/// renders `EMPTY_FILTER` instead.
pub fn render_history(
    visible: &[&Record],
    total: usize,
    filter: &str,
    selected: Option<u64>,
) -> String {
    let empty = if total > 0 && !filter.trim().is_empty() {
        EMPTY_FILTER
    } else {
        EMPTY_HISTORY
    };
    let mut out = render_rows(visible, selected, empty);
    if !filter.trim().is_empty() {
        let _ = writeln!(
            out,
            "{}",
            format!("Filter '{}': {} of {} records", filter.trim(), visible.len(), total).dimmed()
        );
    }
    out
}

fn render_rows(records: &[&Record], selected: Option<u64>, empty: &str) -> String {
    let mut out = String::new();
    if records.is_empty() {
        let _ = writeln!(out, "{}", empty.dimmed());
        return out;
    }

    let rows: Vec<[String; 8]> = records.iter().map(|r| cells(r)).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format_row(&HEADERS.map(String::from), &widths);
    let _ = writeln!(out, "  {}", header.bold());

    for (record, row) in records.iter().zip(&rows) {
        let line = format_row(row, &widths);
        if selected == Some(record.id) {
            let _ = writeln!(out, "{} {}", ">".green().bold(), line.green().bold());
        } else {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}
