//! Formatting helpers shared by the report renderers
//!
//! All functions are pure; nothing here reads process state.

use chrono::{DateTime, FixedOffset};

const BYTE_UNITS: &[u8] = b"KMGTPE";

/// Format a byte count with binary units
///
/// Values below 1024 are shown as `N B`; larger values are divided by 1024
/// until they fit and printed with one decimal, e.g. `1.5 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!(
        "{:.1} {}B",
        bytes as f64 / div as f64,
        BYTE_UNITS[exp] as char
    )
}

/// Format a snapshot time for a table cell
///
/// Parsable times are shown at minute precision in their own offset; anything
/// else is shown raw, cut to `width` characters.
pub fn format_snapshot_time(raw: &str, parsed: Option<DateTime<FixedOffset>>, width: usize) -> String {
    match parsed {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.chars().take(width).collect(),
    }
}

/// Format a percentage with one decimal place
///
/// Values that round to zero print as `0.0`, never `-0.0`.
pub fn format_percent(value: f64) -> String {
    let text = format!("{:.1}", value);
    if text == "-0.0" {
        "0.0".to_string()
    } else {
        text
    }
}
