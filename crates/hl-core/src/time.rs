//! Timestamp canonicalization and human-readable rendering.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Fixed, lexically sortable UTC format used for every stored timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub const UNKNOWN_TIME: &str = "unknown time";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a timestamp with a `Z` marker or explicit offset into UTC. A value
/// without any zone designator is read as UTC, and a bare date as midnight UTC.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Converts a platform timestamp into [`CANONICAL_FORMAT`].
///
/// Empty input yields an empty string. Unparseable input is returned as-is so
/// the stored value still says something about what the platform sent.
pub fn to_canonical(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_utc(raw) {
        Some(dt) => dt.format(CANONICAL_FORMAT).to_string(),
        None => {
            tracing::debug!(raw, "unparseable timestamp kept verbatim");
            raw.to_string()
        }
    }
}

/// Renders a stored timestamp as `1st April 2021 - 9:30 PM UTC`.
pub fn to_display(canonical: &str) -> String {
    if canonical.trim().is_empty() {
        return UNKNOWN_TIME.to_string();
    }
    let Some(dt) = parse_utc(canonical) else {
        tracing::debug!(timestamp = canonical, "timestamp not renderable");
        return canonical.to_string();
    };
    let day = dt.day();
    let (is_pm, hour) = dt.hour12();
    format!(
        "{day}{} {} - {hour}:{:02} {} UTC",
        ordinal_suffix(day),
        dt.format("%B %Y"),
        dt.minute(),
        if is_pm { "PM" } else { "AM" },
    )
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) || (24..=30).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
