//! Display helpers: byte sizes, timestamps and export file names.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Placeholder shown for missing values.
pub const EMPTY: &str = "—";

/// Format bytes using binary units.
///
/// Values >= 10 in the chosen unit round to an integer, smaller values to
/// one decimal (a trailing `.0` is dropped): `1536` → `1.5 KB`,
/// `1048576` → `1 MB`. Zero and negative sizes render as `0 B`.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    let mut v = bytes as f64;
    let mut i = 0usize;
    while v >= 1024.0 && i < UNITS.len() - 1 {
        v /= 1024.0;
        i += 1;
    }
    if v >= 10.0 {
        return format!("{:.0} {}", v.round(), UNITS[i]);
    }
    let rounded = (v * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0} {}", rounded, UNITS[i])
    } else {
        format!("{:.1} {}", rounded, UNITS[i])
    }
}

pub fn format_bytes_opt(bytes: Option<i64>) -> String {
    format_bytes(bytes.unwrap_or(0))
}

/// Parse the timestamp shapes the backend emits: RFC 3339 with offset,
/// naive ISO datetimes (taken as UTC) and plain dates.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Epoch milliseconds for sorting; missing or unparseable → 0.
pub fn timestamp_millis(s: Option<&str>) -> i64 {
    s.and_then(parse_timestamp).map(|dt| dt.timestamp_millis()).unwrap_or(0)
}

/// Local `YYYY-MM-DD HH:MM`, or `—` when missing or invalid.
pub fn format_date(iso: Option<&str>) -> String {
    format_date_in(iso, &Local)
}

pub fn format_date_in<Tz: TimeZone>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match iso.and_then(parse_timestamp) {
        Some(dt) => dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        None => EMPTY.to_string(),
    }
}

/// ISO-8601 UTC with `:` and `.` replaced by `-`, safe for file names:
/// `2026-10-18T09-05-03-120Z`.
pub fn export_stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true).replace([':', '.'], "-")
}

/// `<prefix><stamp>.csv`, e.g. `users_2026-10-18T09-05-03-120Z.csv`.
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}{}.csv", prefix, export_stamp(now))
}
