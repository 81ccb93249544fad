//! Conversions between the three date representations in play
//!
//! - ISO `yyyy-mm-dd`: what date inputs produce and consume
//! - display `dd/mm/yyyy`: what the orders table shows
//! - backend `dd-mm-yyyy`: what the CRM entry point expects
//!
//! All functions are total: input that cannot be interpreted is handed back
//! unchanged instead of producing an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_FORMAT: &str = "%Y-%m-%d";
const BACKEND_FORMAT: &str = "%d-%m-%Y";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Convert an ISO date (or timestamp) to backend format `dd-mm-yyyy`
///
/// Empty input yields an empty string.
///
/// ```
/// use pedidos::core::dates::to_backend_format;
/// assert_eq!(to_backend_format("2024-03-05"), "05-03-2024");
/// ```
pub fn to_backend_format(iso_date: &str) -> String {
    if iso_date.is_empty() {
        return String::new();
    }
    match parse_loose(iso_date) {
        Some(date) => date.format(BACKEND_FORMAT).to_string(),
        None => iso_date.to_string(),
    }
}

/// Convert a CRM date to display format `dd/mm/yyyy`
///
/// Backend-format strings are resliced as-is; anything else is parsed as an
/// ISO date or timestamp.
pub fn to_display_format(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if let Some([day, month, year]) = split_backend(value) {
        return format!("{}/{}/{}", day, month, year);
    }
    match parse_loose(value) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Convert a CRM date to the `yyyy-mm-dd` form a date input accepts
///
/// Timestamps are truncated at the `T` separator; other input is returned
/// unchanged.
pub fn backend_to_input_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if let Some([day, month, year]) = split_backend(value) {
        return format!("{}-{}-{}", year, month, day);
    }
    match value.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => value.to_string(),
    }
}

/// Split a `dd-mm-yyyy` string into its segments
///
/// Only the shape is checked: a `-` separated value whose leading segment has
/// two characters.
fn split_backend(value: &str) -> Option<[&str; 3]> {
    let mut parts = value.split('-');
    let day = parts.next()?;
    if day.chars().count() != 2 {
        return None;
    }
    let month = parts.next()?;
    let year = parts.next()?;
    Some([day, month, year])
}

/// Parse an ISO calendar date, a naive ISO timestamp or an RFC 3339 timestamp
///
/// Timestamps keep the calendar date they were written with; no timezone
/// shifting happens.
pub fn parse_loose(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, ISO_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}
