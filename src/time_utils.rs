// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::ops::RangeInclusive;

/// Human-readable format used in API responses, e.g. `Mon Jan 01 2024`.
const LOG_DATE_FORMAT: &str = "%a %b %d %Y";

/// Naive date-time layouts accepted from clients (interpreted as UTC).
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Years that keep the stored RFC3339 string four digits wide.
const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// Always emits millisecond precision so stored values sort lexicographically.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a timestamp as `Day Mon DD YYYY`.
pub fn format_log_date(date: DateTime<Utc>) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Parse a client-supplied date.
///
/// Accepts RFC3339, a bare `YYYY-MM-DD` (UTC midnight), naive date-times,
/// and the `Day Mon DD YYYY` format this API returns. Dates outside years
/// 0000-9999 are rejected.
pub fn parse_client_date(raw: &str) -> Option<DateTime<Utc>> {
    parse_any_format(raw.trim()).filter(|dt| STORABLE_YEARS.contains(&dt.year()))
}

fn parse_any_format(raw: &str) -> Option<DateTime<Utc>> {

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, LOG_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Serde adapter storing timestamps as fixed-width RFC3339 strings.
pub mod rfc3339_millis {
    use super::format_utc_rfc3339;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
