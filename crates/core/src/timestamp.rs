// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient date parsing for export cells.
//!
//! Tracker exports are inconsistent about date formats: API-driven exports
//! use RFC 3339, the web UI writes `Nov 15, 2018`, and hand-edited files often
//! carry plain ISO dates. Dates without a time component resolve to midnight
//! UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{Error, Result};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%b %d, %Y %H:%M", "%b %d, %Y %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y"];

/// Parses a timestamp cell into a UTC date-time.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] when none of the accepted formats match.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(dt) = parse_date(trimmed) {
        return Ok(dt);
    }

    Err(Error::InvalidTimestamp {
        value: value.to_string(),
    })
}

/// Parses a date-only value (`2021-01-05`, `Jan 5, 2021`) to midnight UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value.trim(), format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
