// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

#[parameterized(
    rfc3339 = { "2018-10-24T09:30:00Z", Utc.with_ymd_and_hms(2018, 10, 24, 9, 30, 0).unwrap() },
    rfc3339_offset = { "2018-10-24T11:30:00+02:00", Utc.with_ymd_and_hms(2018, 10, 24, 9, 30, 0).unwrap() },
    iso_datetime = { "2018-10-24 09:30:00", Utc.with_ymd_and_hms(2018, 10, 24, 9, 30, 0).unwrap() },
    iso_date = { "2018-10-24", Utc.with_ymd_and_hms(2018, 10, 24, 0, 0, 0).unwrap() },
    pivotal_date = { "Oct 24, 2018", Utc.with_ymd_and_hms(2018, 10, 24, 0, 0, 0).unwrap() },
    pivotal_single_digit_day = { "Jan 5, 2021", Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap() },
    pivotal_with_time = { "Oct 24, 2018 14:05", Utc.with_ymd_and_hms(2018, 10, 24, 14, 5, 0).unwrap() },
    surrounding_whitespace = { "  2018-10-24  ", Utc.with_ymd_and_hms(2018, 10, 24, 0, 0, 0).unwrap() },
)]
fn parses_accepted_formats(input: &str, expected: DateTime<Utc>) {
    assert_eq!(parse_timestamp(input).unwrap(), expected);
}

#[parameterized(
    empty = { "" },
    words = { "last tuesday" },
    bad_month = { "Foo 5, 2021" },
    bad_day = { "2021-02-30" },
)]
fn rejects_unparseable(input: &str) {
    let err = parse_timestamp(input).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { .. }));
}

#[test]
fn parse_date_ignores_time_formats() {
    assert!(parse_date("2018-10-24T09:30:00Z").is_none());
    assert_eq!(
        parse_date("Jan 5, 2021"),
        Some(Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap())
    );
}
