// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Calendar day (UTC) that `now` falls on, as `YYYY-MM-DD`.
pub fn utc_date_key(now: DateTime<Utc>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}

/// Today's UTC date key.
pub fn today_utc() -> String {
    utc_date_key(Utc::now())
}

/// Zero-based day of year for a `YYYY-MM-DD` key, if it parses.
pub fn day_of_year(date_key: &str) -> Option<u32> {
    NaiveDate::parse_from_str(date_key, "%Y-%m-%d")
        .ok()
        .map(|d| d.ordinal0())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_key_truncates_to_utc_midnight() {
        let late = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(utc_date_key(late), "2026-03-09");

        let early = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(utc_date_key(early), "2026-03-10");
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year("2026-01-01"), Some(0));
        assert_eq!(day_of_year("2026-02-01"), Some(31));
        assert_eq!(day_of_year("not-a-date"), None);
    }
}
