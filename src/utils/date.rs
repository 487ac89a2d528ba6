//! Post dates.
//!
//! Front matter dates are ISO-8601 strings. They are parsed once into a UTC
//! timestamp so that sorting and year grouping never re-parse strings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A post's publication date, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostDate(DateTime<Utc>);

impl PostDate {
    /// Parse `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DDTHH:MM:SS` (read as UTC).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Some(Self(naive.and_utc()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    /// Calendar year (UTC), used to group listings.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// `YYYY-MM-DD`, as used by sitemap `<lastmod>`.
    pub fn ymd(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Full RFC 3339 timestamp for `datetime` attributes and structured data.
    pub fn rfc3339(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Human form, e.g. "January 15, 2024".
    pub fn long(self) -> String {
        let month = MONTHS[self.0.month0() as usize];
        format!("{month} {}, {}", self.0.day(), self.0.year())
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rfc3339())
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rfc3339())
    }
}

/// Today's date in `YYYY-MM-DD`, for routes without a content date.
pub fn today_ymd() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
