//! Week bucket keys for completed tasks.
//!
//! A [`WeekKey`] is the string `YYYY-Www` derived from a completion
//! timestamp. The week number follows strftime `%W`: Monday is the first day
//! of the week and the days before the first Monday of the year belong to
//! week `00`. The year is always the timestamp's calendar year, so the last
//! days of December land in week `52` or `53` of that year and never roll
//! over into the next one.
//!
//! The scheme is persisted with every task row. Changing it requires
//! rewriting the stored `week` column, otherwise old and new rows stop
//! grouping together.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use donelog::libs::week::WeekKey;
//!
//! let completed = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! assert_eq!(WeekKey::of(&completed).unwrap().as_str(), "2024-W11");
//! ```

use super::error::InvalidWeekKey;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest week number `%W` can produce.
const MAX_WEEK: u32 = 53;
/// Years that fit the four-digit key.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey(String);

impl WeekKey {
    /// Derives the week bucket of a completion timestamp.
    ///
    /// Fails for years that do not fit in four digits, such as the signed
    /// years chrono accepts (`+12345`, `-0001`).
    pub fn of(timestamp: &NaiveDateTime) -> Result<Self, InvalidWeekKey> {
        let date = timestamp.date();
        let (year, week) = (date.year(), week_number(&date));
        if !YEARS.contains(&year) {
            return Err(InvalidWeekKey(format!("{}-W{:02}", year, week)));
        }
        Ok(Self::from_parts(year, week))
    }

    fn from_parts(year: i32, week: u32) -> Self {
        Self(format!("{:04}-W{:02}", year, week))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Every constructor checks the shape, so bytes 0..4 and 6..8 are ASCII digits.
    pub fn year(&self) -> i32 {
        digits(&self.0.as_bytes()[..4]) as i32
    }

    pub fn week(&self) -> u32 {
        digits(&self.0.as_bytes()[6..])
    }

    /// First and last calendar day covered by this week, clamped to its year.
    ///
    /// Returns `None` for buckets that contain no day at all, such as week 00
    /// of a year that starts on a Monday.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let year = self.year();
        let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let dec_last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        let to_first_monday = (7 - jan_first.weekday().num_days_from_monday()) % 7;
        let first_monday = jan_first + Duration::days(i64::from(to_first_monday));

        let week_start = first_monday + Duration::weeks(i64::from(self.week()) - 1);
        let start = week_start.max(jan_first);
        let end = (week_start + Duration::days(6)).min(dec_last);
        (start <= end).then_some((start, end))
    }
}

fn digits(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Week of the year with Monday as the first day, as strftime `%W` counts it.
fn week_number(date: &NaiveDate) -> u32 {
    (date.ordinal0() + 7 - date.weekday().num_days_from_monday()) / 7
}

impl FromStr for WeekKey {
    type Err = InvalidWeekKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidWeekKey(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 8 || &bytes[4..6] != b"-W" {
            return Err(invalid());
        }
        if !bytes[..4].iter().chain(&bytes[6..]).all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let week: u32 = s[6..].parse().map_err(|_| invalid())?;
        if week > MAX_WEEK {
            return Err(invalid());
        }
        Ok(Self::from_parts(year, week))
    }
}

impl TryFrom<String> for WeekKey {
    type Error = InvalidWeekKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.0
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToSql for WeekKey {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for WeekKey {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
