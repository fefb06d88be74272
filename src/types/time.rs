//! Temporal values carried by constants

use crate::common::constants::MAX_PACKED_YEAR;
use crate::common::error::{PushdownError, PushdownResult};
use crate::encoding_err;
use chrono::{Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which temporal type a [`Time`] value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeKind {
    /// Calendar date, time of day is always midnight
    Date,
    /// Wall clock date and time with no zone attached
    Datetime,
    /// An instant; its wall clock fields are in the session time zone
    Timestamp,
}

/// A point in time with its temporal kind and fractional second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Time {
    datetime: NaiveDateTime,
    kind: TimeKind,
    fsp: u8,
}

impl Time {
    pub fn new(datetime: NaiveDateTime, kind: TimeKind, fsp: u8) -> Self {
        let datetime = match kind {
            TimeKind::Date => datetime.date().and_time(chrono::NaiveTime::MIN),
            _ => datetime,
        };
        Self {
            datetime,
            kind,
            fsp: fsp.min(6),
        }
    }

    /// Build a date value
    pub fn date(year: i32, month: u32, day: u32) -> PushdownResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            PushdownError::InvalidValue(format!("invalid date {}-{}-{}", year, month, day))
        })?;
        Ok(Self::new(date.and_time(chrono::NaiveTime::MIN), TimeKind::Date, 0))
    }

    /// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS[.ffffff]`
    pub fn parse(text: &str, kind: TimeKind, fsp: u8) -> PushdownResult<Self> {
        let text = text.trim();
        let datetime = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map(|d| d.and_time(chrono::NaiveTime::MIN))
            })
            .map_err(|e| PushdownError::InvalidValue(format!("invalid time '{}': {}", text, e)))?;
        Ok(Self::new(datetime, kind, fsp))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn kind(&self) -> TimeKind {
        self.kind
    }

    pub fn fsp(&self) -> u8 {
        self.fsp
    }

    /// Reinterpret the wall clock fields from one zone into another
    ///
    /// A wall clock time skipped by a daylight saving transition in `from` is
    /// an error. One that occurs twice resolves to the earlier instant.
    pub fn convert_time_zone<F: TimeZone, T: TimeZone>(&self, from: &F, to: &T) -> PushdownResult<Self> {
        let instant = match from.from_local_datetime(&self.datetime) {
            LocalResult::Single(instant) => instant,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                return Err(PushdownError::TimeZone(format!(
                    "{} does not exist in the source time zone",
                    self.datetime
                )))
            }
        };
        let converted = instant.with_timezone(to).naive_local();
        Ok(Self { datetime: converted, ..*self })
    }

    /// Pack the time into a single sortable 64-bit integer
    ///
    /// Layout, from the most significant bit: `year * 13 + month` (17 bits),
    /// day (5), hour (5), minute (6), second (6), microsecond (24).
    pub fn to_packed_u64(&self) -> PushdownResult<u64> {
        let dt = &self.datetime;
        let year = dt.year();
        if !(0..=MAX_PACKED_YEAR).contains(&year) {
            return Err(encoding_err!("year {} cannot be packed", year));
        }
        let nanos = dt.nanosecond();
        if nanos >= 1_000_000_000 {
            return Err(encoding_err!("leap second in {} cannot be packed", dt));
        }

        let ymd = ((year as u64 * 13 + dt.month() as u64) << 5) | dt.day() as u64;
        let hms = (dt.hour() as u64) << 12 | (dt.minute() as u64) << 6 | dt.second() as u64;
        let micros = (nanos / 1_000) as u64;
        Ok(((ymd << 17 | hms) << 24) | micros)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TimeKind::Date => write!(f, "{}", self.datetime.format("%Y-%m-%d")),
            _ if self.fsp == 0 => write!(f, "{}", self.datetime.format("%Y-%m-%d %H:%M:%S")),
            _ => write!(f, "{}", self.datetime.format("%Y-%m-%d %H:%M:%S%.6f")),
        }
    }
}
