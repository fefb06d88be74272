//! Per-session settings read by the converter

use crate::common::error::{PushdownError, PushdownResult};
use crate::types::{Time, Value};
use chrono::{FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time zone that timestamp wall clock values are written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTimeZone {
    /// Constant offset from UTC, written `+08:00`
    Fixed(FixedOffset),
    /// IANA zone such as `America/New_York`, with its daylight saving rules
    Named(Tz),
}

impl SessionTimeZone {
    pub fn utc() -> Self {
        SessionTimeZone::Fixed(Utc.fix())
    }

    /// Parse `UTC`, `Z`, a `+HH:MM` style offset or an IANA zone name
    pub fn parse(text: &str) -> PushdownResult<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("utc") || text.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        if let Ok(offset) = text.parse::<FixedOffset>() {
            return Ok(SessionTimeZone::Fixed(offset));
        }
        text.parse::<Tz>()
            .map(SessionTimeZone::Named)
            .map_err(|e| PushdownError::Config(format!("invalid time zone '{}': {}", text, e)))
    }

    pub fn is_utc(&self) -> bool {
        match self {
            SessionTimeZone::Fixed(offset) => offset.local_minus_utc() == 0,
            SessionTimeZone::Named(tz) => matches!(tz.name(), "UTC" | "Etc/UTC"),
        }
    }

    /// Move a wall clock time written in this zone to UTC
    pub fn to_utc(&self, time: &Time) -> PushdownResult<Time> {
        match self {
            SessionTimeZone::Fixed(offset) => time.convert_time_zone(offset, &Utc),
            SessionTimeZone::Named(tz) => time.convert_time_zone(tz, &Utc),
        }
    }
}

impl Default for SessionTimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl From<FixedOffset> for SessionTimeZone {
    fn from(offset: FixedOffset) -> Self {
        SessionTimeZone::Fixed(offset)
    }
}

impl From<Tz> for SessionTimeZone {
    fn from(tz: Tz) -> Self {
        SessionTimeZone::Named(tz)
    }
}

impl fmt::Display for SessionTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionTimeZone::Fixed(offset) => write!(f, "{}", offset),
            SessionTimeZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// Session state that influences how values are encoded
///
/// Deserializes from JSON such as `{"time_zone": "Asia/Shanghai"}` or
/// `{"time_zone": "+08:00"}`. Parameter values are bound per statement and
/// are not part of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(with = "time_zone_text", default)]
    time_zone: SessionTimeZone,
    #[serde(skip)]
    param_values: Vec<Value>,
}

impl SessionContext {
    pub fn new(time_zone: impl Into<SessionTimeZone>) -> Self {
        Self {
            time_zone: time_zone.into(),
            param_values: Vec::new(),
        }
    }

    /// Session in a zone `seconds` east of UTC
    pub fn with_offset_seconds(seconds: i32) -> PushdownResult<Self> {
        let offset = FixedOffset::east_opt(seconds).ok_or_else(|| {
            PushdownError::InvalidArgument(format!("time zone offset {}s is out of range", seconds))
        })?;
        Ok(Self::new(offset))
    }

    /// Session in the zone named by `text`, see [`SessionTimeZone::parse`]
    pub fn with_time_zone(text: &str) -> PushdownResult<Self> {
        Ok(Self::new(parse_time_zone(text)?))
    }

    /// Load session settings from JSON
    pub fn from_json(text: &str) -> PushdownResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_param_values(mut self, values: Vec<Value>) -> Self {
        self.param_values = values;
        self
    }

    pub fn time_zone(&self) -> SessionTimeZone {
        self.time_zone
    }

    pub fn is_utc(&self) -> bool {
        self.time_zone.is_utc()
    }

    pub fn param_value(&self, index: usize) -> Option<&Value> {
        self.param_values.get(index)
    }

    pub fn param_count(&self) -> usize {
        self.param_values.len()
    }
}

pub fn parse_time_zone(text: &str) -> PushdownResult<SessionTimeZone> {
    SessionTimeZone::parse(text)
}

mod time_zone_text {
    use super::SessionTimeZone;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(zone: &SessionTimeZone, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(zone)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SessionTimeZone, D::Error> {
        let text = String::deserialize(deserializer)?;
        SessionTimeZone::parse(&text).map_err(serde::de::Error::custom)
    }
}
