//! Local calendar + clock input to UTC instants.
//!
//! The offset applied is the one in force at the composed local datetime, so a
//! slot authored in summer for a winter date gets the winter offset.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use std::str::FromStr;
use thiserror::Error;

pub use tutorlink_common::timestamp::{format_utc, parse_utc};

/// Largest accepted distance from UTC, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    #[error("Unknown time zone '{0}'")]
    UnknownZone(String),
    #[error("UTC offset of {0} minutes is out of range")]
    OffsetOutOfRange(i32),
    #[error("Local time {0} does not exist in the requested zone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Combines a calendar date and a clock time read in `zone` into one UTC instant.
///
/// Ambiguous local times (the repeated hour when clocks go back) resolve to
/// the earlier instant. Local times skipped when clocks go forward are
/// rejected.
pub fn combine<Z: TimeZone>(
    date: NaiveDate,
    time: NaiveTime,
    zone: &Z,
) -> Result<DateTime<Utc>, TimeError> {
    let local = date.and_time(time);
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimeError::NonexistentLocalTime(local)),
    }
}

pub fn parse_calendar_date(text: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::InvalidDate(text.to_string()))
}

pub fn parse_clock_time(text: &str) -> Result<NaiveTime, TimeError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| TimeError::InvalidTime(text.to_string()))
}

/// The zone a client's wall-clock input is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientZone {
    Named(Tz),
    /// Minutes east of UTC, e.g. UTC+8 is `+480`.
    Fixed(FixedOffset),
}

impl ClientZone {
    pub fn named(name: &str) -> Result<Self, TimeError> {
        Tz::from_str(name.trim())
            .map(ClientZone::Named)
            .map_err(|_| TimeError::UnknownZone(name.to_string()))
    }

    pub fn offset_minutes(minutes: i32) -> Result<Self, TimeError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(TimeError::OffsetOutOfRange(minutes));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(ClientZone::Fixed)
            .ok_or(TimeError::OffsetOutOfRange(minutes))
    }

    /// Picks the zone from client input: a zone name wins over an offset,
    /// and `default_zone` applies when neither is given.
    pub fn resolve(
        time_zone: Option<&str>,
        utc_offset_minutes: Option<i32>,
        default_zone: &str,
    ) -> Result<Self, TimeError> {
        match (time_zone.filter(|z| !z.trim().is_empty()), utc_offset_minutes) {
            (Some(name), _) => Self::named(name),
            (None, Some(minutes)) => Self::offset_minutes(minutes),
            (None, None) => Self::named(default_zone),
        }
    }

    pub fn combine(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, TimeError> {
        match self {
            ClientZone::Named(tz) => combine(date, time, tz),
            ClientZone::Fixed(offset) => combine(date, time, offset),
        }
    }

    /// Wall-clock reading of `instant` in this zone.
    pub fn to_local(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            ClientZone::Named(tz) => instant.with_timezone(tz).naive_local(),
            ClientZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}
