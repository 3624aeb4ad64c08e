// --- File: crates/tutorlink_scheduling/src/api.rs ---
//! Request and response bodies of the HTTP API.

use crate::time::{parse_calendar_date, parse_clock_time, ClientZone, TimeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tutorlink_common::models::{Booking, SlotId, SlotStatus, SlotView, Subject, SubjectId, TutorId};

/// A wall-clock date and time as entered by the tutor.
///
/// `time_zone` (IANA name) takes precedence over `utc_offset_minutes`
/// (minutes east of UTC); with neither, the configured default zone applies.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotTimeRequest {
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2024-12-10"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub time: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Asia/Singapore"))]
    pub time_zone: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = 480))]
    pub utc_offset_minutes: Option<i32>,
}

impl SlotTimeRequest {
    pub fn to_utc(&self, default_zone: &str) -> Result<DateTime<Utc>, TimeError> {
        let zone = ClientZone::resolve(
            self.time_zone.as_deref(),
            self.utc_offset_minutes,
            default_zone,
        )?;
        let date = parse_calendar_date(&self.date)?;
        let time = parse_clock_time(&self.time)?;
        zone.combine(date, time)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookSlotRequest {
    pub slot_id: SlotId,
    /// Defaults to the tutor's first subject.
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateSubjectRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Calculus"))]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    pub slots: Vec<SlotView>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotStatusResponse {
    pub slot_id: SlotId,
    pub status: SlotStatus,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubjectsResponse {
    pub subjects: Vec<Subject>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubjectTutorsResponse {
    pub subject_id: SubjectId,
    pub tutor_ids: Vec<TutorId>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
}
