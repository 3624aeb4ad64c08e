// --- File: crates/tutorlink_common/src/models.rs ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identity-provider user, the subject of a session.
    UserId
);
id_type!(TutorId);
id_type!(TuteeId);
id_type!(SubjectId);
id_type!(
    /// Row id in the `schedule` table.
    SlotId
);
id_type!(BookingId);

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
}

/// Role record linking a user to the tutor side of the marketplace.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorProfile {
    pub id: TutorId,
    pub user_id: UserId,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuteeProfile {
    pub id: TuteeId,
    pub user_id: UserId,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    #[cfg_attr(feature = "openapi", schema(example = "Calculus"))]
    pub name: String,
    /// Tutor who created the subject. Legacy rows may have none.
    pub tutor_id: Option<TutorId>,
}

/// A bookable instant offered by one tutor.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: SlotId,
    pub tutor_id: TutorId,
    #[serde(with = "crate::timestamp::serde_utc")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12-10T02:00:00.000Z"))]
    pub starts_at: DateTime<Utc>,
}

/// Derived, never stored: a slot is booked iff a booking references it.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
}

impl SlotStatus {
    pub fn from_booked(booked: bool) -> Self {
        if booked {
            SlotStatus::Booked
        } else {
            SlotStatus::Available
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Booked => write!(f, "booked"),
        }
    }
}

/// A slot together with its derived status.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: SlotId,
    pub tutor_id: TutorId,
    #[serde(with = "crate::timestamp::serde_utc")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12-10T02:00:00.000Z"))]
    pub starts_at: DateTime<Utc>,
    pub status: SlotStatus,
}

impl SlotView {
    pub fn new(slot: AvailabilitySlot, status: SlotStatus) -> Self {
        Self {
            id: slot.id,
            tutor_id: slot.tutor_id,
            starts_at: slot.starts_at,
            status,
        }
    }
}

/// Booking as inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub tutor_id: TutorId,
    pub tutee_id: TuteeId,
    pub subject_id: SubjectId,
    pub slot_id: SlotId,
    /// Copied from the slot at booking time.
    pub booked_for: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub tutor_id: TutorId,
    pub tutee_id: TuteeId,
    pub subject_id: SubjectId,
    pub slot_id: SlotId,
    #[serde(with = "crate::timestamp::serde_utc")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12-10T02:00:00.000Z"))]
    pub booked_for: DateTime<Utc>,
    #[serde(with = "crate::timestamp::serde_utc")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub created_at: DateTime<Utc>,
}
