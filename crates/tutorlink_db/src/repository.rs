//! Repository traits for database access
//!
//! Services are generic over these traits so they can run against the SQL
//! implementation or an in-memory store in tests.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::future::Future;
use tutorlink_common::models::{
    AvailabilitySlot, Booking, NewBooking, SlotId, Subject, SubjectId, TuteeId, TuteeProfile,
    TutorId, TutorProfile, User, UserId,
};

/// Users and their role profiles.
pub trait ProfileRepository {
    fn create_user(
        &self,
        email: &str,
        display_name: &str,
    ) -> impl Future<Output = Result<User, DbError>> + Send;

    /// Registers the tutor role for a user. A second registration is a `UniqueViolation`.
    fn register_tutor(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<TutorProfile, DbError>> + Send;

    fn register_tutee(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<TuteeProfile, DbError>> + Send;

    fn find_tutor_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<TutorProfile>, DbError>> + Send;

    fn find_tutee_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<TuteeProfile>, DbError>> + Send;
}

/// Rows of the `schedule` table.
pub trait SlotRepository {
    fn insert_slot(
        &self,
        tutor_id: TutorId,
        starts_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<AvailabilitySlot, DbError>> + Send;

    fn find_slot(
        &self,
        slot_id: SlotId,
    ) -> impl Future<Output = Result<Option<AvailabilitySlot>, DbError>> + Send;

    /// Ascending by timestamp, ties by id.
    fn list_slots_by_tutor(
        &self,
        tutor_id: TutorId,
    ) -> impl Future<Output = Result<Vec<AvailabilitySlot>, DbError>> + Send;

    /// Replaces the timestamp only while no booking references the slot.
    ///
    /// `None` when nothing was updated, either because the slot is gone or
    /// because it is booked.
    fn update_unbooked_slot_time(
        &self,
        slot_id: SlotId,
        starts_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<AvailabilitySlot>, DbError>> + Send;

    /// Deletes the slot only while no booking references it.
    ///
    /// Returns `false` when nothing was deleted, either because the slot is
    /// gone or because it is booked.
    fn delete_unbooked_slot(
        &self,
        slot_id: SlotId,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;
}

pub trait BookingRepository {
    /// Inserts a booking. A second booking of the same slot is a `UniqueViolation`.
    fn insert_booking(
        &self,
        booking: NewBooking,
    ) -> impl Future<Output = Result<Booking, DbError>> + Send;

    fn find_booking_by_slot(
        &self,
        slot_id: SlotId,
    ) -> impl Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// The subset of `slot_ids` referenced by a booking, in one round trip.
    fn booked_slot_ids(
        &self,
        slot_ids: &[SlotId],
    ) -> impl Future<Output = Result<HashSet<SlotId>, DbError>> + Send;

    fn list_bookings_by_tutee(
        &self,
        tutee_id: TuteeId,
    ) -> impl Future<Output = Result<Vec<Booking>, DbError>> + Send;

    fn list_bookings_by_tutor(
        &self,
        tutor_id: TutorId,
    ) -> impl Future<Output = Result<Vec<Booking>, DbError>> + Send;

    fn count_bookings_for_subject(
        &self,
        subject_id: SubjectId,
    ) -> impl Future<Output = Result<i64, DbError>> + Send;
}

pub trait SubjectRepository {
    fn insert_subject(
        &self,
        tutor_id: TutorId,
        name: &str,
    ) -> impl Future<Output = Result<Subject, DbError>> + Send;

    fn find_subject(
        &self,
        subject_id: SubjectId,
    ) -> impl Future<Output = Result<Option<Subject>, DbError>> + Send;

    /// All subjects, ascending by name.
    fn list_subjects(&self) -> impl Future<Output = Result<Vec<Subject>, DbError>> + Send;

    /// Subjects the tutor owns or is enrolled in, ascending by id.
    fn subjects_for_tutor(
        &self,
        tutor_id: TutorId,
    ) -> impl Future<Output = Result<Vec<Subject>, DbError>> + Send;

    /// A duplicate enrollment is a `UniqueViolation`.
    fn enroll_tutor(
        &self,
        tutor_id: TutorId,
        subject_id: SubjectId,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Owner plus enrolled tutors, distinct, ascending.
    fn tutors_for_subject(
        &self,
        subject_id: SubjectId,
    ) -> impl Future<Output = Result<Vec<TutorId>, DbError>> + Send;

    /// Deletes the subject and its enrollments only while no booking
    /// references it. `false` when the subject is gone or booked.
    fn delete_unbooked_subject(
        &self,
        subject_id: SubjectId,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;
}

/// Everything the scheduling services need from a store.
pub trait SchedulingStore:
    ProfileRepository
    + SlotRepository
    + BookingRepository
    + SubjectRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> SchedulingStore for T where
    T: ProfileRepository
        + SlotRepository
        + BookingRepository
        + SubjectRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
