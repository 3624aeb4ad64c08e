use super::{get_id, get_timestamp, SqlRepository};
use crate::error::DbError;
use crate::repository::BookingRepository;
use chrono::Utc;
use sqlx::any::AnyRow;
use sqlx::Row;
use std::collections::HashSet;
use tracing::{debug, info};
use tutorlink_common::models::{
    Booking, BookingId, NewBooking, SlotId, SubjectId, TuteeId, TutorId,
};
use tutorlink_common::timestamp::format_utc;

const BOOKING_COLUMNS: &str =
    "booking_id, tutor_id, tutee_id, subject_id, schedule_id, booking_date_time, created_at";

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    Ok(Booking {
        id: BookingId(get_id(row, "booking_id")?),
        tutor_id: TutorId(get_id(row, "tutor_id")?),
        tutee_id: TuteeId(get_id(row, "tutee_id")?),
        subject_id: SubjectId(get_id(row, "subject_id")?),
        slot_id: SlotId(get_id(row, "schedule_id")?),
        booked_for: get_timestamp(row, "booking_date_time")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}

/// `$1, $2, ..., $n`
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

impl BookingRepository for SqlRepository {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, DbError> {
        debug!(
            "Inserting booking of slot {} for tutee {}",
            booking.slot_id, booking.tutee_id
        );

        let query = format!(
            r#"
            INSERT INTO bookings (tutor_id, tutee_id, subject_id, schedule_id, booking_date_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(booking.tutor_id.0)
            .bind(booking.tutee_id.0)
            .bind(booking.subject_id.0)
            .bind(booking.slot_id.0)
            .bind(format_utc(&booking.booked_for))
            .bind(format_utc(&Utc::now()))
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to insert booking", e))?;

        let inserted = booking_from_row(&row)?;
        info!("Booking {} created for slot {}", inserted.id, inserted.slot_id);
        Ok(inserted)
    }

    async fn find_booking_by_slot(&self, slot_id: SlotId) -> Result<Option<Booking>, DbError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE schedule_id = $1",
            BOOKING_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(slot_id.0)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to find booking", e))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn booked_slot_ids(&self, slot_ids: &[SlotId]) -> Result<HashSet<SlotId>, DbError> {
        if slot_ids.is_empty() {
            return Ok(HashSet::new());
        }
        debug!("Looking up bookings for {} slots", slot_ids.len());

        let query = format!(
            "SELECT schedule_id FROM bookings WHERE schedule_id IN ({})",
            placeholders(slot_ids.len())
        );

        let mut statement = sqlx::query(&query);
        for slot_id in slot_ids {
            statement = statement.bind(slot_id.0);
        }

        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to look up slot bookings", e))?;

        rows.iter()
            .map(|row| get_id(row, "schedule_id").map(SlotId))
            .collect()
    }

    async fn list_bookings_by_tutee(&self, tutee_id: TuteeId) -> Result<Vec<Booking>, DbError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE tutee_id = $1 ORDER BY booking_date_time ASC, booking_id ASC",
            BOOKING_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(tutee_id.0)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to list tutee bookings", e))?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn list_bookings_by_tutor(&self, tutor_id: TutorId) -> Result<Vec<Booking>, DbError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE tutor_id = $1 ORDER BY booking_date_time ASC, booking_id ASC",
            BOOKING_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(tutor_id.0)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to list tutor bookings", e))?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn count_bookings_for_subject(&self, subject_id: SubjectId) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COUNT(*) AS booking_count FROM bookings WHERE subject_id = $1")
            .bind(subject_id.0)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to count subject bookings", e))?;

        row.try_get::<i64, _>("booking_count")
            .map_err(|e| DbError::DecodeError(e.to_string()))
    }
}
