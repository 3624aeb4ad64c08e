use super::{get_id, get_timestamp, SqlRepository};
use crate::error::DbError;
use crate::repository::SlotRepository;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use tracing::{debug, info};
use tutorlink_common::models::{AvailabilitySlot, SlotId, TutorId};
use tutorlink_common::timestamp::format_utc;

fn slot_from_row(row: &AnyRow) -> Result<AvailabilitySlot, DbError> {
    Ok(AvailabilitySlot {
        id: SlotId(get_id(row, "schedule_id")?),
        tutor_id: TutorId(get_id(row, "tutor_id")?),
        starts_at: get_timestamp(row, "availability_date_time")?,
    })
}

impl SlotRepository for SqlRepository {
    async fn insert_slot(
        &self,
        tutor_id: TutorId,
        starts_at: DateTime<Utc>,
    ) -> Result<AvailabilitySlot, DbError> {
        debug!("Inserting slot for tutor {} at {}", tutor_id, starts_at);

        let query = r#"
            INSERT INTO schedule (tutor_id, availability_date_time)
            VALUES ($1, $2)
            RETURNING schedule_id, tutor_id, availability_date_time
        "#;

        let row = sqlx::query(query)
            .bind(tutor_id.0)
            .bind(format_utc(&starts_at))
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to insert slot", e))?;

        let slot = slot_from_row(&row)?;
        info!("Slot {} created for tutor {}", slot.id, tutor_id);
        Ok(slot)
    }

    async fn find_slot(&self, slot_id: SlotId) -> Result<Option<AvailabilitySlot>, DbError> {
        let query = r#"
            SELECT schedule_id, tutor_id, availability_date_time
            FROM schedule
            WHERE schedule_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(slot_id.0)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to find slot", e))?;

        row.as_ref().map(slot_from_row).transpose()
    }

    async fn list_slots_by_tutor(&self, tutor_id: TutorId) -> Result<Vec<AvailabilitySlot>, DbError> {
        debug!("Listing slots for tutor {}", tutor_id);

        let query = r#"
            SELECT schedule_id, tutor_id, availability_date_time
            FROM schedule
            WHERE tutor_id = $1
            ORDER BY availability_date_time ASC, schedule_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(tutor_id.0)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to list slots", e))?;

        rows.iter().map(slot_from_row).collect()
    }

    async fn update_unbooked_slot_time(
        &self,
        slot_id: SlotId,
        starts_at: DateTime<Utc>,
    ) -> Result<Option<AvailabilitySlot>, DbError> {
        debug!("Moving slot {} to {}", slot_id, starts_at);

        let query = r#"
            UPDATE schedule
            SET availability_date_time = $1
            WHERE schedule_id = $2
              AND NOT EXISTS (SELECT 1 FROM bookings WHERE bookings.schedule_id = $3)
            RETURNING schedule_id, tutor_id, availability_date_time
        "#;

        let row = sqlx::query(query)
            .bind(format_utc(&starts_at))
            .bind(slot_id.0)
            .bind(slot_id.0)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to update slot", e))?;

        row.as_ref().map(slot_from_row).transpose()
    }

    async fn delete_unbooked_slot(&self, slot_id: SlotId) -> Result<bool, DbError> {
        debug!("Deleting slot {}", slot_id);

        let query = r#"
            DELETE FROM schedule
            WHERE schedule_id = $1
              AND NOT EXISTS (SELECT 1 FROM bookings WHERE bookings.schedule_id = $2)
        "#;

        let result = sqlx::query(query)
            .bind(slot_id.0)
            .bind(slot_id.0)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::from_query("Failed to delete slot", e))?;

        Ok(result.rows_affected() > 0)
    }
}
