// --- File: crates/tutorlink_scheduling/src/slots.rs ---
use crate::error::SchedulingError;
use crate::roles::{require_tutor, tutor_for, TUTOR_NOT_FOUND};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use tutorlink_common::models::{AvailabilitySlot, SlotId, SlotStatus, SlotView, TutorId};
use tutorlink_common::SessionContext;
use tutorlink_db::SchedulingStore;

/// Availability slots owned by tutors.
///
/// Every call goes to the store; nothing is cached.
#[derive(Debug, Clone)]
pub struct SlotService<R> {
    repo: R,
}

impl<R: SchedulingStore> SlotService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Publishes a new slot for the acting tutor.
    ///
    /// A user without a tutor profile gets `Validation`, an anonymous session
    /// gets `Authorization`.
    pub async fn create(
        &self,
        session: &SessionContext,
        starts_at: DateTime<Utc>,
    ) -> Result<AvailabilitySlot, SchedulingError> {
        let tutor = tutor_for(&self.repo, session)
            .await?
            .ok_or_else(|| SchedulingError::Validation(TUTOR_NOT_FOUND.to_string()))?;

        let slot = self.repo.insert_slot(tutor.id, starts_at).await?;
        info!("Tutor {} published slot {}", tutor.id, slot.id);
        Ok(slot)
    }

    /// The tutor's slots, ascending by time. No slots is an empty list.
    pub async fn list_by_tutor(
        &self,
        tutor_id: TutorId,
    ) -> Result<Vec<AvailabilitySlot>, SchedulingError> {
        Ok(self.repo.list_slots_by_tutor(tutor_id).await?)
    }

    /// Slots with their derived status, using one batched booking lookup.
    pub async fn list_with_status(&self, tutor_id: TutorId) -> Result<Vec<SlotView>, SchedulingError> {
        let slots = self.list_by_tutor(tutor_id).await?;
        let ids: Vec<SlotId> = slots.iter().map(|s| s.id).collect();
        let statuses = self.statuses(&ids).await?;

        Ok(slots
            .into_iter()
            .map(|slot| {
                let status = statuses
                    .get(&slot.id)
                    .copied()
                    .unwrap_or(SlotStatus::Available);
                SlotView::new(slot, status)
            })
            .collect())
    }

    /// The acting tutor's own slots with status.
    pub async fn list_for_session(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<SlotView>, SchedulingError> {
        let tutor = tutor_for(&self.repo, session)
            .await?
            .ok_or_else(|| SchedulingError::Validation(TUTOR_NOT_FOUND.to_string()))?;
        self.list_with_status(tutor.id).await
    }

    /// Moves an unbooked slot to a new instant. Setting the same instant again
    /// is a no-op; moving a booked slot is a `Conflict`, so a booking never
    /// disagrees with its slot's time.
    pub async fn update(
        &self,
        session: &SessionContext,
        slot_id: SlotId,
        starts_at: DateTime<Utc>,
    ) -> Result<AvailabilitySlot, SchedulingError> {
        let slot = self.owned_slot(session, slot_id).await?;
        if slot.starts_at == starts_at {
            debug!("Slot {} already at {}", slot_id, starts_at);
            return Ok(slot);
        }

        if let Some(moved) = self.repo.update_unbooked_slot_time(slot_id, starts_at).await? {
            info!("Slot {} moved to {}", slot_id, starts_at);
            return Ok(moved);
        }

        match self.repo.find_slot(slot_id).await? {
            Some(_) => {
                warn!("Refusing to move booked slot {}", slot_id);
                Err(SchedulingError::Conflict(format!(
                    "slot {} is booked and cannot be moved",
                    slot_id
                )))
            }
            None => Err(slot_not_found(slot_id)),
        }
    }

    /// Removes an unbooked slot. Booked slots are kept and reported as `Conflict`.
    pub async fn delete(&self, session: &SessionContext, slot_id: SlotId) -> Result<(), SchedulingError> {
        self.owned_slot(session, slot_id).await?;

        if self.repo.delete_unbooked_slot(slot_id).await? {
            info!("Slot {} deleted", slot_id);
            return Ok(());
        }

        // Nothing deleted: either booked, or removed by a concurrent request.
        match self.repo.find_slot(slot_id).await? {
            Some(_) => {
                warn!("Refusing to delete booked slot {}", slot_id);
                Err(SchedulingError::Conflict(format!(
                    "slot {} is booked and cannot be deleted",
                    slot_id
                )))
            }
            None => Err(slot_not_found(slot_id)),
        }
    }

    /// Slot id to derived status for every requested id, in one store round trip.
    ///
    /// Lookup failures propagate; a slot is never reported available because
    /// the store could not be asked.
    pub async fn statuses(
        &self,
        slot_ids: &[SlotId],
    ) -> Result<HashMap<SlotId, SlotStatus>, SchedulingError> {
        let booked = self.repo.booked_slot_ids(slot_ids).await?;
        Ok(slot_ids
            .iter()
            .map(|id| (*id, SlotStatus::from_booked(booked.contains(id))))
            .collect())
    }

    async fn owned_slot(
        &self,
        session: &SessionContext,
        slot_id: SlotId,
    ) -> Result<AvailabilitySlot, SchedulingError> {
        let slot = self
            .repo
            .find_slot(slot_id)
            .await?
            .ok_or_else(|| slot_not_found(slot_id))?;
        let tutor = require_tutor(&self.repo, session).await?;
        if slot.tutor_id != tutor.id {
            warn!(
                "Tutor {} attempted to modify slot {} owned by tutor {}",
                tutor.id, slot_id, slot.tutor_id
            );
            return Err(SchedulingError::Authorization(format!(
                "slot {} belongs to another tutor",
                slot_id
            )));
        }
        Ok(slot)
    }
}

pub(crate) fn slot_not_found(slot_id: SlotId) -> SchedulingError {
    SchedulingError::NotFound(format!("slot {} does not exist", slot_id))
}
