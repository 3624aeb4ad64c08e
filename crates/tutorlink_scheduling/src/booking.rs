// --- File: crates/tutorlink_scheduling/src/booking.rs ---
use crate::error::SchedulingError;
use crate::roles::{acting_user, require_tutee};
use crate::slots::slot_not_found;
use tracing::{debug, info, warn};
use tutorlink_common::models::{
    AvailabilitySlot, Booking, NewBooking, SlotId, SlotStatus, Subject, SubjectId,
};
use tutorlink_common::SessionContext;
use tutorlink_db::{DbError, SchedulingStore};

/// Turns an available slot into a booking for the acting tutee.
#[derive(Debug, Clone)]
pub struct BookingService<R> {
    repo: R,
}

impl<R: SchedulingStore> BookingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Books `slot_id` for the acting tutee.
    ///
    /// The subject is `subject_id` when given, which must be one the slot's
    /// tutor offers; otherwise the tutor's first subject. The booking copies
    /// the slot's timestamp. The single insert is the only write, so any
    /// failure leaves nothing behind.
    ///
    /// # Errors
    ///
    /// * `Authorization` - anonymous session or no tutee profile
    /// * `NotFound` - unknown slot, or no matching subject for the tutor
    /// * `Conflict` - the slot already has a booking, including one that
    ///   won a concurrent race
    /// * `Transport` - the store failed
    pub async fn book(
        &self,
        session: &SessionContext,
        slot_id: SlotId,
        subject_id: Option<SubjectId>,
    ) -> Result<Booking, SchedulingError> {
        let tutee = require_tutee(&self.repo, session).await?;

        let slot = self
            .repo
            .find_slot(slot_id)
            .await?
            .ok_or_else(|| slot_not_found(slot_id))?;
        let subject = self.pick_subject(&slot, subject_id).await?;

        if self.repo.find_booking_by_slot(slot_id).await?.is_some() {
            debug!("Slot {} is already booked", slot_id);
            return Err(already_booked(slot_id));
        }

        let new_booking = NewBooking {
            tutor_id: slot.tutor_id,
            tutee_id: tutee.id,
            subject_id: subject.id,
            slot_id,
            booked_for: slot.starts_at,
        };

        match self.repo.insert_booking(new_booking).await {
            Ok(booking) => {
                info!(
                    "Tutee {} booked slot {} with tutor {} for subject {}",
                    tutee.id, slot_id, slot.tutor_id, subject.id
                );
                Ok(booking)
            }
            Err(DbError::UniqueViolation(_)) => {
                warn!("Lost booking race for slot {}", slot_id);
                Err(already_booked(slot_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Derived status of one slot.
    pub async fn status(&self, slot_id: SlotId) -> Result<SlotStatus, SchedulingError> {
        if self.repo.find_slot(slot_id).await?.is_none() {
            return Err(slot_not_found(slot_id));
        }
        let booked = self.repo.find_booking_by_slot(slot_id).await?.is_some();
        Ok(SlotStatus::from_booked(booked))
    }

    /// Bookings of the acting user: as tutee if they have a tutee profile,
    /// otherwise as tutor.
    pub async fn bookings_for_session(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<Booking>, SchedulingError> {
        let user_id = acting_user(session)?;
        if let Some(tutee) = self.repo.find_tutee_by_user(user_id).await? {
            return Ok(self.repo.list_bookings_by_tutee(tutee.id).await?);
        }
        if let Some(tutor) = self.repo.find_tutor_by_user(user_id).await? {
            return Ok(self.repo.list_bookings_by_tutor(tutor.id).await?);
        }
        Err(SchedulingError::Authorization(
            "user has neither a tutee nor a tutor profile".to_string(),
        ))
    }

    async fn pick_subject(
        &self,
        slot: &AvailabilitySlot,
        requested: Option<SubjectId>,
    ) -> Result<Subject, SchedulingError> {
        let offered = self.repo.subjects_for_tutor(slot.tutor_id).await?;
        let chosen = match requested {
            Some(id) => offered.into_iter().find(|s| s.id == id),
            None => offered.into_iter().next(),
        };
        chosen.ok_or_else(|| match requested {
            Some(id) => SchedulingError::NotFound(format!(
                "tutor {} does not offer subject {}",
                slot.tutor_id, id
            )),
            None => SchedulingError::NotFound(format!(
                "tutor {} has no subjects to book",
                slot.tutor_id
            )),
        })
    }
}

fn already_booked(slot_id: SlotId) -> SchedulingError {
    SchedulingError::Conflict(format!("slot {} already booked", slot_id))
}
