//! In-memory store for service tests.

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex};
use tutorlink_common::models::*;
use tutorlink_common::SessionContext;
use tutorlink_db::{
    BookingRepository, DbError, ProfileRepository, SlotRepository, SubjectRepository,
};

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    users: Vec<User>,
    tutors: Vec<TutorProfile>,
    tutees: Vec<TuteeProfile>,
    slots: Vec<AvailabilitySlot>,
    bookings: Vec<Booking>,
    subjects: Vec<Subject>,
    enrollments: BTreeSet<(TutorId, SubjectId)>,
    /// Pretend the "already booked?" reads ran before a concurrent insert landed.
    stale_booking_reads: bool,
    /// Make booking lookups fail as if the store were unreachable.
    fail_booking_lookups: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mock store with the same uniqueness rules as the SQL schema.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stale_booking_reads(&self, stale: bool) {
        self.with_state(|s| s.stale_booking_reads = stale);
    }

    pub fn set_fail_booking_lookups(&self, fail: bool) {
        self.with_state(|s| s.fail_booking_lookups = fail);
    }

    pub fn booking_count(&self) -> usize {
        self.with_state(|s| s.bookings.len())
    }

    /// A user with a tutor profile, and a session acting as that user.
    pub async fn seed_tutor(&self, email: &str) -> (SessionContext, TutorProfile) {
        let user = self.create_user(email, "Tutor").await.unwrap();
        let tutor = self.register_tutor(user.id).await.unwrap();
        (SessionContext::for_user(user.id), tutor)
    }

    pub async fn seed_tutee(&self, email: &str) -> (SessionContext, TuteeProfile) {
        let user = self.create_user(email, "Tutee").await.unwrap();
        let tutee = self.register_tutee(user.id).await.unwrap();
        (SessionContext::for_user(user.id), tutee)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

fn unique(message: &str) -> DbError {
    DbError::UniqueViolation(format!("UNIQUE constraint failed: {}", message))
}

impl ProfileRepository for MemoryStore {
    async fn create_user(&self, email: &str, display_name: &str) -> Result<User, DbError> {
        self.with_state(|s| {
            if s.users.iter().any(|u| u.email == email) {
                return Err(unique("users.email"));
            }
            let user = User {
                id: UserId(s.next_id()),
                email: email.to_string(),
                display_name: display_name.to_string(),
            };
            s.users.push(user.clone());
            Ok(user)
        })
    }

    async fn register_tutor(&self, user_id: UserId) -> Result<TutorProfile, DbError> {
        self.with_state(|s| {
            if s.tutors.iter().any(|t| t.user_id == user_id) {
                return Err(unique("tutors.user_id"));
            }
            let tutor = TutorProfile {
                id: TutorId(s.next_id()),
                user_id,
            };
            s.tutors.push(tutor);
            Ok(tutor)
        })
    }

    async fn register_tutee(&self, user_id: UserId) -> Result<TuteeProfile, DbError> {
        self.with_state(|s| {
            if s.tutees.iter().any(|t| t.user_id == user_id) {
                return Err(unique("tutees.user_id"));
            }
            let tutee = TuteeProfile {
                id: TuteeId(s.next_id()),
                user_id,
            };
            s.tutees.push(tutee);
            Ok(tutee)
        })
    }

    async fn find_tutor_by_user(&self, user_id: UserId) -> Result<Option<TutorProfile>, DbError> {
        Ok(self.with_state(|s| s.tutors.iter().find(|t| t.user_id == user_id).copied()))
    }

    async fn find_tutee_by_user(&self, user_id: UserId) -> Result<Option<TuteeProfile>, DbError> {
        Ok(self.with_state(|s| s.tutees.iter().find(|t| t.user_id == user_id).copied()))
    }
}

impl SlotRepository for MemoryStore {
    async fn insert_slot(
        &self,
        tutor_id: TutorId,
        starts_at: DateTime<Utc>,
    ) -> Result<AvailabilitySlot, DbError> {
        Ok(self.with_state(|s| {
            let slot = AvailabilitySlot {
                id: SlotId(s.next_id()),
                tutor_id,
                starts_at,
            };
            s.slots.push(slot);
            slot
        }))
    }

    async fn find_slot(&self, slot_id: SlotId) -> Result<Option<AvailabilitySlot>, DbError> {
        Ok(self.with_state(|s| s.slots.iter().find(|slot| slot.id == slot_id).copied()))
    }

    async fn list_slots_by_tutor(&self, tutor_id: TutorId) -> Result<Vec<AvailabilitySlot>, DbError> {
        Ok(self.with_state(|s| {
            let mut slots: Vec<_> = s
                .slots
                .iter()
                .filter(|slot| slot.tutor_id == tutor_id)
                .copied()
                .collect();
            slots.sort_by_key(|slot| (slot.starts_at, slot.id));
            slots
        }))
    }

    async fn update_unbooked_slot_time(
        &self,
        slot_id: SlotId,
        starts_at: DateTime<Utc>,
    ) -> Result<Option<AvailabilitySlot>, DbError> {
        Ok(self.with_state(|s| {
            if s.bookings.iter().any(|b| b.slot_id == slot_id) {
                return None;
            }
            s.slots.iter_mut().find(|slot| slot.id == slot_id).map(|slot| {
                slot.starts_at = starts_at;
                *slot
            })
        }))
    }

    async fn delete_unbooked_slot(&self, slot_id: SlotId) -> Result<bool, DbError> {
        Ok(self.with_state(|s| {
            if s.bookings.iter().any(|b| b.slot_id == slot_id) {
                return false;
            }
            let before = s.slots.len();
            s.slots.retain(|slot| slot.id != slot_id);
            s.slots.len() < before
        }))
    }
}

impl BookingRepository for MemoryStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, DbError> {
        self.with_state(|s| {
            if s.bookings.iter().any(|b| b.slot_id == booking.slot_id) {
                return Err(unique("bookings.schedule_id"));
            }
            let stored = Booking {
                id: BookingId(s.next_id()),
                tutor_id: booking.tutor_id,
                tutee_id: booking.tutee_id,
                subject_id: booking.subject_id,
                slot_id: booking.slot_id,
                booked_for: booking.booked_for,
                created_at: Utc::now(),
            };
            s.bookings.push(stored);
            Ok(stored)
        })
    }

    async fn find_booking_by_slot(&self, slot_id: SlotId) -> Result<Option<Booking>, DbError> {
        self.with_state(|s| {
            if s.fail_booking_lookups {
                return Err(DbError::ConnectionError("pool timed out".to_string()));
            }
            if s.stale_booking_reads {
                return Ok(None);
            }
            Ok(s.bookings.iter().find(|b| b.slot_id == slot_id).copied())
        })
    }

    async fn booked_slot_ids(&self, slot_ids: &[SlotId]) -> Result<HashSet<SlotId>, DbError> {
        self.with_state(|s| {
            if s.fail_booking_lookups {
                return Err(DbError::ConnectionError("pool timed out".to_string()));
            }
            Ok(s.bookings
                .iter()
                .map(|b| b.slot_id)
                .filter(|id| slot_ids.contains(id))
                .collect())
        })
    }

    async fn list_bookings_by_tutee(&self, tutee_id: TuteeId) -> Result<Vec<Booking>, DbError> {
        Ok(self.with_state(|s| {
            s.bookings
                .iter()
                .filter(|b| b.tutee_id == tutee_id)
                .copied()
                .collect()
        }))
    }

    async fn list_bookings_by_tutor(&self, tutor_id: TutorId) -> Result<Vec<Booking>, DbError> {
        Ok(self.with_state(|s| {
            s.bookings
                .iter()
                .filter(|b| b.tutor_id == tutor_id)
                .copied()
                .collect()
        }))
    }

    async fn count_bookings_for_subject(&self, subject_id: SubjectId) -> Result<i64, DbError> {
        Ok(self.with_state(|s| {
            if s.stale_booking_reads {
                return 0;
            }
            s.bookings
                .iter()
                .filter(|b| b.subject_id == subject_id)
                .count() as i64
        }))
    }
}

impl SubjectRepository for MemoryStore {
    async fn insert_subject(&self, tutor_id: TutorId, name: &str) -> Result<Subject, DbError> {
        Ok(self.with_state(|s| {
            let subject = Subject {
                id: SubjectId(s.next_id()),
                name: name.to_string(),
                tutor_id: Some(tutor_id),
            };
            s.subjects.push(subject.clone());
            subject
        }))
    }

    async fn find_subject(&self, subject_id: SubjectId) -> Result<Option<Subject>, DbError> {
        Ok(self.with_state(|s| s.subjects.iter().find(|x| x.id == subject_id).cloned()))
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, DbError> {
        Ok(self.with_state(|s| {
            let mut subjects = s.subjects.clone();
            subjects.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            subjects
        }))
    }

    async fn subjects_for_tutor(&self, tutor_id: TutorId) -> Result<Vec<Subject>, DbError> {
        Ok(self.with_state(|s| {
            let mut subjects: Vec<_> = s
                .subjects
                .iter()
                .filter(|x| {
                    x.tutor_id == Some(tutor_id) || s.enrollments.contains(&(tutor_id, x.id))
                })
                .cloned()
                .collect();
            subjects.sort_by_key(|x| x.id);
            subjects
        }))
    }

    async fn enroll_tutor(&self, tutor_id: TutorId, subject_id: SubjectId) -> Result<(), DbError> {
        self.with_state(|s| {
            if !s.enrollments.insert((tutor_id, subject_id)) {
                return Err(unique("tutor_subjects.tutor_id, tutor_subjects.subject_id"));
            }
            Ok(())
        })
    }

    async fn tutors_for_subject(&self, subject_id: SubjectId) -> Result<Vec<TutorId>, DbError> {
        Ok(self.with_state(|s| {
            let mut tutors: BTreeSet<TutorId> = s
                .enrollments
                .iter()
                .filter(|(_, subject)| *subject == subject_id)
                .map(|(tutor, _)| *tutor)
                .collect();
            if let Some(owner) = s
                .subjects
                .iter()
                .find(|x| x.id == subject_id)
                .and_then(|x| x.tutor_id)
            {
                tutors.insert(owner);
            }
            tutors.into_iter().collect()
        }))
    }

    async fn delete_unbooked_subject(&self, subject_id: SubjectId) -> Result<bool, DbError> {
        Ok(self.with_state(|s| {
            if s.bookings.iter().any(|b| b.subject_id == subject_id) {
                return false;
            }
            s.enrollments.retain(|(_, subject)| *subject != subject_id);
            let before = s.subjects.len();
            s.subjects.retain(|x| x.id != subject_id);
            s.subjects.len() < before
        }))
    }
}
