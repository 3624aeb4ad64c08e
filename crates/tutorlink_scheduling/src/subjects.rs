// --- File: crates/tutorlink_scheduling/src/subjects.rs ---
use crate::error::SchedulingError;
use crate::roles::{require_tutor, tutor_for, TUTOR_NOT_FOUND};
use tracing::{info, warn};
use tutorlink_common::models::{Subject, SubjectId, TutorId};
use tutorlink_common::SessionContext;
use tutorlink_db::{DbError, SchedulingStore};

/// Subject catalogue and tutor enrollment.
#[derive(Debug, Clone)]
pub struct SubjectService<R> {
    repo: R,
}

impl<R: SchedulingStore> SubjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a subject owned by the acting tutor. The name is stored trimmed.
    pub async fn create_subject(
        &self,
        session: &SessionContext,
        name: &str,
    ) -> Result<Subject, SchedulingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SchedulingError::Validation(
                "Subject name is required".to_string(),
            ));
        }
        let tutor = tutor_for(&self.repo, session)
            .await?
            .ok_or_else(|| SchedulingError::Validation(TUTOR_NOT_FOUND.to_string()))?;

        let subject = self.repo.insert_subject(tutor.id, name).await?;
        info!("Tutor {} added subject {} ({})", tutor.id, subject.id, subject.name);
        Ok(subject)
    }

    /// Removes a subject and its enrollments. Only the owner may do so, and
    /// not while bookings reference it.
    pub async fn delete_subject(
        &self,
        session: &SessionContext,
        subject_id: SubjectId,
    ) -> Result<(), SchedulingError> {
        let subject = self.existing(subject_id).await?;
        let tutor = require_tutor(&self.repo, session).await?;
        if subject.tutor_id != Some(tutor.id) {
            warn!("Tutor {} attempted to delete subject {}", tutor.id, subject_id);
            return Err(SchedulingError::Authorization(format!(
                "subject {} belongs to another tutor",
                subject_id
            )));
        }
        if self.repo.count_bookings_for_subject(subject_id).await? > 0 {
            return Err(subject_has_bookings(subject_id));
        }

        if self.repo.delete_unbooked_subject(subject_id).await? {
            info!("Subject {} deleted", subject_id);
            return Ok(());
        }

        // A booking landed after the count, or the subject went away meanwhile.
        match self.repo.find_subject(subject_id).await? {
            Some(_) => Err(subject_has_bookings(subject_id)),
            None => Err(subject_not_found(subject_id)),
        }
    }

    /// Associates the acting tutor with an existing subject, once.
    pub async fn enroll(
        &self,
        session: &SessionContext,
        subject_id: SubjectId,
    ) -> Result<(), SchedulingError> {
        let tutor = require_tutor(&self.repo, session).await?;
        let subject = self.existing(subject_id).await?;
        if subject.tutor_id == Some(tutor.id) {
            return Err(SchedulingError::Conflict(format!(
                "tutor {} already owns subject {}",
                tutor.id, subject_id
            )));
        }

        match self.repo.enroll_tutor(tutor.id, subject_id).await {
            Ok(()) => {
                info!("Tutor {} enrolled in subject {}", tutor.id, subject_id);
                Ok(())
            }
            Err(DbError::UniqueViolation(_)) => Err(SchedulingError::Conflict(format!(
                "tutor {} is already enrolled in subject {}",
                tutor.id, subject_id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// All subjects, ascending by name.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, SchedulingError> {
        Ok(self.repo.list_subjects().await?)
    }

    pub async fn tutors_for_subject(
        &self,
        subject_id: SubjectId,
    ) -> Result<Vec<TutorId>, SchedulingError> {
        self.existing(subject_id).await?;
        Ok(self.repo.tutors_for_subject(subject_id).await?)
    }

    async fn existing(&self, subject_id: SubjectId) -> Result<Subject, SchedulingError> {
        self.repo
            .find_subject(subject_id)
            .await?
            .ok_or_else(|| subject_not_found(subject_id))
    }
}

fn subject_not_found(subject_id: SubjectId) -> SchedulingError {
    SchedulingError::NotFound(format!("subject {} does not exist", subject_id))
}

fn subject_has_bookings(subject_id: SubjectId) -> SchedulingError {
    SchedulingError::Conflict(format!("subject {} has bookings", subject_id))
}
