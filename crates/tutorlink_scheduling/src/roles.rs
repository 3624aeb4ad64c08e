//! Maps the acting user to the tutor or tutee profile an operation needs.

use crate::error::SchedulingError;
use tracing::debug;
use tutorlink_common::models::{TuteeProfile, TutorProfile, UserId};
use tutorlink_common::SessionContext;
use tutorlink_db::ProfileRepository;

pub const TUTOR_NOT_FOUND: &str = "Tutor ID not found for this user";
pub const TUTEE_NOT_FOUND: &str = "Tutee ID not found for this user";

/// The signed-in user, or `Authorization` for an anonymous session.
pub fn acting_user(session: &SessionContext) -> Result<UserId, SchedulingError> {
    session
        .user_id()
        .ok_or_else(|| SchedulingError::Authorization("sign in required".to_string()))
}

pub async fn tutor_for<R: ProfileRepository>(
    repo: &R,
    session: &SessionContext,
) -> Result<Option<TutorProfile>, SchedulingError> {
    let user_id = acting_user(session)?;
    let tutor = repo.find_tutor_by_user(user_id).await?;
    debug!("User {} resolves to tutor {:?}", user_id, tutor.map(|t| t.id));
    Ok(tutor)
}

pub async fn tutee_for<R: ProfileRepository>(
    repo: &R,
    session: &SessionContext,
) -> Result<Option<TuteeProfile>, SchedulingError> {
    let user_id = acting_user(session)?;
    let tutee = repo.find_tutee_by_user(user_id).await?;
    debug!("User {} resolves to tutee {:?}", user_id, tutee.map(|t| t.id));
    Ok(tutee)
}

/// The acting tutor; a user without a tutor profile is refused with `Authorization`.
pub async fn require_tutor<R: ProfileRepository>(
    repo: &R,
    session: &SessionContext,
) -> Result<TutorProfile, SchedulingError> {
    tutor_for(repo, session)
        .await?
        .ok_or_else(|| SchedulingError::Authorization(TUTOR_NOT_FOUND.to_string()))
}

pub async fn require_tutee<R: ProfileRepository>(
    repo: &R,
    session: &SessionContext,
) -> Result<TuteeProfile, SchedulingError> {
    tutee_for(repo, session)
        .await?
        .ok_or_else(|| SchedulingError::Authorization(TUTEE_NOT_FOUND.to_string()))
}
