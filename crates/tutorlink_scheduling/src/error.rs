use crate::time::TimeError;
use thiserror::Error;
use tutorlink_common::{
    authorization_error, conflict, not_found, transport_error, validation_error, TutorlinkError,
};
use tutorlink_db::DbError;

#[derive(Error, Debug)]
pub enum SchedulingError {
    /// Malformed input, or an acting user without the profile the operation needs
    #[error("Validation failed: {0}")]
    Validation(String),
    /// No session, wrong role, or not the owner
    #[error("Not authorized: {0}")]
    Authorization(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Slot already booked, duplicate enrollment, booked slot deletion
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The store failed or did not answer
    #[error("Store unavailable: {0}")]
    Transport(String),
}

impl From<DbError> for SchedulingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(message) => SchedulingError::Conflict(message),
            other => SchedulingError::Transport(other.to_string()),
        }
    }
}

impl From<TimeError> for SchedulingError {
    fn from(err: TimeError) -> Self {
        SchedulingError::Validation(err.to_string())
    }
}

impl From<SchedulingError> for TutorlinkError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Validation(m) => validation_error(m),
            SchedulingError::Authorization(m) => authorization_error(m),
            SchedulingError::NotFound(m) => not_found(m),
            SchedulingError::Conflict(m) => conflict(m),
            SchedulingError::Transport(m) => transport_error(m),
        }
    }
}
