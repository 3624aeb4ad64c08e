// --- File: crates/tutorlink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Tutorlink crates.
///
/// Each crate keeps its own error enum and implements `From<SpecificError>`
/// for `TutorlinkError` so handlers can return one type.
#[derive(Error, Debug)]
pub enum TutorlinkError {
    /// Malformed or missing input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No usable session was presented
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The acting user lacks the role or ownership required
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The operation collides with existing state (e.g. slot already booked)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// The store could not be reached or failed to answer
    #[error("Transport error: {0}")]
    TransportError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for TutorlinkError {
    fn status_code(&self) -> u16 {
        match self {
            TutorlinkError::ValidationError(_) => 400,
            TutorlinkError::AuthenticationError(_) => 401,
            TutorlinkError::AuthorizationError(_) => 403,
            TutorlinkError::NotFoundError(_) => 404,
            TutorlinkError::ConflictError(_) => 409,
            TutorlinkError::TransportError(_) => 502,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::ValidationError(message.to_string())
}

pub fn authentication_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::AuthenticationError(message.to_string())
}

pub fn authorization_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::AuthorizationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::ConflictError(message.to_string())
}

pub fn transport_error<T: fmt::Display>(message: T) -> TutorlinkError {
    TutorlinkError::TransportError(message.to_string())
}
