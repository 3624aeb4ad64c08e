// --- File: crates/tutorlink_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP error mapping
pub mod logging; // Logging utilities
pub mod models; // Shared domain records
pub mod session; // Acting user context
pub mod timestamp; // Canonical UTC timestamps

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod logging_test;
#[cfg(test)]
mod session_test;

// Re-export error types and utilities for easier access
pub use error::{
    authentication_error, authorization_error, conflict, not_found, transport_error,
    validation_error, HttpStatusCode, TutorlinkError,
};

pub use http::{handle_json_result, IntoHttpResponse};

pub use logging::{init, init_from_config, init_with_level, log_error, log_result};

pub use session::{SessionContext, USER_ID_HEADER};
