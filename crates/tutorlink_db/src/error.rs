//! Error types for the database client

use thiserror::Error;
use tracing::error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// The pool could not hand out a connection in time
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A UNIQUE constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A stored value could not be decoded into its domain type
    #[error("Database decode error: {0}")]
    DecodeError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),
}

impl DbError {
    /// Classifies a failed query, logging it under `context`.
    pub fn from_query(context: &str, err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            tracing::debug!("{}: unique constraint violated: {}", context, err);
            return DbError::UniqueViolation(err.to_string());
        }
        error!("{}: {}", context, err);
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::ConnectionError(err.to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation(_))
    }
}

/// True when the store rejected a write because of a UNIQUE constraint.
///
/// The `Any` driver forwards the backend error, whose kind is checked first;
/// the message check covers drivers that do not classify the code.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                || db_err.message().contains("UNIQUE constraint failed")
                || db_err.message().contains("duplicate key value")
        }
        _ => false,
    }
}
