//! Table definitions.
//!
//! Timestamps are TEXT in the canonical `YYYY-MM-DDTHH:MM:SS.mmmZ` form, which
//! sorts chronologically and decodes the same way through every `Any` backend.

use crate::client::{DbBackend, DbClient};
use crate::error::DbError;
use tracing::{debug, info};

// `{pk}` is the auto-increment key column type, `{ref}` the integer type that
// references one. Both decode as i64 on every backend.
const STATEMENTS: [&str; 8] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id {pk},
        email TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tutors (
        tutor_id {pk},
        user_id {ref} NOT NULL UNIQUE REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tutees (
        tutee_id {pk},
        user_id {ref} NOT NULL UNIQUE REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subjects (
        subject_id {pk},
        subject_name TEXT NOT NULL,
        tutor_id {ref} REFERENCES tutors(tutor_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS schedule (
        schedule_id {pk},
        tutor_id {ref} NOT NULL REFERENCES tutors(tutor_id),
        availability_date_time TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_schedule_tutor_time
        ON schedule (tutor_id, availability_date_time)
    "#,
    // UNIQUE(schedule_id) is what keeps two concurrent bookings of one slot apart.
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        booking_id {pk},
        tutor_id {ref} NOT NULL REFERENCES tutors(tutor_id),
        tutee_id {ref} NOT NULL REFERENCES tutees(tutee_id),
        subject_id {ref} NOT NULL REFERENCES subjects(subject_id),
        schedule_id {ref} NOT NULL UNIQUE REFERENCES schedule(schedule_id),
        booking_date_time TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tutor_subjects (
        tutor_id {ref} NOT NULL REFERENCES tutors(tutor_id),
        subject_id {ref} NOT NULL REFERENCES subjects(subject_id),
        UNIQUE (tutor_id, subject_id)
    )
    "#,
];

/// The DDL for `backend`, in execution order.
pub fn schema_statements(backend: DbBackend) -> Vec<String> {
    let (pk, reference) = match backend {
        DbBackend::Sqlite => ("INTEGER PRIMARY KEY AUTOINCREMENT", "INTEGER"),
        DbBackend::Postgres => ("BIGSERIAL PRIMARY KEY", "BIGINT"),
    };
    STATEMENTS
        .iter()
        .map(|statement| statement.replace("{pk}", pk).replace("{ref}", reference))
        .collect()
}

/// Creates every table and index that does not exist yet.
pub async fn init_schema(db_client: &DbClient) -> Result<(), DbError> {
    debug!("Initializing schema for {:?}", db_client.backend());
    for statement in schema_statements(db_client.backend()) {
        db_client.execute(&statement).await?;
    }
    info!("Schema initialized successfully");
    Ok(())
}
