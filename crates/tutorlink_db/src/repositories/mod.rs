//! SQL implementations of the repository traits
//!
//! One `SqlRepository` implements every trait; each table's queries live in
//! their own module.

mod bookings;
mod profiles;
mod slots;
mod subjects;

use crate::error::DbError;
use crate::DbClient;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tutorlink_common::timestamp::parse_utc;

/// SQL-backed store for profiles, slots, bookings and subjects.
#[derive(Debug, Clone)]
pub struct SqlRepository {
    db_client: DbClient,
}

impl SqlRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }
}

fn get_id(row: &AnyRow, column: &str) -> Result<i64, DbError> {
    row.try_get::<i64, _>(column)
        .map_err(|e| DbError::DecodeError(format!("{}: {}", column, e)))
}

fn get_optional_id(row: &AnyRow, column: &str) -> Result<Option<i64>, DbError> {
    row.try_get::<Option<i64>, _>(column)
        .map_err(|e| DbError::DecodeError(format!("{}: {}", column, e)))
}

fn get_text(row: &AnyRow, column: &str) -> Result<String, DbError> {
    row.try_get::<String, _>(column)
        .map_err(|e| DbError::DecodeError(format!("{}: {}", column, e)))
}

fn get_timestamp(row: &AnyRow, column: &str) -> Result<DateTime<Utc>, DbError> {
    let text = get_text(row, column)?;
    parse_utc(&text).map_err(|e| DbError::DecodeError(format!("{} '{}': {}", column, text, e)))
}
