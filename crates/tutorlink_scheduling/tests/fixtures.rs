//! Test fixtures for scheduling integration tests
//!
//! Factory functions for an in-memory store and seeded profiles.

#![allow(dead_code)]

use std::sync::Arc;
use tutorlink_common::models::{TuteeProfile, TutorProfile};
use tutorlink_common::SessionContext;
use tutorlink_config::{AppConfig, DatabaseConfig, SchedulingConfig};
use tutorlink_db::{init_schema, DbClient, ProfileRepository, SqlRepository};

pub const MEMORY_URL: &str = "sqlite::memory:";

/// Creates an AppConfig pointing at an in-memory database
pub fn create_test_config(default_time_zone: &str) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        database: Some(DatabaseConfig {
            url: MEMORY_URL.to_string(),
            max_connections: None,
        }),
        scheduling: SchedulingConfig {
            default_time_zone: default_time_zone.to_string(),
        },
        ..AppConfig::default()
    })
}

/// A connected client with the schema in place
pub async fn create_db_client(config: &AppConfig) -> DbClient {
    let db_client = DbClient::new(config).await.unwrap();
    init_schema(&db_client).await.unwrap();
    db_client
}

pub async fn seed_tutor(repo: &SqlRepository, email: &str) -> (SessionContext, TutorProfile) {
    let user = repo.create_user(email, "Tutor").await.unwrap();
    let tutor = repo.register_tutor(user.id).await.unwrap();
    (SessionContext::for_user(user.id), tutor)
}

pub async fn seed_tutee(repo: &SqlRepository, email: &str) -> (SessionContext, TuteeProfile) {
    let user = repo.create_user(email, "Tutee").await.unwrap();
    let tutee = repo.register_tutee(user.id).await.unwrap();
    (SessionContext::for_user(user.id), tutee)
}
