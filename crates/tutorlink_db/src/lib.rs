//! Relational store for Tutorlink
//!
//! Holds the SQLx connection pool, the schema, and the repository traits with
//! their SQL implementation. The backend is chosen through feature flags
//! (`sqlite` by default, `postgres` optional) and the connection URL.
//!
//! # Example
//!
//! ```rust,no_run
//! use tutorlink_db::{init_schema, DbClient, SqlRepository};
//!
//! async fn setup() -> Result<SqlRepository, tutorlink_db::DbError> {
//!     let db_client = DbClient::from_url("sqlite::memory:").await?;
//!     init_schema(&db_client).await?;
//!     Ok(SqlRepository::new(db_client))
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod repository;
pub mod schema;

pub use client::{DbBackend, DbClient};
pub use error::DbError;
pub use repositories::SqlRepository;
pub use repository::{
    BookingRepository, ProfileRepository, SchedulingStore, SlotRepository, SubjectRepository,
};
pub use schema::{init_schema, schema_statements};
