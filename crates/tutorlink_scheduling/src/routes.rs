// --- File: crates/tutorlink_scheduling/src/routes.rs ---

use crate::handlers::{
    book_slot_handler, create_slot_handler, create_subject_handler, delete_slot_handler,
    delete_subject_handler, enroll_handler, health_handler, list_subjects_handler,
    my_bookings_handler, my_slots_handler, slot_status_handler, subject_tutors_handler,
    tutor_slots_handler, update_slot_handler, SchedulingState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tutorlink_config::AppConfig;
use tutorlink_db::DbClient;

/// Creates a router containing every scheduling, booking and subject route.
///
/// Paths are relative; the backend nests them under `/api`.
pub fn routes(config: Arc<AppConfig>, db_client: DbClient) -> Router {
    let state = Arc::new(SchedulingState::new(config, db_client));

    Router::new()
        .route("/health", get(health_handler))
        .route("/slots", post(create_slot_handler))
        .route("/slots/mine", get(my_slots_handler))
        .route(
            "/slots/{slot_id}",
            put(update_slot_handler).delete(delete_slot_handler),
        )
        .route("/slots/{slot_id}/status", get(slot_status_handler))
        .route("/tutors/{tutor_id}/slots", get(tutor_slots_handler))
        .route("/bookings", post(book_slot_handler))
        .route("/bookings/mine", get(my_bookings_handler))
        .route(
            "/subjects",
            get(list_subjects_handler).post(create_subject_handler),
        )
        .route("/subjects/{subject_id}", axum::routing::delete(delete_subject_handler))
        .route("/subjects/{subject_id}/enroll", post(enroll_handler))
        .route("/subjects/{subject_id}/tutors", get(subject_tutors_handler))
        .with_state(state)
}
