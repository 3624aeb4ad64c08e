// File: crates/tutorlink_scheduling/src/handlers.rs
use crate::api::{
    BookSlotRequest, BookingsResponse, CreateSubjectRequest, HealthResponse, SlotStatusResponse,
    SlotTimeRequest, SlotsResponse, SubjectTutorsResponse, SubjectsResponse,
};
use crate::booking::BookingService;
use crate::error::SchedulingError;
use crate::slots::SlotService;
use crate::subjects::SubjectService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, info};
use tutorlink_common::models::{AvailabilitySlot, Booking, SlotId, Subject, SubjectId, TutorId};
use tutorlink_common::{handle_json_result, SessionContext, TutorlinkError};
use tutorlink_config::AppConfig;
use tutorlink_db::{DbClient, SqlRepository};

// Shared state for the scheduling routes
#[derive(Clone)]
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub db_client: DbClient,
    pub slots: SlotService<SqlRepository>,
    pub bookings: BookingService<SqlRepository>,
    pub subjects: SubjectService<SqlRepository>,
}

impl SchedulingState {
    pub fn new(config: Arc<AppConfig>, db_client: DbClient) -> Self {
        let repo = SqlRepository::new(db_client.clone());
        Self {
            config,
            db_client,
            slots: SlotService::new(repo.clone()),
            bookings: BookingService::new(repo.clone()),
            subjects: SubjectService::new(repo),
        }
    }

    fn default_time_zone(&self) -> &str {
        &self.config.scheduling.default_time_zone
    }
}

type ApiResult<T> = Result<T, TutorlinkError>;

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store health", body = HealthResponse)
    ),
    tag = "Scheduling"
))]
pub async fn health_handler(State(state): State<Arc<SchedulingState>>) -> Json<HealthResponse> {
    let database = state.db_client.is_healthy().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
    })
}

/// Handler to publish a slot for the acting tutor.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/slots",
    request_body = SlotTimeRequest,
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 201, description = "Slot created", body = AvailabilitySlot),
        (status = 400, description = "Invalid date/time or user is not a tutor"),
        (status = 403, description = "No session")
    ),
    tag = "Scheduling"
))]
pub async fn create_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Json(request): Json<SlotTimeRequest>,
) -> ApiResult<(StatusCode, Json<AvailabilitySlot>)> {
    let starts_at = request
        .to_utc(state.default_time_zone())
        .map_err(SchedulingError::from)?;
    debug!(
        "Creating slot at {} from local {} {}",
        starts_at, request.date, request.time
    );
    let slot = state.slots.create(&session, starts_at).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/slots/mine",
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 200, description = "The acting tutor's slots with status", body = SlotsResponse),
        (status = 400, description = "User is not a tutor")
    ),
    tag = "Scheduling"
))]
pub async fn my_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
) -> ApiResult<Json<SlotsResponse>> {
    let result = state.slots.list_for_session(&session).await;
    handle_json_result(result.map(|slots| SlotsResponse { slots }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/slots/{slot_id}",
    request_body = SlotTimeRequest,
    params(
        ("slot_id" = i64, Path, description = "Slot id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 200, description = "Slot moved", body = AvailabilitySlot),
        (status = 403, description = "Not the owning tutor"),
        (status = 404, description = "No such slot"),
        (status = 409, description = "Slot is booked")
    ),
    tag = "Scheduling"
))]
pub async fn update_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Path(slot_id): Path<SlotId>,
    Json(request): Json<SlotTimeRequest>,
) -> ApiResult<Json<AvailabilitySlot>> {
    let starts_at = request
        .to_utc(state.default_time_zone())
        .map_err(SchedulingError::from)?;
    handle_json_result(state.slots.update(&session, slot_id, starts_at).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/slots/{slot_id}",
    params(
        ("slot_id" = i64, Path, description = "Slot id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 403, description = "Not the owning tutor"),
        (status = 404, description = "No such slot"),
        (status = 409, description = "Slot is booked")
    ),
    tag = "Scheduling"
))]
pub async fn delete_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Path(slot_id): Path<SlotId>,
) -> ApiResult<StatusCode> {
    state.slots.delete(&session, slot_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/slots/{slot_id}/status",
    params(("slot_id" = i64, Path, description = "Slot id")),
    responses(
        (status = 200, description = "Derived slot status", body = SlotStatusResponse),
        (status = 404, description = "No such slot")
    ),
    tag = "Scheduling"
))]
pub async fn slot_status_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(slot_id): Path<SlotId>,
) -> ApiResult<Json<SlotStatusResponse>> {
    let result = state.bookings.status(slot_id).await;
    handle_json_result(result.map(|status| SlotStatusResponse { slot_id, status }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/tutors/{tutor_id}/slots",
    params(("tutor_id" = i64, Path, description = "Tutor id")),
    responses(
        (status = 200, description = "Slots ascending by time, with status", body = SlotsResponse)
    ),
    tag = "Scheduling"
))]
pub async fn tutor_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(tutor_id): Path<TutorId>,
) -> ApiResult<Json<SlotsResponse>> {
    let result = state.slots.list_with_status(tutor_id).await;
    handle_json_result(result.map(|slots| SlotsResponse { slots }))
}

/// Handler to book a slot for the acting tutee.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = BookSlotRequest,
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 403, description = "No session or not a tutee"),
        (status = 404, description = "No such slot or subject"),
        (status = 409, description = "Slot already booked"),
        (status = 502, description = "Store unavailable")
    ),
    tag = "Scheduling"
))]
pub async fn book_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Json(request): Json<BookSlotRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let booking = state
        .bookings
        .book(&session, request.slot_id, request.subject_id)
        .await?;
    info!("Booking {} created through API", booking.id);
    Ok((StatusCode::CREATED, Json(booking)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings/mine",
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 200, description = "Bookings of the acting tutee or tutor", body = BookingsResponse),
        (status = 403, description = "No session or no profile")
    ),
    tag = "Scheduling"
))]
pub async fn my_bookings_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
) -> ApiResult<Json<BookingsResponse>> {
    let result = state.bookings.bookings_for_session(&session).await;
    handle_json_result(result.map(|bookings| BookingsResponse { bookings }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/subjects",
    responses((status = 200, description = "All subjects", body = SubjectsResponse)),
    tag = "Subjects"
))]
pub async fn list_subjects_handler(
    State(state): State<Arc<SchedulingState>>,
) -> ApiResult<Json<SubjectsResponse>> {
    let result = state.subjects.list_subjects().await;
    handle_json_result(result.map(|subjects| SubjectsResponse { subjects }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/subjects",
    request_body = CreateSubjectRequest,
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Empty name or user is not a tutor")
    ),
    tag = "Subjects"
))]
pub async fn create_subject_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Json(request): Json<CreateSubjectRequest>,
) -> ApiResult<(StatusCode, Json<Subject>)> {
    let subject = state.subjects.create_subject(&session, &request.name).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/subjects/{subject_id}",
    params(
        ("subject_id" = i64, Path, description = "Subject id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 403, description = "Not the owning tutor"),
        (status = 404, description = "No such subject"),
        (status = 409, description = "Subject has bookings")
    ),
    tag = "Subjects"
))]
pub async fn delete_subject_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Path(subject_id): Path<SubjectId>,
) -> ApiResult<StatusCode> {
    state.subjects.delete_subject(&session, subject_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/subjects/{subject_id}/enroll",
    params(
        ("subject_id" = i64, Path, description = "Subject id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 204, description = "Tutor enrolled"),
        (status = 404, description = "No such subject"),
        (status = 409, description = "Already enrolled")
    ),
    tag = "Subjects"
))]
pub async fn enroll_handler(
    State(state): State<Arc<SchedulingState>>,
    session: SessionContext,
    Path(subject_id): Path<SubjectId>,
) -> ApiResult<StatusCode> {
    state.subjects.enroll(&session, subject_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/subjects/{subject_id}/tutors",
    params(("subject_id" = i64, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Tutors offering the subject", body = SubjectTutorsResponse),
        (status = 404, description = "No such subject")
    ),
    tag = "Subjects"
))]
pub async fn subject_tutors_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(subject_id): Path<SubjectId>,
) -> ApiResult<Json<SubjectTutorsResponse>> {
    let result = state.subjects.tutors_for_subject(subject_id).await;
    handle_json_result(result.map(|tutor_ids| SubjectTutorsResponse {
        subject_id,
        tutor_ids,
    }))
}
