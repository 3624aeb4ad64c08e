// File: crates/tutorlink_scheduling/src/doc.rs

#![cfg(feature = "openapi")]
use crate::api::{
    BookSlotRequest, BookingsResponse, CreateSubjectRequest, HealthResponse, SlotStatusResponse,
    SlotTimeRequest, SlotsResponse, SubjectTutorsResponse, SubjectsResponse,
};
use crate::handlers;
use tutorlink_common::models::{
    AvailabilitySlot, Booking, SlotStatus, SlotView, Subject,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_handler,
        handlers::create_slot_handler,
        handlers::my_slots_handler,
        handlers::update_slot_handler,
        handlers::delete_slot_handler,
        handlers::slot_status_handler,
        handlers::tutor_slots_handler,
        handlers::book_slot_handler,
        handlers::my_bookings_handler,
        handlers::list_subjects_handler,
        handlers::create_subject_handler,
        handlers::delete_subject_handler,
        handlers::enroll_handler,
        handlers::subject_tutors_handler,
    ),
    components(
        schemas(
            SlotTimeRequest, BookSlotRequest, CreateSubjectRequest,
            SlotsResponse, SlotStatusResponse, BookingsResponse, SubjectsResponse,
            SubjectTutorsResponse, HealthResponse,
            AvailabilitySlot, SlotView, SlotStatus, Booking, Subject
        )
    ),
    tags(
        (name = "Scheduling", description = "Tutor availability slots and bookings"),
        (name = "Subjects", description = "Subject catalogue and tutor enrollment")
    )
)]
pub struct SchedulingApiDoc;
