// --- File: crates/tutorlink_scheduling/src/lib.rs ---
pub mod api;
pub mod booking;
#[cfg(test)]
mod booking_test;
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
pub mod mock;
pub mod roles;
pub mod routes;
pub mod slots;
pub mod subjects;
pub mod time;
#[cfg(test)]
mod time_proptest;

pub use booking::BookingService;
pub use error::SchedulingError;
pub use routes::routes;
pub use slots::SlotService;
pub use subjects::SubjectService;
