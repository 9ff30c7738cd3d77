//! Booking assignment workflow: the single authoritative state machine over
//! booking status, from manager triage through vendor response to
//! completion or cancellation.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use domain::{
    price_items, Booking, BookingId, BookingStatus, CustomerId, Employee, EmployeeId,
    EmployeeStatus, LineItem,
};
pub use repository::{BookingChange, BookingRepository, Directory, RepositoryError};
pub use router::{booking_router, BookingView};
pub use service::{
    BookingAssignmentService, BookingStats, Entity, VendorResponse, WorkflowError,
};
pub use transitions::{next_status, BookingAction};
