use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::workflows::approval::{VendorId, VendorStatus};

use super::domain::{Booking, BookingId, BookingStatus, EmployeeId, EmployeeStatus};
use super::repository::{BookingChange, BookingRepository, Directory, RepositoryError};
use super::transitions::{next_status, BookingAction};

/// Which entity a `NotFound` refers to, so callers can phrase the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Booking,
    Vendor,
    Employee,
}

impl Entity {
    pub const fn label(self) -> &'static str {
        match self {
            Entity::Booking => "booking",
            Entity::Vendor => "vendor",
            Entity::Employee => "employee",
        }
    }
}

/// Error raised by the assignment workflow. Every variant is a synchronous
/// business-rule failure; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{entity} not found", entity = .0.label())]
    NotFound(Entity),
    #[error("cannot {action} a booking in status {from}", action = .action.label(), from = .from.label())]
    InvalidTransition {
        from: BookingStatus,
        action: BookingAction,
    },
    #[error("vendor must be approved to take bookings (status {status})", status = .0.label())]
    InvalidVendorState(VendorStatus),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A vendor's answer to an assignment.
#[derive(Debug, Clone)]
pub enum VendorResponse {
    Accept { employee: Option<EmployeeId> },
    Reject { reason: Option<String> },
}

/// Reason recorded when a vendor rejects without giving one.
const DEFAULT_REJECTION_REASON: &str = "Booking rejected by vendor";

/// Service owning every booking status mutation. All transitions go through
/// the table in `transitions.rs` followed by one conditional write, so a
/// concurrent racer loses with `InvalidTransition` instead of silently
/// overwriting.
pub struct BookingAssignmentService<R, D> {
    bookings: Arc<R>,
    directory: Arc<D>,
}

impl<R, D> BookingAssignmentService<R, D>
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    pub fn new(bookings: Arc<R>, directory: Arc<D>) -> Self {
        Self {
            bookings,
            directory,
        }
    }

    /// Manager triage: route an at-home request to the assignment queue.
    pub fn classify_at_home(&self, booking_id: &BookingId) -> Result<Booking, WorkflowError> {
        let booking = self.fetch(booking_id)?;
        self.apply(
            &booking,
            BookingAction::ClassifyAtHome,
            BookingChange::default(),
        )
    }

    /// Manager assigns an approved vendor; the booking moves to
    /// AwaitingVendorResponse with the vendor bound.
    pub fn assign_vendor(
        &self,
        booking_id: &BookingId,
        vendor_id: &VendorId,
    ) -> Result<Booking, WorkflowError> {
        let booking = self.fetch(booking_id)?;

        let status = self
            .directory
            .vendor_status(vendor_id)?
            .ok_or(WorkflowError::NotFound(Entity::Vendor))?;
        if status != VendorStatus::Approved {
            return Err(WorkflowError::InvalidVendorState(status));
        }

        let assigned = self.apply(
            &booking,
            BookingAction::AssignVendor,
            BookingChange {
                vendor: Some(vendor_id.clone()),
                ..BookingChange::default()
            },
        )?;

        info!(booking = %booking_id.0, vendor = %vendor_id.0, "vendor assigned");
        Ok(assigned)
    }

    /// Vendor accepts or rejects an assignment. The booking must already
    /// carry the responding vendor's id; anything else reads as "no such
    /// booking" to this vendor, matching the vendor-scoped dashboard query.
    pub fn respond_to_assignment(
        &self,
        booking_id: &BookingId,
        vendor_id: &VendorId,
        response: VendorResponse,
    ) -> Result<Booking, WorkflowError> {
        let booking = self.fetch(booking_id)?;
        if booking.vendor.as_ref() != Some(vendor_id) {
            return Err(WorkflowError::NotFound(Entity::Booking));
        }

        match response {
            VendorResponse::Accept { employee } => {
                if let Some(employee_id) = &employee {
                    let record = self
                        .directory
                        .employee(employee_id)?
                        .ok_or(WorkflowError::NotFound(Entity::Employee))?;
                    if record.vendor != *vendor_id || record.status != EmployeeStatus::Active {
                        return Err(WorkflowError::NotFound(Entity::Employee));
                    }
                }

                self.apply(
                    &booking,
                    BookingAction::Accept,
                    BookingChange {
                        employee,
                        ..BookingChange::default()
                    },
                )
            }
            VendorResponse::Reject { reason } => self.apply(
                &booking,
                BookingAction::Reject,
                BookingChange {
                    cancellation_reason: Some(
                        reason.unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string()),
                    ),
                    ..BookingChange::default()
                },
            ),
        }
    }

    /// Operator marks a confirmed booking as underway.
    pub fn start_service(&self, booking_id: &BookingId) -> Result<Booking, WorkflowError> {
        let booking = self.fetch(booking_id)?;
        self.apply(&booking, BookingAction::Start, BookingChange::default())
    }

    /// Operator closes out an in-progress booking.
    pub fn complete(&self, booking_id: &BookingId) -> Result<Booking, WorkflowError> {
        let booking = self.fetch(booking_id)?;
        self.apply(&booking, BookingAction::Complete, BookingChange::default())
    }

    /// Customer, manager, or admin cancellation from any non-terminal state.
    pub fn cancel(
        &self,
        booking_id: &BookingId,
        reason: Option<String>,
    ) -> Result<Booking, WorkflowError> {
        let booking = self.fetch(booking_id)?;
        self.apply(
            &booking,
            BookingAction::Cancel,
            BookingChange {
                cancellation_reason: reason,
                ..BookingChange::default()
            },
        )
    }

    pub fn get(&self, booking_id: &BookingId) -> Result<Booking, WorkflowError> {
        self.fetch(booking_id)
    }

    /// Per-status counts for the manager dashboard.
    pub fn stats(&self) -> Result<BookingStats, WorkflowError> {
        let counts = self.bookings.status_counts()?;
        let count = |status: BookingStatus| counts.get(&status).copied().unwrap_or(0);
        Ok(BookingStats {
            total: counts.values().sum(),
            pending: count(BookingStatus::Pending),
            awaiting_manager: count(BookingStatus::AwaitingManager),
            awaiting_vendor: count(BookingStatus::AwaitingVendorResponse),
            confirmed: count(BookingStatus::Confirmed),
            in_progress: count(BookingStatus::InProgress),
            completed: count(BookingStatus::Completed),
            cancelled: count(BookingStatus::Cancelled),
        })
    }

    fn fetch(&self, booking_id: &BookingId) -> Result<Booking, WorkflowError> {
        match self.bookings.fetch(booking_id) {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) | Err(RepositoryError::NotFound) => {
                Err(WorkflowError::NotFound(Entity::Booking))
            }
            Err(other) => Err(WorkflowError::Repository(other)),
        }
    }

    /// Validate the edge, then commit it as one conditional write. A lost
    /// race surfaces as `InvalidTransition` carrying the status the store
    /// actually observed.
    fn apply(
        &self,
        booking: &Booking,
        action: BookingAction,
        change: BookingChange,
    ) -> Result<Booking, WorkflowError> {
        let to = next_status(booking.status, action)?;
        match self
            .bookings
            .transition(&booking.id, booking.status, to, change)
        {
            Ok(updated) => Ok(updated),
            Err(RepositoryError::StatusConflict { actual }) => {
                Err(WorkflowError::InvalidTransition {
                    from: actual,
                    action,
                })
            }
            Err(RepositoryError::NotFound) => Err(WorkflowError::NotFound(Entity::Booking)),
            Err(other) => Err(WorkflowError::Repository(other)),
        }
    }
}

/// Per-status booking counts exposed to the manager dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingStats {
    pub total: u64,
    pub pending: u64,
    pub awaiting_manager: u64,
    pub awaiting_vendor: u64,
    pub confirmed: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
}
