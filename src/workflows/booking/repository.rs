use std::collections::BTreeMap;

use crate::workflows::approval::{VendorId, VendorStatus};

use super::domain::{Booking, BookingId, BookingStatus, Employee, EmployeeId};

/// The exact set of fields a single transition may touch besides `status`.
/// Keeping the shape this narrow is what lets the store apply a transition
/// as one conditional write.
#[derive(Debug, Clone, Default)]
pub struct BookingChange {
    pub vendor: Option<VendorId>,
    pub employee: Option<EmployeeId>,
    pub cancellation_reason: Option<String>,
}

/// Storage abstraction over booking rows.
pub trait BookingRepository: Send + Sync {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError>;
    fn fetch(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError>;
    /// Conditional transition: apply `change` and move to `to` only while the
    /// stored status still equals `expected`. A mismatch reports the observed
    /// status via `RepositoryError::StatusConflict` instead of overwriting,
    /// so two racing callers cannot both win.
    fn transition(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        to: BookingStatus,
        change: BookingChange,
    ) -> Result<Booking, RepositoryError>;
    /// Per-status booking counts for the dashboard aggregators.
    fn status_counts(&self) -> Result<BTreeMap<BookingStatus, u64>, RepositoryError>;
}

/// Read-only lookups the assignment guards need from neighboring tables.
pub trait Directory: Send + Sync {
    fn vendor_status(&self, id: &VendorId) -> Result<Option<VendorStatus>, RepositoryError>;
    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError>;
}

/// Error enumeration for booking storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("booking status changed concurrently (now {actual})", actual = .actual.label())]
    StatusConflict { actual: BookingStatus },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
