use super::domain::BookingStatus;
use super::service::WorkflowError;

/// Every action that can move a booking along its lifecycle. All status
/// mutations across the service flow through [`next_status`]; no handler
/// writes a status field directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    ClassifyAtHome,
    AssignVendor,
    Accept,
    Reject,
    Start,
    Complete,
    Cancel,
}

impl BookingAction {
    pub const fn label(self) -> &'static str {
        match self {
            BookingAction::ClassifyAtHome => "classify-as-at-home",
            BookingAction::AssignVendor => "assign-vendor",
            BookingAction::Accept => "accept",
            BookingAction::Reject => "reject",
            BookingAction::Start => "start-service",
            BookingAction::Complete => "complete",
            BookingAction::Cancel => "cancel",
        }
    }
}

/// The authoritative transition table. Any (from, action) pair without a row
/// here is an `InvalidTransition`; terminal states admit no action at all.
pub fn next_status(
    from: BookingStatus,
    action: BookingAction,
) -> Result<BookingStatus, WorkflowError> {
    use BookingAction::*;
    use BookingStatus::*;

    let to = match (from, action) {
        (Pending, ClassifyAtHome) => AwaitingManager,
        (Pending | AwaitingManager, AssignVendor) => AwaitingVendorResponse,
        // Vendors may act while still Pending when the booking already
        // carries their id; ownership is checked by the service.
        (Pending | AwaitingVendorResponse, Accept) => Confirmed,
        (Pending | AwaitingVendorResponse, Reject) => Cancelled,
        (Confirmed, Start) => InProgress,
        (InProgress, Complete) => Completed,
        (from, Cancel) if !from.is_terminal() => Cancelled,
        _ => return Err(WorkflowError::InvalidTransition { from, action }),
    };

    Ok(to)
}
