//! Vendor approval workflow: the manager-side application lifecycle and the
//! access gate deciding whether vendor surfaces are reachable.

pub mod domain;
pub mod gate;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{Vendor, VendorId, VendorStatus};
pub use gate::{
    authorize_vendor_access, poll_until_settled, AccessDecision, GateContext, GateError,
    ProfileLookup, DEFAULT_RECHECK_INTERVAL,
};
pub use repository::{
    ApprovalNotice, ApprovalNotifier, LogNotifier, NoticeOutcome, NotifyError, VendorRepository,
    VendorStoreError,
};
pub use router::approval_router;
pub use service::{ApprovalError, VendorApprovalService};
