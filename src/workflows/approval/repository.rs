use serde::{Deserialize, Serialize};

use super::domain::{Vendor, VendorId, VendorStatus};

/// Storage abstraction over vendor rows so the approval service can be
/// exercised without the real entity store.
pub trait VendorRepository: Send + Sync {
    fn insert(&self, vendor: Vendor) -> Result<Vendor, VendorStoreError>;
    fn fetch(&self, id: &VendorId) -> Result<Option<Vendor>, VendorStoreError>;
    /// Conditional status write: succeeds only while the stored status still
    /// equals `expected`, so concurrent manager actions cannot stomp each
    /// other.
    fn set_status(
        &self,
        id: &VendorId,
        expected: VendorStatus,
        next: VendorStatus,
    ) -> Result<Vendor, VendorStoreError>;
}

/// Error enumeration for vendor storage failures.
#[derive(Debug, thiserror::Error)]
pub enum VendorStoreError {
    #[error("vendor already exists")]
    Conflict,
    #[error("vendor not found")]
    NotFound,
    #[error("vendor status changed concurrently (now {actual})", actual = .actual.label())]
    StatusConflict { actual: VendorStatus },
    #[error("vendor store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notice sent when a manager settles a vendor application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalNotice {
    pub recipient_email: String,
    pub shop_name: String,
    pub owner_name: String,
    pub outcome: NoticeOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeOutcome {
    Approved,
    Rejected,
}

/// Trait describing the outbound e-mail hook. Dispatch failures are logged
/// by the service and never fail the status transition.
pub trait ApprovalNotifier: Send + Sync {
    fn notify(&self, notice: ApprovalNotice) -> Result<(), NotifyError>;
}

/// Notification transport error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Notifier that records the notice to the log instead of sending mail.
/// Stands in for the external e-mail service in the reference binary.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl ApprovalNotifier for LogNotifier {
    fn notify(&self, notice: ApprovalNotice) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = %notice.recipient_email,
            shop = %notice.shop_name,
            outcome = ?notice.outcome,
            "vendor application notice"
        );
        Ok(())
    }
}
