use std::sync::Arc;

use tracing::warn;

use super::domain::{Vendor, VendorId, VendorStatus};
use super::gate::ProfileLookup;
use super::repository::{
    ApprovalNotice, ApprovalNotifier, NoticeOutcome, VendorRepository, VendorStoreError,
};

/// Service executing the manager/admin side of the vendor lifecycle:
/// Pending -> Approved | Rejected, Approved -> Suspended.
pub struct VendorApprovalService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> VendorApprovalService<R, N>
where
    R: VendorRepository + 'static,
    N: ApprovalNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Approve a pending vendor application and dispatch the approval notice.
    pub fn approve(&self, vendor_id: &VendorId) -> Result<Vendor, ApprovalError> {
        let vendor = self.settle(vendor_id, VendorStatus::Approved, "approve")?;
        self.dispatch(&vendor, NoticeOutcome::Approved, None);
        Ok(vendor)
    }

    /// Reject a pending vendor application, recording an optional reason in
    /// the rejection notice.
    pub fn reject(
        &self,
        vendor_id: &VendorId,
        reason: Option<String>,
    ) -> Result<Vendor, ApprovalError> {
        let vendor = self.settle(vendor_id, VendorStatus::Rejected, "reject")?;
        self.dispatch(&vendor, NoticeOutcome::Rejected, reason);
        Ok(vendor)
    }

    /// Admin action taking an approved vendor out of service. No notice is
    /// sent for suspensions.
    pub fn suspend(&self, vendor_id: &VendorId) -> Result<Vendor, ApprovalError> {
        self.transition(vendor_id, VendorStatus::Approved, VendorStatus::Suspended, "suspend")
    }

    /// Profile lookup feeding the access gate. Store failures degrade to
    /// `ProfileLookup::Failed` so the gate path never surfaces an error.
    pub fn profile(&self, vendor_id: &VendorId) -> ProfileLookup {
        match self.repository.fetch(vendor_id) {
            Ok(Some(vendor)) => ProfileLookup::Found(vendor.status),
            Ok(None) => ProfileLookup::Missing,
            Err(error) => {
                warn!(vendor = %vendor_id.0, %error, "vendor profile lookup failed");
                ProfileLookup::Failed
            }
        }
    }

    pub fn get(&self, vendor_id: &VendorId) -> Result<Vendor, ApprovalError> {
        self.repository
            .fetch(vendor_id)?
            .ok_or(ApprovalError::NotFound)
    }

    /// Both approve and reject settle a Pending application.
    fn settle(
        &self,
        vendor_id: &VendorId,
        next: VendorStatus,
        action: &'static str,
    ) -> Result<Vendor, ApprovalError> {
        self.transition(vendor_id, VendorStatus::Pending, next, action)
    }

    fn transition(
        &self,
        vendor_id: &VendorId,
        expected: VendorStatus,
        next: VendorStatus,
        action: &'static str,
    ) -> Result<Vendor, ApprovalError> {
        match self.repository.set_status(vendor_id, expected, next) {
            Ok(vendor) => Ok(vendor),
            Err(VendorStoreError::NotFound) => Err(ApprovalError::NotFound),
            Err(VendorStoreError::StatusConflict { actual }) => {
                Err(ApprovalError::InvalidTransition {
                    from: actual,
                    action,
                })
            }
            Err(other) => Err(ApprovalError::Store(other)),
        }
    }

    fn dispatch(&self, vendor: &Vendor, outcome: NoticeOutcome, reason: Option<String>) {
        let notice = ApprovalNotice {
            recipient_email: vendor.contact_email.clone(),
            shop_name: vendor.shop_name.clone(),
            owner_name: vendor.owner_name.clone(),
            outcome,
            reason,
        };

        // Fire-and-forget: the transition already committed.
        if let Err(error) = self.notifier.notify(notice) {
            warn!(vendor = %vendor.id.0, %error, "vendor notice dispatch failed");
        }
    }
}

/// Error raised by the approval service.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("vendor not found")]
    NotFound,
    #[error("cannot {action} a vendor in status {from}", from = .from.label())]
    InvalidTransition {
        from: VendorStatus,
        action: &'static str,
    },
    #[error(transparent)]
    Store(#[from] VendorStoreError),
}
