use serde::{Deserialize, Serialize};

use super::gate::GateError;

/// Identifier wrapper for vendor accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub String);

/// Vendor shop profile as the approval workflow sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub shop_name: String,
    pub owner_name: String,
    pub contact_email: String,
    pub city: String,
    pub status: VendorStatus,
}

/// Lifecycle status gating every vendor-facing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl VendorStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VendorStatus::Pending => "PENDING",
            VendorStatus::Approved => "APPROVED",
            VendorStatus::Rejected => "REJECTED",
            VendorStatus::Suspended => "SUSPENDED",
        }
    }

    /// Strict parse of the persisted status label. Unknown values are an
    /// error rather than being coerced to `Pending`.
    pub fn parse_label(raw: &str) -> Result<Self, GateError> {
        match raw.trim() {
            "PENDING" => Ok(VendorStatus::Pending),
            "APPROVED" => Ok(VendorStatus::Approved),
            "REJECTED" => Ok(VendorStatus::Rejected),
            "SUSPENDED" => Ok(VendorStatus::Suspended),
            other => Err(GateError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }

    /// Rejected and Suspended vendors never leave those states.
    pub const fn is_terminal(self) -> bool {
        matches!(self, VendorStatus::Rejected | VendorStatus::Suspended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for status in [
            VendorStatus::Pending,
            VendorStatus::Approved,
            VendorStatus::Rejected,
            VendorStatus::Suspended,
        ] {
            assert_eq!(VendorStatus::parse_label(status.label()).unwrap(), status);
        }
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        match VendorStatus::parse_label("ON_HOLD") {
            Err(GateError::InvalidStatus { value }) => assert_eq!(value, "ON_HOLD"),
            other => panic!("expected invalid status, got {other:?}"),
        }
    }

    #[test]
    fn terminal_states_are_rejected_and_suspended() {
        assert!(VendorStatus::Rejected.is_terminal());
        assert!(VendorStatus::Suspended.is_terminal());
        assert!(!VendorStatus::Pending.is_terminal());
        assert!(!VendorStatus::Approved.is_terminal());
    }
}
