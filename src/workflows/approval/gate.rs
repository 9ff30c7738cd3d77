use std::time::Duration;

use serde::Serialize;

use super::domain::VendorStatus;

/// Outcome of the profile lookup feeding the gate. `Missing` and `Failed`
/// are explicit so callers never smuggle an unknown status in as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(VendorStatus),
    Missing,
    Failed,
}

/// Where the vendor currently is in the UI, as far as the gate cares.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateContext {
    pub viewing_pending_page: bool,
}

/// What the caller should do with a vendor-surface request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    RedirectPending,
    ShowRejected,
}

impl AccessDecision {
    pub const fn label(self) -> &'static str {
        match self {
            AccessDecision::Allow => "allow",
            AccessDecision::RedirectPending => "redirect_pending",
            AccessDecision::ShowRejected => "show_rejected",
        }
    }

    /// Callers keep re-evaluating on a timer only while this is true.
    pub const fn requires_recheck(self) -> bool {
        matches!(self, AccessDecision::RedirectPending)
    }
}

/// Error raised when a malformed status label reaches the gate boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("unrecognized vendor status '{value}'")]
    InvalidStatus { value: String },
}

/// Decide whether a vendor-surface request proceeds, redirects to the
/// pending view, or lands on the terminal rejection view.
///
/// Pure over its inputs; a failed or missing profile lookup degrades to
/// `RedirectPending` instead of surfacing an error to the caller.
pub fn authorize_vendor_access(lookup: ProfileLookup, ctx: GateContext) -> AccessDecision {
    match lookup {
        ProfileLookup::Found(VendorStatus::Approved) => AccessDecision::Allow,
        ProfileLookup::Found(VendorStatus::Pending) => {
            if ctx.viewing_pending_page {
                // Already on the pending view; redirecting again would loop.
                AccessDecision::Allow
            } else {
                AccessDecision::RedirectPending
            }
        }
        ProfileLookup::Found(VendorStatus::Rejected)
        | ProfileLookup::Found(VendorStatus::Suspended) => AccessDecision::ShowRejected,
        ProfileLookup::Missing | ProfileLookup::Failed => AccessDecision::RedirectPending,
    }
}

/// Refresh cadence the vendor surface uses while awaiting approval.
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Re-evaluate the gate on a timer until the decision settles.
///
/// Runs `lookup` once immediately, then every `interval` while the decision
/// still requires a recheck. Returns the first `Allow` or `ShowRejected`
/// decision reached.
pub async fn poll_until_settled<F>(mut lookup: F, ctx: GateContext, interval: Duration) -> AccessDecision
where
    F: FnMut() -> ProfileLookup,
{
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let decision = authorize_vendor_access(lookup(), ctx);
        if !decision.requires_recheck() {
            return decision;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GateContext {
        GateContext::default()
    }

    #[test]
    fn approved_vendor_is_allowed() {
        assert_eq!(
            authorize_vendor_access(ProfileLookup::Found(VendorStatus::Approved), ctx()),
            AccessDecision::Allow
        );
    }

    #[test]
    fn pending_vendor_is_redirected() {
        assert_eq!(
            authorize_vendor_access(ProfileLookup::Found(VendorStatus::Pending), ctx()),
            AccessDecision::RedirectPending
        );
    }

    #[test]
    fn pending_vendor_on_pending_page_is_not_redirected_again() {
        let ctx = GateContext {
            viewing_pending_page: true,
        };
        assert_eq!(
            authorize_vendor_access(ProfileLookup::Found(VendorStatus::Pending), ctx),
            AccessDecision::Allow
        );
    }

    #[test]
    fn rejected_and_suspended_see_the_terminal_view() {
        for status in [VendorStatus::Rejected, VendorStatus::Suspended] {
            assert_eq!(
                authorize_vendor_access(ProfileLookup::Found(status), ctx()),
                AccessDecision::ShowRejected
            );
        }
    }

    #[test]
    fn missing_or_failed_lookup_degrades_to_redirect() {
        assert_eq!(
            authorize_vendor_access(ProfileLookup::Missing, ctx()),
            AccessDecision::RedirectPending
        );
        assert_eq!(
            authorize_vendor_access(ProfileLookup::Failed, ctx()),
            AccessDecision::RedirectPending
        );
    }

    #[test]
    fn only_redirect_pending_requires_recheck() {
        assert!(AccessDecision::RedirectPending.requires_recheck());
        assert!(!AccessDecision::Allow.requires_recheck());
        assert!(!AccessDecision::ShowRejected.requires_recheck());
    }

    #[tokio::test(start_paused = true)]
    async fn poll_stops_once_the_decision_settles() {
        let mut remaining_pending = 3u8;
        let decision = poll_until_settled(
            move || {
                if remaining_pending > 0 {
                    remaining_pending -= 1;
                    ProfileLookup::Found(VendorStatus::Pending)
                } else {
                    ProfileLookup::Found(VendorStatus::Approved)
                }
            },
            ctx(),
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(decision, AccessDecision::Allow);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_returns_terminal_rejection_immediately() {
        let decision = poll_until_settled(
            || ProfileLookup::Found(VendorStatus::Rejected),
            ctx(),
            DEFAULT_RECHECK_INTERVAL,
        )
        .await;

        assert_eq!(decision, AccessDecision::ShowRejected);
    }
}
