use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::approval::VendorId;

/// Identifier wrapper for bookings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

/// Identifier wrapper for customer accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

/// Identifier wrapper for vendor staff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Lifecycle status of a booking. Persisted labels match the historic
/// SCREAMING_SNAKE values customers and dashboards already rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    AwaitingManager,
    AwaitingVendorResponse,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 7] = [
        BookingStatus::Pending,
        BookingStatus::AwaitingManager,
        BookingStatus::AwaitingVendorResponse,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::AwaitingManager => "AWAITING_MANAGER",
            BookingStatus::AwaitingVendorResponse => "AWAITING_VENDOR_RESPONSE",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Completed and Cancelled bookings admit no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// One priced service line on a booking. Prices are integer cents so totals
/// stay exact and non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub service_id: String,
    pub service_name: String,
    pub unit_price_cents: u32,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total_cents(&self) -> u64 {
        u64::from(self.unit_price_cents) * u64::from(self.quantity)
    }
}

/// A customer's request for services at a scheduled date/time, optionally
/// at-home. The assignment workflow is the sole legitimate mutator of
/// `status`, `vendor`, `employee`, and `cancellation_reason`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer: CustomerId,
    pub vendor: Option<VendorId>,
    pub employee: Option<EmployeeId>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub items: Vec<LineItem>,
    pub subtotal_cents: u64,
    pub total_cents: u64,
    pub status: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a new Pending booking, pricing the line items server-side.
    /// Whatever total the client computed is deliberately not an input.
    pub fn new(
        id: BookingId,
        customer: CustomerId,
        scheduled_date: NaiveDate,
        scheduled_time: NaiveTime,
        address: String,
        items: Vec<LineItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let subtotal_cents = price_items(&items);
        Self {
            id,
            customer,
            vendor: None,
            employee: None,
            scheduled_date,
            scheduled_time,
            address,
            items,
            subtotal_cents,
            total_cents: subtotal_cents,
            status: BookingStatus::Pending,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sum of `unit_price * quantity` over the line items.
pub fn price_items(items: &[LineItem]) -> u64 {
    items.iter().map(LineItem::line_total_cents).sum()
}

/// Staff record owned by a vendor, optionally bound to a confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub vendor: VendorId,
    pub name: String,
    pub role: String,
    pub status: EmployeeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: u32, quantity: u32) -> LineItem {
        LineItem {
            service_id: "svc-cut".to_string(),
            service_name: "Signature Cut".to_string(),
            unit_price_cents: price,
            quantity,
        }
    }

    #[test]
    fn new_booking_prices_items_server_side() {
        let now = Utc::now();
        let booking = Booking::new(
            BookingId("b-1".to_string()),
            CustomerId("c-1".to_string()),
            NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid date"),
            NaiveTime::from_hms_opt(14, 30, 0).expect("valid time"),
            "114 Grand Ave".to_string(),
            vec![item(4500, 2), item(1200, 1)],
            now,
        );

        assert_eq!(booking.subtotal_cents, 10_200);
        assert_eq!(booking.total_cents, 10_200);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.vendor.is_none());
    }

    #[test]
    fn line_totals_do_not_overflow_u32_products() {
        let item = item(u32::MAX, u32::MAX);
        assert_eq!(
            item.line_total_cents(),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn terminal_statuses() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        for status in [
            BookingStatus::Pending,
            BookingStatus::AwaitingManager,
            BookingStatus::AwaitingVendorResponse,
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
        ] {
            assert!(!status.is_terminal());
        }
    }
}
