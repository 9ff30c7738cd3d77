use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::store::MemoryStore;
use crate::workflows::approval::{Vendor, VendorId, VendorRepository, VendorStatus};
use crate::workflows::booking::domain::{
    Booking, BookingId, BookingStatus, CustomerId, Employee, EmployeeId, EmployeeStatus, LineItem,
};
use crate::workflows::booking::repository::{
    BookingChange, BookingRepository, Directory, RepositoryError,
};
use crate::workflows::booking::service::BookingAssignmentService;

pub(super) const VENDOR: &str = "vnd-velvet-rose";
pub(super) const BOOKING: &str = "bkg-0001";
pub(super) const EMPLOYEE: &str = "emp-lena";

pub(super) fn vendor(id: &str, status: VendorStatus) -> Vendor {
    Vendor {
        id: VendorId(id.to_string()),
        shop_name: "Velvet Rose Salon".to_string(),
        owner_name: "Amara Osei".to_string(),
        contact_email: "amara@velvetrose.example".to_string(),
        city: "Des Moines".to_string(),
        status,
    }
}

pub(super) fn employee(id: &str, vendor: &str, status: EmployeeStatus) -> Employee {
    Employee {
        id: EmployeeId(id.to_string()),
        vendor: VendorId(vendor.to_string()),
        name: "Lena Park".to_string(),
        role: "Stylist".to_string(),
        status,
    }
}

pub(super) fn booking(id: &str, status: BookingStatus, vendor: Option<&str>) -> Booking {
    let mut booking = Booking::new(
        BookingId(id.to_string()),
        CustomerId("cus-0042".to_string()),
        NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid date"),
        NaiveTime::from_hms_opt(14, 30, 0).expect("valid time"),
        "114 Grand Ave, Des Moines".to_string(),
        vec![LineItem {
            service_id: "svc-bridal".to_string(),
            service_name: "Bridal Styling".to_string(),
            unit_price_cents: 12_500,
            quantity: 1,
        }],
        Utc::now(),
    );
    booking.status = status;
    booking.vendor = vendor.map(|id| VendorId(id.to_string()));
    booking
}

/// Store seeded with an approved vendor, an active employee, and one booking
/// in the given status.
pub(super) fn seeded_store(status: BookingStatus, assigned: Option<&str>) -> MemoryStore {
    let store = MemoryStore::new();
    VendorRepository::insert(&store, vendor(VENDOR, VendorStatus::Approved))
        .expect("vendor seeds");
    store.insert_employee(employee(EMPLOYEE, VENDOR, EmployeeStatus::Active));
    BookingRepository::insert(&store, booking(BOOKING, status, assigned))
        .expect("booking seeds");
    store
}

pub(super) fn service_over(
    store: MemoryStore,
) -> BookingAssignmentService<MemoryStore, MemoryStore> {
    BookingAssignmentService::new(Arc::new(store.clone()), Arc::new(store))
}

pub(super) fn booking_id() -> BookingId {
    BookingId(BOOKING.to_string())
}

pub(super) fn vendor_id() -> VendorId {
    VendorId(VENDOR.to_string())
}

pub(super) fn employee_id() -> EmployeeId {
    EmployeeId(EMPLOYEE.to_string())
}

/// Repository double that fails every call, for error-path coverage.
pub(super) struct OfflineStore;

impl BookingRepository for OfflineStore {
    fn insert(&self, _booking: Booking) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn transition(
        &self,
        _id: &BookingId,
        _expected: BookingStatus,
        _to: BookingStatus,
        _change: BookingChange,
    ) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn status_counts(&self) -> Result<BTreeMap<BookingStatus, u64>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl Directory for OfflineStore {
    fn vendor_status(&self, _id: &VendorId) -> Result<Option<VendorStatus>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn employee(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
