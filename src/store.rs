//! In-memory reference implementation of the entity-store traits. The
//! durable store is an external collaborator; this one backs the reference
//! binary, the demo command, and the integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::workflows::approval::{Vendor, VendorId, VendorRepository, VendorStatus, VendorStoreError};
use crate::workflows::booking::{
    Booking, BookingChange, BookingId, BookingRepository, BookingStatus, Directory, Employee,
    EmployeeId, RepositoryError,
};

#[derive(Default)]
struct Tables {
    vendors: HashMap<VendorId, Vendor>,
    employees: HashMap<EmployeeId, Employee>,
    bookings: HashMap<BookingId, Booking>,
}

/// Shared in-memory marketplace state. Clones share the same tables.
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_employee(&self, employee: Employee) {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.employees.insert(employee.id.clone(), employee);
    }
}

impl VendorRepository for MemoryStore {
    fn insert(&self, vendor: Vendor) -> Result<Vendor, VendorStoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.vendors.contains_key(&vendor.id) {
            return Err(VendorStoreError::Conflict);
        }
        tables.vendors.insert(vendor.id.clone(), vendor.clone());
        Ok(vendor)
    }

    fn fetch(&self, id: &VendorId) -> Result<Option<Vendor>, VendorStoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.vendors.get(id).cloned())
    }

    fn set_status(
        &self,
        id: &VendorId,
        expected: VendorStatus,
        next: VendorStatus,
    ) -> Result<Vendor, VendorStoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let vendor = tables.vendors.get_mut(id).ok_or(VendorStoreError::NotFound)?;
        if vendor.status != expected {
            return Err(VendorStoreError::StatusConflict {
                actual: vendor.status,
            });
        }
        vendor.status = next;
        Ok(vendor.clone())
    }
}

impl BookingRepository for MemoryStore {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.bookings.contains_key(&booking.id) {
            return Err(RepositoryError::Conflict);
        }
        tables.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    fn fetch(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.bookings.get(id).cloned())
    }

    fn transition(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        to: BookingStatus,
        change: BookingChange,
    ) -> Result<Booking, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let booking = tables.bookings.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if booking.status != expected {
            return Err(RepositoryError::StatusConflict {
                actual: booking.status,
            });
        }

        booking.status = to;
        if let Some(vendor) = change.vendor {
            booking.vendor = Some(vendor);
        }
        if let Some(employee) = change.employee {
            booking.employee = Some(employee);
        }
        if let Some(reason) = change.cancellation_reason {
            booking.cancellation_reason = Some(reason);
        }
        booking.updated_at = Utc::now();

        Ok(booking.clone())
    }

    fn status_counts(&self) -> Result<BTreeMap<BookingStatus, u64>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let mut counts = BTreeMap::new();
        for booking in tables.bookings.values() {
            *counts.entry(booking.status).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl Directory for MemoryStore {
    fn vendor_status(&self, id: &VendorId) -> Result<Option<VendorStatus>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.vendors.get(id).map(|vendor| vendor.status))
    }

    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.employees.get(id).cloned())
    }
}
