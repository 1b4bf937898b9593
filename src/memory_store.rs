// In-memory collaborators. These back the service tests and local runs; a
// deployment wires the traits to its real document store instead.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::model::{Booking, Property};
use crate::stores::{
    BookingFilter, BookingStore, IdentityProvider, PropertyStore, StoreError, UserIdentity,
};

#[derive(Default)]
pub struct MemoryPropertyStore {
    properties: DashMap<String, Property>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, property: Property) {
        self.properties.insert(property.id.clone(), property);
    }

    pub fn snapshot(&self, id: &str) -> Option<Property> {
        self.properties.get(id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn get_property(&self, id: &str) -> Result<Property, StoreError> {
        self.properties
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_blocked_dates(
        &self,
        id: &str,
        blocked_dates: HashMap<NaiveDate, bool>,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .properties
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.blocked_dates = blocked_dates;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: DashMap<String, Booking>,
    // Force the next N writes to fail, for exercising failure surfacing
    fail_next_writes: AtomicUsize,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_writes(&self, count: usize) {
        self.fail_next_writes.store(count, Ordering::SeqCst);
    }

    pub fn insert(&self, booking: Booking) {
        self.bookings.insert(booking.id.clone(), booking);
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create_booking(&self, record: Booking) -> Result<String, StoreError> {
        let pending_failures = self.fail_next_writes.load(Ordering::SeqCst);
        if pending_failures > 0 {
            self.fail_next_writes
                .store(pending_failures - 1, Ordering::SeqCst);
            return Err(StoreError::Unavailable(
                "booking store rejected the write".to_string(),
            ));
        }

        let id = if record.id.is_empty() {
            format!("booking-{}", rand::random::<u32>())
        } else {
            record.id.clone()
        };
        self.bookings.insert(id.clone(), Booking { id: id.clone(), ..record });
        Ok(id)
    }

    async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<Booking>, StoreError> {
        let mut matched: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // Deterministic order for callers that render lists
        matched.sort_by(|a, b| a.check_in.cmp(&b.check_in).then_with(|| a.id.cmp(&b.id)));
        Ok(matched)
    }
}

// Fixed identity for tests and single-user tooling
pub struct StaticIdentity {
    user: Option<UserIdentity>,
}

impl StaticIdentity {
    pub fn signed_in(id: &str, display_name: &str, email: &str) -> Self {
        Self {
            user: Some(UserIdentity {
                id: id.to_string(),
                display_name: display_name.to_string(),
                email: email.to_string(),
            }),
        }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}
