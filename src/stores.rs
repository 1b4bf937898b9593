// Collaborator seams: the engine talks to the property store, booking store
// and identity provider through these traits and never assumes a backend

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Booking, BookingStatus, Property};

// Failures surfaced by a backing store. Callers see them as-is; nothing in
// the engine retries a failed write.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("write rejected: {0}")]
    WriteRejected(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// Filter for booking listings; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub property_id: Option<String>,
    pub host_id: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn for_property(property_id: &str) -> Self {
        Self {
            property_id: Some(property_id.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.property_id
            .as_ref()
            .map_or(true, |id| &booking.property_id == id)
            && self
                .host_id
                .as_ref()
                .map_or(true, |id| &booking.host_id == id)
            && self.status.map_or(true, |status| booking.status == status)
    }
}

#[async_trait]
pub trait PropertyStore: Send + Sync + 'static {
    async fn get_property(&self, id: &str) -> Result<Property, StoreError>;

    // Whole-map overwrite; concurrent host sessions are last-write-wins
    async fn update_blocked_dates(
        &self,
        id: &str,
        blocked_dates: HashMap<NaiveDate, bool>,
    ) -> Result<(), StoreError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    // Persist a new booking record and return its assigned id
    async fn create_booking(&self, record: Booking) -> Result<String, StoreError>;

    async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<Booking>, StoreError>;
}

// Who is acting; None when nobody is signed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    async fn current_user(&self) -> Option<UserIdentity>;
}
