// Orchestration over the collaborator seams: booking submission, calendar
// month views and host block management

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::availability::{self, AvailabilityError, CalendarMonth, OccupancyPolicy};
use crate::calendar_cache::{CacheConfig, CacheStatsReport, CalendarCache};
use crate::model::{Booking, BookingStatus};
use crate::pricing::{quote_stay, PricingError};
use crate::stores::{BookingFilter, BookingStore, IdentityProvider, PropertyStore, StoreError};
use crate::validation::{validate, BookingRequest, IntakeContext, ValidationErrors};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("booking request failed validation")]
    Invalid(ValidationErrors),

    #[error("a signed-in user is required to book")]
    NotSignedIn,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// Emitted after a successful write so UI layers can refresh what they show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    BookingCreated {
        property_id: String,
        booking_id: String,
    },
    BlockedDatesChanged {
        property_id: String,
    },
}

pub trait ChangeNotifier: Send + Sync {
    fn notify(&self, event: ChangeEvent);
}

// For callers that do not care about change events
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn notify(&self, _event: ChangeEvent) {}
}

// Buffers events for UI layers that poll on their own schedule instead of
// subscribing
#[derive(Default)]
pub struct PollingFeed {
    events: Mutex<Vec<ChangeEvent>>,
}

impl PollingFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<ChangeEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl ChangeNotifier for PollingFeed {
    fn notify(&self, event: ChangeEvent) {
        self.events.lock().push(event);
    }
}

pub struct BookingService<P, B, I> {
    properties: Arc<P>,
    bookings: Arc<B>,
    identity: Arc<I>,
    cache: CalendarCache,
    notifier: Arc<dyn ChangeNotifier>,
    policy: OccupancyPolicy,
}

impl<P, B, I> BookingService<P, B, I>
where
    P: PropertyStore,
    B: BookingStore,
    I: IdentityProvider,
{
    pub fn new(properties: Arc<P>, bookings: Arc<B>, identity: Arc<I>) -> Self {
        Self::with_options(
            properties,
            bookings,
            identity,
            CacheConfig::default(),
            OccupancyPolicy::default(),
            Arc::new(NullNotifier),
        )
    }

    pub fn with_options(
        properties: Arc<P>,
        bookings: Arc<B>,
        identity: Arc<I>,
        cache_config: CacheConfig,
        policy: OccupancyPolicy,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            properties,
            bookings,
            identity,
            cache: CalendarCache::new(cache_config),
            notifier,
            policy,
        }
    }

    // Validate a guest request, price it and persist a pending booking.
    // Validation is all-or-nothing; a store failure is surfaced for the
    // caller to retry manually.
    pub async fn submit_booking(
        &self,
        property_id: &str,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<Booking, SubmitError> {
        let property = self.properties.get_property(property_id).await?;

        let ctx = IntakeContext {
            today,
            max_guests: property.max_guests,
        };
        let fields = validate(request, &ctx).map_err(SubmitError::Invalid)?;

        let user = self
            .identity
            .current_user()
            .await
            .ok_or(SubmitError::NotSignedIn)?;

        let quote = quote_stay(
            fields.check_in,
            fields.check_out,
            property.price,
            property.discount,
        )?;

        let record = Booking {
            id: String::new(), // assigned by the store
            property_id: property.id.clone(),
            host_id: property.host_id.clone(),
            guest_id: user.id,
            contact: fields.contact,
            check_in: fields.check_in,
            check_out: fields.check_out,
            guests: fields.guests,
            total_amount: quote.total,
            nights: quote.nights,
            status: BookingStatus::Pending,
        };

        let booking_id = self.bookings.create_booking(record.clone()).await?;
        info!(
            property_id,
            booking_id = %booking_id,
            nights = quote.nights,
            total = quote.total,
            "accepted booking request"
        );

        self.cache.invalidate_property(property_id);
        self.notifier.notify(ChangeEvent::BookingCreated {
            property_id: property_id.to_string(),
            booking_id: booking_id.clone(),
        });

        Ok(Booking {
            id: booking_id,
            ..record
        })
    }

    // Resolve the display calendar for one month, serving from cache when a
    // fresh grid is available
    pub async fn month_view(
        &self,
        property_id: &str,
        year: i32,
        month: u32,
    ) -> Result<CalendarMonth, CalendarError> {
        if let Some(grid) = self.cache.get(property_id, year, month) {
            debug!(property_id, year, month, "calendar month served from cache");
            return Ok(grid);
        }

        let (property, bookings) = futures::try_join!(
            self.properties.get_property(property_id),
            self.bookings
                .list_bookings(BookingFilter::for_property(property_id)),
        )?;

        let grid = availability::month_grid(
            year,
            month,
            &property.blocked_dates,
            &bookings,
            self.policy,
        )?;
        self.cache.store(property_id, year, month, grid.clone());
        Ok(grid)
    }

    // Mark one date blocked or unblocked for a property. Booked dates are
    // refused; a no-op change skips the store write. The stored map is
    // overwritten whole, so concurrent host sessions are last-write-wins.
    pub async fn set_blocked(
        &self,
        property_id: &str,
        date: NaiveDate,
        blocked: bool,
    ) -> Result<bool, CalendarError> {
        let (mut property, bookings) = futures::try_join!(
            self.properties.get_property(property_id),
            self.bookings
                .list_bookings(BookingFilter::for_property(property_id)),
        )?;

        let changed = match availability::apply_block(
            &mut property.blocked_dates,
            &bookings,
            date,
            blocked,
            self.policy,
        ) {
            Ok(changed) => changed,
            Err(err) => {
                warn!(property_id, %date, "rejected blocked-date change: {err}");
                return Err(err.into());
            }
        };

        if !changed {
            return Ok(false);
        }

        self.properties
            .update_blocked_dates(property_id, property.blocked_dates)
            .await?;
        info!(property_id, %date, blocked, "updated blocked dates");

        self.cache.invalidate_property(property_id);
        self.notifier.notify(ChangeEvent::BlockedDatesChanged {
            property_id: property_id.to_string(),
        });

        Ok(true)
    }

    pub fn cache_stats(&self) -> CacheStatsReport {
        self.cache.stats()
    }
}
