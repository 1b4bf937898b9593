// Availability and pricing core for the stay marketplace

// One module per concern
pub mod availability;
pub mod calendar_cache;
pub mod memory_store;
pub mod model;
pub mod pricing;
pub mod service;
pub mod stores;
pub mod validation;

// Re-export key types for convenience
pub use availability::{
    apply_block, date_status, month_grid, AvailabilityError, CalendarCell, CalendarMonth, DayCell,
    OccupancyPolicy,
};
pub use calendar_cache::{CacheConfig, CacheStatsReport, CalendarCache};
pub use memory_store::{MemoryBookingStore, MemoryPropertyStore, StaticIdentity};
pub use model::{Booking, BookingStatus, ContactDetails, DateStatus, Property, PropertyCategory};
pub use pricing::{quote_stay, PricingError, StayQuote};
pub use service::{
    BookingService, CalendarError, ChangeEvent, ChangeNotifier, NullNotifier, PollingFeed,
    SubmitError,
};
pub use stores::{
    BookingFilter, BookingStore, IdentityProvider, PropertyStore, StoreError, UserIdentity,
};
pub use validation::{validate, BookingRequest, IntakeContext, ValidBooking, ValidationErrors};
