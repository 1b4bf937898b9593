// Record shapes shared between the engine and the property/booking stores

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// What kind of listing a property is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Home,
    Experience,
    Service,
}

// Lifecycle of a booking; transitions are driven by the host outside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

// A bookable listing as stored by the property store.
// Keys in blocked_dates serialize as ISO dates, matching the stored documents;
// only entries mapped to true count as blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub price: f64,
    pub discount: f64,
    pub max_guests: u32,
    pub category: PropertyCategory,
    #[serde(default)]
    pub blocked_dates: HashMap<NaiveDate, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

// A stay reservation as stored by the booking store. host_id is denormalized
// from the property so host dashboards can query without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub host_id: String,
    pub guest_id: String,
    pub contact: ContactDetails,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_amount: f64,
    pub nights: u32,
    pub status: BookingStatus,
}

impl Booking {
    // A booking occupies every date from check-in through check-out inclusive
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date <= self.check_out
    }
}

// Derived per-date classification; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    Available,
    Booked,
    Blocked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_document_round_trip() {
        let json = r#"{
            "id": "prop-1",
            "host_id": "host-9",
            "title": "Harbour loft",
            "price": 120.0,
            "discount": 10.0,
            "max_guests": 4,
            "category": "home",
            "blocked_dates": { "2024-07-04": true, "2024-07-05": false }
        }"#;

        let property: Property = serde_json::from_str(json).expect("valid property document");
        assert_eq!(property.category, PropertyCategory::Home);
        let fourth = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(property.blocked_dates.get(&fourth), Some(&true));

        let back = serde_json::to_string(&property).expect("serializable");
        assert!(back.contains("\"2024-07-04\":true"));
    }

    #[test]
    fn test_blocked_dates_defaults_to_empty() {
        let json = r#"{
            "id": "prop-2",
            "host_id": "host-9",
            "title": "Forest walk",
            "price": 45.0,
            "discount": 0.0,
            "max_guests": 10,
            "category": "experience"
        }"#;

        let property: Property = serde_json::from_str(json).expect("valid property document");
        assert!(property.blocked_dates.is_empty());
    }

    #[test]
    fn test_booking_covers_inclusive_range() {
        let booking = Booking {
            id: "bk-1".to_string(),
            property_id: "prop-1".to_string(),
            host_id: "host-9".to_string(),
            guest_id: "guest-3".to_string(),
            contact: ContactDetails {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555 0100".to_string(),
            },
            check_in: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            guests: 2,
            total_amount: 240.0,
            nights: 3,
            status: BookingStatus::Confirmed,
        };

        assert!(booking.covers(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(booking.covers(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()));
        assert!(!booking.covers(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()));
        assert!(!booking.covers(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        assert_eq!(
            serde_json::to_string(&DateStatus::Available).unwrap(),
            "\"available\""
        );
    }
}
