// Per-date availability classification and calendar month derivation

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::model::{Booking, BookingStatus, DateStatus};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("{month}/{year} is not a valid calendar month")]
    InvalidMonth { year: i32, month: u32 },

    #[error("{date} is covered by a booking and cannot be blocked or unblocked")]
    DateBooked { date: NaiveDate },
}

// Which booking statuses occupy calendar dates. The stored calendars only
// count confirmed stays; ConfirmedAndPending additionally reserves dates for
// requests a host has not answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OccupancyPolicy {
    #[default]
    ConfirmedOnly,
    ConfirmedAndPending,
}

impl OccupancyPolicy {
    fn occupies(self, status: BookingStatus) -> bool {
        match self {
            OccupancyPolicy::ConfirmedOnly => status == BookingStatus::Confirmed,
            OccupancyPolicy::ConfirmedAndPending => {
                matches!(status, BookingStatus::Confirmed | BookingStatus::Pending)
            }
        }
    }
}

// Classify one date. A covering booking wins over a host block; a host block
// wins over the default available state.
pub fn date_status(
    date: NaiveDate,
    blocked_dates: &HashMap<NaiveDate, bool>,
    bookings: &[Booking],
    policy: OccupancyPolicy,
) -> DateStatus {
    if bookings
        .iter()
        .any(|b| policy.occupies(b.status) && b.covers(date))
    {
        return DateStatus::Booked;
    }

    if blocked_dates.get(&date).copied().unwrap_or(false) {
        return DateStatus::Blocked;
    }

    DateStatus::Available
}

// One slot of a rendered month: either padding before the first day or a
// classified day of the month
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub status: DateStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }
}

// Build the display sequence for a month: leading blanks up to the starting
// weekday (weeks begin on Sunday), then one classified cell per day.
pub fn month_grid(
    year: i32,
    month: u32,
    blocked_dates: &HashMap<NaiveDate, bool>,
    bookings: &[Booking],
    policy: OccupancyPolicy,
) -> Result<CalendarMonth, AvailabilityError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(AvailabilityError::InvalidMonth { year, month })?;
    let day_count = days_in_month(first);

    let offset = first.weekday().num_days_from_sunday();
    let mut cells = Vec::with_capacity((offset + day_count) as usize);
    cells.extend((0..offset).map(|_| CalendarCell::Blank));

    for date in first.iter_days().take(day_count as usize) {
        cells.push(CalendarCell::Day(DayCell {
            day: date.day(),
            date,
            status: date_status(date, blocked_dates, bookings, policy),
        }));
    }

    Ok(CalendarMonth { year, month, cells })
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    match next_first {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

// Toggle a host block on one date. Dates covered by an occupying booking are
// refused and the map is left untouched. Returns whether the map changed, so
// callers can skip the store write when nothing moved.
pub fn apply_block(
    blocked_dates: &mut HashMap<NaiveDate, bool>,
    bookings: &[Booking],
    date: NaiveDate,
    blocked: bool,
    policy: OccupancyPolicy,
) -> Result<bool, AvailabilityError> {
    if bookings
        .iter()
        .any(|b| policy.occupies(b.status) && b.covers(date))
    {
        return Err(AvailabilityError::DateBooked { date });
    }

    let changed = if blocked {
        blocked_dates.insert(date, true) != Some(true)
    } else {
        // Absent and false entries both mean unblocked; unblocking drops the
        // key rather than storing false
        blocked_dates.remove(&date).unwrap_or(false)
    };

    Ok(changed)
}
