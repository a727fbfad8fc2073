// ============================================================================
// PMS Core - Booking Entity
// File: crates/pms-core/src/domain/booking.rs
// Description: Stay reservation for a property and its status lifecycle
// ============================================================================

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Booking status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold the property's dates.
    pub const BLOCKING: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
    ];

    /// Statuses that mean a guest is (or will be) physically present.
    pub const OCCUPYING: [BookingStatus; 2] = [BookingStatus::Confirmed, BookingStatus::CheckedIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "checked_in" => Some(BookingStatus::CheckedIn),
            "checked_out" => Some(BookingStatus::CheckedOut),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn blocks_availability(&self) -> bool {
        Self::BLOCKING.contains(self)
    }

    pub fn is_occupying(&self) -> bool {
        Self::OCCUPYING.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::CheckedOut | BookingStatus::Cancelled)
    }

    /// Staying in the same status is always allowed.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
                | (CheckedIn, Cancelled)
        )
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests_count: i32,
    pub total_amount: Option<Decimal>,
    pub status: BookingStatus,
    pub booking_source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewBooking {
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests_count: i32,
    pub total_amount: Option<Decimal>,
    pub status: Option<BookingStatus>,
    #[validate(length(max = 100))]
    pub booking_source: Option<String>,
    pub notes: Option<String>,
}

impl NewBooking {
    pub fn into_booking(self) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            property_id: self.property_id,
            room_id: self.room_id,
            guest_id: self.guest_id,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            guests_count: self.guests_count,
            total_amount: self.total_amount,
            status: self.status.unwrap_or_default(),
            booking_source: self.booking_source,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Property and guest are fixed once booked.
#[derive(Debug, Clone, Default, Validate)]
pub struct BookingChanges {
    pub room_id: Option<Option<Uuid>>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests_count: Option<i32>,
    pub total_amount: Option<Option<Decimal>>,
    pub status: Option<BookingStatus>,
    #[validate(length(max = 100))]
    pub booking_source: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl BookingChanges {
    pub fn touches_dates(&self) -> bool {
        self.check_in_date.is_some() || self.check_out_date.is_some()
    }
}

impl Booking {
    /// Merges changes without re-validating; callers check dates and
    /// transitions first.
    pub fn apply(&mut self, changes: BookingChanges) {
        if let Some(room_id) = changes.room_id {
            self.room_id = room_id;
        }
        if let Some(check_in) = changes.check_in_date {
            self.check_in_date = check_in;
        }
        if let Some(check_out) = changes.check_out_date {
            self.check_out_date = check_out;
        }
        if let Some(guests_count) = changes.guests_count {
            self.guests_count = guests_count;
        }
        if let Some(total_amount) = changes.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(source) = changes.booking_source {
            self.booking_source = source;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }
}
