//! Booking overlap validation

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::Booking;
use crate::error::DomainError;

/// Half-open stay interval `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::validation(
                "Check-out date must be after check-in date",
            ));
        }
        Ok(Self { check_in, check_out })
    }

    pub fn of(booking: &Booking) -> Self {
        Self {
            check_in: booking.check_in_date,
            check_out: booking.check_out_date,
        }
    }

    /// Back-to-back stays (one checks out the day the other checks in) do
    /// not overlap.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// First booking of `property_id` that holds dates overlapping `proposed`.
///
/// Only pending, confirmed and checked-in bookings block. `exclude` skips the
/// booking being updated.
pub fn find_conflict<'a>(
    property_id: Uuid,
    existing: &'a [Booking],
    proposed: &StayPeriod,
    exclude: Option<Uuid>,
) -> Option<&'a Booking> {
    existing.iter().find(|booking| {
        booking.property_id == property_id
            && Some(booking.id) != exclude
            && booking.status.blocks_availability()
            && StayPeriod::of(booking).overlaps(proposed)
    })
}

pub fn has_overlap(
    property_id: Uuid,
    existing: &[Booking],
    proposed: &StayPeriod,
    exclude: Option<Uuid>,
) -> bool {
    find_conflict(property_id, existing, proposed, exclude).is_some()
}

/// Fails with the conflicting booking's dates.
pub fn ensure_available(
    property_id: Uuid,
    existing: &[Booking],
    proposed: &StayPeriod,
    exclude: Option<Uuid>,
) -> Result<(), DomainError> {
    match find_conflict(property_id, existing, proposed, exclude) {
        Some(conflict) => Err(DomainError::BookingOverlap {
            check_in: conflict.check_in_date,
            check_out: conflict.check_out_date,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingStatus;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn booking(property_id: Uuid, from: u32, to: u32, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            property_id,
            room_id: None,
            guest_id: Uuid::new_v4(),
            check_in_date: day(from),
            check_out_date: day(to),
            guests_count: 2,
            total_amount: None,
            status,
            booking_source: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_period_requires_positive_length() {
        assert!(StayPeriod::new(day(10), day(10)).is_err());
        assert!(StayPeriod::new(day(12), day(10)).is_err());
        assert_eq!(StayPeriod::new(day(10), day(15)).unwrap().nights(), 5);
    }

    #[test]
    fn test_half_open_overlap() {
        let a = StayPeriod::new(day(10), day(15)).unwrap();
        assert!(a.overlaps(&StayPeriod::new(day(14), day(18)).unwrap()));
        assert!(a.overlaps(&StayPeriod::new(day(5), day(11)).unwrap()));
        assert!(a.overlaps(&StayPeriod::new(day(11), day(12)).unwrap()));
        assert!(!a.overlaps(&StayPeriod::new(day(15), day(18)).unwrap()));
        assert!(!a.overlaps(&StayPeriod::new(day(1), day(10)).unwrap()));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let periods = [(1, 5), (4, 9), (5, 6), (2, 3), (8, 20)];
        for (a1, a2) in periods {
            for (b1, b2) in periods {
                let a = StayPeriod::new(day(a1), day(a2)).unwrap();
                let b = StayPeriod::new(day(b1), day(b2)).unwrap();
                assert_eq!(a.overlaps(&b), b.overlaps(&a));
                assert_eq!(a.overlaps(&b), a1 < b2 && b1 < a2);
            }
        }
    }

    #[test]
    fn test_conflict_reports_existing_dates() {
        let property = Uuid::new_v4();
        let existing = vec![booking(property, 10, 15, BookingStatus::Confirmed)];

        let err = ensure_available(
            property,
            &existing,
            &StayPeriod::new(day(14), day(18)).unwrap(),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("2025-01-10 to 2025-01-15"));

        assert!(ensure_available(
            property,
            &existing,
            &StayPeriod::new(day(15), day(18)).unwrap(),
            None
        )
        .is_ok());
    }

    #[test]
    fn test_finished_bookings_do_not_block() {
        let property = Uuid::new_v4();
        let existing = vec![
            booking(property, 10, 15, BookingStatus::CheckedOut),
            booking(property, 10, 15, BookingStatus::Cancelled),
        ];
        let proposed = StayPeriod::new(day(11), day(13)).unwrap();
        assert!(!has_overlap(property, &existing, &proposed, None));
    }

    #[test]
    fn test_other_property_and_excluded_booking_ignored() {
        let property = Uuid::new_v4();
        let current = booking(property, 10, 15, BookingStatus::Pending);
        let existing = vec![
            current.clone(),
            booking(Uuid::new_v4(), 10, 15, BookingStatus::Confirmed),
        ];
        let proposed = StayPeriod::new(day(12), day(16)).unwrap();

        assert!(has_overlap(property, &existing, &proposed, None));
        assert!(!has_overlap(property, &existing, &proposed, Some(current.id)));
    }
}
