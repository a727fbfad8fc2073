//! Room status derivation

use chrono::NaiveDate;

use super::overlap::StayPeriod;
use crate::domain::{Booking, Room, RoomStatus};

/// Computes the status shown for `room` on `today`.
///
/// Bookings are taken for a whole property, so occupancy is judged on the
/// room's property, not on the room itself. Only confirmed and checked-in
/// bookings count. The result is never persisted.
pub fn derive_status(room: &Room, bookings: &[Booking], today: NaiveDate) -> RoomStatus {
    let mut occupying = bookings
        .iter()
        .filter(|b| b.property_id == room.property_id && b.status.is_occupying());

    if occupying.clone().any(|b| StayPeriod::of(b).contains(today)) {
        return RoomStatus::Occupied;
    }
    if occupying.any(|b| b.check_out_date == today) {
        return RoomStatus::Cleaning;
    }
    room.status.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingStatus;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn room(status: Option<RoomStatus>) -> Room {
        Room {
            id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            name: "Room 1".to_string(),
            description: None,
            capacity: 2,
            price_per_night: None,
            keybox_code: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stay(room: &Room, from: NaiveDate, to: NaiveDate, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            property_id: room.property_id,
            room_id: None,
            guest_id: Uuid::new_v4(),
            check_in_date: from,
            check_out_date: to,
            guests_count: 1,
            total_amount: None,
            status,
            booking_source: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_checked_in_booking_covering_today_is_occupied() {
        let r = room(None);
        let bookings = vec![stay(&r, today() - Duration::days(2), today() + Duration::days(1), BookingStatus::CheckedIn)];
        assert_eq!(derive_status(&r, &bookings, today()), RoomStatus::Occupied);
    }

    #[test]
    fn test_checkout_today_is_cleaning() {
        let r = room(None);
        let bookings = vec![stay(&r, today() - Duration::days(3), today(), BookingStatus::CheckedIn)];
        assert_eq!(derive_status(&r, &bookings, today()), RoomStatus::Cleaning);
    }

    #[test]
    fn test_occupied_wins_over_cleaning() {
        let r = room(None);
        let bookings = vec![
            stay(&r, today() - Duration::days(3), today(), BookingStatus::CheckedIn),
            stay(&r, today(), today() + Duration::days(2), BookingStatus::Confirmed),
        ];
        assert_eq!(derive_status(&r, &bookings, today()), RoomStatus::Occupied);
    }

    #[test]
    fn test_pending_and_other_properties_ignored() {
        let r = room(Some(RoomStatus::Maintenance));
        let mut foreign = stay(&r, today(), today() + Duration::days(1), BookingStatus::Confirmed);
        foreign.property_id = Uuid::new_v4();
        let bookings = vec![
            stay(&r, today(), today() + Duration::days(1), BookingStatus::Pending),
            foreign,
        ];
        assert_eq!(derive_status(&r, &bookings, today()), RoomStatus::Maintenance);
    }

    #[test]
    fn test_fallback_defaults_to_available() {
        let r = room(None);
        assert_eq!(derive_status(&r, &[], today()), RoomStatus::Available);
        assert_eq!(derive_status(&r, &[], today()), derive_status(&r, &[], today()));
    }
}
