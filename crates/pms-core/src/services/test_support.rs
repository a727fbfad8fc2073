//! Fixtures shared by the service tests.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Booking, BookingStatus, Guest, Property, Room, RoomStatus, Tenant};

pub use crate::access::scope::test_support::user;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn tenant(subdomain: &str) -> Tenant {
    Tenant {
        id: Uuid::new_v4(),
        name: format!("{} Stays", subdomain),
        subdomain: subdomain.to_string(),
        domain: None,
        email: None,
        phone: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn property(tenant_id: Uuid) -> Property {
    Property {
        id: Uuid::new_v4(),
        tenant_id,
        name: "Sea View".to_string(),
        description: None,
        address: None,
        phone: None,
        email: None,
        wifi_password: None,
        price_per_night: Some(Decimal::new(12000, 2)),
        max_guests: 4,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn room(property_id: Uuid) -> Room {
    Room {
        id: Uuid::new_v4(),
        property_id,
        name: "Room 1".to_string(),
        description: None,
        capacity: 2,
        price_per_night: None,
        keybox_code: None,
        status: Some(RoomStatus::Available),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn guest(tenant_id: Uuid) -> Guest {
    Guest {
        id: Uuid::new_v4(),
        tenant_id,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: None,
        phone: None,
        whatsapp: None,
        nationality: None,
        id_number: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn booking(
    property_id: Uuid,
    guest_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: BookingStatus,
) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        property_id,
        room_id: None,
        guest_id,
        check_in_date: check_in,
        check_out_date: check_out,
        guests_count: 2,
        total_amount: Some(Decimal::new(50000, 2)),
        status,
        booking_source: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
