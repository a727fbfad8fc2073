//! Dashboard statistics

use std::sync::Arc;

use rust_decimal::Decimal;

use pms_shared::constants::RECENT_BOOKINGS_LIMIT;

use crate::access::scope_of;
use crate::domain::{BookingStatus, DashboardStats, User};
use crate::error::DomainError;
use crate::repositories::{BookingRepository, GuestRepository, PropertyRepository, RoomRepository};

pub struct DashboardService {
    properties: Arc<dyn PropertyRepository>,
    rooms: Arc<dyn RoomRepository>,
    guests: Arc<dyn GuestRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl DashboardService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        rooms: Arc<dyn RoomRepository>,
        guests: Arc<dyn GuestRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            properties,
            rooms,
            guests,
            bookings,
        }
    }

    /// Counts across every tenant for super-admins, the caller's tenant
    /// otherwise, and zeros for users without a tenant.
    pub async fn stats(&self, actor: &User) -> Result<DashboardStats, DomainError> {
        let Some(filter) = scope_of(actor).filter() else {
            return Ok(DashboardStats::default());
        };

        let total_properties = self.properties.count(filter).await?;
        let total_rooms = self.rooms.count(filter).await?;
        let total_guests = self.guests.count(filter).await?;
        let active_bookings = self
            .bookings
            .count_with_status(filter, &BookingStatus::OCCUPYING)
            .await?;
        let total_revenue = self.bookings.total_revenue(filter).await?;
        let recent_bookings = self.bookings.recent(filter, RECENT_BOOKINGS_LIMIT).await?;

        Ok(DashboardStats {
            total_properties,
            total_rooms,
            total_guests,
            active_bookings,
            total_revenue,
            occupancy_rate: occupancy_rate(active_bookings, total_rooms),
            recent_bookings,
        })
    }
}

fn occupancy_rate(active_bookings: i64, total_rooms: i64) -> Decimal {
    if total_rooms <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(active_bookings) * Decimal::ONE_HUNDRED / Decimal::from(total_rooms)).round_dp(2)
}
