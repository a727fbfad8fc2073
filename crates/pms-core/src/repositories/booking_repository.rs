//! Booking repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::access::TenantFilter;
use crate::domain::{Booking, BookingStatus};
use crate::error::DomainError;

/// Bookings are scoped through the tenant of their property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingFilter {
    pub tenant: TenantFilter,
    pub property_id: Option<Uuid>,
    pub guest_id: Option<Uuid>,
}

impl BookingFilter {
    pub fn scoped(tenant: TenantFilter) -> Self {
        Self {
            tenant,
            property_id: None,
            guest_id: None,
        }
    }
}

/// Sum and count of checked-out bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevenueTotal {
    pub total: Decimal,
    pub count: i64,
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, DomainError>;

    /// Newest first.
    async fn list(&self, filter: BookingFilter) -> Result<Vec<Booking>, DomainError>;

    /// Most recently created bookings, at most `limit`.
    async fn recent(&self, filter: TenantFilter, limit: i64) -> Result<Vec<Booking>, DomainError>;

    /// Bookings of the given properties and statuses whose stay touches the
    /// inclusive window `[from, until]`.
    async fn list_in_window(
        &self,
        property_ids: &[Uuid],
        statuses: &[BookingStatus],
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Checked-out bookings whose check-out date falls inside `[start, end]`.
    async fn list_checked_out_between(
        &self,
        filter: TenantFilter,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError>;

    async fn count_with_status(
        &self,
        filter: TenantFilter,
        statuses: &[BookingStatus],
    ) -> Result<i64, DomainError>;
    async fn count_by_property(&self, property_id: &Uuid) -> Result<i64, DomainError>;
    async fn count_by_room(&self, room_id: &Uuid) -> Result<i64, DomainError>;
    async fn count_by_guest(&self, guest_id: &Uuid) -> Result<i64, DomainError>;

    async fn revenue_by_guest(&self, guest_id: &Uuid) -> Result<RevenueTotal, DomainError>;
    async fn revenue_by_property(&self, property_id: &Uuid) -> Result<RevenueTotal, DomainError>;
    async fn total_revenue(&self, filter: TenantFilter) -> Result<Decimal, DomainError>;

    async fn create(&self, booking: &Booking) -> Result<Booking, DomainError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
