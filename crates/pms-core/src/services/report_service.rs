//! Revenue reports
//!
//! Only checked-out bookings count as revenue.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use pms_shared::constants::DEFAULT_REPORT_WINDOW_DAYS;

use crate::access::{ensure_access, scope_of};
use crate::domain::{
    Booking, DailyRevenue, FinancialReport, GuestRevenue, PropertyRevenue, SourceRevenue, User,
};
use crate::error::DomainError;
use crate::repositories::{BookingRepository, GuestRepository, PropertyRepository};

const UNKNOWN_SOURCE: &str = "unknown";

pub struct ReportService {
    properties: Arc<dyn PropertyRepository>,
    guests: Arc<dyn GuestRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ReportService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        guests: Arc<dyn GuestRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            properties,
            guests,
            bookings,
        }
    }

    pub async fn guest_revenue(&self, actor: &User, guest_id: &Uuid) -> Result<GuestRevenue, DomainError> {
        let guest = self
            .guests
            .find_by_id(guest_id)
            .await?
            .ok_or(DomainError::NotFound("Guest"))?;
        ensure_access(actor, Some(guest.tenant_id), "Guest")?;

        let revenue = self.bookings.revenue_by_guest(&guest.id).await?;
        Ok(GuestRevenue {
            guest_id: guest.id,
            guest_name: guest.full_name(),
            total_revenue: revenue.total,
            booking_count: revenue.count,
        })
    }

    pub async fn property_revenue(&self, actor: &User, property_id: &Uuid) -> Result<PropertyRevenue, DomainError> {
        let property = self
            .properties
            .find_by_id(property_id)
            .await?
            .ok_or(DomainError::NotFound("Property"))?;
        ensure_access(actor, Some(property.tenant_id), "Property")?;

        let revenue = self.bookings.revenue_by_property(&property.id).await?;
        Ok(PropertyRevenue {
            property_id: property.id,
            property_name: property.name,
            total_revenue: revenue.total,
            booking_count: revenue.count,
        })
    }

    /// Revenue of bookings checked out within `[start, end]`.
    ///
    /// `end` defaults to `today`, `start` to thirty days before `end`.
    pub async fn financial_report(
        &self,
        actor: &User,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<FinancialReport, DomainError> {
        let end = end.unwrap_or(today);
        let start = match start {
            Some(start) => start,
            None => end
                .checked_sub_signed(Duration::days(DEFAULT_REPORT_WINDOW_DAYS))
                .ok_or_else(|| DomainError::validation("Invalid report range"))?,
        };
        if start > end {
            return Err(DomainError::validation("Start date must not be after end date"));
        }

        let Some(filter) = scope_of(actor).filter() else {
            debug!(user_id = %actor.id, "Financial report for user without tenant");
            return Ok(FinancialReport::empty(start, end));
        };

        let bookings = self.bookings.list_checked_out_between(filter, start, end).await?;
        let names: HashMap<Uuid, String> = self
            .properties
            .list(filter)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        Ok(summarize(start, end, &bookings, &names))
    }
}

fn summarize(
    start: NaiveDate,
    end: NaiveDate,
    bookings: &[Booking],
    property_names: &HashMap<Uuid, String>,
) -> FinancialReport {
    let mut report = FinancialReport::empty(start, end);
    let mut by_property: HashMap<Uuid, (Decimal, i64)> = HashMap::new();
    let mut by_source: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for booking in bookings {
        let amount = booking.total_amount.unwrap_or(Decimal::ZERO);
        report.total_revenue += amount;
        report.total_bookings += 1;

        let property = by_property.entry(booking.property_id).or_default();
        property.0 += amount;
        property.1 += 1;

        let source = booking
            .booking_source
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNKNOWN_SOURCE);
        let source = by_source.entry(source.to_string()).or_default();
        source.0 += amount;
        source.1 += 1;

        *by_day.entry(booking.check_out_date).or_default() += amount;
    }

    report.revenue_by_property = by_property
        .into_iter()
        .map(|(property_id, (total_revenue, booking_count))| PropertyRevenue {
            property_id,
            property_name: property_names.get(&property_id).cloned().unwrap_or_default(),
            total_revenue,
            booking_count,
        })
        .collect();
    report
        .revenue_by_property
        .sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue).then_with(|| a.property_name.cmp(&b.property_name)));

    report.revenue_by_source = by_source
        .into_iter()
        .map(|(source, (revenue, booking_count))| SourceRevenue {
            source,
            revenue,
            booking_count,
        })
        .collect();

    report.daily_revenue = by_day
        .into_iter()
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::TenantFilter;
    use crate::domain::{BookingStatus, UserRole};
    use crate::repositories::{MockBookingRepository, MockGuestRepository, MockPropertyRepository, RevenueTotal};
    use crate::services::test_support::{booking, date, guest, property, user};
    use mockall::predicate::eq;

    fn checked_out(property_id: Uuid, day: u32, cents: i64, source: Option<&str>) -> Booking {
        let mut b = booking(
            property_id,
            Uuid::new_v4(),
            date(2025, 2, day - 2),
            date(2025, 2, day),
            BookingStatus::CheckedOut,
        );
        b.total_amount = Some(Decimal::new(cents, 2));
        b.booking_source = source.map(str::to_string);
        b
    }

    #[test]
    fn test_summarize_groups_revenue() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let names = HashMap::from([(a, "Alpha".to_string()), (b, "Beta".to_string())]);
        let bookings = vec![
            checked_out(a, 10, 10000, Some("airbnb")),
            checked_out(a, 12, 5000, None),
            checked_out(b, 10, 20000, Some("airbnb")),
        ];

        let report = summarize(date(2025, 2, 1), date(2025, 2, 28), &bookings, &names);

        assert_eq!(report.total_revenue, Decimal::new(35000, 2));
        assert_eq!(report.total_bookings, 3);
        assert_eq!(report.revenue_by_property[0].property_name, "Beta");
        assert_eq!(report.revenue_by_property[1].booking_count, 2);
        assert_eq!(
            report.revenue_by_source,
            vec![
                SourceRevenue { source: "airbnb".to_string(), revenue: Decimal::new(30000, 2), booking_count: 2 },
                SourceRevenue { source: "unknown".to_string(), revenue: Decimal::new(5000, 2), booking_count: 1 },
            ]
        );
        assert_eq!(
            report.daily_revenue,
            vec![
                DailyRevenue { date: date(2025, 2, 10), revenue: Decimal::new(30000, 2) },
                DailyRevenue { date: date(2025, 2, 12), revenue: Decimal::new(5000, 2) },
            ]
        );
    }

    fn service(
        properties: MockPropertyRepository,
        guests: MockGuestRepository,
        bookings: MockBookingRepository,
    ) -> ReportService {
        ReportService::new(Arc::new(properties), Arc::new(guests), Arc::new(bookings))
    }

    #[tokio::test]
    async fn test_default_window_is_last_thirty_days() {
        let tenant_id = Uuid::new_v4();
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list_checked_out_between()
            .with(eq(TenantFilter::Only(tenant_id)), eq(date(2025, 2, 1)), eq(date(2025, 3, 3)))
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));
        let mut properties = MockPropertyRepository::new();
        properties.expect_list().returning(|_| Ok(Vec::new()));

        let report = service(properties, MockGuestRepository::new(), bookings)
            .financial_report(&user(UserRole::Manager, Some(tenant_id)), None, None, date(2025, 3, 3))
            .await
            .unwrap();
        assert_eq!(report.start_date, date(2025, 2, 1));
        assert_eq!(report.total_revenue, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let svc = service(MockPropertyRepository::new(), MockGuestRepository::new(), MockBookingRepository::new());
        let err = svc
            .financial_report(
                &user(UserRole::SuperAdmin, None),
                Some(date(2025, 3, 2)),
                Some(date(2025, 3, 1)),
                date(2025, 3, 3),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_earliest_end_date_rejected_without_default_start() {
        let earliest: NaiveDate = serde_json::from_str("\"-262143-01-01\"").unwrap();
        let svc = service(MockPropertyRepository::new(), MockGuestRepository::new(), MockBookingRepository::new());
        let err = svc
            .financial_report(&user(UserRole::SuperAdmin, None), None, Some(earliest), earliest)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg == "Invalid report range"));
    }

    #[tokio::test]
    async fn test_user_without_tenant_gets_empty_report() {
        let mut bookings = MockBookingRepository::new();
        bookings.expect_list_checked_out_between().never();
        let report = service(MockPropertyRepository::new(), MockGuestRepository::new(), bookings)
            .financial_report(&user(UserRole::Staff, None), None, None, date(2025, 3, 3))
            .await
            .unwrap();
        assert_eq!(report.total_bookings, 0);
    }

    #[tokio::test]
    async fn test_guest_revenue() {
        let tenant_id = Uuid::new_v4();
        let jane = guest(tenant_id);
        let id = jane.id;
        let mut guests = MockGuestRepository::new();
        guests.expect_find_by_id().returning(move |_| Ok(Some(jane.clone())));
        let mut bookings = MockBookingRepository::new();
        bookings.expect_revenue_by_guest().with(eq(id)).returning(|_| {
            Ok(RevenueTotal {
                total: Decimal::new(42000, 2),
                count: 2,
            })
        });

        let revenue = service(MockPropertyRepository::new(), guests, bookings)
            .guest_revenue(&user(UserRole::Staff, Some(tenant_id)), &id)
            .await
            .unwrap();
        assert_eq!(revenue.guest_name, "Jane Doe");
        assert_eq!(revenue.booking_count, 2);
    }

    #[tokio::test]
    async fn test_foreign_property_revenue_not_found() {
        let foreign = property(Uuid::new_v4());
        let id = foreign.id;
        let mut properties = MockPropertyRepository::new();
        properties.expect_find_by_id().returning(move |_| Ok(Some(foreign.clone())));

        let err = service(properties, MockGuestRepository::new(), MockBookingRepository::new())
            .property_revenue(&user(UserRole::Admin, Some(Uuid::new_v4())), &id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Property")));
    }
}
