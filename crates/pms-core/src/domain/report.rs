//! Read models for revenue reports and the dashboard

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::Booking;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GuestRevenue {
    pub guest_id: Uuid,
    pub guest_name: String,
    pub total_revenue: Decimal,
    pub booking_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyRevenue {
    pub property_id: Uuid,
    pub property_name: String,
    pub total_revenue: Decimal,
    pub booking_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceRevenue {
    pub source: String,
    pub revenue: Decimal,
    pub booking_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: Decimal,
    pub total_bookings: i64,
    pub revenue_by_property: Vec<PropertyRevenue>,
    pub revenue_by_source: Vec<SourceRevenue>,
    pub daily_revenue: Vec<DailyRevenue>,
}

impl FinancialReport {
    pub fn empty(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            total_revenue: Decimal::ZERO,
            total_bookings: 0,
            revenue_by_property: Vec::new(),
            revenue_by_source: Vec::new(),
            daily_revenue: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct DashboardStats {
    pub total_properties: i64,
    pub total_rooms: i64,
    pub total_guests: i64,
    pub active_bookings: i64,
    pub total_revenue: Decimal,
    /// Percentage, rounded to two decimals.
    pub occupancy_rate: Decimal,
    pub recent_bookings: Vec<Booking>,
}
