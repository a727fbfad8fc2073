//! # PMS Core - Domain Module
//!
//! Domain entities for the property management backend.

pub mod tenant;
pub mod user;
pub mod property;
pub mod room;
pub mod guest;
pub mod booking;
pub mod report;

// Re-export all entities and enums
pub use tenant::{NewTenant, Tenant, TenantChanges};
pub use user::{NewUser, User, UserRole};
pub use property::{NewProperty, Property, PropertyChanges};
pub use room::{NewRoom, Room, RoomChanges, RoomStatus, RoomWithStatus};
pub use guest::{Guest, GuestChanges, NewGuest};
pub use booking::{Booking, BookingChanges, BookingStatus, NewBooking};
pub use report::{
    DailyRevenue, DashboardStats, FinancialReport, GuestRevenue, PropertyRevenue, SourceRevenue,
};
