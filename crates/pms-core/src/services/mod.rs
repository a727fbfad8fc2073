//! Application services
//!
//! Each service receives the calling user explicitly and applies the access
//! rules before touching a repository.

pub mod auth_service;
pub mod booking_service;
pub mod dashboard_service;
pub mod guest_service;
pub mod property_service;
pub mod report_service;
pub mod room_service;
pub mod tenant_resolver;
pub mod tenant_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::{AuthService, LoginResult, PortalSettings};
pub use booking_service::BookingService;
pub use dashboard_service::DashboardService;
pub use guest_service::GuestService;
pub use property_service::PropertyService;
pub use report_service::ReportService;
pub use room_service::RoomService;
pub use tenant_resolver::{HostMatch, TenantResolver};
pub use tenant_service::TenantService;
