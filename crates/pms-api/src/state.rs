//! Shared application state

use std::sync::Arc;

use pms_core::repositories::Repositories;
use pms_core::services::{
    AuthService, BookingService, DashboardService, GuestService, PortalSettings, PropertyService,
    ReportService, RoomService, TenantResolver, TenantService,
};
use pms_security::JwtService;
use pms_shared::config::TenancySettings;

/// Services shared across handlers, all backed by the same repositories.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tenant_resolver: Arc<TenantResolver>,
    pub tenants: Arc<TenantService>,
    pub properties: Arc<PropertyService>,
    pub rooms: Arc<RoomService>,
    pub guests: Arc<GuestService>,
    pub bookings: Arc<BookingService>,
    pub reports: Arc<ReportService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(repos: Repositories, jwt: JwtService, tenancy: &TenancySettings) -> Self {
        let portal = PortalSettings {
            scheme: tenancy.portal_scheme.clone(),
            base_domain: tenancy.primary_base_domain().to_string(),
        };

        Self {
            auth: Arc::new(AuthService::new(
                repos.users.clone(),
                repos.tenants.clone(),
                jwt,
                portal,
            )),
            tenant_resolver: Arc::new(TenantResolver::new(
                repos.tenants.clone(),
                tenancy.base_domains.clone(),
            )),
            tenants: Arc::new(TenantService::new(repos.tenants.clone(), repos.users.clone())),
            properties: Arc::new(PropertyService::new(
                repos.properties.clone(),
                repos.rooms.clone(),
                repos.bookings.clone(),
                repos.tenants.clone(),
            )),
            rooms: Arc::new(RoomService::new(
                repos.rooms.clone(),
                repos.properties.clone(),
                repos.bookings.clone(),
            )),
            guests: Arc::new(GuestService::new(
                repos.guests.clone(),
                repos.bookings.clone(),
                repos.tenants.clone(),
            )),
            bookings: Arc::new(BookingService::new(
                repos.bookings.clone(),
                repos.properties.clone(),
                repos.rooms.clone(),
                repos.guests.clone(),
            )),
            reports: Arc::new(ReportService::new(
                repos.properties.clone(),
                repos.guests.clone(),
                repos.bookings.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(
                repos.properties,
                repos.rooms,
                repos.guests,
                repos.bookings,
            )),
        }
    }
}
