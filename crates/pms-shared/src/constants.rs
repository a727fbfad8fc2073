//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 1800;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604800;

/// Header injected by the edge proxy carrying the addressed tenant subdomain.
pub const TENANT_SUBDOMAIN_HEADER: &str = "x-tenant-subdomain";

pub const DEFAULT_REPORT_WINDOW_DAYS: i64 = 30;
pub const RECENT_BOOKINGS_LIMIT: i64 = 5;
