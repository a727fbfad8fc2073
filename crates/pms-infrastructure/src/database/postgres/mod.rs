//! PostgreSQL repository implementations

pub mod tenant_repo_impl;
pub mod user_repo_impl;
pub mod property_repo_impl;
pub mod room_repo_impl;
pub mod guest_repo_impl;
pub mod booking_repo_impl;

pub use booking_repo_impl::PgBookingRepository;
pub use guest_repo_impl::PgGuestRepository;
pub use property_repo_impl::PgPropertyRepository;
pub use room_repo_impl::PgRoomRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use user_repo_impl::PgUserRepository;

use tracing::error;

use pms_core::error::DomainError;

const EXCLUSION_VIOLATION: &str = "23P01";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a sqlx error to a domain error, turning constraint violations into
/// conflicts the caller can act on.
pub(crate) fn map_db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        if let sqlx::Error::Database(db) = &e {
            match db.code().as_deref() {
                Some(EXCLUSION_VIOLATION) => {
                    return DomainError::Conflict(
                        "Property is already booked for the selected dates".to_string(),
                    );
                }
                Some(UNIQUE_VIOLATION) => {
                    return DomainError::Conflict(unique_violation_message(db.constraint()));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return DomainError::validation("Referenced record does not exist");
                }
                _ => {}
            }
        }
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// True when the error is the booking exclusion constraint firing.
pub(crate) fn is_exclusion_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(EXCLUSION_VIOLATION))
}

fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("tenants_subdomain_key") => "Subdomain is already taken",
        Some("tenants_domain_key") => "Domain is already taken",
        Some("users_email_key") => "Email already registered",
        Some("users_username_key") => "Username already taken",
        _ => "Record already exists",
    }
    .to_string()
}
