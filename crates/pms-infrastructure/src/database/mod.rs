//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

use std::sync::Arc;

use sqlx::PgPool;

use pms_core::repositories::Repositories;

pub use connection::{create_pool, run_migrations};
pub use postgres::{
    PgBookingRepository, PgGuestRepository, PgPropertyRepository, PgRoomRepository,
    PgTenantRepository, PgUserRepository,
};

/// Wires every repository to the same pool.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        tenants: Arc::new(PgTenantRepository::new(pool.clone())),
        users: Arc::new(PgUserRepository::new(pool.clone())),
        properties: Arc::new(PgPropertyRepository::new(pool.clone())),
        rooms: Arc::new(PgRoomRepository::new(pool.clone())),
        guests: Arc::new(PgGuestRepository::new(pool.clone())),
        bookings: Arc::new(PgBookingRepository::new(pool)),
    }
}
