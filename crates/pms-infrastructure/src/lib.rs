//! # PMS Infrastructure
//!
//! PostgreSQL implementations (adapters) of the core repository traits.

pub mod database;

pub use database::{
    create_pool, postgres_repositories, run_migrations, PgBookingRepository, PgGuestRepository,
    PgPropertyRepository, PgRoomRepository, PgTenantRepository, PgUserRepository,
};
