//! PostgreSQL repository integration tests.
//!
//! Each test talks to a real PostgreSQL started through testcontainers, so
//! the tenant cascade and the booking exclusion constraint are exercised
//! against the migrated schema rather than mocks.
//!
//! Run with (requires Docker):
//!   cargo test -p pms-infrastructure --features integration

#![cfg(feature = "integration")]

use chrono::NaiveDate;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use pms_core::deletion::TenantDeletionSummary;
use pms_core::domain::{
    Booking, BookingStatus, Guest, NewBooking, NewGuest, NewProperty, NewTenant, NewUser, Property, Tenant,
    UserRole,
};
use pms_core::error::DomainError;
use pms_core::repositories::Repositories;
use pms_infrastructure::{create_pool, postgres_repositories, run_migrations};
use pms_shared::config::DatabaseSettings;

/// One container for the whole test binary; every test seeds its own tenant.
struct SharedPg {
    url: String,
    _container: ContainerAsync<Postgres>,
}

static SHARED_PG: OnceCell<SharedPg> = OnceCell::const_new();

fn settings(url: &str) -> DatabaseSettings {
    DatabaseSettings {
        url: url.to_string(),
        max_connections: 5,
        min_connections: 1,
        acquire_timeout_seconds: 10,
        run_migrations: true,
    }
}

async fn shared_pg() -> &'static SharedPg {
    SHARED_PG
        .get_or_init(|| async {
            let container = Postgres::default()
                .start()
                .await
                .expect("Failed to start PostgreSQL container");
            let host = container.get_host().await.expect("Failed to get host");
            let port = container
                .get_host_port_ipv4(5432)
                .await
                .expect("Failed to get host port");
            let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let pool = create_pool(&settings(&url)).await.expect("Failed to connect");
            run_migrations(&pool).await.expect("Failed to run migrations");
            pool.close().await;

            SharedPg { url, _container: container }
        })
        .await
}

/// Pools are bound to the runtime of the test that created them.
async fn repositories() -> Repositories {
    let pg = shared_pg().await;
    let pool = create_pool(&settings(&pg.url)).await.expect("Failed to connect");
    postgres_repositories(pool)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_tenant(repos: &Repositories) -> Tenant {
    let suffix = Uuid::new_v4().simple().to_string();
    let tenant = Tenant::new(NewTenant {
        name: "Riad Cascade".to_string(),
        subdomain: format!("riad-{}", &suffix[..12]),
        ..Default::default()
    })
    .unwrap();
    repos.tenants.create(&tenant).await.unwrap()
}

async fn seed_user(repos: &Repositories, tenant: &Tenant, n: usize) {
    let tag = Uuid::new_v4().simple().to_string();
    let user = NewUser {
        email: format!("staff{}-{}@example.com", n, tag),
        username: format!("staff{}-{}", n, tag),
        password: "not-used-here".to_string(),
        first_name: "Staff".to_string(),
        last_name: format!("Member {}", n),
        role: UserRole::Staff,
        is_active: true,
        tenant_id: None,
    }
    .into_user(Some(tenant.id), "hash".to_string());
    repos.users.create(&user).await.unwrap();
}

async fn seed_property(repos: &Repositories, tenant: &Tenant) -> Property {
    let property = NewProperty {
        tenant_id: None,
        name: "Dar Atlas".to_string(),
        description: None,
        address: None,
        phone: None,
        email: None,
        wifi_password: None,
        price_per_night: None,
        max_guests: 4,
    }
    .into_property(tenant.id);
    repos.properties.create(&property).await.unwrap()
}

async fn seed_guest(repos: &Repositories, tenant: &Tenant, n: usize) -> Guest {
    let guest = NewGuest {
        tenant_id: None,
        first_name: "Guest".to_string(),
        last_name: format!("Number {}", n),
        email: None,
        phone: None,
        whatsapp: None,
        nationality: None,
        id_number: None,
        notes: None,
    }
    .into_guest(tenant.id);
    repos.guests.create(&guest).await.unwrap()
}

fn booking(property: &Property, guest: &Guest, check_in: NaiveDate, check_out: NaiveDate, status: BookingStatus) -> Booking {
    NewBooking {
        property_id: property.id,
        room_id: None,
        guest_id: guest.id,
        check_in_date: check_in,
        check_out_date: check_out,
        guests_count: 1,
        total_amount: None,
        status: Some(status),
        booking_source: None,
        notes: None,
    }
    .into_booking()
}

#[tokio::test]
async fn postgres_integration_tenant_cascade_reports_removed_rows() {
    let repos = repositories().await;
    let tenant = seed_tenant(&repos).await;

    for n in 0..2 {
        seed_user(&repos, &tenant, n).await;
    }
    let property = seed_property(&repos, &tenant).await;
    let mut guests = Vec::new();
    for n in 0..4 {
        guests.push(seed_guest(&repos, &tenant, n).await);
    }
    // Back-to-back weeks so the exclusion constraint stays quiet.
    for n in 0..10u32 {
        let check_in = date(2025, 1, 1) + chrono::Duration::days(7 * n as i64);
        let check_out = check_in + chrono::Duration::days(7);
        let stay = booking(&property, &guests[n as usize % 4], check_in, check_out, BookingStatus::Confirmed);
        repos.bookings.create(&stay).await.unwrap();
    }

    let summary = repos.tenants.delete_cascade(&tenant.id).await.unwrap();

    assert_eq!(
        summary,
        TenantDeletionSummary {
            users: 2,
            properties: 1,
            rooms: 0,
            guests: 4,
            bookings: 10,
        }
    );
    assert!(repos.tenants.find_by_id(&tenant.id).await.unwrap().is_none());
    assert!(repos.properties.find_by_id(&property.id).await.unwrap().is_none());
}

#[tokio::test]
async fn postgres_integration_cascade_of_unknown_tenant_is_not_found() {
    let repos = repositories().await;

    let err = repos.tenants.delete_cascade(&Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound("Tenant")));
}

#[tokio::test]
async fn postgres_integration_overlapping_insert_reports_holder_dates() {
    let repos = repositories().await;
    let tenant = seed_tenant(&repos).await;
    let property = seed_property(&repos, &tenant).await;
    let guest = seed_guest(&repos, &tenant, 0).await;

    let first = booking(&property, &guest, date(2025, 3, 10), date(2025, 3, 15), BookingStatus::Confirmed);
    repos.bookings.create(&first).await.unwrap();

    let second = booking(&property, &guest, date(2025, 3, 12), date(2025, 3, 14), BookingStatus::Pending);
    let err = repos.bookings.create(&second).await.unwrap_err();

    assert_eq!(err.code(), "RESOURCE_CONFLICT");
    assert!(matches!(
        err,
        DomainError::BookingOverlap { check_in, check_out }
            if check_in == date(2025, 3, 10) && check_out == date(2025, 3, 15)
    ));
    assert_eq!(err.to_string(), "Property is already booked from 2025-03-10 to 2025-03-15");
}

#[tokio::test]
async fn postgres_integration_overlapping_update_is_rejected() {
    let repos = repositories().await;
    let tenant = seed_tenant(&repos).await;
    let property = seed_property(&repos, &tenant).await;
    let guest = seed_guest(&repos, &tenant, 0).await;

    let first = booking(&property, &guest, date(2025, 4, 1), date(2025, 4, 5), BookingStatus::CheckedIn);
    repos.bookings.create(&first).await.unwrap();
    let mut later = booking(&property, &guest, date(2025, 4, 10), date(2025, 4, 12), BookingStatus::Pending);
    repos.bookings.create(&later).await.unwrap();

    later.check_in_date = date(2025, 4, 4);
    let err = repos.bookings.update(&later).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::BookingOverlap { check_in, check_out }
            if check_in == date(2025, 4, 1) && check_out == date(2025, 4, 5)
    ));
}

#[tokio::test]
async fn postgres_integration_non_blocking_bookings_may_overlap() {
    let repos = repositories().await;
    let tenant = seed_tenant(&repos).await;
    let property = seed_property(&repos, &tenant).await;
    let guest = seed_guest(&repos, &tenant, 0).await;

    let held = booking(&property, &guest, date(2025, 5, 1), date(2025, 5, 6), BookingStatus::Confirmed);
    repos.bookings.create(&held).await.unwrap();

    let cancelled = booking(&property, &guest, date(2025, 5, 2), date(2025, 5, 4), BookingStatus::Cancelled);
    assert!(repos.bookings.create(&cancelled).await.is_ok());

    // Checkout day is free for the next arrival.
    let next = booking(&property, &guest, date(2025, 5, 6), date(2025, 5, 8), BookingStatus::Pending);
    assert!(repos.bookings.create(&next).await.is_ok());
}
