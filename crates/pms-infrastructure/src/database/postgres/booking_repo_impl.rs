// ============================================================================
// PMS Infrastructure - PostgreSQL Booking Repository
// File: crates/pms-infrastructure/src/database/postgres/booking_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, warn};
use uuid::Uuid;

use pms_core::access::TenantFilter;
use pms_core::domain::{Booking, BookingStatus};
use pms_core::error::DomainError;
use pms_core::repositories::{BookingFilter, BookingRepository, RevenueTotal};

use super::{is_exclusion_violation, map_db_error};

const BOOKING_COLUMNS: &str = "b.id, b.property_id, b.room_id, b.guest_id, b.check_in_date, \
     b.check_out_date, b.guests_count, b.total_amount, b.status, b.booking_source, b.notes, \
     b.created_at, b.updated_at";

const FROM_SCOPED: &str = " FROM bookings b JOIN properties p ON p.id = b.property_id WHERE TRUE";

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Turns a failed write into a domain error. When the exclusion
    /// constraint fired, the booking now holding the dates is looked up so
    /// the caller gets the same message as the service-level check.
    async fn write_error(&self, booking: &Booking, e: sqlx::Error, context: &'static str) -> DomainError {
        if !is_exclusion_violation(&e) {
            return map_db_error(context)(e);
        }

        let holder: Result<Option<(NaiveDate, NaiveDate)>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT check_in_date, check_out_date
            FROM bookings
            WHERE property_id = $1
              AND id <> $2
              AND status = ANY($3)
              AND check_in_date < $5
              AND check_out_date > $4
            ORDER BY check_in_date
            LIMIT 1
            "#,
        )
        .bind(booking.property_id)
        .bind(booking.id)
        .bind(status_strings(&BookingStatus::BLOCKING))
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .fetch_optional(&self.pool)
        .await;

        match holder {
            Ok(Some((check_in, check_out))) => DomainError::BookingOverlap { check_in, check_out },
            Ok(None) => map_db_error(context)(e),
            Err(lookup) => {
                warn!("Could not load conflicting booking: {}", lookup);
                map_db_error(context)(e)
            }
        }
    }
}

#[derive(Debug, FromRow)]
struct BookingRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests_count: i32,
    pub total_amount: Option<Decimal>,
    pub status: String,
    pub booking_source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            property_id: row.property_id,
            room_id: row.room_id,
            guest_id: row.guest_id,
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            guests_count: row.guests_count,
            total_amount: row.total_amount,
            status: BookingStatus::from_str(&row.status).unwrap_or_default(),
            booking_source: row.booking_source,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct RevenueRow {
    pub total: Option<Decimal>,
    pub count: i64,
}

impl From<RevenueRow> for RevenueTotal {
    fn from(row: RevenueRow) -> Self {
        RevenueTotal {
            total: row.total.unwrap_or(Decimal::ZERO),
            count: row.count,
        }
    }
}

fn status_strings(statuses: &[BookingStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

fn push_tenant(query: &mut QueryBuilder<'_, Postgres>, filter: TenantFilter) {
    if let TenantFilter::Only(tenant_id) = filter {
        query.push(" AND p.tenant_id = ").push_bind(tenant_id);
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, DomainError> {
        let sql = format!("SELECT {} FROM bookings b WHERE b.id = $1", BOOKING_COLUMNS);
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("finding booking by id"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: BookingFilter) -> Result<Vec<Booking>, DomainError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {}{}", BOOKING_COLUMNS, FROM_SCOPED));
        push_tenant(&mut query, filter.tenant);
        if let Some(property_id) = filter.property_id {
            query.push(" AND b.property_id = ").push_bind(property_id);
        }
        if let Some(guest_id) = filter.guest_id {
            query.push(" AND b.guest_id = ").push_bind(guest_id);
        }
        query.push(" ORDER BY b.created_at DESC");

        let rows: Vec<BookingRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("listing bookings"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn recent(&self, filter: TenantFilter, limit: i64) -> Result<Vec<Booking>, DomainError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {}{}", BOOKING_COLUMNS, FROM_SCOPED));
        push_tenant(&mut query, filter);
        query.push(" ORDER BY b.created_at DESC LIMIT ").push_bind(limit);

        let rows: Vec<BookingRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("listing recent bookings"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_in_window(
        &self,
        property_ids: &[Uuid],
        statuses: &[BookingStatus],
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError> {
        if property_ids.is_empty() || statuses.is_empty() {
            return Ok(Vec::new());
        }
        debug!(properties = property_ids.len(), %from, %until, "Loading bookings in window");

        let sql = format!(
            r#"
            SELECT {}
            FROM bookings b
            WHERE b.property_id = ANY($1)
              AND b.status = ANY($2)
              AND b.check_in_date <= $4
              AND b.check_out_date >= $3
            ORDER BY b.check_in_date
            "#,
            BOOKING_COLUMNS
        );
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(property_ids)
            .bind(status_strings(statuses))
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("loading bookings in window"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_checked_out_between(
        &self,
        filter: TenantFilter,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {}{}", BOOKING_COLUMNS, FROM_SCOPED));
        push_tenant(&mut query, filter);
        query
            .push(" AND b.status = ")
            .push_bind(BookingStatus::CheckedOut.as_str())
            .push(" AND b.check_out_date >= ")
            .push_bind(start)
            .push(" AND b.check_out_date <= ")
            .push_bind(end)
            .push(" ORDER BY b.check_out_date");

        let rows: Vec<BookingRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("loading checked-out bookings"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_with_status(&self, filter: TenantFilter, statuses: &[BookingStatus]) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM bookings b
            JOIN properties p ON p.id = b.property_id
            WHERE ($1::uuid IS NULL OR p.tenant_id = $1)
              AND b.status = ANY($2)
            "#,
        )
        .bind(filter.tenant_id())
        .bind(status_strings(statuses))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("counting bookings by status"))
    }

    async fn count_by_property(&self, property_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE property_id = $1")
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("counting bookings of property"))
    }

    async fn count_by_room(&self, room_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("counting bookings of room"))
    }

    async fn count_by_guest(&self, guest_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE guest_id = $1")
            .bind(guest_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("counting bookings of guest"))
    }

    async fn revenue_by_guest(&self, guest_id: &Uuid) -> Result<RevenueTotal, DomainError> {
        let row: RevenueRow = sqlx::query_as(
            r#"
            SELECT SUM(total_amount) AS total, COUNT(*) AS count
            FROM bookings
            WHERE guest_id = $1 AND status = 'checked_out'
            "#,
        )
        .bind(guest_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("summing guest revenue"))?;

        Ok(row.into())
    }

    async fn revenue_by_property(&self, property_id: &Uuid) -> Result<RevenueTotal, DomainError> {
        let row: RevenueRow = sqlx::query_as(
            r#"
            SELECT SUM(total_amount) AS total, COUNT(*) AS count
            FROM bookings
            WHERE property_id = $1 AND status = 'checked_out'
            "#,
        )
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("summing property revenue"))?;

        Ok(row.into())
    }

    async fn total_revenue(&self, filter: TenantFilter) -> Result<Decimal, DomainError> {
        let total: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(b.total_amount)
            FROM bookings b
            JOIN properties p ON p.id = b.property_id
            WHERE ($1::uuid IS NULL OR p.tenant_id = $1)
              AND b.status = 'checked_out'
            "#,
        )
        .bind(filter.tenant_id())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("summing revenue"))?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn create(&self, booking: &Booking) -> Result<Booking, DomainError> {
        let row: Result<BookingRow, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO bookings AS b (
                id, property_id, room_id, guest_id, check_in_date, check_out_date,
                guests_count, total_amount, status, booking_source, notes,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING
                b.id, b.property_id, b.room_id, b.guest_id, b.check_in_date,
                b.check_out_date, b.guests_count, b.total_amount, b.status,
                b.booking_source, b.notes, b.created_at, b.updated_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.property_id)
        .bind(booking.room_id)
        .bind(booking.guest_id)
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.guests_count)
        .bind(booking.total_amount)
        .bind(booking.status.as_str())
        .bind(&booking.booking_source)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => Ok(row.into()),
            Err(e) => Err(self.write_error(booking, e, "creating booking").await),
        }
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, DomainError> {
        let row: Result<Option<BookingRow>, sqlx::Error> = sqlx::query_as(
            r#"
            UPDATE bookings AS b
            SET
                room_id = $2,
                check_in_date = $3,
                check_out_date = $4,
                guests_count = $5,
                total_amount = $6,
                status = $7,
                booking_source = $8,
                notes = $9,
                updated_at = $10
            WHERE b.id = $1
            RETURNING
                b.id, b.property_id, b.room_id, b.guest_id, b.check_in_date,
                b.check_out_date, b.guests_count, b.total_amount, b.status,
                b.booking_source, b.notes, b.created_at, b.updated_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.room_id)
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.guests_count)
        .bind(booking.total_amount)
        .bind(booking.status.as_str())
        .bind(&booking.booking_source)
        .bind(&booking.notes)
        .bind(booking.updated_at)
        .fetch_optional(&self.pool)
        .await;

        match row {
            Ok(row) => row.map(Into::into).ok_or(DomainError::NotFound("Booking")),
            Err(e) => Err(self.write_error(booking, e, "updating booking").await),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("deleting booking"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Booking"));
        }
        Ok(())
    }
}
