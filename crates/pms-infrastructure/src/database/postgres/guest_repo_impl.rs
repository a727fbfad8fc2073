// ============================================================================
// PMS Infrastructure - PostgreSQL Guest Repository
// File: crates/pms-infrastructure/src/database/postgres/guest_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use pms_core::access::TenantFilter;
use pms_core::domain::Guest;
use pms_core::error::DomainError;
use pms_core::repositories::GuestRepository;

use super::map_db_error;

const GUEST_COLUMNS: &str = "id, tenant_id, first_name, last_name, email, phone, whatsapp, \
     nationality, id_number, notes, created_at, updated_at";

pub struct PgGuestRepository {
    pool: PgPool,
}

impl PgGuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GuestRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Guest {
            id: row.id,
            tenant_id: row.tenant_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            whatsapp: row.whatsapp,
            nationality: row.nationality,
            id_number: row.id_number,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl GuestRepository for PgGuestRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Guest>, DomainError> {
        let sql = format!("SELECT {} FROM guests WHERE id = $1", GUEST_COLUMNS);
        let row: Option<GuestRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("finding guest by id"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: TenantFilter) -> Result<Vec<Guest>, DomainError> {
        let sql = format!(
            "SELECT {} FROM guests WHERE ($1::uuid IS NULL OR tenant_id = $1) ORDER BY created_at DESC",
            GUEST_COLUMNS
        );
        let rows: Vec<GuestRow> = sqlx::query_as(&sql)
            .bind(filter.tenant_id())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("listing guests"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: TenantFilter) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE ($1::uuid IS NULL OR tenant_id = $1)")
            .bind(filter.tenant_id())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("counting guests"))
    }

    async fn create(&self, guest: &Guest) -> Result<Guest, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO guests ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {cols}
            "#,
            cols = GUEST_COLUMNS
        );
        let row: GuestRow = sqlx::query_as(&sql)
            .bind(guest.id)
            .bind(guest.tenant_id)
            .bind(&guest.first_name)
            .bind(&guest.last_name)
            .bind(&guest.email)
            .bind(&guest.phone)
            .bind(&guest.whatsapp)
            .bind(&guest.nationality)
            .bind(&guest.id_number)
            .bind(&guest.notes)
            .bind(guest.created_at)
            .bind(guest.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("creating guest"))?;

        Ok(row.into())
    }

    async fn update(&self, guest: &Guest) -> Result<Guest, DomainError> {
        let sql = format!(
            r#"
            UPDATE guests
            SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone = $5,
                whatsapp = $6,
                nationality = $7,
                id_number = $8,
                notes = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            GUEST_COLUMNS
        );
        let row: Option<GuestRow> = sqlx::query_as(&sql)
            .bind(guest.id)
            .bind(&guest.first_name)
            .bind(&guest.last_name)
            .bind(&guest.email)
            .bind(&guest.phone)
            .bind(&guest.whatsapp)
            .bind(&guest.nationality)
            .bind(&guest.id_number)
            .bind(&guest.notes)
            .bind(guest.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("updating guest"))?;

        row.map(Into::into).ok_or(DomainError::NotFound("Guest"))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("deleting guest"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Guest"));
        }
        Ok(())
    }
}
