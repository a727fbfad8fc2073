// ============================================================================
// PMS Infrastructure - PostgreSQL Tenant Repository
// File: crates/pms-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use pms_core::deletion::TenantDeletionSummary;
use pms_core::domain::Tenant;
use pms_core::error::DomainError;
use pms_core::repositories::TenantRepository;

use super::map_db_error;

const TENANT_COLUMNS: &str =
    "id, name, subdomain, domain, email, phone, is_active, created_at, updated_at";

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, condition: &str, value: &str, context: &'static str) -> Result<Option<Tenant>, DomainError> {
        let sql = format!("SELECT {} FROM tenants WHERE {}", TENANT_COLUMNS, condition);
        let row: Option<TenantRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error(context))?;

        Ok(row.map(Into::into))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    pub domain: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            subdomain: row.subdomain,
            domain: row.domain,
            email: row.email,
            phone: row.phone,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        let sql = format!("SELECT {} FROM tenants WHERE id = $1", TENANT_COLUMNS);
        let row: Option<TenantRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("finding tenant by id"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError> {
        self.find_where("subdomain = LOWER($1)", subdomain, "finding tenant by subdomain")
            .await
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError> {
        self.find_where("domain = LOWER($1)", domain, "finding tenant by domain")
            .await
    }

    async fn find_active_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError> {
        self.find_where(
            "subdomain = LOWER($1) AND is_active = TRUE",
            subdomain,
            "resolving tenant by subdomain",
        )
        .await
    }

    async fn find_active_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError> {
        self.find_where(
            "domain = LOWER($1) AND is_active = TRUE",
            domain,
            "resolving tenant by domain",
        )
        .await
    }

    async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        let sql = format!("SELECT {} FROM tenants ORDER BY created_at DESC", TENANT_COLUMNS);
        let rows: Vec<TenantRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("listing tenants"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        info!("Creating tenant: {}", tenant.subdomain);

        let sql = format!(
            r#"
            INSERT INTO tenants ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {cols}
            "#,
            cols = TENANT_COLUMNS
        );
        let row: TenantRow = sqlx::query_as(&sql)
            .bind(tenant.id)
            .bind(&tenant.name)
            .bind(&tenant.subdomain)
            .bind(&tenant.domain)
            .bind(&tenant.email)
            .bind(&tenant.phone)
            .bind(tenant.is_active)
            .bind(tenant.created_at)
            .bind(tenant.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("creating tenant"))?;

        Ok(row.into())
    }

    async fn update(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        let sql = format!(
            r#"
            UPDATE tenants
            SET
                name = $2,
                subdomain = $3,
                domain = $4,
                email = $5,
                phone = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            TENANT_COLUMNS
        );
        let row: Option<TenantRow> = sqlx::query_as(&sql)
            .bind(tenant.id)
            .bind(&tenant.name)
            .bind(&tenant.subdomain)
            .bind(&tenant.domain)
            .bind(&tenant.email)
            .bind(&tenant.phone)
            .bind(tenant.is_active)
            .bind(tenant.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("updating tenant"))?;

        row.map(Into::into).ok_or(DomainError::NotFound("Tenant"))
    }

    async fn delete_cascade(&self, id: &Uuid) -> Result<TenantDeletionSummary, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error("starting tenant deletion"))?;

        // Children first; bookings may reach the tenant through a property
        // or through a guest.
        let bookings = sqlx::query(
            r#"
            DELETE FROM bookings
            WHERE property_id IN (SELECT id FROM properties WHERE tenant_id = $1)
               OR guest_id IN (SELECT id FROM guests WHERE tenant_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error("deleting tenant bookings"))?
        .rows_affected();

        let rooms = sqlx::query(
            "DELETE FROM rooms WHERE property_id IN (SELECT id FROM properties WHERE tenant_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error("deleting tenant rooms"))?
        .rows_affected();

        let properties = sqlx::query("DELETE FROM properties WHERE tenant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error("deleting tenant properties"))?
            .rows_affected();

        let guests = sqlx::query("DELETE FROM guests WHERE tenant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error("deleting tenant guests"))?
            .rows_affected();

        let users = sqlx::query("DELETE FROM users WHERE tenant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error("deleting tenant users"))?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error("deleting tenant"))?
            .rows_affected();
        if deleted == 0 {
            return Err(DomainError::NotFound("Tenant"));
        }

        tx.commit().await.map_err(|e: sqlx::Error| {
            error!("Database error committing tenant deletion: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(TenantDeletionSummary {
            users,
            properties,
            rooms,
            guests,
            bookings,
        })
    }
}
