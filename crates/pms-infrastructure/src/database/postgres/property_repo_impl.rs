// ============================================================================
// PMS Infrastructure - PostgreSQL Property Repository
// File: crates/pms-infrastructure/src/database/postgres/property_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use pms_core::access::TenantFilter;
use pms_core::domain::Property;
use pms_core::error::DomainError;
use pms_core::repositories::PropertyRepository;

use super::map_db_error;

const PROPERTY_COLUMNS: &str = "id, tenant_id, name, description, address, phone, email, \
     wifi_password, price_per_night, max_guests, created_at, updated_at";

pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct PropertyRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub wifi_password: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            description: row.description,
            address: row.address,
            phone: row.phone,
            email: row.email,
            wifi_password: row.wifi_password,
            price_per_night: row.price_per_night,
            max_guests: row.max_guests,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Property>, DomainError> {
        let sql = format!("SELECT {} FROM properties WHERE id = $1", PROPERTY_COLUMNS);
        let row: Option<PropertyRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("finding property by id"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: TenantFilter) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            "SELECT {} FROM properties WHERE ($1::uuid IS NULL OR tenant_id = $1) ORDER BY name",
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .bind(filter.tenant_id())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("listing properties"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: TenantFilter) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE ($1::uuid IS NULL OR tenant_id = $1)")
            .bind(filter.tenant_id())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("counting properties"))
    }

    async fn create(&self, property: &Property) -> Result<Property, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO properties ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {cols}
            "#,
            cols = PROPERTY_COLUMNS
        );
        let row: PropertyRow = sqlx::query_as(&sql)
            .bind(property.id)
            .bind(property.tenant_id)
            .bind(&property.name)
            .bind(&property.description)
            .bind(&property.address)
            .bind(&property.phone)
            .bind(&property.email)
            .bind(&property.wifi_password)
            .bind(property.price_per_night)
            .bind(property.max_guests)
            .bind(property.created_at)
            .bind(property.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("creating property"))?;

        Ok(row.into())
    }

    async fn update(&self, property: &Property) -> Result<Property, DomainError> {
        let sql = format!(
            r#"
            UPDATE properties
            SET
                name = $2,
                description = $3,
                address = $4,
                phone = $5,
                email = $6,
                wifi_password = $7,
                price_per_night = $8,
                max_guests = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        );
        let row: Option<PropertyRow> = sqlx::query_as(&sql)
            .bind(property.id)
            .bind(&property.name)
            .bind(&property.description)
            .bind(&property.address)
            .bind(&property.phone)
            .bind(&property.email)
            .bind(&property.wifi_password)
            .bind(property.price_per_night)
            .bind(property.max_guests)
            .bind(property.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("updating property"))?;

        row.map(Into::into).ok_or(DomainError::NotFound("Property"))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("deleting property"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Property"));
        }
        Ok(())
    }
}
