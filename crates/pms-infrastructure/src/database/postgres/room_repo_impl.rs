// ============================================================================
// PMS Infrastructure - PostgreSQL Room Repository
// File: crates/pms-infrastructure/src/database/postgres/room_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use pms_core::access::TenantFilter;
use pms_core::domain::{Room, RoomStatus};
use pms_core::error::DomainError;
use pms_core::repositories::{RoomFilter, RoomRepository};

use super::map_db_error;

const ROOM_COLUMNS: &str = "r.id, r.property_id, r.name, r.description, r.capacity, \
     r.price_per_night, r.keybox_code, r.status, r.created_at, r.updated_at";

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoomRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub price_per_night: Option<Decimal>,
    pub keybox_code: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            property_id: row.property_id,
            name: row.name,
            description: row.description,
            capacity: row.capacity,
            price_per_night: row.price_per_night,
            keybox_code: row.keybox_code,
            status: row.status.as_deref().and_then(RoomStatus::from_str),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Room>, DomainError> {
        let sql = format!("SELECT {} FROM rooms r WHERE r.id = $1", ROOM_COLUMNS);
        let row: Option<RoomRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("finding room by id"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM rooms r JOIN properties p ON p.id = r.property_id WHERE TRUE",
            ROOM_COLUMNS
        ));
        if let TenantFilter::Only(tenant_id) = filter.tenant {
            query.push(" AND p.tenant_id = ").push_bind(tenant_id);
        }
        if let Some(property_id) = filter.property_id {
            query.push(" AND r.property_id = ").push_bind(property_id);
        }
        query.push(" ORDER BY p.name, r.name");

        let rows: Vec<RoomRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("listing rooms"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: TenantFilter) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM rooms r
            JOIN properties p ON p.id = r.property_id
            WHERE ($1::uuid IS NULL OR p.tenant_id = $1)
            "#,
        )
        .bind(filter.tenant_id())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("counting rooms"))
    }

    async fn count_by_property(&self, property_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE property_id = $1")
            .bind(property_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("counting rooms of property"))
    }

    async fn create(&self, room: &Room) -> Result<Room, DomainError> {
        let row: RoomRow = sqlx::query_as(
            r#"
            INSERT INTO rooms AS r (
                id, property_id, name, description, capacity,
                price_per_night, keybox_code, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                r.id, r.property_id, r.name, r.description, r.capacity,
                r.price_per_night, r.keybox_code, r.status, r.created_at, r.updated_at
            "#,
        )
        .bind(room.id)
        .bind(room.property_id)
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.capacity)
        .bind(room.price_per_night)
        .bind(&room.keybox_code)
        .bind(room.status.map(|s| s.as_str()))
        .bind(room.created_at)
        .bind(room.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("creating room"))?;

        Ok(row.into())
    }

    async fn update(&self, room: &Room) -> Result<Room, DomainError> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
            UPDATE rooms AS r
            SET
                name = $2,
                description = $3,
                capacity = $4,
                price_per_night = $5,
                keybox_code = $6,
                status = $7,
                updated_at = $8
            WHERE r.id = $1
            RETURNING
                r.id, r.property_id, r.name, r.description, r.capacity,
                r.price_per_night, r.keybox_code, r.status, r.created_at, r.updated_at
            "#,
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.capacity)
        .bind(room.price_per_night)
        .bind(&room.keybox_code)
        .bind(room.status.map(|s| s.as_str()))
        .bind(room.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("updating room"))?;

        row.map(Into::into).ok_or(DomainError::NotFound("Room"))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error("deleting room"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Room"));
        }
        Ok(())
    }
}
