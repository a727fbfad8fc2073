//! Room repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::access::TenantFilter;
use crate::domain::Room;
use crate::error::DomainError;

/// Rooms are scoped through the tenant of their property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomFilter {
    pub tenant: TenantFilter,
    pub property_id: Option<Uuid>,
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Room>, DomainError>;
    async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, DomainError>;
    async fn count(&self, filter: TenantFilter) -> Result<i64, DomainError>;
    async fn count_by_property(&self, property_id: &Uuid) -> Result<i64, DomainError>;
    async fn create(&self, room: &Room) -> Result<Room, DomainError>;
    async fn update(&self, room: &Room) -> Result<Room, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
