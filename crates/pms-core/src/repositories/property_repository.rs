//! Property repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::access::TenantFilter;
use crate::domain::Property;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Property>, DomainError>;
    async fn list(&self, filter: TenantFilter) -> Result<Vec<Property>, DomainError>;
    async fn count(&self, filter: TenantFilter) -> Result<i64, DomainError>;
    async fn create(&self, property: &Property) -> Result<Property, DomainError>;
    async fn update(&self, property: &Property) -> Result<Property, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
