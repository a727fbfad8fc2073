//! Guest repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::access::TenantFilter;
use crate::domain::Guest;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Guest>, DomainError>;
    /// Newest first.
    async fn list(&self, filter: TenantFilter) -> Result<Vec<Guest>, DomainError>;
    async fn count(&self, filter: TenantFilter) -> Result<i64, DomainError>;
    async fn create(&self, guest: &Guest) -> Result<Guest, DomainError>;
    async fn update(&self, guest: &Guest) -> Result<Guest, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
