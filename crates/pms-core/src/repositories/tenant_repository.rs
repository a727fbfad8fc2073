//! Tenant repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::deletion::TenantDeletionSummary;
use crate::domain::Tenant;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError>;
    /// Matches regardless of `is_active`; used for uniqueness checks.
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError>;
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError>;
    async fn find_active_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError>;
    async fn find_active_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Tenant>, DomainError>;
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, DomainError>;
    async fn update(&self, tenant: &Tenant) -> Result<Tenant, DomainError>;
    /// Removes the tenant and everything it owns in one transaction.
    async fn delete_cascade(&self, id: &Uuid) -> Result<TenantDeletionSummary, DomainError>;
}
