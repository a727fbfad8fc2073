//! Tenant administration, restricted to super-admins.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::auth_service::create_user;
use crate::access::require_super_admin;
use crate::deletion::TenantDeletionSummary;
use crate::domain::{NewTenant, NewUser, Tenant, TenantChanges, User, UserRole};
use crate::error::DomainError;
use crate::repositories::{TenantRepository, UserRepository};

pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { tenants, users }
    }

    pub async fn list(&self, actor: &User) -> Result<Vec<Tenant>, DomainError> {
        require_super_admin(actor)?;
        self.tenants.list().await
    }

    pub async fn get(&self, actor: &User, id: &Uuid) -> Result<Tenant, DomainError> {
        require_super_admin(actor)?;
        self.find(id).await
    }

    pub async fn create(&self, actor: &User, draft: NewTenant) -> Result<Tenant, DomainError> {
        require_super_admin(actor)?;
        let tenant = Tenant::new(draft)?;
        self.ensure_unique(&tenant).await?;

        let created = self.tenants.create(&tenant).await?;
        info!(tenant_id = %created.id, subdomain = %created.subdomain, "Tenant created");
        Ok(created)
    }

    pub async fn update(&self, actor: &User, id: &Uuid, changes: TenantChanges) -> Result<Tenant, DomainError> {
        require_super_admin(actor)?;
        let mut tenant = self.find(id).await?;
        tenant.apply(changes)?;
        self.ensure_unique(&tenant).await?;

        self.tenants.update(&tenant).await
    }

    /// Deletes the tenant and everything it owns.
    pub async fn delete(&self, actor: &User, id: &Uuid) -> Result<TenantDeletionSummary, DomainError> {
        require_super_admin(actor)?;
        let tenant = self.find(id).await?;

        let summary = self.tenants.delete_cascade(&tenant.id).await?;
        info!(
            tenant_id = %tenant.id,
            users = summary.users,
            properties = summary.properties,
            rooms = summary.rooms,
            guests = summary.guests,
            bookings = summary.bookings,
            "Tenant deleted"
        );
        Ok(summary)
    }

    /// Creates the first administrator of a tenant.
    pub async fn create_admin(&self, actor: &User, tenant_id: &Uuid, mut draft: NewUser) -> Result<User, DomainError> {
        require_super_admin(actor)?;
        let tenant = self.find(tenant_id).await?;

        draft.role = UserRole::Admin;
        create_user(self.users.as_ref(), draft, Some(tenant.id)).await
    }

    async fn find(&self, id: &Uuid) -> Result<Tenant, DomainError> {
        self.tenants.find_by_id(id).await?.ok_or(DomainError::NotFound("Tenant"))
    }

    /// Subdomain and custom domain must not be used by another tenant.
    async fn ensure_unique(&self, tenant: &Tenant) -> Result<(), DomainError> {
        if let Some(existing) = self.tenants.find_by_subdomain(&tenant.subdomain).await? {
            if existing.id != tenant.id {
                return Err(DomainError::Conflict(format!(
                    "Subdomain '{}' is already taken",
                    tenant.subdomain
                )));
            }
        }
        if let Some(domain) = &tenant.domain {
            if let Some(existing) = self.tenants.find_by_domain(domain).await? {
                if existing.id != tenant.id {
                    return Err(DomainError::Conflict(format!("Domain '{}' is already taken", domain)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockTenantRepository, MockUserRepository};
    use crate::services::test_support::{tenant, user};
    use mockall::predicate::eq;

    fn root() -> User {
        user(UserRole::SuperAdmin, None)
    }

    fn draft(subdomain: &str) -> NewTenant {
        NewTenant {
            name: "Acme Stays".to_string(),
            subdomain: subdomain.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_only_super_admin_manages_tenants() {
        let svc = TenantService::new(Arc::new(MockTenantRepository::new()), Arc::new(MockUserRepository::new()));
        let admin = user(UserRole::Admin, Some(Uuid::new_v4()));
        assert!(matches!(svc.list(&admin).await, Err(DomainError::Forbidden(_))));
        assert!(matches!(svc.create(&admin, draft("acme")).await, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_subdomain() {
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_find_by_subdomain()
            .with(eq("acme"))
            .returning(|_| Ok(Some(tenant("acme"))));

        let svc = TenantService::new(Arc::new(tenants), Arc::new(MockUserRepository::new()));
        let err = svc.create(&root(), draft("ACME")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_tenant() {
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_subdomain().returning(|_| Ok(None));
        tenants.expect_create().times(1).returning(|t| Ok(t.clone()));

        let svc = TenantService::new(Arc::new(tenants), Arc::new(MockUserRepository::new()));
        let created = svc.create(&root(), draft("Acme")).await.unwrap();
        assert_eq!(created.subdomain, "acme");
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_update_keeps_own_subdomain() {
        let existing = tenant("acme");
        let id = existing.id;
        let mut tenants = MockTenantRepository::new();
        let found = existing.clone();
        tenants.expect_find_by_id().returning(move |_| Ok(Some(found.clone())));
        let same = existing.clone();
        tenants.expect_find_by_subdomain().returning(move |_| Ok(Some(same.clone())));
        tenants.expect_update().returning(|t| Ok(t.clone()));

        let svc = TenantService::new(Arc::new(tenants), Arc::new(MockUserRepository::new()));
        let updated = svc
            .update(
                &root(),
                &id,
                TenantChanges {
                    name: Some("Acme Holidays".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Acme Holidays");
    }

    #[tokio::test]
    async fn test_delete_reports_cascade_counts() {
        let acme = tenant("acme");
        let id = acme.id;
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(move |_| Ok(Some(acme.clone())));
        tenants.expect_delete_cascade().with(eq(id)).times(1).returning(|_| {
            Ok(TenantDeletionSummary {
                users: 2,
                properties: 1,
                rooms: 0,
                guests: 4,
                bookings: 10,
            })
        });

        let svc = TenantService::new(Arc::new(tenants), Arc::new(MockUserRepository::new()));
        let summary = svc.delete(&root(), &id).await.unwrap();
        assert_eq!(
            (summary.users, summary.properties, summary.guests, summary.bookings),
            (2, 1, 4, 10)
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_tenant() {
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(|_| Ok(None));
        let svc = TenantService::new(Arc::new(tenants), Arc::new(MockUserRepository::new()));
        assert!(matches!(
            svc.delete(&root(), &Uuid::new_v4()).await,
            Err(DomainError::NotFound("Tenant"))
        ));
    }

    #[tokio::test]
    async fn test_create_admin_binds_tenant_and_role() {
        let acme = tenant("acme");
        let acme_id = acme.id;
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(move |_| Ok(Some(acme.clone())));
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_create().returning(|u| Ok(u.clone()));

        let svc = TenantService::new(Arc::new(tenants), Arc::new(users));
        let admin = svc
            .create_admin(
                &root(),
                &acme_id,
                NewUser {
                    email: "owner@acme.test".to_string(),
                    username: "owner".to_string(),
                    password: "long-enough-password".to_string(),
                    first_name: "Olive".to_string(),
                    last_name: "Owner".to_string(),
                    role: UserRole::Staff,
                    is_active: true,
                    tenant_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.tenant_id, Some(acme_id));
    }
}
