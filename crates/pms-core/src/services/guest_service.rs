//! Guest service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::access::{creation_tenant, ensure_access, scope_of};
use crate::deletion::DependencyGuard;
use crate::domain::{Guest, GuestChanges, NewGuest, User};
use crate::error::DomainError;
use crate::repositories::{BookingRepository, GuestRepository, TenantRepository};

pub struct GuestService {
    guests: Arc<dyn GuestRepository>,
    bookings: Arc<dyn BookingRepository>,
    tenants: Arc<dyn TenantRepository>,
}

impl GuestService {
    pub fn new(
        guests: Arc<dyn GuestRepository>,
        bookings: Arc<dyn BookingRepository>,
        tenants: Arc<dyn TenantRepository>,
    ) -> Self {
        Self {
            guests,
            bookings,
            tenants,
        }
    }

    pub async fn list(&self, actor: &User) -> Result<Vec<Guest>, DomainError> {
        match scope_of(actor).filter() {
            Some(filter) => self.guests.list(filter).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get(&self, actor: &User, id: &Uuid) -> Result<Guest, DomainError> {
        let guest = self.guests.find_by_id(id).await?.ok_or(DomainError::NotFound("Guest"))?;
        ensure_access(actor, Some(guest.tenant_id), "Guest")?;
        Ok(guest)
    }

    pub async fn create(&self, actor: &User, draft: NewGuest) -> Result<Guest, DomainError> {
        draft.validate()?;
        let tenant_id = creation_tenant(actor, draft.tenant_id, "guest")?;
        if actor.is_super_admin() && self.tenants.find_by_id(&tenant_id).await?.is_none() {
            return Err(DomainError::NotFound("Tenant"));
        }

        let guest = self.guests.create(&draft.into_guest(tenant_id)).await?;
        info!(guest_id = %guest.id, tenant_id = %tenant_id, "Guest created");
        Ok(guest)
    }

    pub async fn update(&self, actor: &User, id: &Uuid, changes: GuestChanges) -> Result<Guest, DomainError> {
        changes.validate()?;
        let mut guest = self.get(actor, id).await?;
        guest.apply(changes);
        self.guests.update(&guest).await
    }

    pub async fn delete(&self, actor: &User, id: &Uuid) -> Result<(), DomainError> {
        let guest = self.get(actor, id).await?;

        DependencyGuard::new(format!("guest '{}'", guest.full_name()))
            .with("booking", self.bookings.count_by_guest(&guest.id).await?)
            .check()?;

        self.guests.delete(&guest.id).await?;
        info!(guest_id = %guest.id, "Guest deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::repositories::{MockBookingRepository, MockGuestRepository, MockTenantRepository};
    use crate::services::test_support::{guest, user};
    use std::sync::atomic::{AtomicI64, Ordering};

    #[tokio::test]
    async fn test_guest_with_bookings_cannot_be_deleted_until_cleared() {
        let tenant_id = Uuid::new_v4();
        let jane = guest(tenant_id);
        let id = jane.id;

        let mut guests = MockGuestRepository::new();
        guests.expect_find_by_id().returning(move |_| Ok(Some(jane.clone())));
        guests.expect_delete().times(1).returning(|_| Ok(()));

        let remaining = Arc::new(AtomicI64::new(3));
        let counter = remaining.clone();
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_count_by_guest()
            .returning(move |_| Ok(counter.load(Ordering::SeqCst)));

        let svc = GuestService::new(Arc::new(guests), Arc::new(bookings), Arc::new(MockTenantRepository::new()));
        let admin = user(UserRole::Admin, Some(tenant_id));

        let err = svc.delete(&admin, &id).await.unwrap_err();
        assert!(err.to_string().contains("3 booking(s)"));
        assert_eq!(err.code(), "DEPENDENCY_CONFLICT");

        remaining.store(0, Ordering::SeqCst);
        assert!(svc.delete(&admin, &id).await.is_ok());
    }

    #[tokio::test]
    async fn test_orphan_user_cannot_create_guest() {
        let svc = GuestService::new(
            Arc::new(MockGuestRepository::new()),
            Arc::new(MockBookingRepository::new()),
            Arc::new(MockTenantRepository::new()),
        );
        let err = svc
            .create(
                &user(UserRole::Staff, None),
                NewGuest {
                    tenant_id: None,
                    first_name: "Jane".to_string(),
                    last_name: "Doe".to_string(),
                    email: None,
                    phone: None,
                    whatsapp: None,
                    nationality: None,
                    id_number: None,
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::TenantMembershipRequired("guest")));
    }

    #[tokio::test]
    async fn test_super_admin_sees_foreign_guest() {
        let jane = guest(Uuid::new_v4());
        let id = jane.id;
        let mut guests = MockGuestRepository::new();
        guests.expect_find_by_id().returning(move |_| Ok(Some(jane.clone())));

        let svc = GuestService::new(
            Arc::new(guests),
            Arc::new(MockBookingRepository::new()),
            Arc::new(MockTenantRepository::new()),
        );
        assert!(svc.get(&user(UserRole::SuperAdmin, None), &id).await.is_ok());
    }
}
