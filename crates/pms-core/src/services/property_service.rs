//! Property service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::access::{creation_tenant, ensure_access, scope_of};
use crate::deletion::DependencyGuard;
use crate::domain::{NewProperty, Property, PropertyChanges, User};
use crate::error::DomainError;
use crate::repositories::{BookingRepository, PropertyRepository, RoomRepository, TenantRepository};

pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
    tenants: Arc<dyn TenantRepository>,
}

impl PropertyService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        tenants: Arc<dyn TenantRepository>,
    ) -> Self {
        Self {
            properties,
            rooms,
            bookings,
            tenants,
        }
    }

    pub async fn list(&self, actor: &User) -> Result<Vec<Property>, DomainError> {
        match scope_of(actor).filter() {
            Some(filter) => self.properties.list(filter).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get(&self, actor: &User, id: &Uuid) -> Result<Property, DomainError> {
        let property = self
            .properties
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Property"))?;
        ensure_access(actor, Some(property.tenant_id), "Property")?;
        Ok(property)
    }

    pub async fn create(&self, actor: &User, draft: NewProperty) -> Result<Property, DomainError> {
        draft.validate()?;
        let tenant_id = creation_tenant(actor, draft.tenant_id, "property")?;
        if actor.is_super_admin() && self.tenants.find_by_id(&tenant_id).await?.is_none() {
            return Err(DomainError::NotFound("Tenant"));
        }

        let property = self.properties.create(&draft.into_property(tenant_id)).await?;
        info!(property_id = %property.id, tenant_id = %tenant_id, "Property created");
        Ok(property)
    }

    pub async fn update(&self, actor: &User, id: &Uuid, changes: PropertyChanges) -> Result<Property, DomainError> {
        changes.validate()?;
        let mut property = self.get(actor, id).await?;
        property.apply(changes);
        self.properties.update(&property).await
    }

    /// Refused while rooms or bookings still reference the property.
    pub async fn delete(&self, actor: &User, id: &Uuid) -> Result<(), DomainError> {
        let property = self.get(actor, id).await?;

        DependencyGuard::new(format!("property '{}'", property.name))
            .with("room", self.rooms.count_by_property(&property.id).await?)
            .with("booking", self.bookings.count_by_property(&property.id).await?)
            .check()?;

        self.properties.delete(&property.id).await?;
        info!(property_id = %property.id, "Property deleted");
        Ok(())
    }
}
