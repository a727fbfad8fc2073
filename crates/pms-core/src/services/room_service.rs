//! Room service
//!
//! Rooms carry no tenant of their own; every check goes through the owning
//! property.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::access::{ensure_access, scope_of};
use crate::availability::derive_status;
use crate::deletion::DependencyGuard;
use crate::domain::{BookingStatus, NewRoom, Room, RoomChanges, RoomWithStatus, User};
use crate::error::DomainError;
use crate::repositories::{BookingRepository, PropertyRepository, RoomFilter, RoomRepository};

pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
    properties: Arc<dyn PropertyRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl RoomService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        properties: Arc<dyn PropertyRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            rooms,
            properties,
            bookings,
        }
    }

    pub async fn list(
        &self,
        actor: &User,
        property_id: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<Vec<RoomWithStatus>, DomainError> {
        let Some(tenant) = scope_of(actor).filter() else {
            return Ok(Vec::new());
        };
        let rooms = self.rooms.list(RoomFilter { tenant, property_id }).await?;
        self.with_status(rooms, today).await
    }

    pub async fn get(&self, actor: &User, id: &Uuid, today: NaiveDate) -> Result<RoomWithStatus, DomainError> {
        let room = self.load(actor, id).await?;
        let mut rooms = self.with_status(vec![room], today).await?;
        rooms.pop().ok_or(DomainError::NotFound("Room"))
    }

    pub async fn create(&self, actor: &User, draft: NewRoom) -> Result<Room, DomainError> {
        draft.validate()?;
        let property = self
            .properties
            .find_by_id(&draft.property_id)
            .await?
            .ok_or(DomainError::NotFound("Property"))?;
        ensure_access(actor, Some(property.tenant_id), "Property")?;

        let room = self.rooms.create(&draft.into_room()).await?;
        info!(room_id = %room.id, property_id = %room.property_id, "Room created");
        Ok(room)
    }

    pub async fn update(&self, actor: &User, id: &Uuid, changes: RoomChanges) -> Result<Room, DomainError> {
        changes.validate()?;
        let mut room = self.load(actor, id).await?;
        room.apply(changes);
        self.rooms.update(&room).await
    }

    /// Refused while bookings reference the room.
    pub async fn delete(&self, actor: &User, id: &Uuid) -> Result<(), DomainError> {
        let room = self.load(actor, id).await?;

        DependencyGuard::new(format!("room '{}'", room.name))
            .with("booking", self.bookings.count_by_room(&room.id).await?)
            .check()?;

        self.rooms.delete(&room.id).await?;
        info!(room_id = %room.id, "Room deleted");
        Ok(())
    }

    async fn load(&self, actor: &User, id: &Uuid) -> Result<Room, DomainError> {
        let room = self.rooms.find_by_id(id).await?.ok_or(DomainError::NotFound("Room"))?;
        let property = self
            .properties
            .find_by_id(&room.property_id)
            .await?
            .ok_or(DomainError::NotFound("Room"))?;
        ensure_access(actor, Some(property.tenant_id), "Room")?;
        Ok(room)
    }

    /// One booking query for all properties involved.
    async fn with_status(&self, rooms: Vec<Room>, today: NaiveDate) -> Result<Vec<RoomWithStatus>, DomainError> {
        if rooms.is_empty() {
            return Ok(Vec::new());
        }
        let property_ids: Vec<Uuid> = rooms
            .iter()
            .map(|r| r.property_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let bookings = self
            .bookings
            .list_in_window(&property_ids, &BookingStatus::OCCUPYING, today, today)
            .await?;

        Ok(rooms
            .into_iter()
            .map(|room| {
                let current_status = derive_status(&room, &bookings, today);
                RoomWithStatus { room, current_status }
            })
            .collect())
    }
}
