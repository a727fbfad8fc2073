// ============================================================================
// PMS Core - Booking Service
// File: crates/pms-core/src/services/booking_service.rs
// ============================================================================
//! Booking lifecycle with overlap protection and status transitions
//!
//! The overlap check here runs against bookings loaded just before the
//! write. Two concurrent requests can both pass it; the `bookings_no_overlap`
//! exclusion constraint in the database rejects the second insert, and the
//! adapter reports that as a conflict too.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::access::{ensure_access, scope_of};
use crate::availability::{ensure_available, StayPeriod};
use crate::domain::{Booking, BookingChanges, BookingStatus, NewBooking, Property, User};
use crate::error::DomainError;
use crate::repositories::{
    BookingFilter, BookingRepository, GuestRepository, PropertyRepository, RoomRepository,
};

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    properties: Arc<dyn PropertyRepository>,
    rooms: Arc<dyn RoomRepository>,
    guests: Arc<dyn GuestRepository>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        properties: Arc<dyn PropertyRepository>,
        rooms: Arc<dyn RoomRepository>,
        guests: Arc<dyn GuestRepository>,
    ) -> Self {
        Self {
            bookings,
            properties,
            rooms,
            guests,
        }
    }

    /// Newest first, optionally narrowed to one property or guest.
    pub async fn list(
        &self,
        actor: &User,
        property_id: Option<Uuid>,
        guest_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, DomainError> {
        let Some(tenant) = scope_of(actor).filter() else {
            return Ok(Vec::new());
        };
        self.bookings
            .list(BookingFilter {
                tenant,
                property_id,
                guest_id,
            })
            .await
    }

    pub async fn get(&self, actor: &User, id: &Uuid) -> Result<Booking, DomainError> {
        let (booking, _) = self.load(actor, id).await?;
        Ok(booking)
    }

    /// Booking together with the property it is scoped through.
    async fn load(&self, actor: &User, id: &Uuid) -> Result<(Booking, Property), DomainError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Booking"))?;
        let property = self
            .properties
            .find_by_id(&booking.property_id)
            .await?
            .ok_or(DomainError::NotFound("Booking"))?;
        ensure_access(actor, Some(property.tenant_id), "Booking")?;
        Ok((booking, property))
    }

    pub async fn create(&self, actor: &User, draft: NewBooking) -> Result<Booking, DomainError> {
        draft.validate()?;
        let period = StayPeriod::new(draft.check_in_date, draft.check_out_date)?;

        let property = self
            .properties
            .find_by_id(&draft.property_id)
            .await?
            .ok_or(DomainError::NotFound("Property"))?;
        ensure_access(actor, Some(property.tenant_id), "Property")?;

        let guest = self
            .guests
            .find_by_id(&draft.guest_id)
            .await?
            .ok_or(DomainError::NotFound("Guest"))?;
        ensure_access(actor, Some(guest.tenant_id), "Guest")?;
        if guest.tenant_id != property.tenant_id {
            return Err(DomainError::validation(
                "Guest and property belong to different tenants",
            ));
        }

        if let Some(room_id) = draft.room_id {
            self.ensure_room_in_property(&room_id, &property).await?;
        }

        self.ensure_no_overlap(&property, &period, None).await?;

        let booking = self.bookings.create(&draft.into_booking()).await?;
        info!(
            booking_id = %booking.id,
            property_id = %booking.property_id,
            check_in = %booking.check_in_date,
            check_out = %booking.check_out_date,
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn update(&self, actor: &User, id: &Uuid, changes: BookingChanges) -> Result<Booking, DomainError> {
        changes.validate()?;
        let (mut booking, property) = self.load(actor, id).await?;

        if let Some(next) = changes.status {
            if !booking.status.can_transition_to(next) {
                return Err(DomainError::InvalidStatusTransition {
                    from: booking.status,
                    to: next,
                });
            }
        }

        if let Some(Some(room_id)) = changes.room_id {
            self.ensure_room_in_property(&room_id, &property).await?;
        }

        if changes.touches_dates() {
            let period = StayPeriod::new(
                changes.check_in_date.unwrap_or(booking.check_in_date),
                changes.check_out_date.unwrap_or(booking.check_out_date),
            )?;
            if period != StayPeriod::of(&booking) {
                self.ensure_no_overlap(&property, &period, Some(booking.id)).await?;
            }
        }

        let previous = booking.status;
        booking.apply(changes);
        let updated = self.bookings.update(&booking).await?;
        if updated.status != previous {
            info!(booking_id = %updated.id, from = %previous, to = %updated.status, "Booking status changed");
        }
        Ok(updated)
    }

    pub async fn delete(&self, actor: &User, id: &Uuid) -> Result<(), DomainError> {
        let booking = self.get(actor, id).await?;
        self.bookings.delete(&booking.id).await?;
        info!(booking_id = %booking.id, "Booking deleted");
        Ok(())
    }

    async fn ensure_room_in_property(&self, room_id: &Uuid, property: &Property) -> Result<(), DomainError> {
        let room = self.rooms.find_by_id(room_id).await?.ok_or(DomainError::NotFound("Room"))?;
        if room.property_id != property.id {
            return Err(DomainError::validation("Room does not belong to the selected property"));
        }
        Ok(())
    }

    async fn ensure_no_overlap(
        &self,
        property: &Property,
        period: &StayPeriod,
        exclude: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let existing = self
            .bookings
            .list_in_window(
                &[property.id],
                &BookingStatus::BLOCKING,
                period.check_in,
                period.check_out,
            )
            .await?;

        ensure_available(property.id, &existing, period, exclude).map_err(|e| {
            warn!(property_id = %property.id, "Booking rejected: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::repositories::{
        MockBookingRepository, MockGuestRepository, MockPropertyRepository, MockRoomRepository,
    };
    use crate::services::test_support::{booking, date, guest, property, room, user};

    struct Fixture {
        tenant_id: Uuid,
        property: Property,
        guest_id: Uuid,
        properties: MockPropertyRepository,
        guests: MockGuestRepository,
        rooms: MockRoomRepository,
        bookings: MockBookingRepository,
    }

    impl Fixture {
        fn new() -> Self {
            let tenant_id = Uuid::new_v4();
            let p = property(tenant_id);
            let g = guest(tenant_id);
            let guest_id = g.id;

            let mut properties = MockPropertyRepository::new();
            let found = p.clone();
            properties
                .expect_find_by_id()
                .returning(move |_| Ok(Some(found.clone())));
            let mut guests = MockGuestRepository::new();
            guests.expect_find_by_id().returning(move |_| Ok(Some(g.clone())));

            Self {
                tenant_id,
                property: p,
                guest_id,
                properties,
                guests,
                rooms: MockRoomRepository::new(),
                bookings: MockBookingRepository::new(),
            }
        }

        fn with_existing(mut self, existing: Vec<Booking>) -> Self {
            self.bookings
                .expect_list_in_window()
                .returning(move |_, _, _, _| Ok(existing.clone()));
            self
        }

        fn service(self) -> BookingService {
            BookingService::new(
                Arc::new(self.bookings),
                Arc::new(self.properties),
                Arc::new(self.rooms),
                Arc::new(self.guests),
            )
        }

        fn draft(&self, from: u32, to: u32) -> NewBooking {
            NewBooking {
                property_id: self.property.id,
                room_id: None,
                guest_id: self.guest_id,
                check_in_date: date(2025, 1, from),
                check_out_date: date(2025, 1, to),
                guests_count: 2,
                total_amount: None,
                status: Some(BookingStatus::Confirmed),
                booking_source: Some("direct".to_string()),
                notes: None,
            }
        }

        fn staff(&self) -> User {
            user(UserRole::Staff, Some(self.tenant_id))
        }
    }

    #[tokio::test]
    async fn test_overlapping_booking_rejected_and_adjacent_accepted() {
        let fx = Fixture::new();
        let existing = booking(
            fx.property.id,
            Uuid::new_v4(),
            date(2025, 1, 10),
            date(2025, 1, 15),
            BookingStatus::Confirmed,
        );
        let mut fx = fx.with_existing(vec![existing]);
        fx.bookings.expect_create().times(1).returning(|b| Ok(b.clone()));

        let (overlapping, adjacent, actor) = (fx.draft(14, 18), fx.draft(15, 18), fx.staff());
        let svc = fx.service();

        let err = svc.create(&actor, overlapping).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Property is already booked from 2025-01-10 to 2025-01-15"
        );
        assert_eq!(err.code(), "RESOURCE_CONFLICT");

        let created = svc.create(&actor, adjacent).await.unwrap();
        assert_eq!(created.check_in_date, date(2025, 1, 15));
    }

    #[tokio::test]
    async fn test_reversed_dates_rejected() {
        let fx = Fixture::new();
        let (draft, actor) = (fx.draft(15, 10), fx.staff());
        let err = fx.service().create(&actor, draft).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_cross_tenant_property_not_found() {
        let fx = Fixture::new();
        let draft = fx.draft(1, 3);
        let outsider = user(UserRole::Admin, Some(Uuid::new_v4()));
        let err = fx.service().create(&outsider, draft).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Property")));
    }

    #[tokio::test]
    async fn test_room_from_other_property_rejected() {
        let mut fx = Fixture::new();
        let stray = room(Uuid::new_v4());
        let stray_id = stray.id;
        fx.rooms.expect_find_by_id().returning(move |_| Ok(Some(stray.clone())));

        let mut draft = fx.draft(1, 3);
        draft.room_id = Some(stray_id);
        let actor = fx.staff();
        let err = fx.service().create(&actor, draft).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_without_date_change_skips_overlap_check() {
        let mut fx = Fixture::new();
        let current = booking(
            fx.property.id,
            fx.guest_id,
            date(2025, 1, 10),
            date(2025, 1, 15),
            BookingStatus::Confirmed,
        );
        let id = current.id;
        fx.bookings
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        fx.bookings.expect_list_in_window().never();
        fx.bookings.expect_update().returning(|b| Ok(b.clone()));

        let actor = fx.staff();
        let updated = fx
            .service()
            .update(
                &actor,
                &id,
                BookingChanges {
                    status: Some(BookingStatus::CheckedIn),
                    check_in_date: Some(date(2025, 1, 10)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::CheckedIn);
    }

    #[tokio::test]
    async fn test_update_dates_excludes_itself() {
        let fx = Fixture::new();
        let current = booking(
            fx.property.id,
            fx.guest_id,
            date(2025, 1, 10),
            date(2025, 1, 15),
            BookingStatus::Confirmed,
        );
        let id = current.id;
        let mut fx = fx.with_existing(vec![current.clone()]);
        fx.bookings
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        fx.bookings.expect_update().returning(|b| Ok(b.clone()));

        let actor = fx.staff();
        let updated = fx
            .service()
            .update(
                &actor,
                &id,
                BookingChanges {
                    check_out_date: Some(date(2025, 1, 17)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.check_out_date, date(2025, 1, 17));
    }

    #[tokio::test]
    async fn test_terminal_status_cannot_change() {
        let mut fx = Fixture::new();
        let current = booking(
            fx.property.id,
            fx.guest_id,
            date(2025, 1, 10),
            date(2025, 1, 15),
            BookingStatus::CheckedOut,
        );
        let id = current.id;
        fx.bookings
            .expect_find_by_id()
            .returning(move |_| Ok(Some(current.clone())));

        let actor = fx.staff();
        let err = fx
            .service()
            .update(
                &actor,
                &id,
                BookingChanges {
                    status: Some(BookingStatus::CheckedIn),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid booking status transition from checked_out to checked_in"
        );
    }
}
