//! Repository traits (ports)

pub mod tenant_repository;
pub mod user_repository;
pub mod property_repository;
pub mod room_repository;
pub mod guest_repository;
pub mod booking_repository;

use std::sync::Arc;

pub use booking_repository::{BookingFilter, BookingRepository, RevenueTotal};
pub use guest_repository::GuestRepository;
pub use property_repository::PropertyRepository;
pub use room_repository::{RoomFilter, RoomRepository};
pub use tenant_repository::TenantRepository;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "mocks"))]
pub use guest_repository::MockGuestRepository;
#[cfg(any(test, feature = "mocks"))]
pub use property_repository::MockPropertyRepository;
#[cfg(any(test, feature = "mocks"))]
pub use room_repository::MockRoomRepository;
#[cfg(any(test, feature = "mocks"))]
pub use tenant_repository::MockTenantRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_repository::MockUserRepository;

/// Bundle of every repository, handed to the service layer at startup.
#[derive(Clone)]
pub struct Repositories {
    pub tenants: Arc<dyn TenantRepository>,
    pub users: Arc<dyn UserRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub guests: Arc<dyn GuestRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}
