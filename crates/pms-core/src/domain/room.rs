// ============================================================================
// PMS Core - Room Entity
// File: crates/pms-core/src/domain/room.rs
// Description: Room within a property and its stored/derived status
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;
use validator::Validate;

/// Room status enumeration
///
/// `Occupied` and `Cleaning` are normally derived from bookings; the other
/// values are only ever set by staff and used as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
    OutOfOrder,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::OutOfOrder => "out_of_order",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(RoomStatus::Available),
            "occupied" => Some(RoomStatus::Occupied),
            "cleaning" => Some(RoomStatus::Cleaning),
            "maintenance" => Some(RoomStatus::Maintenance),
            "out_of_order" => Some(RoomStatus::OutOfOrder),
            _ => None,
        }
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Available
    }
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub price_per_night: Option<Decimal>,
    pub keybox_code: Option<String>,
    /// Manual status; `None` reads as available.
    pub status: Option<RoomStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn apply(&mut self, changes: RoomChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(capacity) = changes.capacity {
            self.capacity = capacity;
        }
        if let Some(price) = changes.price_per_night {
            self.price_per_night = price;
        }
        if let Some(keybox_code) = changes.keybox_code {
            self.keybox_code = keybox_code;
        }
        if let Some(status) = changes.status {
            self.status = Some(status);
        }
        self.updated_at = Utc::now();
    }
}

/// A room paired with the status computed for the current day.
///
/// Serialized with the derived value as `status` and the stored one as
/// `manual_status`.
#[derive(Debug, Clone)]
pub struct RoomWithStatus {
    pub room: Room,
    pub current_status: RoomStatus,
}

#[derive(Serialize)]
struct RoomView<'a> {
    id: &'a Uuid,
    property_id: &'a Uuid,
    name: &'a str,
    description: &'a Option<String>,
    capacity: i32,
    price_per_night: &'a Option<Decimal>,
    keybox_code: &'a Option<String>,
    status: RoomStatus,
    manual_status: Option<RoomStatus>,
    created_at: &'a DateTime<Utc>,
    updated_at: &'a DateTime<Utc>,
}

impl Serialize for RoomWithStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let room = &self.room;
        RoomView {
            id: &room.id,
            property_id: &room.property_id,
            name: &room.name,
            description: &room.description,
            capacity: room.capacity,
            price_per_night: &room.price_per_night,
            keybox_code: &room.keybox_code,
            status: self.current_status,
            manual_status: room.status,
            created_at: &room.created_at,
            updated_at: &room.updated_at,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewRoom {
    pub property_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Room name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Room capacity must be at least 1"))]
    pub capacity: i32,
    pub price_per_night: Option<Decimal>,
    pub keybox_code: Option<String>,
    pub status: Option<RoomStatus>,
}

impl NewRoom {
    pub fn into_room(self) -> Room {
        let now = Utc::now();
        Room {
            id: Uuid::new_v4(),
            property_id: self.property_id,
            name: self.name.trim().to_string(),
            description: self.description,
            capacity: self.capacity,
            price_per_night: self.price_per_night,
            keybox_code: self.keybox_code,
            status: Some(self.status.unwrap_or_default()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. A room cannot be moved to another property.
#[derive(Debug, Clone, Default, Validate)]
pub struct RoomChanges {
    #[validate(length(min = 1, max = 255, message = "Room name is required"))]
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    #[validate(range(min = 1, message = "Room capacity must be at least 1"))]
    pub capacity: Option<i32>,
    pub price_per_night: Option<Option<Decimal>>,
    pub keybox_code: Option<Option<String>>,
    pub status: Option<RoomStatus>,
}
