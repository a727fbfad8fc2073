//! Property domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub wifi_password: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewProperty {
    /// Read only for super-admins; everyone else gets their own tenant.
    pub tenant_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Property name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid property email"))]
    pub email: Option<String>,
    pub wifi_password: Option<String>,
    pub price_per_night: Option<Decimal>,
    #[validate(range(min = 1, message = "A property must host at least one guest"))]
    pub max_guests: i32,
}

impl NewProperty {
    pub fn into_property(self, tenant_id: Uuid) -> Property {
        let now = Utc::now();
        Property {
            id: Uuid::new_v4(),
            tenant_id,
            name: self.name.trim().to_string(),
            description: self.description,
            address: self.address,
            phone: self.phone,
            email: self.email,
            wifi_password: self.wifi_password,
            price_per_night: self.price_per_night,
            max_guests: self.max_guests,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; the owning tenant can never be changed.
#[derive(Debug, Clone, Default, Validate)]
pub struct PropertyChanges {
    #[validate(length(min = 1, max = 255, message = "Property name is required"))]
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub wifi_password: Option<Option<String>>,
    pub price_per_night: Option<Option<Decimal>>,
    #[validate(range(min = 1, message = "A property must host at least one guest"))]
    pub max_guests: Option<i32>,
}

impl Property {
    pub fn apply(&mut self, changes: PropertyChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(wifi_password) = changes.wifi_password {
            self.wifi_password = wifi_password;
        }
        if let Some(price) = changes.price_per_night {
            self.price_per_night = price;
        }
        if let Some(max_guests) = changes.max_guests {
            self.max_guests = max_guests;
        }
        self.updated_at = Utc::now();
    }
}
