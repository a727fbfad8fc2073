//! Guest domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn apply(&mut self, changes: GuestChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(whatsapp) = changes.whatsapp {
            self.whatsapp = whatsapp;
        }
        if let Some(nationality) = changes.nationality {
            self.nationality = nationality;
        }
        if let Some(id_number) = changes.id_number {
            self.id_number = id_number;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewGuest {
    /// Read only for super-admins; everyone else gets their own tenant.
    pub tenant_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid guest email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub notes: Option<String>,
}

impl NewGuest {
    pub fn into_guest(self, tenant_id: Uuid) -> Guest {
        let now = Utc::now();
        Guest {
            id: Uuid::new_v4(),
            tenant_id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email,
            phone: self.phone,
            whatsapp: self.whatsapp,
            nationality: self.nationality,
            id_number: self.id_number,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct GuestChanges {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub whatsapp: Option<Option<String>>,
    pub nationality: Option<Option<String>>,
    pub id_number: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}
