// ============================================================================
// PMS Core - Tenant Entity
// File: crates/pms-core/src/domain/tenant.rs
// Description: Isolated organization owning users, properties and guests
// ============================================================================

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

static SUBDOMAIN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("subdomain pattern is valid")
});

/// Tenant entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Tenant {
    pub id: Uuid,

    #[validate(length(min = 2, max = 255, message = "Tenant name must be between 2 and 255 characters"))]
    pub name: String,

    /// Unique routing label, e.g. `acme` for `acme.darmanager.net`.
    pub subdomain: String,

    /// Optional unique custom domain.
    #[validate(length(min = 3, max = 255, message = "Domain must be between 3 and 255 characters"))]
    pub domain: Option<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub email: Option<String>,
    pub phone: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new tenant.
#[derive(Debug, Clone, Default)]
pub struct NewTenant {
    pub name: String,
    pub subdomain: String,
    pub domain: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Partial update of a tenant; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TenantChanges {
    pub name: Option<String>,
    pub subdomain: Option<String>,
    pub domain: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Tenant {
    pub fn new(draft: NewTenant) -> Result<Self, DomainError> {
        let now = Utc::now();
        let tenant = Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            subdomain: normalize_subdomain(&draft.subdomain)?,
            domain: normalize_domain(draft.domain),
            email: draft.email,
            phone: draft.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        tenant.validate()?;
        Ok(tenant)
    }

    pub fn apply(&mut self, changes: TenantChanges) -> Result<(), DomainError> {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(subdomain) = changes.subdomain {
            self.subdomain = normalize_subdomain(&subdomain)?;
        }
        if let Some(domain) = changes.domain {
            self.domain = normalize_domain(domain);
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();

        self.validate()?;
        Ok(())
    }
}

/// Lower-cases a subdomain and checks it is a single DNS label.
pub fn normalize_subdomain(raw: &str) -> Result<String, DomainError> {
    let subdomain = raw.trim().to_lowercase();
    if !SUBDOMAIN_LABEL.is_match(&subdomain) {
        return Err(DomainError::validation(format!(
            "Invalid subdomain '{}': use lowercase letters, digits and hyphens",
            raw.trim()
        )));
    }
    Ok(subdomain)
}

fn normalize_domain(domain: Option<String>) -> Option<String> {
    domain
        .map(|d| d.trim().trim_end_matches('.').to_lowercase())
        .filter(|d| !d.is_empty())
}
