// ============================================================================
// PMS Core - User Entity
// File: crates/pms-core/src/domain/user.rs
// Description: Staff account with a role and an optional owning tenant
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Manager,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(UserRole::SuperAdmin),
            "admin" => Some(UserRole::Admin),
            "manager" => Some(UserRole::Manager),
            "staff" => Some(UserRole::Staff),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Staff
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Always ignored for scoping when the role is `SuperAdmin`.
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self.role, UserRole::SuperAdmin | UserRole::Admin)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Registration input, validated before the password is hashed.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 3, max = 100, message = "Username must be between 3 and 100 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub role: UserRole,
    pub is_active: bool,
    /// Honored only when a super-admin registers the user.
    pub tenant_id: Option<Uuid>,
}

impl NewUser {
    pub fn into_user(self, tenant_id: Option<Uuid>, password_hash: String) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            tenant_id,
            email: self.email.trim().to_lowercase(),
            username: self.username.trim().to_string(),
            password_hash,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.role,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::SuperAdmin, UserRole::Admin, UserRole::Manager, UserRole::Staff] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("owner"), None);
    }

    #[test]
    fn test_new_user_validation() {
        let draft = NewUser {
            email: "not-an-email".to_string(),
            username: "al".to_string(),
            password: "short".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            role: UserRole::Staff,
            is_active: true,
            tenant_id: None,
        };
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }
}
