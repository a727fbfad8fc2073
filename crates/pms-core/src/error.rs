//! Domain errors

use chrono::NaiveDate;
use thiserror::Error;

use crate::deletion::{describe_dependencies, Dependency};
use crate::domain::BookingStatus;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Absent, or present but outside the caller's tenant. The two are
    /// deliberately indistinguishable.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid booking status transition from {from} to {to}")]
    InvalidStatusTransition { from: BookingStatus, to: BookingStatus },

    #[error("{0}")]
    Conflict(String),

    #[error("Property is already booked from {check_in} to {check_out}")]
    BookingOverlap { check_in: NaiveDate, check_out: NaiveDate },

    #[error(
        "Cannot delete {resource} because it has {}. Please delete the related items first.",
        describe_dependencies(.dependencies)
    )]
    DependencyConflict {
        resource: String,
        dependencies: Vec<Dependency>,
    },

    #[error("Super admin must specify the target tenant to create {0}")]
    TenantRequired(&'static str),

    #[error("User must be associated with a tenant to create {0}")]
    TenantMembershipRequired(&'static str),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("User account is inactive")]
    UserNotActive,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("You cannot access {tenant_name} from this account. Please use your organization's subdomain.")]
    TenantMismatch { tenant_name: String },

    #[error("Please access your account at: {portal_url}")]
    WrongPortal { portal_url: String },

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable machine-readable code surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "RESOURCE_NOT_FOUND",
            DomainError::Validation(_) | DomainError::InvalidStatusTransition { .. } => "VALIDATION_ERROR",
            DomainError::Conflict(_) | DomainError::BookingOverlap { .. } => "RESOURCE_CONFLICT",
            DomainError::DependencyConflict { .. } => "DEPENDENCY_CONFLICT",
            DomainError::TenantRequired(_) | DomainError::TenantMembershipRequired(_) => "TENANT_REQUIRED",
            DomainError::InvalidCredentials
            | DomainError::UserNotActive
            | DomainError::Unauthorized(_) => "UNAUTHORIZED",
            DomainError::Forbidden(_) | DomainError::TenantMismatch { .. } => "FORBIDDEN",
            DomainError::WrongPortal { .. } => "WRONG_PORTAL",
            DomainError::DatabaseError(_) => "DATABASE_ERROR",
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_message_cites_dates() {
        let err = DomainError::BookingOverlap {
            check_in: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        };
        assert_eq!(err.to_string(), "Property is already booked from 2025-01-10 to 2025-01-15");
        assert_eq!(err.code(), "RESOURCE_CONFLICT");
    }

    #[test]
    fn test_dependency_conflict_message() {
        let err = DomainError::DependencyConflict {
            resource: "property 'Sea View'".to_string(),
            dependencies: vec![Dependency::new("room", 2), Dependency::new("booking", 3)],
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete property 'Sea View' because it has 2 room(s) and 3 booking(s). Please delete the related items first."
        );
        assert_eq!(err.code(), "DEPENDENCY_CONFLICT");
    }
}
