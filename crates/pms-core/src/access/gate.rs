//! Authorization gate
//!
//! Every read or write of a tenant-owned record goes through here. Denials
//! on individual records surface as `NotFound` so a caller cannot probe for
//! rows belonging to other tenants.

use tracing::debug;
use uuid::Uuid;

use super::scope::{scope_of, AccessScope};
use crate::domain::{User, UserRole};
use crate::error::DomainError;

/// True when `user` may act on a record owned by `resource_tenant`.
pub fn can_access(user: &User, resource_tenant: Option<Uuid>) -> bool {
    match scope_of(user) {
        AccessScope::Unrestricted => true,
        AccessScope::Tenant(tenant_id) => resource_tenant == Some(tenant_id),
        AccessScope::NoAccess => false,
    }
}

pub fn ensure_access(
    user: &User,
    resource_tenant: Option<Uuid>,
    resource: &'static str,
) -> Result<(), DomainError> {
    if can_access(user, resource_tenant) {
        return Ok(());
    }
    debug!(
        user_id = %user.id,
        resource,
        "Access denied to record outside caller's tenant"
    );
    Err(DomainError::NotFound(resource))
}

/// Picks the tenant a new record will belong to.
///
/// Super-admins must name the target explicitly; everyone else always
/// writes into their own tenant and any supplied target is ignored.
pub fn creation_tenant(
    user: &User,
    explicit_target: Option<Uuid>,
    resource: &'static str,
) -> Result<Uuid, DomainError> {
    match scope_of(user) {
        AccessScope::Unrestricted => explicit_target.ok_or(DomainError::TenantRequired(resource)),
        AccessScope::Tenant(tenant_id) => Ok(tenant_id),
        AccessScope::NoAccess => Err(DomainError::TenantMembershipRequired(resource)),
    }
}

pub fn require_super_admin(user: &User) -> Result<(), DomainError> {
    if user.is_super_admin() {
        return Ok(());
    }
    Err(DomainError::Forbidden(
        "Only super admins can perform this action".to_string(),
    ))
}

/// Super-admins always pass.
pub fn require_role(user: &User, allowed: &[UserRole]) -> Result<(), DomainError> {
    if user.is_super_admin() || allowed.contains(&user.role) {
        return Ok(());
    }
    Err(DomainError::Forbidden(
        "Not enough permissions for this action".to_string(),
    ))
}
