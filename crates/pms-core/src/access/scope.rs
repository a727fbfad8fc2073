//! Access scope resolution

use uuid::Uuid;

use crate::domain::User;

/// Which tenant's data a caller may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    /// Super-admin: every tenant.
    Unrestricted,
    Tenant(Uuid),
    /// A regular user without a tenant sees nothing.
    NoAccess,
}

/// Row filter handed to repository list and count queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantFilter {
    All,
    Only(Uuid),
}

impl AccessScope {
    /// `None` means the caller can see nothing and the query can be skipped.
    pub fn filter(&self) -> Option<TenantFilter> {
        match self {
            AccessScope::Unrestricted => Some(TenantFilter::All),
            AccessScope::Tenant(id) => Some(TenantFilter::Only(*id)),
            AccessScope::NoAccess => None,
        }
    }
}

impl TenantFilter {
    pub fn tenant_id(&self) -> Option<Uuid> {
        match self {
            TenantFilter::All => None,
            TenantFilter::Only(id) => Some(*id),
        }
    }
}

pub fn scope_of(user: &User) -> AccessScope {
    if user.is_super_admin() {
        return AccessScope::Unrestricted;
    }
    match user.tenant_id {
        Some(tenant_id) => AccessScope::Tenant(tenant_id),
        None => AccessScope::NoAccess,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::user;
    use super::*;
    use crate::domain::UserRole;

    #[test]
    fn test_super_admin_is_unrestricted_even_with_tenant() {
        let admin = user(UserRole::SuperAdmin, Some(Uuid::new_v4()));
        assert_eq!(scope_of(&admin), AccessScope::Unrestricted);
        assert_eq!(scope_of(&admin).filter(), Some(TenantFilter::All));
    }

    #[test]
    fn test_regular_user_is_scoped_to_tenant() {
        let tenant = Uuid::new_v4();
        for role in [UserRole::Admin, UserRole::Manager, UserRole::Staff] {
            assert_eq!(scope_of(&user(role, Some(tenant))), AccessScope::Tenant(tenant));
        }
    }

    #[test]
    fn test_user_without_tenant_has_no_access() {
        let staff = user(UserRole::Staff, None);
        assert_eq!(scope_of(&staff), AccessScope::NoAccess);
        assert_eq!(scope_of(&staff).filter(), None);
    }
}
