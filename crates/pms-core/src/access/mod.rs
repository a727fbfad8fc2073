//! Tenant isolation: who may see which rows.

pub mod gate;
pub mod scope;

pub use gate::{can_access, creation_tenant, ensure_access, require_role, require_super_admin};
pub use scope::{scope_of, AccessScope, TenantFilter};
