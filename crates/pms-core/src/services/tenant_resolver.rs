// ============================================================================
// PMS Core - Tenant Resolver
// File: crates/pms-core/src/services/tenant_resolver.rs
// Description: Maps an inbound host or subdomain hint to an active tenant
// ============================================================================

use std::net::IpAddr;
use std::sync::Arc;

use tracing::debug;

use pms_shared::utils::normalize_host;

use crate::domain::Tenant;
use crate::error::DomainError;
use crate::repositories::TenantRepository;

/// How a host relates to the configured base domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatch {
    /// `localhost`, a bare base domain or an IP literal. No tenant.
    Bare,
    /// Leftmost label under a base domain or `.localhost`.
    Subdomain(String),
    /// Unrelated host, possibly a tenant's custom domain.
    Custom(String),
}

/// Classifies a raw `Host` header value.
pub fn classify_host(host: &str, base_domains: &[String]) -> HostMatch {
    let host = normalize_host(host);

    if host.is_empty() || host == "localhost" || host.parse::<IpAddr>().is_ok() {
        return HostMatch::Bare;
    }

    let suffixes = base_domains
        .iter()
        .map(|d| d.trim().trim_end_matches('.').to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .chain(std::iter::once("localhost".to_string()));

    for base in suffixes {
        if host == base {
            return HostMatch::Bare;
        }
        if let Some(prefix) = host.strip_suffix(&format!(".{}", base)) {
            return match prefix.split('.').next() {
                Some(label) if !label.is_empty() => HostMatch::Subdomain(label.to_string()),
                _ => HostMatch::Bare,
            };
        }
    }

    HostMatch::Custom(host)
}

pub struct TenantResolver {
    tenants: Arc<dyn TenantRepository>,
    base_domains: Vec<String>,
}

impl TenantResolver {
    pub fn new(tenants: Arc<dyn TenantRepository>, base_domains: Vec<String>) -> Self {
        Self {
            tenants,
            base_domains,
        }
    }

    /// Resolves the addressed tenant. Unknown or inactive tenants are `None`,
    /// never an error.
    pub async fn resolve(
        &self,
        subdomain_hint: Option<&str>,
        host: Option<&str>,
    ) -> Result<Option<Tenant>, DomainError> {
        if let Some(hint) = subdomain_hint.map(str::trim).filter(|h| !h.is_empty()) {
            debug!(subdomain = hint, "Resolving tenant from proxy header");
            return self
                .tenants
                .find_active_by_subdomain(&hint.to_ascii_lowercase())
                .await;
        }

        let Some(host) = host else {
            return Ok(None);
        };

        match classify_host(host, &self.base_domains) {
            HostMatch::Bare => Ok(None),
            HostMatch::Subdomain(subdomain) => {
                debug!(subdomain = %subdomain, "Resolving tenant from host");
                self.tenants.find_active_by_subdomain(&subdomain).await
            }
            HostMatch::Custom(domain) => {
                debug!(domain = %domain, "Resolving tenant from custom domain");
                self.tenants.find_active_by_domain(&domain).await
            }
        }
    }
}
