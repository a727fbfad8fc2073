// ============================================================================
// PMS Core - Authentication Service
// File: crates/pms-core/src/services/auth_service.rs
// ============================================================================
//! Login with tenant portal rules, token refresh and user registration

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use pms_security::{JwtError, JwtService, PasswordService, TokenPair};
use pms_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use pms_shared::utils::mask_email;

use crate::access::{creation_tenant, require_role};
use crate::domain::{NewUser, Tenant, User, UserRole};
use crate::error::DomainError;
use crate::repositories::{TenantRepository, UserRepository};

/// Where users bound to a tenant are sent when they log in from a bare host.
#[derive(Debug, Clone)]
pub struct PortalSettings {
    pub scheme: String,
    pub base_domain: String,
}

impl PortalSettings {
    pub fn url_for(&self, tenant: &Tenant) -> String {
        format!("{}://{}.{}", self.scheme, tenant.subdomain, self.base_domain)
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tenants: Arc<dyn TenantRepository>,
    jwt: JwtService,
    portal: PortalSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        jwt: JwtService,
        portal: PortalSettings,
    ) -> Self {
        Self {
            users,
            tenants,
            jwt,
            portal,
        }
    }

    /// Verifies credentials, then checks the user may log in through the
    /// tenant addressed by the request (`None` for a bare host).
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        current_tenant: Option<&Tenant>,
    ) -> Result<LoginResult, DomainError> {
        let email = email.trim().to_lowercase();
        info!(email = %mask_email(&email), "Login attempt");

        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            warn!(email = %mask_email(&email), "Login failed: unknown email");
            DomainError::InvalidCredentials
        })?;

        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(DomainError::InvalidCredentials);
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login failed: user inactive");
            return Err(DomainError::UserNotActive);
        }

        self.check_portal(&user, current_tenant).await?;

        let tokens = self.issue_tokens(&user.id)?;
        info!(user_id = %user.id, "Login successful");

        Ok(LoginResult { user, tokens })
    }

    async fn check_portal(&self, user: &User, current_tenant: Option<&Tenant>) -> Result<(), DomainError> {
        if user.is_super_admin() {
            return Ok(());
        }

        match current_tenant {
            Some(tenant) if user.tenant_id != Some(tenant.id) => {
                warn!(user_id = %user.id, tenant = %tenant.subdomain, "Login rejected: foreign tenant portal");
                Err(DomainError::TenantMismatch {
                    tenant_name: tenant.name.clone(),
                })
            }
            Some(_) => Ok(()),
            None => {
                let Some(tenant_id) = user.tenant_id else {
                    return Ok(());
                };
                match self.tenants.find_by_id(&tenant_id).await? {
                    Some(tenant) => Err(DomainError::WrongPortal {
                        portal_url: self.portal.url_for(&tenant),
                    }),
                    None => Ok(()),
                }
            }
        }
    }

    /// Exchanges a refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self
            .jwt
            .validate_typed(refresh_token, TOKEN_TYPE_REFRESH)
            .map_err(token_error)?;
        let user_id = claims.user_id().map_err(token_error)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Could not validate credentials".to_string()))?;
        if !user.is_active {
            return Err(DomainError::UserNotActive);
        }

        self.issue_tokens(&user.id)
    }

    /// Resolves the user behind a bearer access token.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, DomainError> {
        let claims = self
            .jwt
            .validate_typed(access_token, TOKEN_TYPE_ACCESS)
            .map_err(token_error)?;
        let user_id = claims.user_id().map_err(token_error)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Could not validate credentials".to_string()))?;
        if !user.is_active {
            return Err(DomainError::UserNotActive);
        }
        Ok(user)
    }

    /// Creates a user account. Admins create users in their own tenant;
    /// super-admins must name one.
    pub async fn register(&self, actor: &User, draft: NewUser) -> Result<User, DomainError> {
        require_role(actor, &[UserRole::Admin])?;
        if draft.role == UserRole::SuperAdmin && !actor.is_super_admin() {
            return Err(DomainError::Forbidden(
                "Only super admins can create super admin accounts".to_string(),
            ));
        }

        let tenant_id = if draft.role == UserRole::SuperAdmin {
            None
        } else {
            Some(creation_tenant(actor, draft.tenant_id, "user")?)
        };

        if let Some(tenant_id) = tenant_id {
            if self.tenants.find_by_id(&tenant_id).await?.is_none() {
                return Err(DomainError::NotFound("Tenant"));
            }
        }

        create_user(self.users.as_ref(), draft, tenant_id).await
    }

    fn issue_tokens(&self, user_id: &Uuid) -> Result<TokenPair, DomainError> {
        self.jwt
            .generate_pair(user_id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }
}

/// Validates and stores a new user after uniqueness checks.
pub(crate) async fn create_user(
    users: &dyn UserRepository,
    draft: NewUser,
    tenant_id: Option<Uuid>,
) -> Result<User, DomainError> {
    use validator::Validate;
    draft.validate()?;

    let email = draft.email.trim().to_lowercase();
    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %mask_email(&email), "Registration failed: email taken");
        return Err(DomainError::Conflict("Email already registered".to_string()));
    }
    if users.find_by_username(draft.username.trim()).await?.is_some() {
        return Err(DomainError::Conflict("Username already taken".to_string()));
    }

    let password_hash =
        PasswordService::hash(&draft.password).map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

    let user = users.create(&draft.into_user(tenant_id, password_hash)).await?;
    info!(user_id = %user.id, role = user.role.as_str(), "User created");
    Ok(user)
}

fn token_error(e: JwtError) -> DomainError {
    match e {
        JwtError::TokenExpired => DomainError::Unauthorized("Token has expired".to_string()),
        _ => DomainError::Unauthorized("Could not validate credentials".to_string()),
    }
}
