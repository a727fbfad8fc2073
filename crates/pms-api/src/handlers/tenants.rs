// ============================================================================
// PMS API - Tenant Handlers
// File: crates/pms-api/src/handlers/tenants.rs
// ============================================================================
//! Tenant administration (super-admin only) and current-tenant lookup

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use pms_core::deletion::TenantDeletionSummary;
use pms_core::{DomainError, NewTenant, NewUser, Tenant, TenantChanges, User, UserRole};

use super::double_option;
use crate::error::ApiError;
use crate::extract::{CurrentUser, PathParam, RequestTenant, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 255, message = "Tenant name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 63, message = "Subdomain must be between 1 and 63 characters"))]
    pub subdomain: String,
    pub domain: Option<String>,
    #[validate(email(message = "Invalid tenant email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<CreateTenantRequest> for NewTenant {
    fn from(req: CreateTenantRequest) -> Self {
        NewTenant {
            name: req.name,
            subdomain: req.subdomain,
            domain: req.domain,
            email: req.email,
            phone: req.phone,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 255, message = "Tenant name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 63, message = "Subdomain must be between 1 and 63 characters"))]
    pub subdomain: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub domain: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl From<UpdateTenantRequest> for TenantChanges {
    fn from(req: UpdateTenantRequest) -> Self {
        TenantChanges {
            name: req.name,
            subdomain: req.subdomain,
            domain: req.domain,
            email: req.email,
            phone: req.phone,
            is_active: req.is_active,
        }
    }
}

/// First administrator of a tenant
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantAdminRequest {
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
}

impl From<CreateTenantAdminRequest> for NewUser {
    fn from(req: CreateTenantAdminRequest) -> Self {
        NewUser {
            email: req.email,
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role: UserRole::Admin,
            is_active: true,
            tenant_id: None,
        }
    }
}

/// GET /api/v1/tenants
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Tenant>>>, ApiError> {
    let tenants = state.tenants.list(&actor).await?;
    Ok(Json(ApiResponse::success(tenants)))
}

/// GET /api/v1/tenants/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state.tenants.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(tenant)))
}

/// POST /api/v1/tenants
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateTenantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tenant>>), ApiError> {
    let tenant = state.tenants.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(tenant))))
}

/// PUT /api/v1/tenants/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTenantRequest>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state.tenants.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(tenant)))
}

/// Cascading delete - DELETE /api/v1/tenants/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<TenantDeletionSummary>>, ApiError> {
    let summary = state.tenants.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// POST /api/v1/tenants/{id}/admin
pub async fn create_admin(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateTenantAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state.tenants.create_admin(&actor, &id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// Tenant addressed by the request host - GET /api/v1/tenants/current
pub async fn current(
    RequestTenant(tenant): RequestTenant,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = tenant.ok_or(DomainError::NotFound("Tenant"))?;
    Ok(Json(ApiResponse::success(tenant)))
}
