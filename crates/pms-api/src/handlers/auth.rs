// ============================================================================
// PMS API - Auth Handlers
// File: crates/pms-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, refresh, register, me)

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pms_core::{NewUser, User, UserRole};
use pms_security::TokenPair;

use crate::error::ApiError;
use crate::extract::{CurrentUser, RequestTenant, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login: the token pair plus the logged-in user
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Register request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub tenant_id: Option<Uuid>,
}

fn active_by_default() -> bool {
    true
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            email: req.email,
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            is_active: req.is_active,
            tenant_id: req.tenant_id,
        }
    }
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    RequestTenant(tenant): RequestTenant,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state
        .auth
        .login(&payload.email, &payload.password, tenant.as_ref())
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        tokens: result.tokens,
        user: result.user,
    })))
}

/// Token refresh handler - POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let tokens = state.auth.refresh(&payload.refresh_token).await?;
    Ok(Json(ApiResponse::success(tokens)))
}

/// Register handler - POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state.auth.register(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// Current user - GET /api/v1/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::success(user))
}
