//! Property handlers

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use pms_core::{NewProperty, Property, PropertyChanges};

use super::{default_one, double_option};
use crate::error::ApiError;
use crate::extract::{CurrentUser, PathParam, ValidatedJson};
use crate::response::{ApiResponse, Deleted};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    /// Required when a super-admin creates the property.
    pub tenant_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Property name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid property email"))]
    pub email: Option<String>,
    pub wifi_password: Option<String>,
    pub price_per_night: Option<Decimal>,
    #[serde(default = "default_one")]
    pub max_guests: i32,
}

impl From<CreatePropertyRequest> for NewProperty {
    fn from(req: CreatePropertyRequest) -> Self {
        NewProperty {
            tenant_id: req.tenant_id,
            name: req.name,
            description: req.description,
            address: req.address,
            phone: req.phone,
            email: req.email,
            wifi_password: req.wifi_password,
            price_per_night: req.price_per_night,
            max_guests: req.max_guests,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 255, message = "Property name is required"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub wifi_password: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price_per_night: Option<Option<Decimal>>,
    pub max_guests: Option<i32>,
}

impl From<UpdatePropertyRequest> for PropertyChanges {
    fn from(req: UpdatePropertyRequest) -> Self {
        PropertyChanges {
            name: req.name,
            description: req.description,
            address: req.address,
            phone: req.phone,
            email: req.email,
            wifi_password: req.wifi_password,
            price_per_night: req.price_per_night,
            max_guests: req.max_guests,
        }
    }
}

/// GET /api/v1/properties
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Property>>>, ApiError> {
    let properties = state.properties.list(&actor).await?;
    Ok(Json(ApiResponse::success(properties)))
}

/// GET /api/v1/properties/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Property>>, ApiError> {
    let property = state.properties.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(property)))
}

/// POST /api/v1/properties
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Property>>), ApiError> {
    let property = state.properties.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(property))))
}

/// PUT /api/v1/properties/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePropertyRequest>,
) -> Result<Json<ApiResponse<Property>>, ApiError> {
    let property = state.properties.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(property)))
}

/// DELETE /api/v1/properties/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, ApiError> {
    state.properties.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::success(Deleted::new(id, "Property"))))
}
