//! Guest handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use pms_core::{Guest, GuestChanges, NewGuest};

use super::double_option;
use crate::error::ApiError;
use crate::extract::{CurrentUser, PathParam, ValidatedJson};
use crate::response::{ApiResponse, Deleted};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGuestRequest {
    pub tenant_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid guest email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateGuestRequest> for NewGuest {
    fn from(req: CreateGuestRequest) -> Self {
        NewGuest {
            tenant_id: req.tenant_id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            whatsapp: req.whatsapp,
            nationality: req.nationality,
            id_number: req.id_number,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGuestRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub whatsapp: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub nationality: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub id_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl From<UpdateGuestRequest> for GuestChanges {
    fn from(req: UpdateGuestRequest) -> Self {
        GuestChanges {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            whatsapp: req.whatsapp,
            nationality: req.nationality,
            id_number: req.id_number,
            notes: req.notes,
        }
    }
}

/// GET /api/v1/guests
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Guest>>>, ApiError> {
    let guests = state.guests.list(&actor).await?;
    Ok(Json(ApiResponse::success(guests)))
}

/// GET /api/v1/guests/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Guest>>, ApiError> {
    let guest = state.guests.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(guest)))
}

/// POST /api/v1/guests
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateGuestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Guest>>), ApiError> {
    let guest = state.guests.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(guest))))
}

/// PUT /api/v1/guests/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateGuestRequest>,
) -> Result<Json<ApiResponse<Guest>>, ApiError> {
    let guest = state.guests.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(guest)))
}

/// DELETE /api/v1/guests/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, ApiError> {
    state.guests.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::success(Deleted::new(id, "Guest"))))
}
