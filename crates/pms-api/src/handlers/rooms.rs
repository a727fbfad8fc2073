//! Room handlers. Reads include the status derived from today's bookings.

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use pms_core::{NewRoom, Room, RoomChanges, RoomStatus, RoomWithStatus};

use super::{default_one, double_option, today};
use crate::error::ApiError;
use crate::extract::{CurrentUser, PathParam, QueryParams, ValidatedJson};
use crate::response::{ApiResponse, Deleted};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    pub property_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Room name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_one")]
    pub capacity: i32,
    pub price_per_night: Option<Decimal>,
    pub keybox_code: Option<String>,
    pub status: Option<RoomStatus>,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(req: CreateRoomRequest) -> Self {
        NewRoom {
            property_id: req.property_id,
            name: req.name,
            description: req.description,
            capacity: req.capacity,
            price_per_night: req.price_per_night,
            keybox_code: req.keybox_code,
            status: req.status,
        }
    }
}

/// Rooms never move between properties, so `property_id` is not accepted.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 255, message = "Room name is required"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub capacity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub price_per_night: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub keybox_code: Option<Option<String>>,
    pub status: Option<RoomStatus>,
}

impl From<UpdateRoomRequest> for RoomChanges {
    fn from(req: UpdateRoomRequest) -> Self {
        RoomChanges {
            name: req.name,
            description: req.description,
            capacity: req.capacity,
            price_per_night: req.price_per_night,
            keybox_code: req.keybox_code,
            status: req.status,
        }
    }
}

/// GET /api/v1/rooms?property_id=
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    QueryParams(query): QueryParams<RoomQuery>,
) -> Result<Json<ApiResponse<Vec<RoomWithStatus>>>, ApiError> {
    let rooms = state.rooms.list(&actor, query.property_id, today()).await?;
    Ok(Json(ApiResponse::success(rooms)))
}

/// GET /api/v1/rooms/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<RoomWithStatus>>, ApiError> {
    let room = state.rooms.get(&actor, &id, today()).await?;
    Ok(Json(ApiResponse::success(room)))
}

/// POST /api/v1/rooms
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), ApiError> {
    let room = state.rooms.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room))))
}

/// PUT /api/v1/rooms/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state.rooms.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(room)))
}

/// DELETE /api/v1/rooms/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, ApiError> {
    state.rooms.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::success(Deleted::new(id, "Room"))))
}
