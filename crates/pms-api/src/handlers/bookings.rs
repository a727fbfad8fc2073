// ============================================================================
// PMS API - Booking Handlers
// File: crates/pms-api/src/handlers/bookings.rs
// ============================================================================
//! Booking CRUD. Availability and status transitions are enforced by the
//! booking service; handlers only translate payloads.

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use pms_core::{Booking, BookingChanges, BookingStatus, NewBooking};

use super::{default_one, double_option};
use crate::error::ApiError;
use crate::extract::{CurrentUser, PathParam, QueryParams, ValidatedJson};
use crate::response::{ApiResponse, Deleted};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub property_id: Option<Uuid>,
    pub guest_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default = "default_one")]
    pub guests_count: i32,
    pub total_amount: Option<Decimal>,
    pub status: Option<BookingStatus>,
    #[validate(length(max = 100))]
    pub booking_source: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        NewBooking {
            property_id: req.property_id,
            room_id: req.room_id,
            guest_id: req.guest_id,
            check_in_date: req.check_in_date,
            check_out_date: req.check_out_date,
            guests_count: req.guests_count,
            total_amount: req.total_amount,
            status: req.status,
            booking_source: req.booking_source,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub room_id: Option<Option<Uuid>>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub guests_count: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_amount: Option<Option<Decimal>>,
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub booking_source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(req: UpdateBookingRequest) -> Self {
        BookingChanges {
            room_id: req.room_id,
            check_in_date: req.check_in_date,
            check_out_date: req.check_out_date,
            guests_count: req.guests_count,
            total_amount: req.total_amount,
            status: req.status,
            booking_source: req.booking_source,
            notes: req.notes,
        }
    }
}

/// GET /api/v1/bookings?property_id=&guest_id=
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    QueryParams(query): QueryParams<BookingQuery>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, ApiError> {
    let bookings = state
        .bookings
        .list(&actor, query.property_id, query.guest_id)
        .await?;
    Ok(Json(ApiResponse::success(bookings)))
}

/// GET /api/v1/bookings/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state.bookings.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(booking)))
}

/// POST /api/v1/bookings
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), ApiError> {
    let booking = state.bookings.create(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking))))
}

/// PUT /api/v1/bookings/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state.bookings.update(&actor, &id, payload.into()).await?;
    Ok(Json(ApiResponse::success(booking)))
}

/// DELETE /api/v1/bookings/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, ApiError> {
    state.bookings.delete(&actor, &id).await?;
    Ok(Json(ApiResponse::success(Deleted::new(id, "Booking"))))
}
