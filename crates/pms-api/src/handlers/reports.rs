//! Revenue report handlers

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use pms_core::{FinancialReport, GuestRevenue, PropertyRevenue};

use super::today;
use crate::error::ApiError;
use crate::extract::{CurrentUser, PathParam, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/v1/reports/guests/{id}/revenue
pub async fn guest_revenue(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<GuestRevenue>>, ApiError> {
    let revenue = state.reports.guest_revenue(&actor, &id).await?;
    Ok(Json(ApiResponse::success(revenue)))
}

/// GET /api/v1/reports/properties/{id}/revenue
pub async fn property_revenue(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<PropertyRevenue>>, ApiError> {
    let revenue = state.reports.property_revenue(&actor, &id).await?;
    Ok(Json(ApiResponse::success(revenue)))
}

/// GET /api/v1/reports/financial?start_date=&end_date=
pub async fn financial(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    QueryParams(range): QueryParams<ReportRange>,
) -> Result<Json<ApiResponse<FinancialReport>>, ApiError> {
    let report = state
        .reports
        .financial_report(&actor, range.start_date, range.end_date, today())
        .await?;
    Ok(Json(ApiResponse::success(report)))
}
