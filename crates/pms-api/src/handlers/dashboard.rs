//! Dashboard handler

use axum::{extract::State, Json};

use pms_core::DashboardStats;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Dashboard statistics - GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.dashboard.stats(&user).await?;
    Ok(Json(ApiResponse::success(stats)))
}
