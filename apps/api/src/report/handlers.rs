//! Axum route handlers for the Report API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::report::pipeline::run_report_pipeline;
use crate::report::{ReportRequest, ReportResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<ProfileRow>,
}

/// POST /api/report
pub async fn handle_create_report(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let response = run_report_pipeline(&state, &user, req).await?;
    Ok(Json(response))
}

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profiles.find(&user.id).await?;
    Ok(Json(ProfileResponse { profile }))
}
