//! Dashboard statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::DashboardStats, AppState};

use super::AuthenticatedUser;

/// Inventory dashboard counters
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats)
    )
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    claims.require_read()?;
    let stats = state.services.stats.dashboard().await?;
    Ok(Json(stats))
}
