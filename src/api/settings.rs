//! System settings endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::settings::{SystemConfig, UpdateSettings},
    AppState,
};

use super::AuthenticatedUser;

/// All system settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Settings", body = Vec<SystemConfig>)
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SystemConfig>>> {
    claims.require_read()?;
    let settings = state.services.settings.get_all().await?;
    Ok(Json(settings))
}

/// Upsert settings by key
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettings,
    responses(
        (status = 200, description = "Updated settings", body = Vec<SystemConfig>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateSettings>,
) -> AppResult<Json<Vec<SystemConfig>>> {
    claims.require_admin()?;
    let settings = state.services.settings.update(request).await?;
    Ok(Json(settings))
}
