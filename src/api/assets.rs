//! Asset management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::asset::{Asset, AssetQuery, AssignAsset, CreateAsset, UpdateAsset},
    AppState,
};

use super::AuthenticatedUser;

/// Write-off request body
#[derive(Deserialize, ToSchema)]
pub struct WriteOffRequest {
    /// Reason recorded in the asset history
    pub reason: Option<String>,
}

/// List assets with optional filters
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "Assets", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    claims.require_read()?;
    let assets = state.services.assets.list(&query).await?;
    Ok(Json(assets))
}

/// Get one asset
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    claims.require_read()?;
    let asset = state.services.assets.get(id).await?;
    Ok(Json(asset))
}

/// Register an asset manually
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    claims.require_write()?;
    let asset = state.services.assets.create(request).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update an asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn update_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    claims.require_write()?;
    let asset = state.services.assets.update(id, request).await?;
    Ok(Json(asset))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset is assigned")
    )
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.assets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign an available asset to an employee
#[utoipa::path(
    post,
    path = "/assets/{id}/assign",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = AssignAsset,
    responses(
        (status = 200, description = "Asset assigned", body = Asset),
        (status = 404, description = "Asset or employee not found"),
        (status = 422, description = "Asset not available")
    )
)]
pub async fn assign_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AssignAsset>,
) -> AppResult<Json<Asset>> {
    claims.require_write()?;
    let asset = state.services.assets.assign(id, request.employee_id).await?;
    Ok(Json(asset))
}

/// Return an asset to stock
#[utoipa::path(
    post,
    path = "/assets/{id}/unassign",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset returned to stock", body = Asset),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset not assigned")
    )
)]
pub async fn unassign_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    claims.require_write()?;
    let asset = state.services.assets.unassign(id).await?;
    Ok(Json(asset))
}

/// Write off an asset (baixa patrimonial)
#[utoipa::path(
    post,
    path = "/assets/{id}/write-off",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = WriteOffRequest,
    responses(
        (status = 200, description = "Asset written off", body = Asset),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset already written off")
    )
)]
pub async fn write_off_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<WriteOffRequest>,
) -> AppResult<Json<Asset>> {
    claims.require_write()?;
    let asset = state.services.assets.write_off(id, request.reason).await?;
    Ok(Json(asset))
}
