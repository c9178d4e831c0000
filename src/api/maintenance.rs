//! Maintenance ticket endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::maintenance::{CloseMaintenance, CreateMaintenance, MaintenanceTicket},
    AppState,
};

use super::AuthenticatedUser;

/// Maintenance list filters
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceListQuery {
    /// Only tickets that are still open
    #[serde(default)]
    pub open_only: bool,
}

/// List maintenance tickets
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(MaintenanceListQuery),
    responses(
        (status = 200, description = "Maintenance tickets", body = Vec<MaintenanceTicket>)
    )
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<MaintenanceListQuery>,
) -> AppResult<Json<Vec<MaintenanceTicket>>> {
    claims.require_read()?;
    let tickets = state.services.maintenance.list(query.open_only).await?;
    Ok(Json(tickets))
}

/// Get one maintenance ticket
#[utoipa::path(
    get,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Maintenance ticket", body = MaintenanceTicket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceTicket>> {
    claims.require_read()?;
    let ticket = state.services.maintenance.get(id).await?;
    Ok(Json(ticket))
}

/// Maintenance history of one asset
#[utoipa::path(
    get,
    path = "/maintenance/by-asset/{asset_id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Tickets for the asset", body = Vec<MaintenanceTicket>),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn list_by_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(asset_id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceTicket>>> {
    claims.require_read()?;
    let tickets = state.services.maintenance.list_by_asset(asset_id).await?;
    Ok(Json(tickets))
}

/// Send an asset to maintenance
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Ticket opened", body = MaintenanceTicket),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Asset already has an open ticket"),
        (status = 422, description = "Asset written off or already in maintenance")
    )
)]
pub async fn open_ticket(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceTicket>)> {
    claims.require_write()?;
    let ticket = state.services.maintenance.open(request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Close a ticket and bring the asset back
#[utoipa::path(
    post,
    path = "/maintenance/{id}/close",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = CloseMaintenance,
    responses(
        (status = 200, description = "Ticket closed", body = MaintenanceTicket),
        (status = 404, description = "Ticket not found"),
        (status = 422, description = "Ticket already closed")
    )
)]
pub async fn close_ticket(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CloseMaintenance>,
) -> AppResult<Json<MaintenanceTicket>> {
    claims.require_write()?;
    let ticket = state.services.maintenance.close(id, request).await?;
    Ok(Json(ticket))
}
