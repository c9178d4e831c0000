//! Physical audit session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::audit::{AuditSession, CreateAudit, CreateAuditEntry},
    AppState,
};

use super::AuthenticatedUser;

/// List audit sessions, newest first
#[utoipa::path(
    get,
    path = "/audits",
    tag = "audits",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Audit sessions", body = Vec<AuditSession>)
    )
)]
pub async fn list_audits(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AuditSession>>> {
    claims.require_read()?;
    let sessions = state.services.audits.list().await?;
    Ok(Json(sessions))
}

/// Get one audit session with its entries
#[utoipa::path(
    get,
    path = "/audits/{id}",
    tag = "audits",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Audit session ID")),
    responses(
        (status = 200, description = "Audit session", body = AuditSession),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_audit(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AuditSession>> {
    claims.require_read()?;
    let session = state.services.audits.get(id).await?;
    Ok(Json(session))
}

/// Open an audit session
#[utoipa::path(
    post,
    path = "/audits",
    tag = "audits",
    security(("bearer_auth" = [])),
    request_body = CreateAudit,
    responses(
        (status = 201, description = "Session opened", body = AuditSession),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_audit(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAudit>,
) -> AppResult<(StatusCode, Json<AuditSession>)> {
    claims.require_write()?;
    let session = state.services.audits.create(request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Record one asset check in an open session
#[utoipa::path(
    post,
    path = "/audits/{id}/entries",
    tag = "audits",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Audit session ID")),
    request_body = CreateAuditEntry,
    responses(
        (status = 200, description = "Entry recorded", body = AuditSession),
        (status = 404, description = "Session or asset not found"),
        (status = 409, description = "Asset already audited in this session"),
        (status = 422, description = "Session is closed")
    )
)]
pub async fn add_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CreateAuditEntry>,
) -> AppResult<Json<AuditSession>> {
    claims.require_write()?;
    let session = state.services.audits.add_entry(id, request).await?;
    Ok(Json(session))
}

/// Close an audit session
#[utoipa::path(
    post,
    path = "/audits/{id}/close",
    tag = "audits",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Audit session ID")),
    responses(
        (status = 200, description = "Session closed", body = AuditSession),
        (status = 404, description = "Session not found"),
        (status = 422, description = "Session already closed")
    )
)]
pub async fn close_audit(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AuditSession>> {
    claims.require_write()?;
    let session = state.services.audits.close(id).await?;
    Ok(Json(session))
}
