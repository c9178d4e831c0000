//! Legal entity endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::company::{CreateLegalEntity, LegalEntity, UpdateLegalEntity},
    AppState,
};

use super::AuthenticatedUser;

/// List legal entities
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Legal entities", body = Vec<LegalEntity>)
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LegalEntity>>> {
    claims.require_read()?;
    let entities = state.services.companies.list().await?;
    Ok(Json(entities))
}

/// Get one legal entity
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Legal entity ID")),
    responses(
        (status = 200, description = "Legal entity", body = LegalEntity),
        (status = 404, description = "Entity not found")
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LegalEntity>> {
    claims.require_read()?;
    let entity = state.services.companies.get(id).await?;
    Ok(Json(entity))
}

/// Register a legal entity
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    security(("bearer_auth" = [])),
    request_body = CreateLegalEntity,
    responses(
        (status = 201, description = "Entity created", body = LegalEntity),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_company(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateLegalEntity>,
) -> AppResult<(StatusCode, Json<LegalEntity>)> {
    claims.require_write()?;
    let entity = state.services.companies.create(request).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

/// Update a legal entity
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Legal entity ID")),
    request_body = UpdateLegalEntity,
    responses(
        (status = 200, description = "Entity updated", body = LegalEntity),
        (status = 404, description = "Entity not found")
    )
)]
pub async fn update_company(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateLegalEntity>,
) -> AppResult<Json<LegalEntity>> {
    claims.require_write()?;
    let entity = state.services.companies.update(id, request).await?;
    Ok(Json(entity))
}

/// Make a legal entity the document default
#[utoipa::path(
    post,
    path = "/companies/{id}/default",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Legal entity ID")),
    responses(
        (status = 200, description = "Entity set as default", body = LegalEntity),
        (status = 404, description = "Entity not found")
    )
)]
pub async fn set_default_company(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LegalEntity>> {
    claims.require_write()?;
    let entity = state.services.companies.set_default(id).await?;
    Ok(Json(entity))
}

/// Delete a legal entity
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Legal entity ID")),
    responses(
        (status = 204, description = "Entity deleted"),
        (status = 404, description = "Entity not found"),
        (status = 422, description = "Entity is the default")
    )
)]
pub async fn delete_company(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.companies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
