//! User account administration (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, UserAccount},
    AppState,
};

use super::AuthenticatedUser;

/// List user accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User accounts", body = Vec<UserAccount>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserAccount>>> {
    claims.require_admin()?;
    let users = state.services.auth.list_users().await?;
    Ok(Json(users))
}

/// Get one user account
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User account", body = UserAccount),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<UserAccount>> {
    claims.require_admin()?;
    let user = state.services.auth.get_user(id).await?;
    Ok(Json(user))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserAccount),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Login already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserAccount>)> {
    claims.require_admin()?;
    let user = state.services.auth.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user account
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserAccount),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUser>,
) -> AppResult<Json<UserAccount>> {
    claims.require_admin()?;
    let user = state.services.auth.update_user(id, request).await?;
    Ok(Json(user))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.auth.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
