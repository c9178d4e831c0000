//! Authentication endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::user::{LoginRequest, LoginResponse, UserAccount},
    AppState,
};

use super::AuthenticatedUser;

/// Authenticate with login and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .services
        .auth
        .login(&request.login, &request.password)
        .await?;
    Ok(Json(response))
}

/// The account behind the presented token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserAccount),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserAccount>> {
    let user = state.services.auth.me(&claims).await?;
    Ok(Json(user))
}
