//! API handlers for AssetTrack REST endpoints

pub mod accounting;
pub mod assets;
pub mod audits;
pub mod auth;
pub mod companies;
pub mod departments;
pub mod documents;
pub mod employees;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod requests;
pub mod settings;
pub mod stats;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
