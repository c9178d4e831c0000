//! Accounting account and asset-type classification endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::accounting::{
        AccountingAccount, AssetTypeConfig, CreateAccount, CreateAssetTypeConfig, UpdateAccount,
        UpdateAssetTypeConfig,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List accounting accounts
#[utoipa::path(
    get,
    path = "/accounting/accounts",
    tag = "accounting",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Accounting accounts", body = Vec<AccountingAccount>)
    )
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AccountingAccount>>> {
    claims.require_read()?;
    let accounts = state.services.accounting.list_accounts().await?;
    Ok(Json(accounts))
}

/// Get one accounting account
#[utoipa::path(
    get,
    path = "/accounting/accounts/{id}",
    tag = "accounting",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Accounting account", body = AccountingAccount),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AccountingAccount>> {
    claims.require_read()?;
    let account = state.services.accounting.get_account(id).await?;
    Ok(Json(account))
}

/// Create an accounting account
#[utoipa::path(
    post,
    path = "/accounting/accounts",
    tag = "accounting",
    security(("bearer_auth" = [])),
    request_body = CreateAccount,
    responses(
        (status = 201, description = "Account created", body = AccountingAccount),
        (status = 409, description = "Account code already exists")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAccount>,
) -> AppResult<(StatusCode, Json<AccountingAccount>)> {
    claims.require_write()?;
    let account = state.services.accounting.create_account(request).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Update an accounting account
#[utoipa::path(
    put,
    path = "/accounting/accounts/{id}",
    tag = "accounting",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Account updated", body = AccountingAccount),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_account(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAccount>,
) -> AppResult<Json<AccountingAccount>> {
    claims.require_write()?;
    let account = state.services.accounting.update_account(id, request).await?;
    Ok(Json(account))
}

/// Delete an accounting account
#[utoipa::path(
    delete,
    path = "/accounting/accounts/{id}",
    tag = "accounting",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.accounting.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List asset-type default account mappings
#[utoipa::path(
    get,
    path = "/accounting/asset-types",
    tag = "accounting",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Asset type mappings", body = Vec<AssetTypeConfig>)
    )
)]
pub async fn list_type_configs(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AssetTypeConfig>>> {
    claims.require_read()?;
    let configs = state.services.accounting.list_type_configs().await?;
    Ok(Json(configs))
}

/// Map an asset type to its default account
#[utoipa::path(
    post,
    path = "/accounting/asset-types",
    tag = "accounting",
    security(("bearer_auth" = [])),
    request_body = CreateAssetTypeConfig,
    responses(
        (status = 201, description = "Mapping created", body = AssetTypeConfig),
        (status = 409, description = "Type already mapped")
    )
)]
pub async fn create_type_config(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAssetTypeConfig>,
) -> AppResult<(StatusCode, Json<AssetTypeConfig>)> {
    claims.require_write()?;
    let config = state.services.accounting.create_type_config(request).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// Update an asset-type mapping
#[utoipa::path(
    put,
    path = "/accounting/asset-types/{id}",
    tag = "accounting",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Mapping ID")),
    request_body = UpdateAssetTypeConfig,
    responses(
        (status = 200, description = "Mapping updated", body = AssetTypeConfig),
        (status = 404, description = "Mapping not found")
    )
)]
pub async fn update_type_config(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAssetTypeConfig>,
) -> AppResult<Json<AssetTypeConfig>> {
    claims.require_write()?;
    let config = state
        .services
        .accounting
        .update_type_config(id, request)
        .await?;
    Ok(Json(config))
}

/// Delete an asset-type mapping
#[utoipa::path(
    delete,
    path = "/accounting/asset-types/{id}",
    tag = "accounting",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Mapping ID")),
    responses(
        (status = 204, description = "Mapping deleted"),
        (status = 404, description = "Mapping not found")
    )
)]
pub async fn delete_type_config(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.accounting.delete_type_config(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
