//! Equipment request and purchase workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::request::{
        ApproveQuotation, CreateDirectPurchase, CreateRequest, EquipmentRequest, LinkAsset,
        ReceiptData, RequestDetails, RequestItem, RequestStatus, SetQuotation, UpdateRequest,
    },
    services::purchase::ReceiptResult,
    AppState,
};

use super::AuthenticatedUser;

/// Request list filters
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RequestListQuery {
    /// Filter by operational status label
    pub status: Option<String>,
}

/// List requests, optionally by status
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestListQuery),
    responses(
        (status = 200, description = "Requests", body = Vec<EquipmentRequest>)
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<Vec<EquipmentRequest>>> {
    claims.require_read()?;
    let status = query
        .status
        .map(|s| s.parse::<RequestStatus>())
        .transpose()
        .map_err(AppError::BadRequest)?;
    let requests = state.services.requests.list(status).await?;
    Ok(Json(requests))
}

/// Get one request with its line items
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = RequestDetails),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RequestDetails>> {
    claims.require_read()?;
    let details = state.services.requests.get(id).await?;
    Ok(Json(details))
}

/// Open an equipment request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = RequestDetails),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestDetails>)> {
    claims.require_write()?;
    let details = state.services.requests.create(request).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// Open a direct purchase order (stock replenishment, no employee)
#[utoipa::path(
    post,
    path = "/requests/direct-purchase",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateDirectPurchase,
    responses(
        (status = 201, description = "Purchase order created", body = RequestDetails),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_direct_purchase(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateDirectPurchase>,
) -> AppResult<(StatusCode, Json<RequestDetails>)> {
    claims.require_write()?;
    let details = state.services.purchase.create_direct_purchase(request).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// Update request header fields
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = EquipmentRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRequest>,
) -> AppResult<Json<EquipmentRequest>> {
    claims.require_write()?;
    let updated = state.services.requests.update(id, request).await?;
    Ok(Json(updated))
}

/// Delete a request
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted"),
        (status = 404, description = "Request not found"),
        (status = 422, description = "Request already in handling")
    )
)]
pub async fn delete_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.requests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Approve a pending request
#[utoipa::path(
    post,
    path = "/requests/{id}/approve",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request approved", body = EquipmentRequest),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn approve_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentRequest>> {
    claims.require_write()?;
    let request = state
        .services
        .requests
        .transition(id, RequestStatus::Aprovado)
        .await?;
    Ok(Json(request))
}

/// Start preparing an approved request
#[utoipa::path(
    post,
    path = "/requests/{id}/prepare",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request in preparation", body = EquipmentRequest),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn prepare_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentRequest>> {
    claims.require_write()?;
    let request = state
        .services
        .requests
        .transition(id, RequestStatus::Preparando)
        .await?;
    Ok(Json(request))
}

/// Deliver a fully resolved request
#[utoipa::path(
    post,
    path = "/requests/{id}/deliver",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request delivered", body = EquipmentRequest),
        (status = 422, description = "Unresolved items or invalid transition")
    )
)]
pub async fn deliver_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentRequest>> {
    claims.require_write()?;
    let request = state
        .services
        .requests
        .transition(id, RequestStatus::Entregue)
        .await?;
    Ok(Json(request))
}

/// Cancel a request
#[utoipa::path(
    post,
    path = "/requests/{id}/cancel",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request cancelled", body = EquipmentRequest),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentRequest>> {
    claims.require_write()?;
    let request = state
        .services
        .requests
        .transition(id, RequestStatus::Cancelado)
        .await?;
    Ok(Json(request))
}

/// Reconcile a request flagged by an audit back to delivered
#[utoipa::path(
    post,
    path = "/requests/{id}/reconcile",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request reconciled", body = EquipmentRequest),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn reconcile_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentRequest>> {
    claims.require_write()?;
    let request = state
        .services
        .requests
        .transition(id, RequestStatus::Entregue)
        .await?;
    Ok(Json(request))
}

// ---------------------------------------------------------------------------
// Line item fulfillment
// ---------------------------------------------------------------------------

/// Put a line item on the purchase-order path
#[utoipa::path(
    post,
    path = "/requests/{id}/items/{position}/purchase-order",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position")
    ),
    responses(
        (status = 200, description = "Item on purchase path", body = RequestItem),
        (status = 422, description = "Item already resolved or already a purchase order")
    )
)]
pub async fn mark_purchase_order(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position)): Path<(i32, i16)>,
) -> AppResult<Json<RequestItem>> {
    claims.require_write()?;
    let item = state.services.purchase.mark_purchase_order(id, position).await?;
    Ok(Json(item))
}

/// Record or edit a quotation slot (Fornecedor 1/2/3)
#[utoipa::path(
    put,
    path = "/requests/{id}/items/{position}/quotations/{slot}",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position"),
        ("slot" = i16, Path, description = "Quotation slot 0..=2")
    ),
    request_body = SetQuotation,
    responses(
        (status = 200, description = "Quotation recorded", body = RequestItem),
        (status = 422, description = "Item already delivered")
    )
)]
pub async fn set_quotation(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position, slot)): Path<(i32, i16, i16)>,
    Json(request): Json<SetQuotation>,
) -> AppResult<Json<RequestItem>> {
    claims.require_write()?;
    let item = state
        .services
        .purchase
        .set_quotation(id, position, slot, request)
        .await?;
    Ok(Json(item))
}

/// Approve the winning quotation (requires approval capability)
#[utoipa::path(
    post,
    path = "/requests/{id}/items/{position}/approve-quotation",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position")
    ),
    request_body = ApproveQuotation,
    responses(
        (status = 200, description = "Quotation approved", body = RequestItem),
        (status = 403, description = "Caller cannot approve quotations"),
        (status = 422, description = "Empty slot or invalid transition")
    )
)]
pub async fn approve_quotation(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position)): Path<(i32, i16)>,
    Json(request): Json<ApproveQuotation>,
) -> AppResult<Json<RequestItem>> {
    claims.require_can_approve()?;
    let item = state
        .services
        .purchase
        .approve_quotation(id, position, request)
        .await?;
    Ok(Json(item))
}

/// Authorize the purchase order (requires execution capability)
#[utoipa::path(
    post,
    path = "/requests/{id}/items/{position}/authorize",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position")
    ),
    responses(
        (status = 200, description = "Order authorized", body = RequestItem),
        (status = 403, description = "Caller cannot execute orders"),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn authorize_order(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position)): Path<(i32, i16)>,
) -> AppResult<Json<RequestItem>> {
    claims.require_can_execute()?;
    let item = state.services.purchase.authorize_order(id, position).await?;
    Ok(Json(item))
}

/// Confirm payment and shipment (requires execution capability)
#[utoipa::path(
    post,
    path = "/requests/{id}/items/{position}/purchase",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position")
    ),
    responses(
        (status = 200, description = "Purchase confirmed", body = RequestItem),
        (status = 403, description = "Caller cannot execute orders"),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn mark_purchased(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position)): Path<(i32, i16)>,
) -> AppResult<Json<RequestItem>> {
    claims.require_can_execute()?;
    let item = state.services.purchase.mark_purchased(id, position).await?;
    Ok(Json(item))
}

/// Receive the purchased item, creating the asset (tombamento)
#[utoipa::path(
    post,
    path = "/requests/{id}/items/{position}/receipt",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position")
    ),
    request_body = ReceiptData,
    responses(
        (status = 201, description = "Asset created and fulfillment closed", body = ReceiptResult),
        (status = 403, description = "Caller cannot execute orders"),
        (status = 422, description = "Not purchased yet or already received")
    )
)]
pub async fn finalize_receipt(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position)): Path<(i32, i16)>,
    Json(request): Json<ReceiptData>,
) -> AppResult<(StatusCode, Json<ReceiptResult>)> {
    claims.require_can_execute()?;
    let result = state
        .services
        .purchase
        .finalize_receipt(id, position, request)
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Resolve a line item against an available stock asset
#[utoipa::path(
    post,
    path = "/requests/{id}/items/{position}/link-asset",
    tag = "purchase",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("position" = i16, Path, description = "Line item position")
    ),
    request_body = LinkAsset,
    responses(
        (status = 200, description = "Asset linked", body = RequestItem),
        (status = 422, description = "Item not stock-linkable or asset unavailable")
    )
)]
pub async fn link_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, position)): Path<(i32, i16)>,
    Json(request): Json<LinkAsset>,
) -> AppResult<Json<RequestItem>> {
    claims.require_write()?;
    let item = state.services.purchase.link_asset(id, position, request).await?;
    Ok(Json(item))
}
