//! Document generation and workbook exchange endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::import_report::ImportReport,
    AppState,
};

use super::AuthenticatedUser;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Label sheet selection
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LabelQuery {
    /// Comma-separated asset IDs
    pub ids: String,
}

fn attachment(content_type: &str, filename: &str, bytes: Vec<u8>) -> AppResult<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(bytes.into())
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Responsibility term PDF for one employee
#[utoipa::path(
    get,
    path = "/documents/responsibility-term/{employee_id}",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(("employee_id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Employee holds no assets")
    )
)]
pub async fn responsibility_term(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(employee_id): Path<i32>,
) -> AppResult<Response> {
    claims.require_read()?;
    let bytes = state
        .services
        .documents
        .responsibility_term(employee_id)
        .await?;
    attachment(
        PDF_CONTENT_TYPE,
        &format!("termo-responsabilidade-{employee_id}.pdf"),
        bytes,
    )
}

/// QR label sheet PDF for selected assets
#[utoipa::path(
    get,
    path = "/documents/labels",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(LabelQuery),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 400, description = "Bad or empty ID list"),
        (status = 404, description = "Unknown asset ID")
    )
)]
pub async fn asset_labels(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<LabelQuery>,
) -> AppResult<Response> {
    claims.require_read()?;
    let ids = query
        .ids
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("Invalid asset ID: {s}")))
        })
        .collect::<AppResult<Vec<i32>>>()?;
    let bytes = state.services.documents.labels(&ids).await?;
    attachment(PDF_CONTENT_TYPE, "etiquetas.pdf", bytes)
}

/// Full inventory export as an Excel workbook
#[utoipa::path(
    get,
    path = "/export/workbook",
    tag = "documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Excel workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    )
)]
pub async fn export_workbook(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Response> {
    claims.require_read()?;
    let bytes = state.services.workbook.export().await?;
    attachment(XLSX_CONTENT_TYPE, "inventario.xlsx", bytes)
}

/// Bulk import from an Excel workbook
#[utoipa::path(
    post,
    path = "/import/workbook",
    tag = "documents",
    security(("bearer_auth" = [])),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Import report", body = ImportReport),
        (status = 400, description = "Unreadable workbook"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn import_workbook(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    body: Bytes,
) -> AppResult<Json<ImportReport>> {
    claims.require_admin()?;
    let report = state.services.workbook.import(&body).await?;
    Ok(Json(report))
}
