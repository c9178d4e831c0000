//! Department management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::department::{CreateDepartment, Department, UpdateDepartment},
    AppState,
};

use super::AuthenticatedUser;

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Departments", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Department>>> {
    claims.require_read()?;
    let departments = state.services.departments.list().await?;
    Ok(Json(departments))
}

/// Get one department
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Department>> {
    claims.require_read()?;
    let department = state.services.departments.get(id).await?;
    Ok(Json(department))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 409, description = "Department name already exists")
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    claims.require_write()?;
    let department = state.services.departments.create(request).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    claims.require_write()?;
    let department = state.services.departments.update(id, request).await?;
    Ok(Json(department))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.departments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
