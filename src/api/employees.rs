//! Employee management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
    AppState,
};

use super::AuthenticatedUser;

/// List employees with optional filters
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employees", body = Vec<Employee>)
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    claims.require_read()?;
    let employees = state.services.employees.list(&query).await?;
    Ok(Json(employees))
}

/// Get one employee
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Employee>> {
    claims.require_read()?;
    let employee = state.services.employees.get(id).await?;
    Ok(Json(employee))
}

/// Register an employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    claims.require_write()?;
    let employee = state.services.employees.create(request).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    claims.require_write()?;
    let employee = state.services.employees.update(id, request).await?;
    Ok(Json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Employee still holds assets")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
