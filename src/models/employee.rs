//! Employee model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Employee record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    /// Company registration / badge number
    pub registration_number: Option<String>,
    pub department_id: Option<i32>,
    pub position: Option<String>,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub department_id: Option<i32>,
    pub position: Option<String>,
}

/// Update employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub department_id: Option<i32>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}

/// Employee list filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    pub name: Option<String>,
    pub department_id: Option<i32>,
    pub active: Option<bool>,
}
