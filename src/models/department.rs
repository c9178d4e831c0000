//! Department model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Department record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub cost_center: Option<String>,
    pub notes: Option<String>,
}

/// Create department request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub cost_center: Option<String>,
    pub notes: Option<String>,
}

/// Update department request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub cost_center: Option<String>,
    pub notes: Option<String>,
}
