//! Accounting classification models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Chart-of-accounts entry used to classify capitalized assets
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AccountingAccount {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub notes: Option<String>,
}

/// Create accounting account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccount {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub notes: Option<String>,
}

/// Update accounting account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccount {
    pub code: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// Per-asset-type accounting defaults
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetTypeConfig {
    pub id: i32,
    pub type_name: String,
    pub account_code: Option<String>,
    pub useful_life_months: Option<i32>,
    pub notes: Option<String>,
}

/// Create asset type config request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssetTypeConfig {
    #[validate(length(min = 1, message = "Type name is required"))]
    pub type_name: String,
    pub account_code: Option<String>,
    pub useful_life_months: Option<i32>,
    pub notes: Option<String>,
}

/// Update asset type config request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAssetTypeConfig {
    pub type_name: Option<String>,
    pub account_code: Option<String>,
    pub useful_life_months: Option<i32>,
    pub notes: Option<String>,
}
