//! Legal entity (billing company) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Legal entity stamped on generated documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LegalEntity {
    pub id: i32,
    pub corporate_name: String,
    pub trade_name: Option<String>,
    /// CNPJ
    pub tax_id: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub is_default: bool,
}

/// Create legal entity request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLegalEntity {
    #[validate(length(min = 1, message = "Corporate name is required"))]
    pub corporate_name: String,
    pub trade_name: Option<String>,
    #[validate(length(min = 1, message = "Tax id is required"))]
    pub tax_id: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub is_default: Option<bool>,
}

/// Update legal entity request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLegalEntity {
    pub corporate_name: Option<String>,
    pub trade_name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}
