//! System configuration rows

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One key/value system setting
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SystemConfig {
    pub key: String,
    pub value: Option<String>,
}

/// Settings update payload: keys absent from the map are left untouched
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettings {
    pub settings: std::collections::HashMap<String, Option<String>>,
}
