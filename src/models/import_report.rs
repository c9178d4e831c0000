//! Workbook import report models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What happened to one imported row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Created,
    Updated,
    Skipped,
}

/// Report returned after a workbook import
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub assets_created: u32,
    pub assets_updated: u32,
    pub employees_created: u32,
    pub employees_updated: u32,
    pub departments_created: u32,
    pub accounts_created: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
