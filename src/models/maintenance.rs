//! Maintenance ticket model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Maintenance ticket: check-out of an asset to a repair provider and
/// its later check-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceTicket {
    pub id: i32,
    pub asset_id: i32,
    pub description: String,
    pub provider: Option<String>,
    pub sent_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub returned_date: Option<DateTime<Utc>>,
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
}

impl MaintenanceTicket {
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// Check-out request (opens a ticket)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub asset_id: i32,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub provider: Option<String>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Check-in request (closes a ticket)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CloseMaintenance {
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
}
