//! Physical audit session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use crate::text::normalize;

/// Audit session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AuditStatus {
    #[serde(rename = "Aberta")]
    Aberta,
    #[serde(rename = "Encerrada")]
    Encerrada,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Aberta => "Aberta",
            AuditStatus::Encerrada => "Encerrada",
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "aberta" => Ok(AuditStatus::Aberta),
            "encerrada" => Ok(AuditStatus::Encerrada),
            _ => Err(format!("Invalid audit status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for AuditStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for AuditStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for AuditStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// One scanned asset during a physical audit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditEntry {
    pub asset_id: i32,
    pub found: bool,
    pub condition: Option<String>,
    pub noted_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Semi-annual physical audit session
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditSession {
    pub id: i32,
    pub label: String,
    pub status: AuditStatus,
    pub started_date: DateTime<Utc>,
    pub finished_date: Option<DateTime<Utc>>,
    #[schema(value_type = Vec<AuditEntry>)]
    pub entries: Json<Vec<AuditEntry>>,
}

/// Create audit session request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAudit {
    #[validate(length(min = 1, message = "Label is required"))]
    pub label: String,
}

/// Record one audit entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuditEntry {
    pub asset_id: i32,
    pub found: bool,
    pub condition: Option<String>,
    pub notes: Option<String>,
}
