//! Asset model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::text::normalize;

/// Asset lifecycle status. Stored and serialized with its Portuguese
/// in-domain label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AssetStatus {
    #[serde(rename = "Disponível")]
    Disponivel,
    #[serde(rename = "Em Uso")]
    EmUso,
    #[serde(rename = "Manutenção")]
    Manutencao,
    #[serde(rename = "Baixado")]
    Baixado,
    #[serde(rename = "Pendente Documentos")]
    PendenteDocumentos,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Disponivel => "Disponível",
            AssetStatus::EmUso => "Em Uso",
            AssetStatus::Manutencao => "Manutenção",
            AssetStatus::Baixado => "Baixado",
            AssetStatus::PendenteDocumentos => "Pendente Documentos",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    /// Accent- and case-insensitive parse, so that imported spreadsheets
    /// written without diacritics still round-trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "disponivel" => Ok(AssetStatus::Disponivel),
            "em uso" => Ok(AssetStatus::EmUso),
            "manutencao" => Ok(AssetStatus::Manutencao),
            "baixado" => Ok(AssetStatus::Baixado),
            "pendente documentos" => Ok(AssetStatus::PendenteDocumentos),
            _ => Err(format!("Invalid asset status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for AssetStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for AssetStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for AssetStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// One append-only history log line on an asset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HistoryEntry {
    pub fn new(event: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            date: Utc::now(),
            event: event.into(),
            detail,
        }
    }
}

/// Asset record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: i32,
    /// Physical inventory tag (tombamento number); unique when present
    pub asset_tag: Option<String>,
    pub name: String,
    pub asset_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub employee_id: Option<i32>,
    pub department_id: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub accounting_account_code: Option<String>,
    pub notes: Option<String>,
    /// Append-only chronological log
    #[schema(value_type = Vec<HistoryEntry>)]
    pub history: Json<Vec<HistoryEntry>>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    pub asset_tag: Option<String>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Asset type is required"))]
    pub asset_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub employee_id: Option<i32>,
    pub department_id: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub accounting_account_code: Option<String>,
    pub notes: Option<String>,
}

/// Update asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    pub asset_tag: Option<String>,
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub department_id: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub accounting_account_code: Option<String>,
    pub notes: Option<String>,
}

/// Asset list filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    pub status: Option<String>,
    pub asset_type: Option<String>,
    pub department_id: Option<i32>,
    pub employee_id: Option<i32>,
    /// Free-text search over name, brand, model, serial and tag
    pub q: Option<String>,
}

/// Assign asset to employee request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignAsset {
    pub employee_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        for status in [
            AssetStatus::Disponivel,
            AssetStatus::EmUso,
            AssetStatus::Manutencao,
            AssetStatus::Baixado,
            AssetStatus::PendenteDocumentos,
        ] {
            assert_eq!(status.as_str().parse::<AssetStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_parse_tolerates_missing_accents() {
        assert_eq!("disponivel".parse::<AssetStatus>().unwrap(), AssetStatus::Disponivel);
        assert_eq!("MANUTENCAO".parse::<AssetStatus>().unwrap(), AssetStatus::Manutencao);
        assert!("emprestado".parse::<AssetStatus>().is_err());
    }
}
