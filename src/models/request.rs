//! Equipment request model, item fulfillments and the purchase-order
//! state machine.
//!
//! A request carries one line item per requested equipment type. Each
//! line item (fulfillment) is resolved exactly one of two ways: linked
//! directly to an available stock asset, or driven through the purchase
//! workflow `Pendente -> Cotação Aprovada -> Pedido Autorizado ->
//! Comprado`, which ends with the receipt (tombamento) creating the
//! asset. The two modes are mutually exclusive and the purchase status
//! only ever moves forward.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::text::normalize;

/// Number of positional quotation slots per purchase-order fulfillment
/// (Fornecedor 1/2/3).
pub const QUOTATION_SLOTS: usize = 3;

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Request-level operational status, orthogonal to each line item's
/// fulfillment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    #[serde(rename = "Pendente")]
    Pendente,
    #[serde(rename = "Aprovado")]
    Aprovado,
    #[serde(rename = "Preparando")]
    Preparando,
    #[serde(rename = "Entregue")]
    Entregue,
    #[serde(rename = "Cancelado")]
    Cancelado,
    #[serde(rename = "Confronto")]
    Confronto,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pendente => "Pendente",
            RequestStatus::Aprovado => "Aprovado",
            RequestStatus::Preparando => "Preparando",
            RequestStatus::Entregue => "Entregue",
            RequestStatus::Cancelado => "Cancelado",
            RequestStatus::Confronto => "Confronto",
        }
    }

    /// Operational transition table. Cancel is allowed from any
    /// non-terminal handling state; Confronto marks an audit
    /// discrepancy on a delivered request and can be reconciled back.
    pub fn can_become(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pendente, Aprovado)
                | (Pendente, Cancelado)
                | (Aprovado, Preparando)
                | (Aprovado, Cancelado)
                | (Preparando, Entregue)
                | (Preparando, Cancelado)
                | (Entregue, Confronto)
                | (Confronto, Entregue)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pendente" => Ok(RequestStatus::Pendente),
            "aprovado" => Ok(RequestStatus::Aprovado),
            "preparando" => Ok(RequestStatus::Preparando),
            "entregue" => Ok(RequestStatus::Entregue),
            "cancelado" => Ok(RequestStatus::Cancelado),
            "confronto" => Ok(RequestStatus::Confronto),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for RequestStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RequestStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RequestStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// PurchaseStatus
// ---------------------------------------------------------------------------

/// Purchase-order workflow state. Strictly ordered and one-directional;
/// `Comprado` is terminal (receipt toggles `is_delivered` instead of
/// advancing the status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum PurchaseStatus {
    #[serde(rename = "Pendente")]
    Pendente,
    #[serde(rename = "Cotação Aprovada")]
    CotacaoAprovada,
    #[serde(rename = "Pedido Autorizado")]
    PedidoAutorizado,
    #[serde(rename = "Comprado")]
    Comprado,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pendente => "Pendente",
            PurchaseStatus::CotacaoAprovada => "Cotação Aprovada",
            PurchaseStatus::PedidoAutorizado => "Pedido Autorizado",
            PurchaseStatus::Comprado => "Comprado",
        }
    }

    /// The single successor state, or None for the terminal state.
    pub fn next(&self) -> Option<PurchaseStatus> {
        match self {
            PurchaseStatus::Pendente => Some(PurchaseStatus::CotacaoAprovada),
            PurchaseStatus::CotacaoAprovada => Some(PurchaseStatus::PedidoAutorizado),
            PurchaseStatus::PedidoAutorizado => Some(PurchaseStatus::Comprado),
            PurchaseStatus::Comprado => None,
        }
    }

    /// True only for the immediate forward step of the workflow.
    pub fn can_advance_to(&self, next: PurchaseStatus) -> bool {
        self.next() == Some(next)
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pendente" => Ok(PurchaseStatus::Pendente),
            "cotacao aprovada" => Ok(PurchaseStatus::CotacaoAprovada),
            "pedido autorizado" => Ok(PurchaseStatus::PedidoAutorizado),
            "comprado" => Ok(PurchaseStatus::Comprado),
            _ => Err(format!("Invalid purchase status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for PurchaseStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for PurchaseStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for PurchaseStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// Quotation
// ---------------------------------------------------------------------------

/// One of exactly three positional supplier quotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Quotation {
    pub url: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub delivery_prediction: Option<String>,
}

// ---------------------------------------------------------------------------
// RequestItem (item fulfillment)
// ---------------------------------------------------------------------------

/// One line item's fulfillment path within a request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RequestItem {
    pub id: i32,
    pub request_id: i32,
    /// Zero-based, index-aligned with the request's ordered item list
    pub position: i16,
    pub item_type: String,
    /// Set when resolved against stock, or at purchase receipt
    pub linked_asset_id: Option<i32>,
    pub is_purchase_order: bool,
    pub purchase_status: Option<PurchaseStatus>,
    /// Exactly three positional slots (Fornecedor 1/2/3)
    #[schema(value_type = Vec<Option<Quotation>>)]
    pub quotations: Json<[Option<Quotation>; 3]>,
    pub approved_quotation_index: Option<i16>,
    pub is_delivered: bool,
}

impl RequestItem {
    /// The workflow treats an unset status as `Pendente`.
    pub fn effective_purchase_status(&self) -> PurchaseStatus {
        self.purchase_status.unwrap_or(PurchaseStatus::Pendente)
    }

    /// A fulfillment is resolved once it points at an asset, either via
    /// stock link or via completed purchase receipt.
    pub fn is_resolved(&self) -> bool {
        self.linked_asset_id.is_some() || (self.is_purchase_order && self.is_delivered)
    }

    /// Replacement parts ("peça", "reposição") are immaterial and never
    /// capitalized: the quotation price is not carried into the asset.
    pub fn is_replacement_part(&self) -> bool {
        let n = normalize(&self.item_type);
        n.contains("peca") || n.contains("reposicao")
    }

    pub fn approved_quotation(&self) -> Option<&Quotation> {
        let idx = self.approved_quotation_index? as usize;
        self.quotations.0.get(idx).and_then(|q| q.as_ref())
    }

    /// Acquisition value carried into the asset at receipt time.
    pub fn receipt_purchase_value(&self) -> Decimal {
        if self.is_replacement_part() {
            return Decimal::ZERO;
        }
        self.approved_quotation()
            .and_then(|q| q.price)
            .unwrap_or(Decimal::ZERO)
    }

    fn ensure_purchase_order(&self) -> AppResult<()> {
        if !self.is_purchase_order {
            return Err(AppError::BusinessRule(
                "Item is not a purchase-order fulfillment".to_string(),
            ));
        }
        Ok(())
    }

    /// Select the purchase-order fulfillment mode. Rejected once the
    /// item is already stock-linked; mode selection is one-shot.
    pub fn mark_purchase_order(&mut self) -> AppResult<()> {
        if self.linked_asset_id.is_some() {
            return Err(AppError::BusinessRule(
                "Item is already linked to a stock asset".to_string(),
            ));
        }
        if self.is_purchase_order {
            return Err(AppError::BusinessRule(
                "Item is already a purchase-order fulfillment".to_string(),
            ));
        }
        self.is_purchase_order = true;
        self.purchase_status = Some(PurchaseStatus::Pendente);
        Ok(())
    }

    /// Guard for the stock-link path: the item must not already be
    /// resolved or on the purchase path.
    pub fn ensure_stock_linkable(&self) -> AppResult<()> {
        if self.linked_asset_id.is_some() {
            return Err(AppError::BusinessRule(
                "Item is already linked to an asset".to_string(),
            ));
        }
        if self.is_purchase_order {
            return Err(AppError::BusinessRule(
                "Item is on the purchase-order path and cannot be stock-linked".to_string(),
            ));
        }
        Ok(())
    }

    /// Record or edit one quotation slot. Allowed at any point before
    /// delivery; an already-approved index is never re-validated on
    /// later edits.
    pub fn set_quotation(&mut self, slot: usize, quotation: Quotation) -> AppResult<()> {
        self.ensure_purchase_order()?;
        if slot >= QUOTATION_SLOTS {
            return Err(AppError::BadRequest(format!(
                "Quotation slot must be 0..={}, got {}",
                QUOTATION_SLOTS - 1,
                slot
            )));
        }
        if self.is_delivered {
            return Err(AppError::BusinessRule(
                "Cannot edit quotations after receipt".to_string(),
            ));
        }
        self.quotations.0[slot] = Some(quotation);
        Ok(())
    }

    /// `Pendente -> Cotação Aprovada`. Only valid while no quotation
    /// has been approved yet, and only for a filled slot.
    pub fn approve_quotation(&mut self, slot: usize) -> AppResult<()> {
        self.ensure_purchase_order()?;
        if slot >= QUOTATION_SLOTS {
            return Err(AppError::BadRequest(format!(
                "Quotation slot must be 0..={}, got {}",
                QUOTATION_SLOTS - 1,
                slot
            )));
        }
        let current = self.effective_purchase_status();
        if !current.can_advance_to(PurchaseStatus::CotacaoAprovada) {
            return Err(AppError::BusinessRule(format!(
                "Cannot approve quotation from state '{}'",
                current
            )));
        }
        if self.quotations.0[slot].is_none() {
            return Err(AppError::BusinessRule(format!(
                "Quotation slot {} is empty",
                slot
            )));
        }
        self.approved_quotation_index = Some(slot as i16);
        self.purchase_status = Some(PurchaseStatus::CotacaoAprovada);
        Ok(())
    }

    /// `Cotação Aprovada -> Pedido Autorizado`. No other field changes.
    pub fn authorize_order(&mut self) -> AppResult<()> {
        self.ensure_purchase_order()?;
        let current = self.effective_purchase_status();
        if !current.can_advance_to(PurchaseStatus::PedidoAutorizado) {
            return Err(AppError::BusinessRule(format!(
                "Cannot authorize order from state '{}'",
                current
            )));
        }
        self.purchase_status = Some(PurchaseStatus::PedidoAutorizado);
        Ok(())
    }

    /// `Pedido Autorizado -> Comprado` (payment and shipment confirmed).
    pub fn mark_purchased(&mut self) -> AppResult<()> {
        self.ensure_purchase_order()?;
        let current = self.effective_purchase_status();
        if !current.can_advance_to(PurchaseStatus::Comprado) {
            return Err(AppError::BusinessRule(format!(
                "Cannot confirm purchase from state '{}'",
                current
            )));
        }
        self.purchase_status = Some(PurchaseStatus::Comprado);
        Ok(())
    }

    /// Receipt is only reachable from `Comprado` and is one-shot:
    /// a delivered fulfillment never produces a second asset.
    pub fn ensure_receivable(&self) -> AppResult<()> {
        self.ensure_purchase_order()?;
        if self.is_delivered {
            return Err(AppError::BusinessRule(
                "Item was already received".to_string(),
            ));
        }
        if self.effective_purchase_status() != PurchaseStatus::Comprado {
            return Err(AppError::BusinessRule(format!(
                "Receipt requires state 'Comprado', item is '{}'",
                self.effective_purchase_status()
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EquipmentRequest
// ---------------------------------------------------------------------------

/// Equipment request header row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentRequest {
    pub id: i32,
    /// None for unassigned stock-replenishment requests
    pub employee_id: Option<i32>,
    pub status: RequestStatus,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Request with its ordered line items
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: EquipmentRequest,
    pub items: Vec<RequestItem>,
}

impl RequestDetails {
    /// Actionable-complete: every fulfillment is either asset-linked or
    /// in terminal purchase state with the asset received.
    pub fn all_items_resolved(&self) -> bool {
        self.items.iter().all(RequestItem::is_resolved)
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Create request payload; one line item per entry of `items`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    pub employee_id: Option<i32>,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<String>,
    pub notes: Option<String>,
}

/// Update request payload (header fields only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequest {
    pub employee_id: Option<i32>,
    pub notes: Option<String>,
}

/// Direct purchase order: employee-less request with exactly one
/// pre-seeded purchase-order fulfillment (stock replenishment)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDirectPurchase {
    #[validate(length(min = 1, message = "Item type is required"))]
    pub item_type: String,
    pub notes: Option<String>,
}

/// Quotation slot payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQuotation {
    pub url: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub delivery_prediction: Option<String>,
}

/// Quotation approval payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveQuotation {
    /// Slot index 0..=2 (Fornecedor 1/2/3)
    pub slot: i16,
}

/// Stock-link payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkAsset {
    pub asset_id: i32,
}

/// Receipt (tombamento) payload that materializes the asset
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReceiptData {
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub asset_tag: Option<String>,
    pub invoice_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn purchase_item(item_type: &str) -> RequestItem {
        RequestItem {
            id: 1,
            request_id: 1,
            position: 0,
            item_type: item_type.to_string(),
            linked_asset_id: None,
            is_purchase_order: true,
            purchase_status: None,
            quotations: Json([None, None, None]),
            approved_quotation_index: None,
            is_delivered: false,
        }
    }

    fn quotation(price: Decimal) -> Quotation {
        Quotation {
            url: Some("https://fornecedor.example".to_string()),
            price: Some(price),
            delivery_prediction: Some("5 dias".to_string()),
        }
    }

    #[test]
    fn status_only_advances_forward() {
        use PurchaseStatus::*;
        assert!(Pendente.can_advance_to(CotacaoAprovada));
        assert!(CotacaoAprovada.can_advance_to(PedidoAutorizado));
        assert!(PedidoAutorizado.can_advance_to(Comprado));
        assert_eq!(Comprado.next(), None);

        // No backward or skipping transition is legal.
        assert!(!CotacaoAprovada.can_advance_to(Pendente));
        assert!(!Pendente.can_advance_to(PedidoAutorizado));
        assert!(!Pendente.can_advance_to(Comprado));
        assert!(!Comprado.can_advance_to(Pendente));
    }

    #[test]
    fn approve_requires_pendente_and_filled_slot() {
        let mut item = purchase_item("Notebook");
        assert!(item.approve_quotation(1).is_err()); // slot empty

        item.set_quotation(1, quotation(dec!(3500))).unwrap();
        item.approve_quotation(1).unwrap();
        assert_eq!(item.approved_quotation_index, Some(1));
        assert_eq!(item.effective_purchase_status(), PurchaseStatus::CotacaoAprovada);

        // A second approval is an invalid transition.
        assert!(item.approve_quotation(0).is_err());
    }

    #[test]
    fn approved_index_stable_under_later_edits() {
        let mut item = purchase_item("Monitor");
        item.set_quotation(0, quotation(dec!(900))).unwrap();
        item.approve_quotation(0).unwrap();

        // Editing any slot after approval never touches the choice.
        item.set_quotation(0, quotation(dec!(850))).unwrap();
        item.set_quotation(2, quotation(dec!(700))).unwrap();
        assert_eq!(item.approved_quotation_index, Some(0));
        assert_eq!(item.effective_purchase_status(), PurchaseStatus::CotacaoAprovada);
    }

    #[test]
    fn authorize_and_purchase_follow_strict_order() {
        let mut item = purchase_item("Notebook");
        assert!(item.authorize_order().is_err());
        assert!(item.mark_purchased().is_err());

        item.set_quotation(1, quotation(dec!(3500))).unwrap();
        item.approve_quotation(1).unwrap();
        assert!(item.mark_purchased().is_err()); // cannot skip authorization

        item.authorize_order().unwrap();
        assert_eq!(item.effective_purchase_status(), PurchaseStatus::PedidoAutorizado);
        assert!(item.authorize_order().is_err());

        item.mark_purchased().unwrap();
        assert_eq!(item.effective_purchase_status(), PurchaseStatus::Comprado);
    }

    #[test]
    fn receipt_gated_by_comprado_and_one_shot() {
        let mut item = purchase_item("Notebook");
        assert!(item.ensure_receivable().is_err());

        item.set_quotation(0, quotation(dec!(3500))).unwrap();
        item.approve_quotation(0).unwrap();
        item.authorize_order().unwrap();
        item.mark_purchased().unwrap();
        item.ensure_receivable().unwrap();

        item.is_delivered = true;
        item.linked_asset_id = Some(42);
        assert!(item.ensure_receivable().is_err());
        assert!(item.is_resolved());
    }

    #[test]
    fn replacement_parts_never_carry_price() {
        for name in ["Peça de reposição", "peca para notebook", "Cabo de REPOSICAO"] {
            let mut item = purchase_item(name);
            item.set_quotation(0, quotation(dec!(50))).unwrap();
            item.approve_quotation(0).unwrap();
            assert!(item.is_replacement_part(), "{name}");
            assert_eq!(item.receipt_purchase_value(), Decimal::ZERO);
        }
    }

    #[test]
    fn regular_items_carry_approved_price() {
        let mut item = purchase_item("Notebook");
        item.set_quotation(1, quotation(dec!(3500))).unwrap();
        item.set_quotation(2, quotation(dec!(10))).unwrap();
        item.approve_quotation(1).unwrap();
        // The user's choice wins; the system never auto-selects lowest.
        assert_eq!(item.receipt_purchase_value(), dec!(3500));
    }

    #[test]
    fn stock_link_and_purchase_order_are_exclusive() {
        let mut item = purchase_item("Headset");
        item.is_purchase_order = false;
        item.purchase_status = None;
        item.ensure_stock_linkable().unwrap();

        item.mark_purchase_order().unwrap();
        assert!(item.ensure_stock_linkable().is_err());
        assert!(item.mark_purchase_order().is_err());

        let mut linked = purchase_item("Mouse");
        linked.is_purchase_order = false;
        linked.linked_asset_id = Some(7);
        assert!(linked.mark_purchase_order().is_err());
    }

    #[test]
    fn request_status_transitions() {
        use RequestStatus::*;
        assert!(Pendente.can_become(Aprovado));
        assert!(Aprovado.can_become(Preparando));
        assert!(Preparando.can_become(Entregue));
        assert!(Preparando.can_become(Cancelado));
        assert!(!Entregue.can_become(Pendente));
        assert!(!Cancelado.can_become(Aprovado));
        assert!(Entregue.can_become(Confronto));
        assert!(Confronto.can_become(Entregue));
    }
}
