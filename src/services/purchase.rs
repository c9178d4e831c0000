//! Purchase-order workflow service.
//!
//! Drives each line item's fulfillment: quotation capture and approval,
//! order authorization, purchase confirmation and the final receipt
//! (tombamento), which creates the asset and closes the fulfillment in
//! one database transaction. The FSM guards live on the model; this
//! service persists the accepted transitions.

use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AssetStatus, HistoryEntry},
        request::{
            ApproveQuotation, CreateDirectPurchase, CreateRequest, LinkAsset, Quotation,
            ReceiptData, RequestDetails, RequestItem, SetQuotation, QUOTATION_SLOTS,
        },
    },
    repository::{assets::NewAsset, Repository},
    text::normalize,
};

/// Outcome of a finalized receipt
#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptResult {
    pub asset: Asset,
    pub item: RequestItem,
}

#[derive(Clone)]
pub struct PurchaseService {
    repository: Repository,
}

impl PurchaseService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Open an employee-less request with one pre-seeded purchase-order
    /// fulfillment (stock replenishment).
    pub async fn create_direct_purchase(
        &self,
        data: CreateDirectPurchase,
    ) -> AppResult<RequestDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let request = CreateRequest {
            employee_id: None,
            items: vec![data.item_type],
            notes: data.notes,
        };
        self.repository.requests.create(&request, true).await
    }

    /// Put one line item on the purchase-order path
    pub async fn mark_purchase_order(
        &self,
        request_id: i32,
        position: i16,
    ) -> AppResult<RequestItem> {
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.mark_purchase_order()?;
        self.repository.requests.save_item(&item).await
    }

    /// Record or edit one quotation slot (Fornecedor 1/2/3)
    pub async fn set_quotation(
        &self,
        request_id: i32,
        position: i16,
        slot: i16,
        data: SetQuotation,
    ) -> AppResult<RequestItem> {
        let slot = Self::slot_index(slot)?;
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.set_quotation(
            slot,
            Quotation {
                url: data.url,
                price: data.price,
                delivery_prediction: data.delivery_prediction,
            },
        )?;
        self.repository.requests.save_item(&item).await
    }

    /// `Pendente -> Cotação Aprovada`: lock in the winning quotation
    pub async fn approve_quotation(
        &self,
        request_id: i32,
        position: i16,
        data: ApproveQuotation,
    ) -> AppResult<RequestItem> {
        let slot = Self::slot_index(data.slot)?;
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.approve_quotation(slot)?;
        self.repository.requests.save_item(&item).await
    }

    /// `Cotação Aprovada -> Pedido Autorizado`
    pub async fn authorize_order(&self, request_id: i32, position: i16) -> AppResult<RequestItem> {
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.authorize_order()?;
        self.repository.requests.save_item(&item).await
    }

    /// `Pedido Autorizado -> Comprado`
    pub async fn mark_purchased(&self, request_id: i32, position: i16) -> AppResult<RequestItem> {
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.mark_purchased()?;
        self.repository.requests.save_item(&item).await
    }

    /// Receipt (tombamento): create the asset and close the fulfillment
    /// in one transaction. Only reachable from `Comprado`, one-shot.
    pub async fn finalize_receipt(
        &self,
        request_id: i32,
        position: i16,
        data: ReceiptData,
    ) -> AppResult<ReceiptResult> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let request = self.repository.requests.get_by_id(request_id).await?;
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.ensure_receivable()?;

        let (status, employee_id) = match request.employee_id {
            Some(employee_id) => {
                self.repository.employees.get_by_id(employee_id).await?;
                (AssetStatus::EmUso, Some(employee_id))
            }
            None => (AssetStatus::Disponivel, None),
        };

        let purchase_value = item.receipt_purchase_value();
        let account_code = self.default_account_code(&item.item_type).await?;
        let history = vec![HistoryEntry::new(
            "Tombamento",
            Some(format!("Recebido pela requisição {}", request_id)),
        )];

        let new_asset = NewAsset {
            asset_tag: data.asset_tag,
            name: data.name,
            asset_type: item.item_type.clone(),
            brand: data.brand,
            model: data.model,
            serial_number: data.serial_number,
            status,
            employee_id,
            department_id: None,
            purchase_value: Some(purchase_value),
            purchase_date: data.purchase_date,
            invoice_number: data.invoice_number,
            accounting_account_code: account_code,
            notes: data.notes,
            history,
        };

        let mut tx = self.repository.pool.begin().await?;
        let asset = self.repository.assets.insert_tx(&mut tx, &new_asset).await?;
        item.is_delivered = true;
        item.linked_asset_id = Some(asset.id);
        let item = self.repository.requests.save_item_tx(&mut tx, &item).await?;
        tx.commit().await?;

        tracing::info!(
            request_id,
            position,
            asset_id = asset.id,
            "purchase receipt finalized"
        );
        Ok(ReceiptResult { asset, item })
    }

    /// Stock-link path: resolve a fulfillment against an existing
    /// available asset, bypassing the purchase workflow entirely.
    pub async fn link_asset(
        &self,
        request_id: i32,
        position: i16,
        data: LinkAsset,
    ) -> AppResult<RequestItem> {
        let request = self.repository.requests.get_by_id(request_id).await?;
        let mut item = self.repository.requests.get_item(request_id, position).await?;
        item.ensure_stock_linkable()?;

        let asset = self.repository.assets.get_by_id(data.asset_id).await?;
        if asset.status != AssetStatus::Disponivel {
            return Err(AppError::BusinessRule(format!(
                "Asset {} is '{}', only available assets can be linked",
                asset.id, asset.status
            )));
        }

        match request.employee_id {
            Some(employee_id) => {
                let employee = self.repository.employees.get_by_id(employee_id).await?;
                let entry = HistoryEntry::new(
                    "Atribuído",
                    Some(format!(
                        "Requisição {}: {}",
                        request_id, employee.name
                    )),
                );
                self.repository
                    .assets
                    .set_assignment(asset.id, Some(employee_id), AssetStatus::EmUso, entry)
                    .await?;
            }
            None => {
                let entry = HistoryEntry::new(
                    "Reservado",
                    Some(format!("Requisição {}", request_id)),
                );
                self.repository.assets.append_history(asset.id, entry).await?;
            }
        }

        item.linked_asset_id = Some(asset.id);
        self.repository.requests.save_item(&item).await
    }

    /// Default accounting account for an item type, matched by
    /// normalized type name against the asset type configs.
    async fn default_account_code(&self, item_type: &str) -> AppResult<Option<String>> {
        let wanted = normalize(item_type);
        let configs = self.repository.accounting.list_type_configs().await?;
        Ok(configs
            .into_iter()
            .find(|c| normalize(&c.type_name) == wanted)
            .and_then(|c| c.account_code))
    }

    fn slot_index(slot: i16) -> AppResult<usize> {
        if slot < 0 || slot as usize >= QUOTATION_SLOTS {
            return Err(AppError::BadRequest(format!(
                "Quotation slot must be 0..={}, got {}",
                QUOTATION_SLOTS - 1,
                slot
            )));
        }
        Ok(slot as usize)
    }
}
