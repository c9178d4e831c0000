//! Equipment requests repository

use chrono::Utc;
use sqlx::{types::Json, Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::request::{
        CreateRequest, EquipmentRequest, PurchaseStatus, RequestDetails, RequestItem,
        RequestStatus, UpdateRequest,
    },
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List request headers, optionally filtered by status
    pub async fn list(&self, status: Option<RequestStatus>) -> AppResult<Vec<EquipmentRequest>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, EquipmentRequest>(
                    "SELECT * FROM requests WHERE status = $1 ORDER BY crea_date DESC, id DESC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EquipmentRequest>(
                    "SELECT * FROM requests ORDER BY crea_date DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Get request header by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentRequest> {
        sqlx::query_as::<_, EquipmentRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Get request with its ordered line items
    pub async fn get_details(&self, id: i32) -> AppResult<RequestDetails> {
        let request = self.get_by_id(id).await?;
        let items = sqlx::query_as::<_, RequestItem>(
            "SELECT * FROM request_items WHERE request_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(RequestDetails { request, items })
    }

    /// Get one line item by request and position
    pub async fn get_item(&self, request_id: i32, position: i16) -> AppResult<RequestItem> {
        sqlx::query_as::<_, RequestItem>(
            "SELECT * FROM request_items WHERE request_id = $1 AND position = $2",
        )
        .bind(request_id)
        .bind(position)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Request {} has no item at position {}",
                request_id, position
            ))
        })
    }

    /// Create a request with one unresolved line item per entry of
    /// `items`. When `seed_purchase` is set, every item starts on the
    /// purchase-order path (direct purchase entry).
    pub async fn create(
        &self,
        data: &CreateRequest,
        seed_purchase: bool,
    ) -> AppResult<RequestDetails> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, EquipmentRequest>(
            r#"
            INSERT INTO requests (employee_id, status, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(RequestStatus::Pendente)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        let purchase_status = seed_purchase.then_some(PurchaseStatus::Pendente);
        let mut items = Vec::with_capacity(data.items.len());
        for (position, item_type) in data.items.iter().enumerate() {
            let item = sqlx::query_as::<_, RequestItem>(
                r#"
                INSERT INTO request_items (
                    request_id, position, item_type, is_purchase_order,
                    purchase_status, quotations, is_delivered
                ) VALUES ($1, $2, $3, $4, $5, $6, FALSE)
                RETURNING *
                "#,
            )
            .bind(request.id)
            .bind(position as i16)
            .bind(item_type)
            .bind(seed_purchase)
            .bind(purchase_status)
            .bind(Json([None::<crate::models::request::Quotation>, None, None]))
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        tx.commit().await?;
        Ok(RequestDetails { request, items })
    }

    /// Update request header fields
    pub async fn update_header(&self, id: i32, data: &UpdateRequest) -> AppResult<EquipmentRequest> {
        sqlx::query_as::<_, EquipmentRequest>(
            r#"
            UPDATE requests
            SET employee_id = COALESCE($1, employee_id),
                notes = COALESCE($2, notes),
                modif_date = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(&data.notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Set the request-level operational status
    pub async fn set_status(&self, id: i32, status: RequestStatus) -> AppResult<EquipmentRequest> {
        sqlx::query_as::<_, EquipmentRequest>(
            "UPDATE requests SET status = $1, modif_date = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Delete a request and its line items
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request {} not found", id)));
        }
        Ok(())
    }

    /// Persist the fulfillment fields of one line item
    pub async fn save_item(&self, item: &RequestItem) -> AppResult<RequestItem> {
        sqlx::query_as::<_, RequestItem>(
            r#"
            UPDATE request_items
            SET linked_asset_id = $1, is_purchase_order = $2, purchase_status = $3,
                quotations = $4, approved_quotation_index = $5, is_delivered = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(item.linked_asset_id)
        .bind(item.is_purchase_order)
        .bind(item.purchase_status)
        .bind(&item.quotations)
        .bind(item.approved_quotation_index)
        .bind(item.is_delivered)
        .bind(item.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request item {} not found", item.id)))
    }

    /// Persist one line item inside an open transaction (receipt step)
    pub async fn save_item_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &RequestItem,
    ) -> AppResult<RequestItem> {
        sqlx::query_as::<_, RequestItem>(
            r#"
            UPDATE request_items
            SET linked_asset_id = $1, is_purchase_order = $2, purchase_status = $3,
                quotations = $4, approved_quotation_index = $5, is_delivered = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(item.linked_asset_id)
        .bind(item.is_purchase_order)
        .bind(item.purchase_status)
        .bind(&item.quotations)
        .bind(item.approved_quotation_index)
        .bind(item.is_delivered)
        .bind(item.id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request item {} not found", item.id)))
    }

    /// Requests whose line items resolve to the given asset
    pub async fn find_by_linked_asset(&self, asset_id: i32) -> AppResult<Vec<EquipmentRequest>> {
        let rows = sqlx::query_as::<_, EquipmentRequest>(
            r#"
            SELECT DISTINCT r.* FROM requests r
            JOIN request_items i ON i.request_id = r.id
            WHERE i.linked_asset_id = $1
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count requests still in operational handling (for stats)
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM requests WHERE status IN ('Pendente', 'Aprovado', 'Preparando')",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
