//! Maintenance tickets repository

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::maintenance::{CreateMaintenance, MaintenanceTicket},
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List tickets, newest first. `open_only` restricts to tickets
    /// without a check-in date.
    pub async fn list(&self, open_only: bool) -> AppResult<Vec<MaintenanceTicket>> {
        let query = if open_only {
            "SELECT * FROM maintenance_tickets WHERE returned_date IS NULL ORDER BY sent_date DESC"
        } else {
            "SELECT * FROM maintenance_tickets ORDER BY sent_date DESC"
        };
        let rows = sqlx::query_as::<_, MaintenanceTicket>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get ticket by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTicket> {
        sqlx::query_as::<_, MaintenanceTicket>("SELECT * FROM maintenance_tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance ticket {} not found", id)))
    }

    /// Tickets for one asset, newest first
    pub async fn list_by_asset(&self, asset_id: i32) -> AppResult<Vec<MaintenanceTicket>> {
        let rows = sqlx::query_as::<_, MaintenanceTicket>(
            "SELECT * FROM maintenance_tickets WHERE asset_id = $1 ORDER BY sent_date DESC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open ticket for one asset, if any
    pub async fn get_open_for_asset(&self, asset_id: i32) -> AppResult<Option<MaintenanceTicket>> {
        let row = sqlx::query_as::<_, MaintenanceTicket>(
            "SELECT * FROM maintenance_tickets WHERE asset_id = $1 AND returned_date IS NULL",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Open a ticket (check-out)
    pub async fn create(&self, data: &CreateMaintenance) -> AppResult<MaintenanceTicket> {
        let row = sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            INSERT INTO maintenance_tickets (asset_id, description, provider, sent_date, expected_return_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(&data.description)
        .bind(&data.provider)
        .bind(Utc::now())
        .bind(data.expected_return_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Close a ticket (check-in)
    pub async fn close(
        &self,
        id: i32,
        cost: Option<Decimal>,
        notes: Option<String>,
    ) -> AppResult<MaintenanceTicket> {
        sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            UPDATE maintenance_tickets
            SET returned_date = $1, cost = $2, notes = COALESCE($3, notes)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(cost)
        .bind(notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance ticket {} not found", id)))
    }

    /// Count open tickets (for stats)
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_tickets WHERE returned_date IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
