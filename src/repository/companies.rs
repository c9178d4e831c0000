//! Legal entities repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::company::{CreateLegalEntity, LegalEntity, UpdateLegalEntity},
};

#[derive(Clone)]
pub struct CompaniesRepository {
    pool: Pool<Postgres>,
}

impl CompaniesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all legal entities
    pub async fn list(&self) -> AppResult<Vec<LegalEntity>> {
        let rows = sqlx::query_as::<_, LegalEntity>(
            "SELECT * FROM legal_entities ORDER BY corporate_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get legal entity by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<LegalEntity> {
        sqlx::query_as::<_, LegalEntity>("SELECT * FROM legal_entities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Legal entity {} not found", id)))
    }

    /// Default entity used on generated documents, if any
    pub async fn get_default(&self) -> AppResult<Option<LegalEntity>> {
        let row = sqlx::query_as::<_, LegalEntity>(
            "SELECT * FROM legal_entities WHERE is_default LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create legal entity. The first one registered becomes the default.
    pub async fn create(&self, data: &CreateLegalEntity) -> AppResult<LegalEntity> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM legal_entities")
            .fetch_one(&self.pool)
            .await?;
        let is_default = data.is_default.unwrap_or(count == 0);

        let mut tx = self.pool.begin().await?;
        if is_default {
            sqlx::query("UPDATE legal_entities SET is_default = FALSE")
                .execute(&mut *tx)
                .await?;
        }
        let row = sqlx::query_as::<_, LegalEntity>(
            r#"
            INSERT INTO legal_entities
                (corporate_name, trade_name, tax_id, address, city, state, zip_code, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.corporate_name)
        .bind(&data.trade_name)
        .bind(&data.tax_id)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(is_default)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Update legal entity
    pub async fn update(&self, id: i32, data: &UpdateLegalEntity) -> AppResult<LegalEntity> {
        sqlx::query_as::<_, LegalEntity>(
            r#"
            UPDATE legal_entities
            SET corporate_name = COALESCE($1, corporate_name),
                trade_name = COALESCE($2, trade_name),
                tax_id = COALESCE($3, tax_id),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                zip_code = COALESCE($7, zip_code)
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&data.corporate_name)
        .bind(&data.trade_name)
        .bind(&data.tax_id)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Legal entity {} not found", id)))
    }

    /// Make one entity the default, clearing the flag elsewhere
    pub async fn set_default(&self, id: i32) -> AppResult<LegalEntity> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE legal_entities SET is_default = FALSE")
            .execute(&mut *tx)
            .await?;
        let row = sqlx::query_as::<_, LegalEntity>(
            "UPDATE legal_entities SET is_default = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Legal entity {} not found", id)))?;
        tx.commit().await?;
        Ok(row)
    }

    /// Delete legal entity
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM legal_entities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Legal entity {} not found", id)));
        }
        Ok(())
    }
}
