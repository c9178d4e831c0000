//! Accounting accounts and asset-type config repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::accounting::{
        AccountingAccount, AssetTypeConfig, CreateAccount, CreateAssetTypeConfig, UpdateAccount,
        UpdateAssetTypeConfig,
    },
};

#[derive(Clone)]
pub struct AccountingRepository {
    pool: Pool<Postgres>,
}

impl AccountingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // -- Accounts -----------------------------------------------------------

    /// List all accounts ordered by code
    pub async fn list_accounts(&self) -> AppResult<Vec<AccountingAccount>> {
        let rows = sqlx::query_as::<_, AccountingAccount>(
            "SELECT * FROM accounting_accounts ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get account by ID
    pub async fn get_account(&self, id: i32) -> AppResult<AccountingAccount> {
        sqlx::query_as::<_, AccountingAccount>("SELECT * FROM accounting_accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Accounting account {} not found", id)))
    }

    /// Create account; code must be unique
    pub async fn create_account(&self, data: &CreateAccount) -> AppResult<AccountingAccount> {
        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM accounting_accounts WHERE code = $1")
                .bind(&data.code)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "Account code '{}' already exists",
                data.code
            )));
        }

        let row = sqlx::query_as::<_, AccountingAccount>(
            r#"
            INSERT INTO accounting_accounts (code, name, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update account
    pub async fn update_account(&self, id: i32, data: &UpdateAccount) -> AppResult<AccountingAccount> {
        sqlx::query_as::<_, AccountingAccount>(
            r#"
            UPDATE accounting_accounts
            SET code = COALESCE($1, code),
                name = COALESCE($2, name),
                notes = COALESCE($3, notes)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Accounting account {} not found", id)))
    }

    /// Delete account
    pub async fn delete_account(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM accounting_accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Accounting account {} not found",
                id
            )));
        }
        Ok(())
    }

    // -- Asset type configs -------------------------------------------------

    /// List all asset type configs
    pub async fn list_type_configs(&self) -> AppResult<Vec<AssetTypeConfig>> {
        let rows = sqlx::query_as::<_, AssetTypeConfig>(
            "SELECT * FROM asset_type_configs ORDER BY type_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get asset type config by ID
    pub async fn get_type_config(&self, id: i32) -> AppResult<AssetTypeConfig> {
        sqlx::query_as::<_, AssetTypeConfig>("SELECT * FROM asset_type_configs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset type config {} not found", id)))
    }

    /// Create asset type config
    pub async fn create_type_config(
        &self,
        data: &CreateAssetTypeConfig,
    ) -> AppResult<AssetTypeConfig> {
        let row = sqlx::query_as::<_, AssetTypeConfig>(
            r#"
            INSERT INTO asset_type_configs (type_name, account_code, useful_life_months, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.type_name)
        .bind(&data.account_code)
        .bind(data.useful_life_months)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update asset type config
    pub async fn update_type_config(
        &self,
        id: i32,
        data: &UpdateAssetTypeConfig,
    ) -> AppResult<AssetTypeConfig> {
        sqlx::query_as::<_, AssetTypeConfig>(
            r#"
            UPDATE asset_type_configs
            SET type_name = COALESCE($1, type_name),
                account_code = COALESCE($2, account_code),
                useful_life_months = COALESCE($3, useful_life_months),
                notes = COALESCE($4, notes)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.type_name)
        .bind(&data.account_code)
        .bind(data.useful_life_months)
        .bind(&data.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset type config {} not found", id)))
    }

    /// Delete asset type config
    pub async fn delete_type_config(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM asset_type_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Asset type config {} not found",
                id
            )));
        }
        Ok(())
    }
}
