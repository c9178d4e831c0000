//! System configuration repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::settings::SystemConfig};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All settings rows
    pub async fn get_all(&self) -> AppResult<Vec<SystemConfig>> {
        let rows = sqlx::query_as::<_, SystemConfig>("SELECT * FROM system_configs ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// One setting value, if present
    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM system_configs WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.flatten())
    }

    /// Insert or replace one setting
    pub async fn upsert(&self, key: &str, value: Option<&str>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO system_configs (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
