//! Assets repository for database operations

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, FromRow, Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetQuery, AssetStatus, CreateAsset, HistoryEntry, UpdateAsset},
};

/// Fields of an asset materialized outside the plain create path
/// (purchase receipt, workbook import).
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub asset_tag: Option<String>,
    pub name: String,
    pub asset_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub employee_id: Option<i32>,
    pub department_id: Option<i32>,
    pub purchase_value: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub accounting_account_code: Option<String>,
    pub notes: Option<String>,
    pub history: Vec<HistoryEntry>,
}

/// Grouped count row used by the dashboard
#[derive(Debug, Clone, FromRow, serde::Serialize, utoipa::ToSchema)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
}

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assets with optional filters
    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref status) = query.status {
            params.push(status.clone());
            conditions.push(format!("status = ${}", params.len()));
        }
        if let Some(ref asset_type) = query.asset_type {
            params.push(asset_type.clone());
            conditions.push(format!("asset_type = ${}", params.len()));
        }
        if let Some(department_id) = query.department_id {
            conditions.push(format!("department_id = {}", department_id));
        }
        if let Some(employee_id) = query.employee_id {
            conditions.push(format!("employee_id = {}", employee_id));
        }
        if let Some(ref q) = query.q {
            params.push(format!("%{}%", q.to_lowercase()));
            let p = params.len();
            conditions.push(format!(
                "(LOWER(name) LIKE ${p} OR LOWER(COALESCE(brand, '')) LIKE ${p} \
                 OR LOWER(COALESCE(model, '')) LIKE ${p} \
                 OR LOWER(COALESCE(serial_number, '')) LIKE ${p} \
                 OR LOWER(COALESCE(asset_tag, '')) LIKE ${p})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "SELECT * FROM assets {} ORDER BY name, id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Asset>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }
        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Get several assets preserving the given id order
    pub async fn get_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Asset>> {
        let rows = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(asset) = rows.iter().find(|a| a.id == *id) {
                ordered.push(asset.clone());
            }
        }
        Ok(ordered)
    }

    /// Create an asset from a manual entry
    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let status = data.status.unwrap_or(AssetStatus::Disponivel);
        let history = vec![HistoryEntry::new("Cadastro manual", None)];

        let row = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                asset_tag, name, asset_type, brand, model, serial_number,
                status, employee_id, department_id, purchase_value, purchase_date,
                invoice_number, accounting_account_code, notes, history
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&data.asset_tag)
        .bind(&data.name)
        .bind(&data.asset_type)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(status)
        .bind(data.employee_id)
        .bind(data.department_id)
        .bind(data.purchase_value)
        .bind(data.purchase_date)
        .bind(&data.invoice_number)
        .bind(&data.accounting_account_code)
        .bind(&data.notes)
        .bind(Json(history))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert an asset inside an open transaction (purchase receipt)
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &NewAsset,
    ) -> AppResult<Asset> {
        let row = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                asset_tag, name, asset_type, brand, model, serial_number,
                status, employee_id, department_id, purchase_value, purchase_date,
                invoice_number, accounting_account_code, notes, history
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&data.asset_tag)
        .bind(&data.name)
        .bind(&data.asset_type)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(data.status)
        .bind(data.employee_id)
        .bind(data.department_id)
        .bind(data.purchase_value)
        .bind(data.purchase_date)
        .bind(&data.invoice_number)
        .bind(&data.accounting_account_code)
        .bind(&data.notes)
        .bind(Json(&data.history))
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Update editable asset fields
    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.asset_tag, "asset_tag");
        add_field!(data.name, "name");
        add_field!(data.asset_type, "asset_type");
        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.status, "status");
        add_field!(data.department_id, "department_id");
        add_field!(data.purchase_value, "purchase_value");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.invoice_number, "invoice_number");
        add_field!(data.accounting_account_code, "accounting_account_code");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE assets SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Asset>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.asset_tag);
        bind_field!(data.name);
        bind_field!(data.asset_type);
        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.serial_number);
        bind_field!(data.status);
        bind_field!(data.department_id);
        bind_field!(data.purchase_value);
        bind_field!(data.purchase_date);
        bind_field!(data.invoice_number);
        bind_field!(data.accounting_account_code);
        bind_field!(data.notes);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Change status and assignment in one statement, appending a
    /// history entry
    pub async fn set_assignment(
        &self,
        id: i32,
        employee_id: Option<i32>,
        status: AssetStatus,
        entry: HistoryEntry,
    ) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets
            SET employee_id = $1, status = $2, history = history || $3::jsonb, modif_date = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(status)
        .bind(Json(entry))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Change status only, appending a history entry
    pub async fn set_status(
        &self,
        id: i32,
        status: AssetStatus,
        entry: HistoryEntry,
    ) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets
            SET status = $1, history = history || $2::jsonb, modif_date = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(Json(entry))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Append a history entry without touching other fields
    pub async fn append_history(&self, id: i32, entry: HistoryEntry) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE assets SET history = history || $1::jsonb, modif_date = $2 WHERE id = $3",
        )
        .bind(Json(entry))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    /// Delete asset
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    /// Insert-or-update by explicit id (workbook import). Returns true
    /// when a new row was inserted.
    pub async fn upsert_imported(&self, id: i32, data: &NewAsset) -> AppResult<bool> {
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO assets (
                id, asset_tag, name, asset_type, brand, model, serial_number,
                status, employee_id, department_id, purchase_value, purchase_date,
                invoice_number, accounting_account_code, notes, history
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (id) DO UPDATE SET
                asset_tag = EXCLUDED.asset_tag,
                name = EXCLUDED.name,
                asset_type = EXCLUDED.asset_type,
                brand = EXCLUDED.brand,
                model = EXCLUDED.model,
                serial_number = EXCLUDED.serial_number,
                status = EXCLUDED.status,
                employee_id = EXCLUDED.employee_id,
                department_id = EXCLUDED.department_id,
                purchase_value = EXCLUDED.purchase_value,
                purchase_date = EXCLUDED.purchase_date,
                invoice_number = EXCLUDED.invoice_number,
                accounting_account_code = EXCLUDED.accounting_account_code,
                notes = EXCLUDED.notes,
                modif_date = NOW()
            RETURNING (xmax = 0)
            "#,
        )
        .bind(id)
        .bind(&data.asset_tag)
        .bind(&data.name)
        .bind(&data.asset_type)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(data.status)
        .bind(data.employee_id)
        .bind(data.department_id)
        .bind(data.purchase_value)
        .bind(data.purchase_date)
        .bind(&data.invoice_number)
        .bind(&data.accounting_account_code)
        .bind(&data.notes)
        .bind(Json(&data.history))
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    /// Realign the id sequence after imports with explicit ids
    pub async fn fix_sequence(&self) -> AppResult<()> {
        sqlx::query("SELECT setval('assets_id_seq', GREATEST((SELECT COALESCE(MAX(id), 1) FROM assets), 1))")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Assets currently in use by an employee (responsibility term)
    pub async fn list_in_use_by_employee(&self, employee_id: i32) -> AppResult<Vec<Asset>> {
        let rows = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE employee_id = $1 AND status = 'Em Uso' ORDER BY name",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Number of assets still assigned to an employee
    pub async fn count_assigned_to_employee(&self, employee_id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Total number of assets (for stats)
    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Asset counts grouped by status (for stats)
    pub async fn count_by_status(&self) -> AppResult<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT status AS label, COUNT(*) AS count FROM assets GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Asset counts grouped by type (for stats)
    pub async fn count_by_type(&self) -> AppResult<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT asset_type AS label, COUNT(*) AS count FROM assets GROUP BY asset_type ORDER BY asset_type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Asset counts grouped by department name (for stats)
    pub async fn count_per_department(&self) -> AppResult<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            r#"
            SELECT COALESCE(d.name, 'Sem departamento') AS label, COUNT(*) AS count
            FROM assets a
            LEFT JOIN departments d ON a.department_id = d.id
            GROUP BY d.name
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
