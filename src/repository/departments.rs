//! Departments repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::department::{CreateDepartment, Department, UpdateDepartment},
};

#[derive(Clone)]
pub struct DepartmentsRepository {
    pool: Pool<Postgres>,
}

impl DepartmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all departments
    pub async fn list(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get department by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Find a department by exact name (used by workbook import)
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let row = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create department
    pub async fn create(&self, data: &CreateDepartment) -> AppResult<Department> {
        let row = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, cost_center, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.cost_center)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update department
    pub async fn update(&self, id: i32, data: &UpdateDepartment) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = COALESCE($1, name),
                cost_center = COALESCE($2, cost_center),
                notes = COALESCE($3, notes)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.cost_center)
        .bind(&data.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Insert-or-update by explicit id (workbook import). Returns true
    /// when a new row was inserted.
    pub async fn upsert_imported(&self, id: i32, data: &CreateDepartment) -> AppResult<bool> {
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO departments (id, name, cost_center, notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                cost_center = EXCLUDED.cost_center,
                notes = EXCLUDED.notes
            RETURNING (xmax = 0)
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.cost_center)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    /// Realign the id sequence after imports with explicit ids
    pub async fn fix_sequence(&self) -> AppResult<()> {
        sqlx::query("SELECT setval('departments_id_seq', GREATEST((SELECT COALESCE(MAX(id), 1) FROM departments), 1))")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete department
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Department {} not found", id)));
        }
        Ok(())
    }
}
