//! Employees repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List employees with optional filters
    pub async fn list(&self, query: &EmployeeQuery) -> AppResult<Vec<Employee>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref name) = query.name {
            params.push(format!("%{}%", name.to_lowercase()));
            conditions.push(format!("LOWER(name) LIKE ${}", params.len()));
        }
        if let Some(department_id) = query.department_id {
            conditions.push(format!("department_id = {}", department_id));
        }
        if let Some(active) = query.active {
            conditions.push(format!("is_active = {}", active));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!("SELECT * FROM employees {} ORDER BY name", where_clause);
        let mut builder = sqlx::query_as::<_, Employee>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }
        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Create employee
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, email, registration_number, department_id, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.registration_number)
        .bind(data.department_id)
        .bind(&data.position)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update employee
    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<Employee> {
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

        add_field!(data.name, "name");
        add_field!(data.email, "email");
        add_field!(data.registration_number, "registration_number");
        add_field!(data.department_id, "department_id");
        add_field!(data.position, "position");
        add_field!(data.is_active, "is_active");

        let query = format!(
            "UPDATE employees SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Employee>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.email);
        bind_field!(data.registration_number);
        bind_field!(data.department_id);
        bind_field!(data.position);
        bind_field!(data.is_active);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Delete employee
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }
        Ok(())
    }

    /// Insert-or-update by explicit id (workbook import). Returns true
    /// when a new row was inserted.
    pub async fn upsert_imported(
        &self,
        id: i32,
        data: &CreateEmployee,
        is_active: bool,
    ) -> AppResult<bool> {
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO employees (id, name, email, registration_number, department_id, position, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                registration_number = EXCLUDED.registration_number,
                department_id = EXCLUDED.department_id,
                position = EXCLUDED.position,
                is_active = EXCLUDED.is_active,
                modif_date = NOW()
            RETURNING (xmax = 0)
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.registration_number)
        .bind(data.department_id)
        .bind(&data.position)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    /// Realign the id sequence after imports with explicit ids
    pub async fn fix_sequence(&self) -> AppResult<()> {
        sqlx::query("SELECT setval('employees_id_seq', GREATEST((SELECT COALESCE(MAX(id), 1) FROM employees), 1))")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Total number of employees (for stats)
    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE is_active")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
