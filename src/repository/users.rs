//! User accounts repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, Role, UpdateUser, UserAccount},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all user accounts
    pub async fn list(&self) -> AppResult<Vec<UserAccount>> {
        let rows = sqlx::query_as::<_, UserAccount>("SELECT * FROM users ORDER BY login")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<UserAccount> {
        sqlx::query_as::<_, UserAccount>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by login
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserAccount>("SELECT * FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create user with an already-hashed password
    pub async fn create(&self, data: &CreateUser, password_hash: &str) -> AppResult<UserAccount> {
        let existing = self.get_by_login(&data.login).await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "Login '{}' already exists",
                data.login
            )));
        }

        let row = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO users (login, password, name, email, role, can_approve, can_execute)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.login)
        .bind(password_hash)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.role.unwrap_or(Role::Viewer))
        .bind(data.can_approve.unwrap_or(false))
        .bind(data.can_execute.unwrap_or(false))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update user; `password_hash` replaces the stored credential when set
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateUser,
        password_hash: Option<String>,
    ) -> AppResult<UserAccount> {
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

        add_field!(data.login, "login");
        add_field!(password_hash, "password");
        add_field!(data.name, "name");
        add_field!(data.email, "email");
        add_field!(data.role, "role");
        add_field!(data.can_approve, "can_approve");
        add_field!(data.can_execute, "can_execute");
        add_field!(data.is_active, "is_active");

        let query = format!(
            "UPDATE users SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, UserAccount>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.login);
        bind_field!(password_hash);
        bind_field!(data.name);
        bind_field!(data.email);
        bind_field!(data.role);
        bind_field!(data.can_approve);
        bind_field!(data.can_execute);
        bind_field!(data.is_active);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Replace the stored password hash (plaintext migration on login)
    pub async fn set_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password = $1, modif_date = $2 WHERE id = $3")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
