//! Audit sessions repository

use chrono::Utc;
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::audit::{AuditEntry, AuditSession, AuditStatus, CreateAudit},
};

#[derive(Clone)]
pub struct AuditsRepository {
    pool: Pool<Postgres>,
}

impl AuditsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List sessions, newest first
    pub async fn list(&self) -> AppResult<Vec<AuditSession>> {
        let rows = sqlx::query_as::<_, AuditSession>(
            "SELECT * FROM audit_sessions ORDER BY started_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get session by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<AuditSession> {
        sqlx::query_as::<_, AuditSession>("SELECT * FROM audit_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Audit session {} not found", id)))
    }

    /// Latest session, if any (for stats)
    pub async fn get_latest(&self) -> AppResult<Option<AuditSession>> {
        let row = sqlx::query_as::<_, AuditSession>(
            "SELECT * FROM audit_sessions ORDER BY started_date DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Open a new session
    pub async fn create(&self, data: &CreateAudit) -> AppResult<AuditSession> {
        let row = sqlx::query_as::<_, AuditSession>(
            r#"
            INSERT INTO audit_sessions (label, status, started_date, entries)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.label)
        .bind(AuditStatus::Aberta)
        .bind(Utc::now())
        .bind(Json(Vec::<AuditEntry>::new()))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace the entry log of a session
    pub async fn update_entries(
        &self,
        id: i32,
        entries: &[AuditEntry],
    ) -> AppResult<AuditSession> {
        sqlx::query_as::<_, AuditSession>(
            "UPDATE audit_sessions SET entries = $1 WHERE id = $2 RETURNING *",
        )
        .bind(Json(entries))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Audit session {} not found", id)))
    }

    /// Close a session
    pub async fn close(&self, id: i32) -> AppResult<AuditSession> {
        sqlx::query_as::<_, AuditSession>(
            r#"
            UPDATE audit_sessions
            SET status = $1, finished_date = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(AuditStatus::Encerrada)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Audit session {} not found", id)))
    }
}
