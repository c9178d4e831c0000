//! Physical audit service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::HistoryEntry,
        audit::{AuditEntry, AuditSession, AuditStatus, CreateAudit, CreateAuditEntry},
        request::RequestStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditsService {
    repository: Repository,
}

impl AuditsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AuditSession>> {
        self.repository.audits.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<AuditSession> {
        self.repository.audits.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateAudit) -> AppResult<AuditSession> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.audits.create(&data).await
    }

    /// Record one scanned asset in an open session. Each asset can be
    /// noted at most once per session. A missing asset flags its
    /// delivered requests for reconciliation (Confronto).
    pub async fn add_entry(&self, id: i32, data: CreateAuditEntry) -> AppResult<AuditSession> {
        let session = self.repository.audits.get_by_id(id).await?;
        if session.status != AuditStatus::Aberta {
            return Err(AppError::BusinessRule(
                "Audit session is closed and does not accept entries".to_string(),
            ));
        }
        if session
            .entries
            .0
            .iter()
            .any(|e| e.asset_id == data.asset_id)
        {
            return Err(AppError::Conflict(format!(
                "Asset {} was already noted in this session",
                data.asset_id
            )));
        }

        let asset = self.repository.assets.get_by_id(data.asset_id).await?;

        let mut entries = session.entries.0.clone();
        entries.push(AuditEntry {
            asset_id: data.asset_id,
            found: data.found,
            condition: data.condition,
            noted_at: Utc::now(),
            notes: data.notes,
        });
        let session = self.repository.audits.update_entries(id, &entries).await?;

        if !data.found {
            let entry = HistoryEntry::new(
                "Não localizado em auditoria",
                Some(format!("Sessão: {}", session.label)),
            );
            self.repository.assets.append_history(asset.id, entry).await?;
            self.flag_delivered_requests(asset.id).await?;
        }

        Ok(session)
    }

    /// Close an open session
    pub async fn close(&self, id: i32) -> AppResult<AuditSession> {
        let session = self.repository.audits.get_by_id(id).await?;
        if session.status != AuditStatus::Aberta {
            return Err(AppError::BusinessRule(
                "Audit session is already closed".to_string(),
            ));
        }
        self.repository.audits.close(id).await
    }

    /// Delivered requests resolving to a missing asset go to Confronto
    async fn flag_delivered_requests(&self, asset_id: i32) -> AppResult<()> {
        let requests = self
            .repository
            .requests
            .find_by_linked_asset(asset_id)
            .await?;
        for request in requests {
            if request.status.can_become(RequestStatus::Confronto) {
                self.repository
                    .requests
                    .set_status(request.id, RequestStatus::Confronto)
                    .await?;
                tracing::warn!(
                    request_id = request.id,
                    asset_id,
                    "request flagged for audit reconciliation"
                );
            }
        }
        Ok(())
    }
}
