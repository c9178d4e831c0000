//! Dashboard statistics service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    repository::{assets::GroupCount, Repository},
};

/// Coverage of the most recent physical audit
#[derive(Debug, Serialize, ToSchema)]
pub struct AuditCoverage {
    pub session_id: i32,
    pub label: String,
    pub audited: i64,
    pub found: i64,
    pub total_assets: i64,
}

/// Dashboard statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_assets: i64,
    pub assets_by_status: Vec<GroupCount>,
    pub assets_by_type: Vec<GroupCount>,
    pub assets_per_department: Vec<GroupCount>,
    pub active_employees: i64,
    pub open_requests: i64,
    pub open_maintenance: i64,
    pub latest_audit: Option<AuditCoverage>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let total_assets = self.repository.assets.count_total().await?;
        let assets_by_status = self.repository.assets.count_by_status().await?;
        let assets_by_type = self.repository.assets.count_by_type().await?;
        let assets_per_department = self.repository.assets.count_per_department().await?;
        let active_employees = self.repository.employees.count_total().await?;
        let open_requests = self.repository.requests.count_open().await?;
        let open_maintenance = self.repository.maintenance.count_open().await?;

        let latest_audit = self
            .repository
            .audits
            .get_latest()
            .await?
            .map(|session| AuditCoverage {
                session_id: session.id,
                label: session.label.clone(),
                audited: session.entries.0.len() as i64,
                found: session.entries.0.iter().filter(|e| e.found).count() as i64,
                total_assets,
            });

        Ok(DashboardStats {
            total_assets,
            assets_by_status,
            assets_by_type,
            assets_per_department,
            active_employees,
            open_requests,
            open_maintenance,
            latest_audit,
        })
    }
}
