//! Business logic services

pub mod accounting;
pub mod assets;
pub mod audits;
pub mod auth;
pub mod companies;
pub mod departments;
pub mod documents;
pub mod employees;
pub mod maintenance;
pub mod notify;
pub mod purchase;
pub mod requests;
pub mod settings;
pub mod stats;
pub mod workbook;

use crate::{
    config::{AuthConfig, NotificationsConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub assets: assets::AssetsService,
    pub employees: employees::EmployeesService,
    pub departments: departments::DepartmentsService,
    pub requests: requests::RequestsService,
    pub purchase: purchase::PurchaseService,
    pub maintenance: maintenance::MaintenanceService,
    pub audits: audits::AuditsService,
    pub accounting: accounting::AccountingService,
    pub companies: companies::CompaniesService,
    pub stats: stats::StatsService,
    pub settings: settings::SettingsService,
    pub documents: documents::DocumentsService,
    pub workbook: workbook::WorkbookService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        notifications_config: NotificationsConfig,
    ) -> AppResult<Self> {
        let notify = notify::NotifyService::new(notifications_config);
        let accounting = accounting::AccountingService::new(repository.clone());
        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            assets: assets::AssetsService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            departments: departments::DepartmentsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            purchase: purchase::PurchaseService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone(), notify),
            audits: audits::AuditsService::new(repository.clone()),
            accounting: accounting.clone(),
            companies: companies::CompaniesService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            documents: documents::DocumentsService::new(repository.clone()),
            workbook: workbook::WorkbookService::new(repository, accounting),
        })
    }
}
