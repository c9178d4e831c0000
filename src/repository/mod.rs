//! Repository layer for database operations

pub mod accounting;
pub mod assets;
pub mod audits;
pub mod companies;
pub mod departments;
pub mod employees;
pub mod maintenance;
pub mod requests;
pub mod settings;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub employees: employees::EmployeesRepository,
    pub departments: departments::DepartmentsRepository,
    pub requests: requests::RequestsRepository,
    pub users: users::UsersRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub audits: audits::AuditsRepository,
    pub accounting: accounting::AccountingRepository,
    pub companies: companies::CompaniesRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            departments: departments::DepartmentsRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            audits: audits::AuditsRepository::new(pool.clone()),
            accounting: accounting::AccountingRepository::new(pool.clone()),
            companies: companies::CompaniesRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            pool,
        }
    }
}
