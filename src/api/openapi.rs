//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    accounting, assets, audits, auth, companies, departments, documents, employees, health,
    maintenance, requests, settings, stats, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AssetTrack Pro API",
        version = "1.0.0",
        description = "IT asset inventory and lifecycle management REST API",
        contact(name = "AssetTrack Team", email = "contato@assettrack.dev")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::assign_asset,
        assets::unassign_asset,
        assets::write_off_asset,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Departments
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        // Requests
        requests::list_requests,
        requests::get_request,
        requests::create_request,
        requests::create_direct_purchase,
        requests::update_request,
        requests::delete_request,
        requests::approve_request,
        requests::prepare_request,
        requests::deliver_request,
        requests::cancel_request,
        requests::reconcile_request,
        // Purchase fulfillment
        requests::mark_purchase_order,
        requests::set_quotation,
        requests::approve_quotation,
        requests::authorize_order,
        requests::mark_purchased,
        requests::finalize_receipt,
        requests::link_asset,
        // Maintenance
        maintenance::list_tickets,
        maintenance::get_ticket,
        maintenance::list_by_asset,
        maintenance::open_ticket,
        maintenance::close_ticket,
        // Audits
        audits::list_audits,
        audits::get_audit,
        audits::create_audit,
        audits::add_entry,
        audits::close_audit,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Accounting
        accounting::list_accounts,
        accounting::get_account,
        accounting::create_account,
        accounting::update_account,
        accounting::delete_account,
        accounting::list_type_configs,
        accounting::create_type_config,
        accounting::update_type_config,
        accounting::delete_type_config,
        // Companies
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        companies::update_company,
        companies::set_default_company,
        companies::delete_company,
        // Stats
        stats::dashboard_stats,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Documents
        documents::responsibility_term,
        documents::asset_labels,
        documents::export_workbook,
        documents::import_workbook,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetStatus,
            crate::models::asset::HistoryEntry,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::asset::AssignAsset,
            assets::WriteOffRequest,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            // Departments
            crate::models::department::Department,
            crate::models::department::CreateDepartment,
            crate::models::department::UpdateDepartment,
            // Requests
            crate::models::request::EquipmentRequest,
            crate::models::request::RequestDetails,
            crate::models::request::RequestStatus,
            crate::models::request::RequestItem,
            crate::models::request::PurchaseStatus,
            crate::models::request::Quotation,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequest,
            crate::models::request::CreateDirectPurchase,
            crate::models::request::SetQuotation,
            crate::models::request::ApproveQuotation,
            crate::models::request::LinkAsset,
            crate::models::request::ReceiptData,
            crate::services::purchase::ReceiptResult,
            // Maintenance
            crate::models::maintenance::MaintenanceTicket,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::CloseMaintenance,
            // Audits
            crate::models::audit::AuditSession,
            crate::models::audit::AuditStatus,
            crate::models::audit::AuditEntry,
            crate::models::audit::CreateAudit,
            crate::models::audit::CreateAuditEntry,
            // Users
            crate::models::user::UserAccount,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Accounting
            crate::models::accounting::AccountingAccount,
            crate::models::accounting::CreateAccount,
            crate::models::accounting::UpdateAccount,
            crate::models::accounting::AssetTypeConfig,
            crate::models::accounting::CreateAssetTypeConfig,
            crate::models::accounting::UpdateAssetTypeConfig,
            // Companies
            crate::models::company::LegalEntity,
            crate::models::company::CreateLegalEntity,
            crate::models::company::UpdateLegalEntity,
            // Stats
            crate::services::stats::DashboardStats,
            crate::services::stats::AuditCoverage,
            crate::repository::assets::GroupCount,
            // Settings
            crate::models::settings::SystemConfig,
            crate::models::settings::UpdateSettings,
            // Documents
            crate::models::import_report::ImportReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "assets", description = "Asset inventory management"),
        (name = "employees", description = "Employee registry"),
        (name = "departments", description = "Department registry"),
        (name = "requests", description = "Equipment requests"),
        (name = "purchase", description = "Purchase order fulfillment"),
        (name = "maintenance", description = "Maintenance tickets"),
        (name = "audits", description = "Physical audit sessions"),
        (name = "users", description = "User account administration"),
        (name = "accounting", description = "Accounting classification"),
        (name = "companies", description = "Legal entities"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "settings", description = "System settings"),
        (name = "documents", description = "Document generation and workbook exchange")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
