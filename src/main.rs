//! AssetTrack Server - IT Asset Inventory and Lifecycle Management
//!
//! REST API server entry point.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assettrack_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("assettrack_server={},tower_http=debug", config.logging.level).into()
    });

    // Daily rolling file when a log directory is configured, stdout otherwise.
    // The appender guard must outlive the server.
    let _guard = match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "assettrack.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            if config.logging.format == "json" {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                    .init();
            }
            Some(guard)
        }
        None => {
            if config.logging.format == "json" {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
            }
            None
        }
    };

    tracing::info!("Starting AssetTrack Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.notifications.clone(),
    )
    .expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Assets
        .route("/assets", get(api::assets::list_assets))
        .route("/assets", post(api::assets::create_asset))
        .route("/assets/:id", get(api::assets::get_asset))
        .route("/assets/:id", put(api::assets::update_asset))
        .route("/assets/:id", delete(api::assets::delete_asset))
        .route("/assets/:id/assign", post(api::assets::assign_asset))
        .route("/assets/:id/unassign", post(api::assets::unassign_asset))
        .route("/assets/:id/write-off", post(api::assets::write_off_asset))
        // Employees
        .route("/employees", get(api::employees::list_employees))
        .route("/employees", post(api::employees::create_employee))
        .route("/employees/:id", get(api::employees::get_employee))
        .route("/employees/:id", put(api::employees::update_employee))
        .route("/employees/:id", delete(api::employees::delete_employee))
        // Departments
        .route("/departments", get(api::departments::list_departments))
        .route("/departments", post(api::departments::create_department))
        .route("/departments/:id", get(api::departments::get_department))
        .route("/departments/:id", put(api::departments::update_department))
        .route("/departments/:id", delete(api::departments::delete_department))
        // Requests
        .route("/requests", get(api::requests::list_requests))
        .route("/requests", post(api::requests::create_request))
        .route("/requests/direct-purchase", post(api::requests::create_direct_purchase))
        .route("/requests/:id", get(api::requests::get_request))
        .route("/requests/:id", put(api::requests::update_request))
        .route("/requests/:id", delete(api::requests::delete_request))
        .route("/requests/:id/approve", post(api::requests::approve_request))
        .route("/requests/:id/prepare", post(api::requests::prepare_request))
        .route("/requests/:id/deliver", post(api::requests::deliver_request))
        .route("/requests/:id/cancel", post(api::requests::cancel_request))
        .route("/requests/:id/reconcile", post(api::requests::reconcile_request))
        // Purchase fulfillment per line item
        .route(
            "/requests/:id/items/:position/purchase-order",
            post(api::requests::mark_purchase_order),
        )
        .route(
            "/requests/:id/items/:position/quotations/:slot",
            put(api::requests::set_quotation),
        )
        .route(
            "/requests/:id/items/:position/approve-quotation",
            post(api::requests::approve_quotation),
        )
        .route(
            "/requests/:id/items/:position/authorize",
            post(api::requests::authorize_order),
        )
        .route(
            "/requests/:id/items/:position/purchase",
            post(api::requests::mark_purchased),
        )
        .route(
            "/requests/:id/items/:position/receipt",
            post(api::requests::finalize_receipt),
        )
        .route(
            "/requests/:id/items/:position/link-asset",
            post(api::requests::link_asset),
        )
        // Maintenance
        .route("/maintenance", get(api::maintenance::list_tickets))
        .route("/maintenance", post(api::maintenance::open_ticket))
        .route("/maintenance/:id", get(api::maintenance::get_ticket))
        .route("/maintenance/:id/close", post(api::maintenance::close_ticket))
        .route("/maintenance/by-asset/:asset_id", get(api::maintenance::list_by_asset))
        // Audits
        .route("/audits", get(api::audits::list_audits))
        .route("/audits", post(api::audits::create_audit))
        .route("/audits/:id", get(api::audits::get_audit))
        .route("/audits/:id/entries", post(api::audits::add_entry))
        .route("/audits/:id/close", post(api::audits::close_audit))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        // Accounting
        .route("/accounting/accounts", get(api::accounting::list_accounts))
        .route("/accounting/accounts", post(api::accounting::create_account))
        .route("/accounting/accounts/:id", get(api::accounting::get_account))
        .route("/accounting/accounts/:id", put(api::accounting::update_account))
        .route("/accounting/accounts/:id", delete(api::accounting::delete_account))
        .route("/accounting/asset-types", get(api::accounting::list_type_configs))
        .route("/accounting/asset-types", post(api::accounting::create_type_config))
        .route("/accounting/asset-types/:id", put(api::accounting::update_type_config))
        .route("/accounting/asset-types/:id", delete(api::accounting::delete_type_config))
        // Companies (legal entities)
        .route("/companies", get(api::companies::list_companies))
        .route("/companies", post(api::companies::create_company))
        .route("/companies/:id", get(api::companies::get_company))
        .route("/companies/:id", put(api::companies::update_company))
        .route("/companies/:id", delete(api::companies::delete_company))
        .route("/companies/:id/default", post(api::companies::set_default_company))
        // Statistics
        .route("/stats", get(api::stats::dashboard_stats))
        // Settings
        .route("/settings", get(api::settings::get_settings))
        .route("/settings", put(api::settings::update_settings))
        // Documents
        .route(
            "/documents/responsibility-term/:employee_id",
            get(api::documents::responsibility_term),
        )
        .route("/documents/labels", get(api::documents::asset_labels))
        .route("/export/workbook", get(api::documents::export_workbook))
        .route("/import/workbook", post(api::documents::import_workbook))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
