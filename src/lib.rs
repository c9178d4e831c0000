//! AssetTrack Pro - IT Asset Inventory and Lifecycle Management
//!
//! A Rust REST JSON API server for tracking IT assets through their
//! full lifecycle: request, purchase, assignment, maintenance, audit
//! and write-off.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod text;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
