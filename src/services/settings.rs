//! System settings service

use crate::{
    error::AppResult,
    models::settings::{SystemConfig, UpdateSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<SystemConfig>> {
        self.repository.settings.get_all().await
    }

    /// Apply the given key/value pairs; keys absent from the payload are
    /// left untouched.
    pub async fn update(&self, data: UpdateSettings) -> AppResult<Vec<SystemConfig>> {
        for (key, value) in &data.settings {
            self.repository.settings.upsert(key, value.as_deref()).await?;
        }
        self.get_all().await
    }
}
