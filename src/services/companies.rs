//! Legal entity service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::company::{CreateLegalEntity, LegalEntity, UpdateLegalEntity},
    repository::Repository,
};

#[derive(Clone)]
pub struct CompaniesService {
    repository: Repository,
}

impl CompaniesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<LegalEntity>> {
        self.repository.companies.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<LegalEntity> {
        self.repository.companies.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateLegalEntity) -> AppResult<LegalEntity> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.companies.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateLegalEntity) -> AppResult<LegalEntity> {
        self.repository.companies.update(id, &data).await
    }

    pub async fn set_default(&self, id: i32) -> AppResult<LegalEntity> {
        self.repository.companies.set_default(id).await
    }

    /// Delete an entity; the default one must be reassigned first
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let entity = self.repository.companies.get_by_id(id).await?;
        if entity.is_default {
            return Err(AppError::BusinessRule(
                "The default legal entity cannot be deleted".to_string(),
            ));
        }
        self.repository.companies.delete(id).await
    }
}
