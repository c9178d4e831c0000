//! Asset lifecycle service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetQuery, AssetStatus, CreateAsset, HistoryEntry, UpdateAsset},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        self.repository.assets.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Asset> {
        self.repository.assets.get_by_id(id).await
    }

    /// Create asset from a manual entry, checking referenced records
    pub async fn create(&self, data: CreateAsset) -> AppResult<Asset> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(employee_id) = data.employee_id {
            self.repository.employees.get_by_id(employee_id).await?;
        }
        if let Some(department_id) = data.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }
        self.repository.assets.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateAsset) -> AppResult<Asset> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(department_id) = data.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }
        self.repository.assets.update(id, &data).await
    }

    /// Delete an asset; refused while it is assigned to an employee
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let asset = self.repository.assets.get_by_id(id).await?;
        if asset.employee_id.is_some() {
            return Err(AppError::BusinessRule(
                "Asset is assigned to an employee and cannot be deleted".to_string(),
            ));
        }
        self.repository.assets.delete(id).await
    }

    /// Hand an available asset to an employee
    pub async fn assign(&self, id: i32, employee_id: i32) -> AppResult<Asset> {
        let asset = self.repository.assets.get_by_id(id).await?;
        if asset.status != AssetStatus::Disponivel {
            return Err(AppError::BusinessRule(format!(
                "Only available assets can be assigned, asset is '{}'",
                asset.status
            )));
        }
        let employee = self.repository.employees.get_by_id(employee_id).await?;
        if !employee.is_active {
            return Err(AppError::BusinessRule(
                "Cannot assign an asset to an inactive employee".to_string(),
            ));
        }
        let entry = HistoryEntry::new("Atribuído", Some(format!("Colaborador: {}", employee.name)));
        self.repository
            .assets
            .set_assignment(id, Some(employee_id), AssetStatus::EmUso, entry)
            .await
    }

    /// Return an in-use asset to stock
    pub async fn unassign(&self, id: i32) -> AppResult<Asset> {
        let asset = self.repository.assets.get_by_id(id).await?;
        if asset.employee_id.is_none() {
            return Err(AppError::BusinessRule(
                "Asset is not assigned to anyone".to_string(),
            ));
        }
        let entry = HistoryEntry::new("Devolvido", None);
        self.repository
            .assets
            .set_assignment(id, None, AssetStatus::Disponivel, entry)
            .await
    }

    /// Write off an asset (baixa patrimonial). Terminal for the record.
    pub async fn write_off(&self, id: i32, reason: Option<String>) -> AppResult<Asset> {
        let asset = self.repository.assets.get_by_id(id).await?;
        if asset.status == AssetStatus::Baixado {
            return Err(AppError::BusinessRule(
                "Asset is already written off".to_string(),
            ));
        }
        let entry = HistoryEntry::new("Baixado", reason);
        self.repository
            .assets
            .set_assignment(id, None, AssetStatus::Baixado, entry)
            .await
    }
}
