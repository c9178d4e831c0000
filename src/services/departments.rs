//! Department management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::department::{CreateDepartment, Department, UpdateDepartment},
    repository::Repository,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateDepartment) -> AppResult<Department> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if self
            .repository
            .departments
            .find_by_name(&data.name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Department '{}' already exists",
                data.name
            )));
        }
        self.repository.departments.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateDepartment) -> AppResult<Department> {
        self.repository.departments.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.departments.delete(id).await
    }
}
