//! Employee management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EmployeeQuery) -> AppResult<Vec<Employee>> {
        self.repository.employees.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateEmployee) -> AppResult<Employee> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(department_id) = data.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }
        self.repository.employees.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateEmployee) -> AppResult<Employee> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(department_id) = data.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }
        self.repository.employees.update(id, &data).await
    }

    /// Delete an employee; refused while any asset is still assigned
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.employees.get_by_id(id).await?;
        let assigned = self
            .repository
            .assets
            .count_assigned_to_employee(id)
            .await?;
        if assigned > 0 {
            return Err(AppError::BusinessRule(format!(
                "Employee still has {} assigned asset(s)",
                assigned
            )));
        }
        self.repository.employees.delete(id).await
    }
}
