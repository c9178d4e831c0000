//! Equipment request service (header lifecycle)

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::request::{
        CreateRequest, EquipmentRequest, RequestDetails, RequestStatus, UpdateRequest,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, status: Option<RequestStatus>) -> AppResult<Vec<EquipmentRequest>> {
        self.repository.requests.list(status).await
    }

    pub async fn get(&self, id: i32) -> AppResult<RequestDetails> {
        self.repository.requests.get_details(id).await
    }

    pub async fn create(&self, data: CreateRequest) -> AppResult<RequestDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(employee_id) = data.employee_id {
            let employee = self.repository.employees.get_by_id(employee_id).await?;
            if !employee.is_active {
                return Err(AppError::BusinessRule(
                    "Cannot open a request for an inactive employee".to_string(),
                ));
            }
        }
        self.repository.requests.create(&data, false).await
    }

    pub async fn update(&self, id: i32, data: UpdateRequest) -> AppResult<EquipmentRequest> {
        if let Some(employee_id) = data.employee_id {
            self.repository.employees.get_by_id(employee_id).await?;
        }
        self.repository.requests.update_header(id, &data).await
    }

    /// Delete a request; only while nothing has been handled yet
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let request = self.repository.requests.get_by_id(id).await?;
        if !matches!(
            request.status,
            RequestStatus::Pendente | RequestStatus::Cancelado
        ) {
            return Err(AppError::BusinessRule(format!(
                "Requests in state '{}' cannot be deleted",
                request.status
            )));
        }
        self.repository.requests.delete(id).await
    }

    /// Apply one operational transition. Delivery additionally requires
    /// every line item to be resolved.
    pub async fn transition(&self, id: i32, next: RequestStatus) -> AppResult<EquipmentRequest> {
        let details = self.repository.requests.get_details(id).await?;
        if !details.request.status.can_become(next) {
            return Err(AppError::BusinessRule(format!(
                "Request cannot go from '{}' to '{}'",
                details.request.status, next
            )));
        }
        if next == RequestStatus::Entregue && !details.all_items_resolved() {
            return Err(AppError::BusinessRule(
                "Request still has unresolved items and cannot be delivered".to_string(),
            ));
        }
        self.repository.requests.set_status(id, next).await
    }
}
