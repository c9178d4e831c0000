//! Maintenance check-out/check-in service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{AssetStatus, HistoryEntry},
        maintenance::{CloseMaintenance, CreateMaintenance, MaintenanceTicket},
    },
    repository::Repository,
    services::notify::NotifyService,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
    notify: NotifyService,
}

impl MaintenanceService {
    pub fn new(repository: Repository, notify: NotifyService) -> Self {
        Self { repository, notify }
    }

    pub async fn list(&self, open_only: bool) -> AppResult<Vec<MaintenanceTicket>> {
        self.repository.maintenance.list(open_only).await
    }

    pub async fn get(&self, id: i32) -> AppResult<MaintenanceTicket> {
        self.repository.maintenance.get_by_id(id).await
    }

    pub async fn list_by_asset(&self, asset_id: i32) -> AppResult<Vec<MaintenanceTicket>> {
        self.repository.assets.get_by_id(asset_id).await?;
        self.repository.maintenance.list_by_asset(asset_id).await
    }

    /// Check out an asset to a repair provider. The asset keeps its
    /// assignment so check-in can restore it.
    pub async fn open(&self, data: CreateMaintenance) -> AppResult<MaintenanceTicket> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let asset = self.repository.assets.get_by_id(data.asset_id).await?;
        if asset.status == AssetStatus::Baixado {
            return Err(AppError::BusinessRule(
                "Written-off assets cannot be sent to maintenance".to_string(),
            ));
        }
        if asset.status == AssetStatus::Manutencao {
            return Err(AppError::BusinessRule(
                "Asset is already in maintenance".to_string(),
            ));
        }
        if let Some(open) = self
            .repository
            .maintenance
            .get_open_for_asset(data.asset_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Asset already has open maintenance ticket {}",
                open.id
            )));
        }

        let ticket = self.repository.maintenance.create(&data).await?;
        let entry = HistoryEntry::new(
            "Enviado para manutenção",
            Some(ticket.description.clone()),
        );
        self.repository
            .assets
            .set_status(data.asset_id, AssetStatus::Manutencao, entry)
            .await?;

        self.notify
            .send(&format!(
                "Ativo '{}' enviado para manutenção: {}",
                asset.name, ticket.description
            ))
            .await;

        Ok(ticket)
    }

    /// Check in a repaired asset, restoring its pre-maintenance
    /// assignment state.
    pub async fn close(&self, id: i32, data: CloseMaintenance) -> AppResult<MaintenanceTicket> {
        let ticket = self.repository.maintenance.get_by_id(id).await?;
        if !ticket.is_open() {
            return Err(AppError::BusinessRule(
                "Maintenance ticket is already closed".to_string(),
            ));
        }

        let closed = self
            .repository
            .maintenance
            .close(id, data.cost, data.notes)
            .await?;

        let asset = self.repository.assets.get_by_id(ticket.asset_id).await?;
        let restored = if asset.employee_id.is_some() {
            AssetStatus::EmUso
        } else {
            AssetStatus::Disponivel
        };
        let entry = HistoryEntry::new("Retornou da manutenção", None);
        self.repository
            .assets
            .set_status(ticket.asset_id, restored, entry)
            .await?;

        Ok(closed)
    }
}
