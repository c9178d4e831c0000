//! Accounting classification service.
//!
//! Besides plain CRUD this owns the fuzzy account resolution used by the
//! workbook import: spreadsheet cells carry accounts as "code", "name" or
//! "code - name" in inconsistent casing and accenting, and unknown
//! accounts are auto-created rather than dropped.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::accounting::{
        AccountingAccount, AssetTypeConfig, CreateAccount, CreateAssetTypeConfig, UpdateAccount,
        UpdateAssetTypeConfig,
    },
    repository::Repository,
    text::{normalize, normalize_compact},
};

/// How an account reference was resolved
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched(String),
    Created(String),
}

impl Resolution {
    pub fn code(&self) -> &str {
        match self {
            Resolution::Matched(code) | Resolution::Created(code) => code,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolution::Created(_))
    }
}

/// Split a raw cell into its code and name halves, when both are present
pub(crate) fn split_reference(raw: &str) -> (Option<&str>, &str) {
    if let Some((code, name)) = raw.split_once(" - ") {
        let code = code.trim();
        if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
            return (Some(code), name.trim());
        }
    }
    let trimmed = raw.trim();
    if trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
        && trimmed.chars().any(|c| c.is_ascii_digit())
    {
        (Some(trimmed), trimmed)
    } else {
        (None, trimmed)
    }
}

#[derive(Clone)]
pub struct AccountingService {
    repository: Repository,
}

impl AccountingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // -- Accounts -------------------------------------------------------------

    pub async fn list_accounts(&self) -> AppResult<Vec<AccountingAccount>> {
        self.repository.accounting.list_accounts().await
    }

    pub async fn get_account(&self, id: i32) -> AppResult<AccountingAccount> {
        self.repository.accounting.get_account(id).await
    }

    pub async fn create_account(&self, data: CreateAccount) -> AppResult<AccountingAccount> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.accounting.create_account(&data).await
    }

    pub async fn update_account(&self, id: i32, data: UpdateAccount) -> AppResult<AccountingAccount> {
        self.repository.accounting.update_account(id, &data).await
    }

    pub async fn delete_account(&self, id: i32) -> AppResult<()> {
        self.repository.accounting.delete_account(id).await
    }

    // -- Asset type configs ---------------------------------------------------

    pub async fn list_type_configs(&self) -> AppResult<Vec<AssetTypeConfig>> {
        self.repository.accounting.list_type_configs().await
    }

    pub async fn create_type_config(
        &self,
        data: CreateAssetTypeConfig,
    ) -> AppResult<AssetTypeConfig> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.accounting.create_type_config(&data).await
    }

    pub async fn update_type_config(
        &self,
        id: i32,
        data: UpdateAssetTypeConfig,
    ) -> AppResult<AssetTypeConfig> {
        self.repository.accounting.update_type_config(id, &data).await
    }

    pub async fn delete_type_config(&self, id: i32) -> AppResult<()> {
        self.repository.accounting.delete_type_config(id).await
    }

    // -- Fuzzy resolution -------------------------------------------------------

    /// Resolve a raw account reference to a registered account code,
    /// creating the account when nothing matches.
    pub async fn resolve_or_create(&self, raw: &str) -> AppResult<Resolution> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::BadRequest(
                "Empty account reference".to_string(),
            ));
        }

        let accounts = self.repository.accounting.list_accounts().await?;
        let (code, name) = split_reference(raw);

        if let Some(code) = code {
            let wanted = normalize_compact(code);
            if let Some(account) = accounts
                .iter()
                .find(|a| normalize_compact(&a.code) == wanted)
            {
                return Ok(Resolution::Matched(account.code.clone()));
            }
        }

        let wanted = normalize(name);
        if let Some(account) = accounts.iter().find(|a| normalize(&a.name) == wanted) {
            return Ok(Resolution::Matched(account.code.clone()));
        }

        // Nothing matched: register the account as spelled in the sheet.
        let new_code = code.map(str::to_string).unwrap_or_else(|| {
            format!("AUTO-{}", normalize_compact(name))
        });
        let created = self
            .repository
            .accounting
            .create_account(&CreateAccount {
                code: new_code,
                name: name.to_string(),
                notes: Some("Criada automaticamente na importação".to_string()),
            })
            .await?;
        tracing::info!(code = %created.code, "auto-created accounting account");
        Ok(Resolution::Created(created.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_code_dash_name() {
        assert_eq!(
            split_reference("1.2.3 - Equipamentos de Informática"),
            (Some("1.2.3"), "Equipamentos de Informática")
        );
    }

    #[test]
    fn bare_code_and_bare_name() {
        assert_eq!(split_reference("1.2.3-01"), (Some("1.2.3-01"), "1.2.3-01"));
        assert_eq!(split_reference("Móveis e Utensílios"), (None, "Móveis e Utensílios"));
    }

    #[test]
    fn dash_inside_plain_name_is_not_a_code() {
        assert_eq!(
            split_reference("Ferramentas - Uso Geral"),
            (None, "Ferramentas - Uso Geral")
        );
    }
}
