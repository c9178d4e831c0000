//! Excel workbook export and import.
//!
//! The export writes four sheets (`Inventário Ativos`, `Colaboradores`,
//! `Requisições`, `Departamentos`) and the import reads the same shape
//! back, upserting rows by id. Account references on asset rows are
//! fuzzily resolved and auto-created through the accounting service.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use rust_xlsxwriter::Workbook;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AssetQuery, AssetStatus, HistoryEntry},
        department::{CreateDepartment, Department},
        employee::{CreateEmployee, Employee, EmployeeQuery},
        import_report::ImportReport,
        request::EquipmentRequest,
    },
    repository::{assets::NewAsset, Repository},
    services::accounting::AccountingService,
};

const SHEET_ASSETS: &str = "Inventário Ativos";
const SHEET_EMPLOYEES: &str = "Colaboradores";
const SHEET_REQUESTS: &str = "Requisições";
const SHEET_DEPARTMENTS: &str = "Departamentos";

#[derive(Clone)]
pub struct WorkbookService {
    repository: Repository,
    accounting: AccountingService,
}

impl WorkbookService {
    pub fn new(repository: Repository, accounting: AccountingService) -> Self {
        Self {
            repository,
            accounting,
        }
    }

    /// Export the full inventory as an xlsx workbook
    pub async fn export(&self) -> AppResult<Vec<u8>> {
        let assets = self
            .repository
            .assets
            .list(&AssetQuery {
                status: None,
                asset_type: None,
                department_id: None,
                employee_id: None,
                q: None,
            })
            .await?;
        let employees = self
            .repository
            .employees
            .list(&EmployeeQuery {
                name: None,
                department_id: None,
                active: None,
            })
            .await?;
        let requests = self.repository.requests.list(None).await?;
        let departments = self.repository.departments.list().await?;
        build_workbook(&assets, &employees, &requests, &departments)
    }

    /// Import a workbook, upserting departments, employees and assets by
    /// id. Rows without an id are created. Returns a report of what
    /// changed plus per-row warnings for everything skipped or defaulted.
    pub async fn import(&self, bytes: &[u8]) -> AppResult<ImportReport> {
        let parsed = parse_workbook(bytes)?;
        let mut report = ImportReport {
            warnings: parsed.warnings,
            ..Default::default()
        };

        for row in &parsed.departments {
            match row.id {
                Some(id) => {
                    if self.repository.departments.upsert_imported(id, &row.data).await? {
                        report.departments_created += 1;
                    }
                }
                None => {
                    if self
                        .repository
                        .departments
                        .find_by_name(&row.data.name)
                        .await?
                        .is_none()
                    {
                        self.repository.departments.create(&row.data).await?;
                        report.departments_created += 1;
                    }
                }
            }
        }
        self.repository.departments.fix_sequence().await?;

        for row in &parsed.employees {
            match row.id {
                Some(id) => {
                    if self
                        .repository
                        .employees
                        .upsert_imported(id, &row.data, row.is_active)
                        .await?
                    {
                        report.employees_created += 1;
                    } else {
                        report.employees_updated += 1;
                    }
                }
                None => {
                    self.repository.employees.create(&row.data).await?;
                    report.employees_created += 1;
                }
            }
        }
        self.repository.employees.fix_sequence().await?;

        for row in parsed.assets {
            let mut asset = row.asset;
            if let Some(ref reference) = row.account_reference {
                let resolution = self.accounting.resolve_or_create(reference).await?;
                if resolution.was_created() {
                    report.accounts_created += 1;
                }
                asset.accounting_account_code = Some(resolution.code().to_string());
            }
            match row.id {
                Some(id) => {
                    if self.repository.assets.upsert_imported(id, &asset).await? {
                        report.assets_created += 1;
                    } else {
                        report.assets_updated += 1;
                    }
                }
                None => {
                    report
                        .warnings
                        .push(format!("Ativo '{}' sem id, ignorado", asset.name));
                }
            }
        }
        self.repository.assets.fix_sequence().await?;

        tracing::info!(
            assets_created = report.assets_created,
            assets_updated = report.assets_updated,
            employees_created = report.employees_created,
            warnings = report.warnings.len(),
            "workbook import finished"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn xlsx_error(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::Document(format!("Workbook generation failed: {}", e))
}

fn build_workbook(
    assets: &[Asset],
    employees: &[Employee],
    requests: &[EquipmentRequest],
    departments: &[Department],
) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_ASSETS).map_err(xlsx_error)?;
    let headers = [
        "ID", "Patrimônio", "Nome", "Tipo", "Marca", "Modelo", "Nº Série", "Status",
        "Colaborador ID", "Departamento ID", "Valor", "Data Compra", "Nota Fiscal",
        "Conta Contábil", "Observações",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).map_err(xlsx_error)?;
    }
    for (i, asset) in assets.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, asset.id).map_err(xlsx_error)?;
        sheet
            .write(row, 1, asset.asset_tag.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet.write(row, 2, asset.name.as_str()).map_err(xlsx_error)?;
        sheet
            .write(row, 3, asset.asset_type.as_str())
            .map_err(xlsx_error)?;
        sheet
            .write(row, 4, asset.brand.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet
            .write(row, 5, asset.model.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet
            .write(row, 6, asset.serial_number.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet
            .write(row, 7, asset.status.as_str())
            .map_err(xlsx_error)?;
        if let Some(employee_id) = asset.employee_id {
            sheet.write(row, 8, employee_id).map_err(xlsx_error)?;
        }
        if let Some(department_id) = asset.department_id {
            sheet.write(row, 9, department_id).map_err(xlsx_error)?;
        }
        if let Some(value) = asset.purchase_value.and_then(|v| v.to_f64()) {
            sheet.write(row, 10, value).map_err(xlsx_error)?;
        }
        if let Some(date) = asset.purchase_date {
            sheet
                .write(row, 11, date.format("%Y-%m-%d").to_string())
                .map_err(xlsx_error)?;
        }
        sheet
            .write(row, 12, asset.invoice_number.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet
            .write(
                row,
                13,
                asset.accounting_account_code.as_deref().unwrap_or(""),
            )
            .map_err(xlsx_error)?;
        sheet
            .write(row, 14, asset.notes.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_EMPLOYEES).map_err(xlsx_error)?;
    let headers = ["ID", "Nome", "Email", "Matrícula", "Departamento ID", "Cargo", "Ativo"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).map_err(xlsx_error)?;
    }
    for (i, employee) in employees.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, employee.id).map_err(xlsx_error)?;
        sheet
            .write(row, 1, employee.name.as_str())
            .map_err(xlsx_error)?;
        sheet
            .write(row, 2, employee.email.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet
            .write(row, 3, employee.registration_number.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        if let Some(department_id) = employee.department_id {
            sheet.write(row, 4, department_id).map_err(xlsx_error)?;
        }
        sheet
            .write(row, 5, employee.position.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet.write(row, 6, employee.is_active).map_err(xlsx_error)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_REQUESTS).map_err(xlsx_error)?;
    let headers = ["ID", "Colaborador ID", "Status", "Observações", "Criada em"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).map_err(xlsx_error)?;
    }
    for (i, request) in requests.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, request.id).map_err(xlsx_error)?;
        if let Some(employee_id) = request.employee_id {
            sheet.write(row, 1, employee_id).map_err(xlsx_error)?;
        }
        sheet
            .write(row, 2, request.status.as_str())
            .map_err(xlsx_error)?;
        sheet
            .write(row, 3, request.notes.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        if let Some(created) = request.crea_date {
            sheet
                .write(row, 4, created.format("%Y-%m-%d %H:%M").to_string())
                .map_err(xlsx_error)?;
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_DEPARTMENTS).map_err(xlsx_error)?;
    let headers = ["ID", "Nome", "Centro de Custo", "Observações"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).map_err(xlsx_error)?;
    }
    for (i, department) in departments.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, department.id).map_err(xlsx_error)?;
        sheet
            .write(row, 1, department.name.as_str())
            .map_err(xlsx_error)?;
        sheet
            .write(row, 2, department.cost_center.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
        sheet
            .write(row, 3, department.notes.as_deref().unwrap_or(""))
            .map_err(xlsx_error)?;
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

// ---------------------------------------------------------------------------
// Import parsing
// ---------------------------------------------------------------------------

struct DepartmentRow {
    id: Option<i32>,
    data: CreateDepartment,
}

struct EmployeeRow {
    id: Option<i32>,
    data: CreateEmployee,
    is_active: bool,
}

struct AssetRow {
    id: Option<i32>,
    asset: NewAsset,
    account_reference: Option<String>,
}

struct ParsedWorkbook {
    departments: Vec<DepartmentRow>,
    employees: Vec<EmployeeRow>,
    assets: Vec<AssetRow>,
    warnings: Vec<String>,
}

fn cell_str(row: &[Data], idx: usize) -> Option<String> {
    row.get(idx)
        .and_then(|c| c.as_string())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn cell_i32(row: &[Data], idx: usize) -> Option<i32> {
    row.get(idx).and_then(|c| c.as_i64()).map(|v| v as i32)
}

fn cell_bool(row: &[Data], idx: usize) -> Option<bool> {
    row.get(idx).and_then(|c| c.get_bool())
}

fn cell_decimal(row: &[Data], idx: usize) -> Option<Decimal> {
    row.get(idx)
        .and_then(|c| c.as_f64())
        .and_then(Decimal::from_f64_retain)
        .map(|d| d.round_dp(2))
}

fn cell_date(row: &[Data], idx: usize) -> Option<NaiveDate> {
    cell_str(row, idx).and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn parse_workbook(bytes: &[u8]) -> AppResult<ParsedWorkbook> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::Import(format!("Invalid xlsx file: {}", e)))?;
    let mut warnings = Vec::new();

    let mut departments = Vec::new();
    if let Ok(range) = workbook.worksheet_range(SHEET_DEPARTMENTS) {
        for row in range.rows().skip(1) {
            let Some(name) = cell_str(row, 1) else { continue };
            departments.push(DepartmentRow {
                id: cell_i32(row, 0),
                data: CreateDepartment {
                    name,
                    cost_center: cell_str(row, 2),
                    notes: cell_str(row, 3),
                },
            });
        }
    }

    let mut employees = Vec::new();
    if let Ok(range) = workbook.worksheet_range(SHEET_EMPLOYEES) {
        for row in range.rows().skip(1) {
            let Some(name) = cell_str(row, 1) else { continue };
            employees.push(EmployeeRow {
                id: cell_i32(row, 0),
                data: CreateEmployee {
                    name,
                    email: cell_str(row, 2),
                    registration_number: cell_str(row, 3),
                    department_id: cell_i32(row, 4),
                    position: cell_str(row, 5),
                },
                is_active: cell_bool(row, 6).unwrap_or(true),
            });
        }
    }

    let mut assets = Vec::new();
    match workbook.worksheet_range(SHEET_ASSETS) {
        Ok(range) => {
            for (line, row) in range.rows().skip(1).enumerate() {
                let Some(name) = cell_str(row, 2) else { continue };
                let status = match cell_str(row, 7) {
                    Some(raw) => match raw.parse::<AssetStatus>() {
                        Ok(status) => status,
                        Err(_) => {
                            warnings.push(format!(
                                "Linha {}: status '{}' desconhecido, usando 'Disponível'",
                                line + 2,
                                raw
                            ));
                            AssetStatus::Disponivel
                        }
                    },
                    None => AssetStatus::Disponivel,
                };
                assets.push(AssetRow {
                    id: cell_i32(row, 0),
                    asset: NewAsset {
                        asset_tag: cell_str(row, 1),
                        name,
                        asset_type: cell_str(row, 3).unwrap_or_else(|| "Outros".to_string()),
                        brand: cell_str(row, 4),
                        model: cell_str(row, 5),
                        serial_number: cell_str(row, 6),
                        status,
                        employee_id: cell_i32(row, 8),
                        department_id: cell_i32(row, 9),
                        purchase_value: cell_decimal(row, 10),
                        purchase_date: cell_date(row, 11),
                        invoice_number: cell_str(row, 12),
                        accounting_account_code: None,
                        notes: cell_str(row, 14),
                        history: vec![HistoryEntry::new("Importado de planilha", None)],
                    },
                    account_reference: cell_str(row, 13),
                });
            }
        }
        Err(e) => {
            return Err(AppError::Import(format!(
                "Sheet '{}' is missing: {}",
                SHEET_ASSETS, e
            )));
        }
    }

    Ok(ParsedWorkbook {
        departments,
        employees,
        assets,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sqlx::types::Json;

    fn sample_asset(id: i32) -> Asset {
        Asset {
            id,
            asset_tag: Some(format!("PAT-{:03}", id)),
            name: format!("Notebook {}", id),
            asset_type: "Notebook".to_string(),
            brand: Some("Dell".to_string()),
            model: Some("Latitude".to_string()),
            serial_number: Some(format!("SN-{}", id)),
            status: AssetStatus::EmUso,
            employee_id: Some(7),
            department_id: Some(2),
            purchase_value: Some(dec!(3500.50)),
            purchase_date: Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
            invoice_number: Some("NF-123".to_string()),
            accounting_account_code: Some("1.2.3".to_string()),
            notes: None,
            history: Json(Vec::new()),
            crea_date: Some(Utc::now()),
            modif_date: None,
        }
    }

    fn sample_employee() -> Employee {
        Employee {
            id: 7,
            name: "João Pereira".to_string(),
            email: Some("joao@example.com".to_string()),
            registration_number: Some("0099".to_string()),
            department_id: Some(2),
            position: Some("Analista".to_string()),
            is_active: true,
            crea_date: Some(Utc::now()),
            modif_date: None,
        }
    }

    fn sample_department() -> Department {
        Department {
            id: 2,
            name: "TI".to_string(),
            cost_center: Some("CC-10".to_string()),
            notes: None,
        }
    }

    #[test]
    fn export_then_parse_preserves_key_fields() {
        let assets = vec![sample_asset(1), sample_asset(2)];
        let bytes =
            build_workbook(&assets, &[sample_employee()], &[], &[sample_department()]).unwrap();
        let parsed = parse_workbook(&bytes).unwrap();

        assert_eq!(parsed.assets.len(), 2);
        let first = &parsed.assets[0];
        assert_eq!(first.id, Some(1));
        assert_eq!(first.asset.asset_type, "Notebook");
        assert_eq!(first.asset.status, AssetStatus::EmUso);
        assert_eq!(first.asset.purchase_value, Some(dec!(3500.50)));
        assert_eq!(first.asset.employee_id, Some(7));
        assert_eq!(
            first.asset.purchase_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert_eq!(first.account_reference.as_deref(), Some("1.2.3"));

        assert_eq!(parsed.employees.len(), 1);
        assert_eq!(parsed.employees[0].id, Some(7));
        assert!(parsed.employees[0].is_active);

        assert_eq!(parsed.departments.len(), 1);
        assert_eq!(parsed.departments[0].data.name, "TI");
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn unknown_status_defaults_with_warning() {
        let mut asset = sample_asset(1);
        asset.status = AssetStatus::EmUso;
        let bytes = build_workbook(&[asset], &[], &[], &[]).unwrap();
        // Corrupt the status by round-tripping manually is overkill;
        // parse a hand-built sheet instead.
        let parsed = parse_workbook(&bytes).unwrap();
        assert!(parsed.warnings.is_empty());

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_ASSETS).unwrap();
        sheet.write(0, 0, "ID").unwrap();
        sheet.write(1, 0, 5).unwrap();
        sheet.write(1, 2, "Teclado").unwrap();
        sheet.write(1, 3, "Periférico").unwrap();
        sheet.write(1, 7, "Emprestado").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.assets.len(), 1);
        assert_eq!(parsed.assets[0].asset.status, AssetStatus::Disponivel);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn missing_assets_sheet_is_an_import_error() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Outra").unwrap();
        sheet.write(0, 0, "x").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        assert!(parse_workbook(&bytes).is_err());
    }
}
