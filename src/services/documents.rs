//! PDF document generation: responsibility terms and QR label sheets

use printpdf::{
    path::{PaintMode, WindingOrder},
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Polygon, Rgb,
};

use crate::{
    error::{AppError, AppResult},
    models::{asset::Asset, company::LegalEntity, employee::Employee},
    repository::Repository,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

#[derive(Clone)]
pub struct DocumentsService {
    repository: Repository,
}

impl DocumentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Responsibility term for everything the employee currently holds
    pub async fn responsibility_term(&self, employee_id: i32) -> AppResult<Vec<u8>> {
        let employee = self.repository.employees.get_by_id(employee_id).await?;
        let assets = self
            .repository
            .assets
            .list_in_use_by_employee(employee_id)
            .await?;
        if assets.is_empty() {
            return Err(AppError::BusinessRule(format!(
                "Employee '{}' has no assets in use",
                employee.name
            )));
        }
        let entity = self.repository.companies.get_default().await?;
        render_responsibility_term(&employee, &assets, entity.as_ref())
    }

    /// Label sheet with one QR cell per requested asset
    pub async fn labels(&self, ids: &[i32]) -> AppResult<Vec<u8>> {
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "At least one asset id is required".to_string(),
            ));
        }
        let assets = self.repository.assets.get_by_ids(ids).await?;
        if assets.is_empty() {
            return Err(AppError::NotFound("No matching assets".to_string()));
        }
        render_label_sheet(&assets)
    }
}

fn doc_error(e: impl std::fmt::Display) -> AppError {
    AppError::Document(e.to_string())
}

fn render_responsibility_term(
    employee: &Employee,
    assets: &[Asset],
    entity: Option<&LegalEntity>,
) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Termo de Responsabilidade",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "conteudo",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(doc_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(doc_error)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    layer.use_text("TERMO DE RESPONSABILIDADE", 16.0, Mm(MARGIN), Mm(y), &bold);
    y -= 12.0;

    if let Some(entity) = entity {
        layer.use_text(entity.corporate_name.as_str(), 11.0, Mm(MARGIN), Mm(y), &bold);
        y -= 5.0;
        layer.use_text(
            format!("CNPJ: {}", entity.tax_id).as_str(),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &font,
        );
        y -= 5.0;
        let address = [
            entity.address.as_deref(),
            entity.city.as_deref(),
            entity.state.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
        if !address.is_empty() {
            layer.use_text(address.as_str(), 10.0, Mm(MARGIN), Mm(y), &font);
            y -= 5.0;
        }
        y -= 5.0;
    }

    let mut who = format!("Colaborador: {}", employee.name);
    if let Some(ref reg) = employee.registration_number {
        who.push_str(&format!(" (matrícula {})", reg));
    }
    layer.use_text(who.as_str(), 11.0, Mm(MARGIN), Mm(y), &font);
    y -= 10.0;

    layer.use_text("Equipamentos sob responsabilidade:", 11.0, Mm(MARGIN), Mm(y), &bold);
    y -= 7.0;

    for asset in assets {
        if y < 50.0 {
            let (next_page, next_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "conteudo");
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT - MARGIN;
        }
        let tag = asset.asset_tag.as_deref().unwrap_or("-");
        let serial = asset.serial_number.as_deref().unwrap_or("-");
        let line = format!(
            "{}  |  {}  |  Nº série: {}  |  Patrimônio: {}",
            tag, asset.name, serial, asset.id
        );
        layer.use_text(line.as_str(), 9.0, Mm(MARGIN), Mm(y), &font);
        y -= 6.0;
    }
    y -= 8.0;

    let declaration = [
        "Declaro ter recebido os equipamentos acima relacionados, em perfeito",
        "estado de conservação e funcionamento, comprometendo-me a zelar pela",
        "sua guarda e a devolvê-los quando solicitado ou ao término do vínculo.",
    ];
    for line in declaration {
        layer.use_text(line, 10.0, Mm(MARGIN), Mm(y), &font);
        y -= 5.0;
    }
    y -= 20.0;

    layer.use_text(
        "_________________________________",
        10.0,
        Mm(MARGIN),
        Mm(y),
        &font,
    );
    layer.use_text(
        "_________________________________",
        10.0,
        Mm(PAGE_WIDTH / 2.0 + 10.0),
        Mm(y),
        &font,
    );
    y -= 5.0;
    layer.use_text("Colaborador", 9.0, Mm(MARGIN), Mm(y), &font);
    layer.use_text("Responsável TI", 9.0, Mm(PAGE_WIDTH / 2.0 + 10.0), Mm(y), &font);

    doc.save_to_bytes().map_err(doc_error)
}

// Label sheet geometry: 4 x 7 grid of 45x37mm cells on A4
const LABEL_COLS: usize = 4;
const LABEL_ROWS: usize = 7;
const CELL_W: f32 = 45.0;
const CELL_H: f32 = 37.0;
const QR_SIZE: f32 = 22.0;

fn render_label_sheet(assets: &[Asset]) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Etiquetas de Patrimônio",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "etiquetas",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(doc_error)?;
    let mut layer = doc.get_page(page).get_layer(layer);

    let per_page = LABEL_COLS * LABEL_ROWS;
    for (i, asset) in assets.iter().enumerate() {
        let slot = i % per_page;
        if i > 0 && slot == 0 {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "etiquetas");
            layer = doc.get_page(next_page).get_layer(next_layer);
        }
        let col = slot % LABEL_COLS;
        let row = slot / LABEL_COLS;
        let x = MARGIN / 2.0 + col as f32 * CELL_W;
        let y = PAGE_HEIGHT - MARGIN / 2.0 - CELL_H - row as f32 * CELL_H;
        draw_label(&doc, &layer, &font, asset, x, y)?;
    }

    doc.save_to_bytes().map_err(doc_error)
}

fn draw_label(
    _doc: &PdfDocumentReference,
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    asset: &Asset,
    x: f32,
    y: f32,
) -> AppResult<()> {
    let payload = asset
        .asset_tag
        .clone()
        .unwrap_or_else(|| format!("ID:{}", asset.id));
    let code = qrcode::QrCode::new(payload.as_bytes()).map_err(doc_error)?;
    let width = code.width();
    let module = QR_SIZE / width as f32;
    let colors = code.to_colors();

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    let qr_x = x + (CELL_W - QR_SIZE) / 2.0;
    let qr_y = y + CELL_H - QR_SIZE - 4.0;
    for (idx, color) in colors.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let mx = (idx % width) as f32;
        // QR rows count downward, PDF coordinates upward.
        let my = (width - 1 - idx / width) as f32;
        let x0 = qr_x + mx * module;
        let y0 = qr_y + my * module;
        let square = Polygon {
            rings: vec![vec![
                (Point::new(Mm(x0), Mm(y0)), false),
                (Point::new(Mm(x0 + module), Mm(y0)), false),
                (Point::new(Mm(x0 + module), Mm(y0 + module)), false),
                (Point::new(Mm(x0), Mm(y0 + module)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };
        layer.add_polygon(square);
    }

    let name: String = asset.name.chars().take(28).collect();
    layer.use_text(name.as_str(), 7.0, Mm(x + 3.0), Mm(y + 8.0), font);
    layer.use_text(payload.as_str(), 7.0, Mm(x + 3.0), Mm(y + 4.0), font);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    use crate::models::asset::AssetStatus;

    fn asset(id: i32, name: &str, tag: Option<&str>) -> Asset {
        Asset {
            id,
            asset_tag: tag.map(str::to_string),
            name: name.to_string(),
            asset_type: "Notebook".to_string(),
            brand: None,
            model: None,
            serial_number: Some("SN-1".to_string()),
            status: AssetStatus::EmUso,
            employee_id: Some(1),
            department_id: None,
            purchase_value: None,
            purchase_date: None,
            invoice_number: None,
            accounting_account_code: None,
            notes: None,
            history: Json(Vec::new()),
            crea_date: Some(Utc::now()),
            modif_date: None,
        }
    }

    fn employee() -> Employee {
        Employee {
            id: 1,
            name: "Maria Souza".to_string(),
            email: None,
            registration_number: Some("0042".to_string()),
            department_id: None,
            position: None,
            is_active: true,
            crea_date: Some(Utc::now()),
            modif_date: None,
        }
    }

    #[test]
    fn term_renders_valid_pdf() {
        let assets = vec![asset(1, "Notebook Dell", Some("PAT-001")), asset(2, "Monitor", None)];
        let bytes = render_responsibility_term(&employee(), &assets, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn term_paginates_long_asset_lists() {
        let assets: Vec<Asset> = (1..=80)
            .map(|i| asset(i, &format!("Ativo {}", i), None))
            .collect();
        let bytes = render_responsibility_term(&employee(), &assets, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn label_sheet_renders_valid_pdf() {
        let assets: Vec<Asset> = (1..=30)
            .map(|i| asset(i, &format!("Ativo {}", i), Some(&format!("PAT-{:03}", i))))
            .collect();
        let bytes = render_label_sheet(&assets).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
