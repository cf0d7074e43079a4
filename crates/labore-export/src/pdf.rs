use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Pt, calculate_points_for_circle, image_crate,
};

use labore_core::models::exam::ExamType;
use labore_core::models::procedure::ChecklistItem;
use labore_core::procedures::TRIAGE;

use crate::error::ExportError;
use crate::fonts::{Face, text_width};
use crate::layout::{BodyFrame, BodyLayout, plan_body};
use crate::styles::{
    BLACK, BODY_HEADING, BRAND_BEIGE, BRAND_BLUE, FOOTER_BASELINE, FOOTER_TEXT, GREY,
    MARGIN_LEFT, MARGIN_RIGHT, PAGE_HEIGHT, PAGE_WIDTH, REPORT_LABEL, Rgb, SHADOW, TITLE,
    TRIAGE_CARD_TITLE, WHITE,
};

/// Everything printed on one checklist.
#[derive(Debug, Clone)]
pub struct ChecklistDocument {
    pub person_name: String,
    pub national_id: String,
    pub exam_type: ExamType,
    /// Already in print order.
    pub items: Vec<ChecklistItem>,
    pub generated_at: jiff::Zoned,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Created if missing.
    pub output_dir: PathBuf,
    /// Header logo. Falls back to a drawn placeholder when absent or
    /// unreadable.
    pub logo_path: Option<PathBuf>,
}

/// `checklist_<name>_<YYYYMMDD_HHMMSS>.pdf`, spaces in the name replaced by
/// underscores. Path separators are replaced too so the name stays a single
/// file name.
pub fn checklist_filename(person_name: &str, at: &jiff::Zoned) -> String {
    let name: String = person_name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("checklist_{name}_{}.pdf", at.strftime("%Y%m%d_%H%M%S"))
}

/// Render the checklist to a file under `options.output_dir` and return its
/// path.
pub fn render_checklist(
    document: &ChecklistDocument,
    options: &RenderOptions,
) -> Result<PathBuf, ExportError> {
    let bytes = generate_pdf(document, options.logo_path.as_deref())?;

    let path = options
        .output_dir
        .join(checklist_filename(&document.person_name, &document.generated_at));
    let write_err = |source| ExportError::Write {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(&options.output_dir).map_err(write_err)?;
    std::fs::write(&path, &bytes).map_err(write_err)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "checklist PDF written");
    Ok(path)
}

/// Render the checklist to PDF bytes.
pub fn generate_pdf(
    document: &ChecklistDocument,
    logo_path: Option<&Path>,
) -> Result<Vec<u8>, ExportError> {
    let layout = plan_body(&document.items, &BodyFrame::default());
    tracing::debug!(
        items = document.items.len(),
        scale = layout.scale,
        pages = layout.pages,
        "body layout planned"
    );

    let (doc, page, layer) = PdfDocument::new(
        format!("Checklist - {}", document.person_name),
        Mm(210.0),
        Mm(297.0),
        "Checklist",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut canvas = Canvas {
        layer: doc.get_page(page).get_layer(layer),
        regular: &regular,
        bold: &bold,
    };

    draw_header(&canvas, logo_path);
    draw_person_block(&canvas, document);
    if document.items.iter().any(|i| i.name == TRIAGE) {
        draw_triage_card(&canvas);
    }
    canvas.fill(BRAND_BLUE);
    canvas.text(BODY_HEADING, Face::Bold, 16.0, MARGIN_LEFT, PAGE_HEIGHT - 240.0);

    for page_index in 0..layout.pages {
        if page_index > 0 {
            let (page, layer) = doc.add_page(Mm(210.0), Mm(297.0), "Checklist");
            canvas.layer = doc.get_page(page).get_layer(layer);
            draw_continuation_header(&canvas, document, page_index, layout.pages);
        }
        draw_body_page(&canvas, &layout, &document.items, page_index);
        draw_footer(&canvas);
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn draw_header(canvas: &Canvas<'_>, logo_path: Option<&Path>) {
    let (x, y, w, h) = (30.0, PAGE_HEIGHT - 100.0, PAGE_WIDTH - 60.0, 90.0);
    canvas.fill(WHITE);
    canvas.stroke(BRAND_BLUE);
    canvas.line_width(2.0);
    canvas.rounded_rect(x, y, w, h, 10.0, PaintMode::FillStroke);

    canvas.fill(BRAND_BLUE);
    let title_x = (PAGE_WIDTH - text_width(TITLE, Face::Bold, 22.0)) / 2.0;
    canvas.text(TITLE, Face::Bold, 22.0, title_x, y + h / 2.0 - 6.0);

    let drawn = match logo_path {
        Some(path) => {
            match canvas.image_fitted(path, PAGE_WIDTH - 180.0, PAGE_HEIGHT - 95.0, 140.0, 80.0) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(error = %e, "logo unavailable, drawing placeholder");
                    false
                }
            }
        }
        None => false,
    };
    if !drawn {
        canvas.fill(BRAND_BEIGE);
        canvas.circle(PAGE_WIDTH - 100.0, PAGE_HEIGHT - 55.0, 35.0, PaintMode::Fill);
        canvas.fill(BRAND_BLUE);
        canvas.text("LOGO", Face::Bold, 14.0, PAGE_WIDTH - 125.0, PAGE_HEIGHT - 60.0);
    }
}

fn draw_person_block(canvas: &Canvas<'_>, document: &ChecklistDocument) {
    let lines = [
        format!("Funcionário: {}", document.person_name),
        format!("CPF: {}", document.national_id),
        format!("Tipo de Exame: {}", document.exam_type),
        format!("Data: {}", document.generated_at.strftime("%d/%m/%Y")),
    ];
    canvas.fill(BLACK);
    for (i, line) in lines.iter().enumerate() {
        let y = PAGE_HEIGHT - 130.0 - 20.0 * i as f32;
        canvas.text(line, Face::Bold, 14.0, MARGIN_LEFT, y);
    }

    canvas.stroke(BRAND_BEIGE);
    canvas.line_width(2.0);
    canvas.line(
        MARGIN_LEFT,
        PAGE_HEIGHT - 210.0,
        PAGE_WIDTH - MARGIN_RIGHT,
        PAGE_HEIGHT - 210.0,
    );
}

/// Vitals card, right edge flush with the separator line.
fn draw_triage_card(canvas: &Canvas<'_>) {
    let (w, h) = (180.0, 150.0);
    let x = PAGE_WIDTH - MARGIN_RIGHT - w;
    let y = PAGE_HEIGHT - 380.0;

    canvas.fill(SHADOW);
    canvas.rounded_rect(x + 3.0, y - 3.0, w, h, 10.0, PaintMode::Fill);

    canvas.fill(WHITE);
    canvas.stroke(BRAND_BLUE);
    canvas.line_width(2.0);
    canvas.rounded_rect(x, y, w, h, 10.0, PaintMode::FillStroke);

    canvas.fill(BRAND_BLUE);
    canvas.rounded_rect(x, y + h - 32.0, w, 32.0, 10.0, PaintMode::Fill);

    canvas.fill(WHITE);
    let title_x = x + (w - text_width(TRIAGE_CARD_TITLE, Face::Bold, 14.0)) / 2.0;
    canvas.text(TRIAGE_CARD_TITLE, Face::Bold, 14.0, title_x, y + h - 22.0);

    let fields = [
        ("PA:", 40.0, "________ x ________"),
        ("FC:", 40.0, "__________________"),
        ("ALT:", 50.0, "_________________"),
        ("PESO:", 55.0, "________________"),
    ];
    canvas.fill(BLACK);
    for (i, (label, blank_offset, blank)) in fields.iter().enumerate() {
        let field_y = y + h - 55.0 - 25.0 * i as f32;
        canvas.text(label, Face::Bold, 12.0, x + 15.0, field_y);
        canvas.text(blank, Face::Regular, 11.0, x + blank_offset, field_y);
    }
}

fn draw_continuation_header(
    canvas: &Canvas<'_>,
    document: &ChecklistDocument,
    page_index: usize,
    pages: usize,
) {
    canvas.fill(BRAND_BLUE);
    let heading = format!(
        "{TITLE} - {} ({}/{})",
        document.person_name,
        page_index + 1,
        pages
    );
    canvas.text(&heading, Face::Bold, 12.0, MARGIN_LEFT, PAGE_HEIGHT - 35.0);
}

fn draw_body_page(
    canvas: &Canvas<'_>,
    layout: &BodyLayout,
    items: &[ChecklistItem],
    page_index: usize,
) {
    let m = &layout.metrics;
    let number_x = MARGIN_LEFT;
    let checkbox_x = 85.0;
    let text_x = checkbox_x + 25.0;
    let sub_checkbox_x = text_x + 10.0;

    for (row, item) in layout
        .rows
        .iter()
        .zip(items)
        .filter(|(row, _)| row.page == page_index)
    {
        canvas.fill(BRAND_BLUE);
        canvas.text(&format!("{}.", row.number), Face::Bold, m.number_font, number_x, row.baseline);

        canvas.stroke(BRAND_BLUE);
        canvas.line_width(1.5);
        let box_y = row.baseline + m.number_font / 2.0 - m.checkbox / 2.0;
        canvas.rect(checkbox_x, box_y, m.checkbox, m.checkbox, PaintMode::Stroke);

        canvas.fill(BLACK);
        canvas.text(&item.name, Face::Bold, m.procedure_font, text_x, row.baseline);

        if let Some(sub_y) = row.sub_baseline {
            canvas.stroke(GREY);
            canvas.line_width(1.0);
            let sub_box_y = sub_y + m.sub_font / 2.0 - m.sub_checkbox / 2.0;
            canvas.rect(
                sub_checkbox_x,
                sub_box_y,
                m.sub_checkbox,
                m.sub_checkbox,
                PaintMode::Stroke,
            );
            canvas.fill(BLACK);
            canvas.text(REPORT_LABEL, Face::Bold, m.sub_font, sub_checkbox_x + 20.0, sub_y);
        }
    }
}

fn draw_footer(canvas: &Canvas<'_>) {
    canvas.fill(GREY);
    let x = (PAGE_WIDTH - text_width(FOOTER_TEXT, Face::Regular, 10.0)) / 2.0;
    canvas.text(FOOTER_TEXT, Face::Regular, 10.0, x, FOOTER_BASELINE);
}

/// Point-based drawing on one PDF layer, origin bottom-left.
struct Canvas<'a> {
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
}

fn at(x: f32, y: f32) -> Point {
    Point::new(Mm::from(Pt(x)), Mm::from(Pt(y)))
}

fn color((r, g, b): Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Control handle length for a quarter-circle cubic Bézier, as a fraction of
/// the radius.
const KAPPA: f32 = 0.552_284_8;

impl Canvas<'_> {
    fn fill(&self, rgb: Rgb) {
        self.layer.set_fill_color(color(rgb));
    }

    fn stroke(&self, rgb: Rgb) {
        self.layer.set_outline_color(color(rgb));
    }

    fn line_width(&self, width: f32) {
        self.layer.set_outline_thickness(width);
    }

    fn text(&self, text: &str, face: Face, size: f32, x: f32, y: f32) {
        let font = match face {
            Face::Regular => self.regular,
            Face::Bold => self.bold,
        };
        self.layer
            .use_text(text, size, Mm::from(Pt(x)), Mm::from(Pt(y)), font);
    }

    /// Fill or stroke one closed ring. A point flagged `true` starts a cubic
    /// Bézier segment: the next two points are its control handles and the
    /// one after that its end point.
    fn path(&self, ring: Vec<(Point, bool)>, mode: PaintMode) {
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn line(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.add_line(Line {
            points: vec![(at(x1, y1), false), (at(x2, y2), false)],
            is_closed: false,
        });
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32, mode: PaintMode) {
        let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
        self.path(corners.map(|(x, y)| (at(x, y), false)).to_vec(), mode);
    }

    fn rounded_rect(&self, x: f32, y: f32, w: f32, h: f32, r: f32, mode: PaintMode) {
        let r = r.min(w / 2.0).min(h / 2.0);
        let k = KAPPA * r;
        // Counter-clockwise from the bottom-right corner: the arc centre,
        // the direction it leaves from and the direction it arrives at.
        let corners = [
            ((x + w - r, y + r), (0.0, -1.0), (1.0, 0.0)),
            ((x + w - r, y + h - r), (1.0, 0.0), (0.0, 1.0)),
            ((x + r, y + h - r), (0.0, 1.0), (-1.0, 0.0)),
            ((x + r, y + r), (-1.0, 0.0), (0.0, -1.0)),
        ];
        let mut ring = Vec::with_capacity(corners.len() * 4);
        for ((cx, cy), (ax, ay), (bx, by)) in corners {
            let (sx, sy) = (cx + r * ax, cy + r * ay);
            let (ex, ey) = (cx + r * bx, cy + r * by);
            ring.push((at(sx, sy), true));
            ring.push((at(sx + k * bx, sy + k * by), true));
            ring.push((at(ex + k * ax, ey + k * ay), true));
            ring.push((at(ex, ey), false));
        }
        self.path(ring, mode);
    }

    fn circle(&self, cx: f32, cy: f32, r: f32, mode: PaintMode) {
        self.path(calculate_points_for_circle(Pt(r), Pt(cx), Pt(cy)), mode);
    }

    /// Draw the image at `path` scaled to fit a `max_w` x `max_h` box whose
    /// bottom-left corner is `(x, y)`, keeping its aspect ratio.
    fn image_fitted(
        &self,
        path: &Path,
        x: f32,
        y: f32,
        max_w: f32,
        max_h: f32,
    ) -> Result<(), ExportError> {
        const DPI: f32 = 300.0;

        let decoded = image_crate::open(path).map_err(|e| ExportError::Logo {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        // Alpha is dropped; the header band is white anyway.
        let rgb = decoded.to_rgb8();
        let (px_w, px_h) = rgb.dimensions();
        if px_w == 0 || px_h == 0 {
            return Err(ExportError::Logo {
                path: path.to_path_buf(),
                reason: "empty image".to_string(),
            });
        }

        let natural_w = px_w as f32 * 72.0 / DPI;
        let natural_h = px_h as f32 * 72.0 / DPI;
        let scale = (max_w / natural_w).min(max_h / natural_h);

        let image = Image::from_dynamic_image(&image_crate::DynamicImage::ImageRgb8(rgb));
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm::from(Pt(x))),
                translate_y: Some(Mm::from(Pt(y))),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(DPI),
                ..Default::default()
            },
        );
        Ok(())
    }
}
