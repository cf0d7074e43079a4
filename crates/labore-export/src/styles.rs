use serde::{Deserialize, Serialize};

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;

/// Left edge of the person block and the body.
pub const MARGIN_LEFT: f32 = 50.0;
/// Right edge of the separator line; the triage card aligns to it.
pub const MARGIN_RIGHT: f32 = 50.0;

/// Distance from the top of the page to the first body row.
pub const BODY_TOP_OFFSET: f32 = 270.0;
/// Same, on continuation pages (no header, person block or card).
pub const CONTINUATION_TOP_OFFSET: f32 = 60.0;
/// Nothing in the body is drawn below this y.
pub const FOOTER_MARGIN: f32 = 80.0;
pub const FOOTER_BASELINE: f32 = 50.0;

pub const TITLE: &str = "CHECKLIST";
pub const BODY_HEADING: &str = "PROCEDIMENTOS:";
pub const REPORT_LABEL: &str = "Impresso/Laudo realizado";
pub const TRIAGE_CARD_TITLE: &str = "CARD DE TRIAGEM";
pub const FOOTER_TEXT: &str = "Sistema Checklist LaborePlus - Todos os direitos reservados";

/// RGB, each channel in `0.0..=1.0`.
pub type Rgb = (f32, f32, f32);

pub const BRAND_BLUE: Rgb = (0.0, 0.212, 0.373);
pub const BRAND_BEIGE: Rgb = (0.894, 0.780, 0.690);
pub const GREY: Rgb = (0.5, 0.5, 0.5);
pub const SHADOW: Rgb = (0.95, 0.95, 0.95);
pub const BLACK: Rgb = (0.0, 0.0, 0.0);
pub const WHITE: Rgb = (1.0, 1.0, 1.0);

/// Font sizes and vertical spacing of the checklist body, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Row index ("1.").
    pub number_font: f32,
    pub procedure_font: f32,
    /// The "report completed" sub-row.
    pub sub_font: f32,
    /// Advance after a procedure row.
    pub row_spacing: f32,
    /// Advance after a sub-row.
    pub sub_row_spacing: f32,
    /// Extra gap after every item.
    pub item_spacing: f32,
    pub checkbox: f32,
    pub sub_checkbox: f32,
}

impl BodyMetrics {
    pub const NOMINAL: BodyMetrics = BodyMetrics {
        number_font: 14.0,
        procedure_font: 12.0,
        sub_font: 10.0,
        row_spacing: 25.0,
        sub_row_spacing: 20.0,
        item_spacing: 10.0,
        checkbox: 15.0,
        sub_checkbox: 12.0,
    };

    /// Shrinking never goes below these.
    pub const FLOOR: BodyMetrics = BodyMetrics {
        number_font: 10.0,
        procedure_font: 9.0,
        sub_font: 8.0,
        row_spacing: 18.0,
        sub_row_spacing: 15.0,
        item_spacing: 5.0,
        checkbox: 12.0,
        sub_checkbox: 10.0,
    };

    /// Every nominal value times `scale`, truncated to whole points and
    /// clamped to its floor.
    pub fn scaled(scale: f32) -> Self {
        let n = Self::NOMINAL;
        let f = Self::FLOOR;
        let s = |nominal: f32, floor: f32| (nominal * scale).floor().max(floor);
        Self {
            number_font: s(n.number_font, f.number_font),
            procedure_font: s(n.procedure_font, f.procedure_font),
            sub_font: s(n.sub_font, f.sub_font),
            row_spacing: s(n.row_spacing, f.row_spacing),
            sub_row_spacing: s(n.sub_row_spacing, f.sub_row_spacing),
            item_spacing: s(n.item_spacing, f.item_spacing),
            checkbox: s(n.checkbox, f.checkbox),
            sub_checkbox: s(n.sub_checkbox, f.sub_checkbox),
        }
    }

    /// Vertical space one item takes, including the gap after it.
    pub fn item_height(&self, requires_report: bool) -> f32 {
        let sub = if requires_report {
            self.sub_row_spacing
        } else {
            0.0
        };
        self.row_spacing + sub + self.item_spacing
    }

    /// Every field is at least its floor.
    pub fn respects_floor(&self) -> bool {
        let f = Self::FLOOR;
        self.number_font >= f.number_font
            && self.procedure_font >= f.procedure_font
            && self.sub_font >= f.sub_font
            && self.row_spacing >= f.row_spacing
            && self.sub_row_spacing >= f.sub_row_spacing
            && self.item_spacing >= f.item_spacing
            && self.checkbox >= f.checkbox
            && self.sub_checkbox >= f.sub_checkbox
    }
}

impl Default for BodyMetrics {
    fn default() -> Self {
        Self::NOMINAL
    }
}
