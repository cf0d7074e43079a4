//! Vertical layout of the checklist body.
//!
//! Pure arithmetic, no drawing. The body is sized so the whole procedure
//! list fits between the first row and the footer margin. If it does not
//! fit at nominal sizes, every font and spacing shrinks by the same factor,
//! down to [`BodyMetrics::FLOOR`]. A list too long even at the floor breaks
//! onto continuation pages instead of running into the footer.

use serde::{Deserialize, Serialize};

use labore_core::models::procedure::ChecklistItem;

use crate::styles::{
    BodyMetrics, CONTINUATION_TOP_OFFSET, BODY_TOP_OFFSET, FOOTER_MARGIN, PAGE_HEIGHT,
};

/// Vertical bounds of the body area, in points from the page bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyFrame {
    /// Baseline of the first row on the first page.
    pub top: f32,
    /// Baseline of the first row on continuation pages.
    pub continuation_top: f32,
    pub bottom: f32,
}

impl BodyFrame {
    pub fn available(&self) -> f32 {
        self.top - self.bottom
    }
}

impl Default for BodyFrame {
    fn default() -> Self {
        Self {
            top: PAGE_HEIGHT - BODY_TOP_OFFSET,
            continuation_top: PAGE_HEIGHT - CONTINUATION_TOP_OFFSET,
            bottom: FOOTER_MARGIN,
        }
    }
}

/// Where one procedure lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowPlacement {
    /// 1-based, as printed.
    pub number: usize,
    /// 0-based page index.
    pub page: usize,
    pub baseline: f32,
    /// Baseline of the "report completed" sub-row, if the item has one.
    pub sub_baseline: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyLayout {
    pub metrics: BodyMetrics,
    /// 1.0 when nothing had to shrink.
    pub scale: f32,
    /// Space the list needs at nominal sizes.
    pub nominal_height: f32,
    /// Space the list needs at the chosen sizes.
    pub height: f32,
    /// Space between the first row and the footer margin on page one.
    pub available: f32,
    pub rows: Vec<RowPlacement>,
    pub pages: usize,
}

impl BodyLayout {
    pub fn fits_one_page(&self) -> bool {
        self.pages <= 1
    }
}

pub fn required_height(metrics: &BodyMetrics, items: &[ChecklistItem]) -> f32 {
    items
        .iter()
        .map(|item| metrics.item_height(item.requires_report))
        .sum()
}

/// Absorbs rounding drift between the summed height and the row-by-row
/// placement, so a list that fits on paper also fits here.
const PLACEMENT_TOLERANCE: f32 = 1e-3;

/// Step the proportional scale down from `start`.
const SCALE_STEP: f32 = 0.01;

/// Largest sizes at or below `start` that fit `available`.
///
/// Clamping each value to its floor can make the proportional sizes taller
/// than the space they were computed for, so the scale keeps dropping until
/// the list fits or every value sits at its floor.
fn fit_metrics(items: &[ChecklistItem], available: f32, start: f32) -> (BodyMetrics, f32) {
    let mut scale = start;
    loop {
        let metrics = BodyMetrics::scaled(scale);
        if metrics == BodyMetrics::FLOOR
            || required_height(&metrics, items) <= available + PLACEMENT_TOLERANCE
        {
            return (metrics, scale);
        }
        scale -= SCALE_STEP;
    }
}

/// Pick sizes for `items` and place every row.
pub fn plan_body(items: &[ChecklistItem], frame: &BodyFrame) -> BodyLayout {
    let available = frame.available();
    let nominal_height = required_height(&BodyMetrics::NOMINAL, items);

    let (metrics, scale) = if nominal_height > available {
        fit_metrics(items, available, available / nominal_height)
    } else {
        (BodyMetrics::NOMINAL, 1.0)
    };
    let height = required_height(&metrics, items);

    let mut rows = Vec::with_capacity(items.len());
    let mut page = 0;
    let mut y = frame.top;
    let mut on_page = 0;

    for (i, item) in items.iter().enumerate() {
        let needed = metrics.item_height(item.requires_report);
        // The first row of a page is always placed, however tall it is.
        if on_page > 0 && y - needed < frame.bottom - PLACEMENT_TOLERANCE {
            page += 1;
            y = frame.continuation_top;
            on_page = 0;
        }

        let baseline = y;
        y -= metrics.row_spacing;
        let sub_baseline = if item.requires_report {
            let sub = y;
            y -= metrics.sub_row_spacing;
            Some(sub)
        } else {
            None
        };
        y -= metrics.item_spacing;

        rows.push(RowPlacement {
            number: i + 1,
            page,
            baseline,
            sub_baseline,
        });
        on_page += 1;
    }

    if page > 0 {
        tracing::warn!(
            items = items.len(),
            pages = page + 1,
            "procedure list exceeds one page at minimum sizes"
        );
    }

    BodyLayout {
        metrics,
        scale,
        nominal_height,
        height,
        available,
        rows,
        pages: page + 1,
    }
}
