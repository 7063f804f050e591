//! Positioned rectangles for drawing annotations over a rendered page.

use crate::annotation::{AnnotationId, AnnotationKind, AnnotationStyle};
use crate::error::Result;
use crate::geometry::{ScreenRect, check_viewport, to_screen};
use crate::store::AnnotationStore;

/// Border drawn around a redaction box, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayBorder {
    pub color: String,
    pub width: f64,
}

/// One annotation positioned on a rendered page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overlay {
    pub id: AnnotationId,
    pub kind: AnnotationKind,
    pub rect: ScreenRect,
    /// Fill color as `#RRGGBB`.
    pub fill: String,
    pub opacity: f64,
    pub border: Option<OverlayBorder>,
}

/// Overlays for one page, in store order.
///
/// `page_height` is the unscaled page height; `scale` the current zoom.
pub fn page_overlays(
    store: &AnnotationStore,
    document_id: &str,
    page_number: u32,
    page_height: f64,
    scale: f64,
) -> Result<Vec<Overlay>> {
    check_viewport(page_height, scale)?;
    store
        .filter_by_page(document_id, page_number)
        .map(|annot| {
            let rect = to_screen(&annot.coordinates, page_height, scale)?;
            let (fill, border) = match &annot.style {
                AnnotationStyle::Highlight(h) => (h.color_hex.clone(), None),
                AnnotationStyle::Redaction(r) => (
                    r.fill_color.clone(),
                    Some(OverlayBorder {
                        color: r.border_color.clone(),
                        width: r.border_width * scale,
                    }),
                ),
            };
            Ok(Overlay {
                id: annot.id.clone(),
                kind: annot.kind(),
                rect,
                fill,
                opacity: annot.style.opacity(),
                border,
            })
        })
        .collect()
}
