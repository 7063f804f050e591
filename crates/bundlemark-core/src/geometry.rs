//! PDF-space and screen-space rectangles and the transform between them.
//!
//! PDF-space has its origin at the bottom-left of the page with y increasing
//! upward, measured in unscaled page units. Screen-space has its origin at the
//! top-left with y increasing downward, measured in pixels at the current zoom.

use crate::error::{AnnotError, Result};

/// Rectangle in PDF-space.
///
/// - `x`: left edge
/// - `y`: bottom edge (distance from the bottom of the page)
/// - `width`, `height`: extent, never negative for a committed annotation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdfRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PdfRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when every component is finite and the extent is non-negative.
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Top edge (distance from the bottom of the page).
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    ///
    /// Used to merge the per-line rectangles of a multi-line text selection.
    pub fn union(&self, other: &PdfRect) -> PdfRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        PdfRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.top().max(other.top()) - y,
        }
    }
}

/// Rectangle in screen-space pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Reject a zoom scale or page height the transform cannot use.
pub(crate) fn check_viewport(page_height: f64, scale: f64) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(AnnotError::InvalidScale(scale));
    }
    if !page_height.is_finite() || page_height <= 0.0 {
        return Err(AnnotError::InvalidPageHeight(page_height));
    }
    Ok(())
}

/// Convert a PDF-space rectangle to screen-space for rendering.
///
/// `page_height` is the unscaled page height in the same unit as `rect`.
/// The vertical axis is flipped and every component multiplied by `scale`.
pub fn to_screen(rect: &PdfRect, page_height: f64, scale: f64) -> Result<ScreenRect> {
    check_viewport(page_height, scale)?;
    Ok(ScreenRect {
        x: rect.x * scale,
        y: (page_height - rect.y - rect.height) * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    })
}

/// Inverse of [`to_screen`].
///
/// Selections captured by the text layer already arrive in PDF-space, so the
/// annotation flow never needs this; it exists for hosts that capture in
/// screen pixels.
pub fn to_pdf(rect: &ScreenRect, page_height: f64, scale: f64) -> Result<PdfRect> {
    check_viewport(page_height, scale)?;
    let width = rect.width / scale;
    let height = rect.height / scale;
    Ok(PdfRect {
        x: rect.x / scale,
        y: page_height - rect.y / scale - height,
        width,
        height,
    })
}
