//! Annotation records: highlights and redactions anchored to a document page.
//!
//! Provides [`Annotation`], its identifier [`AnnotationId`], and the two style
//! families ([`HighlightStyle`], [`RedactionStyle`]) that discriminate the
//! annotation [`kind`](Annotation::kind).

use std::fmt;

use crate::error::{AnnotError, Result};
use crate::geometry::PdfRect;

/// Opaque unique identifier of an annotation.
///
/// Assigned once at creation and never changed. Identifiers handed back by a
/// persistence layer are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AnnotationId(String);

impl AnnotationId {
    /// Generate a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnnotationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AnnotationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RGB color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional, hex digits case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AnnotError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| AnnotError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Channel-wise equality within half of one 8-bit step.
    pub fn approx_eq(&self, other: &Rgb) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() < 0.5 / 255.0;
        close(self.r, other.r) && close(self.g, other.g) && close(self.b, other.b)
    }

    /// Render as uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Style of a highlight: a named palette color plus opacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightStyle {
    pub color_name: String,
    pub color_rgb: Rgb,
    pub color_hex: String,
    pub opacity: f64,
}

/// Style of a redaction box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactionStyle {
    /// Fill color as `#RRGGBB`.
    pub fill_color: String,
    pub opacity: f64,
    /// Border color as `#RRGGBB`.
    pub border_color: String,
    /// Border width in PDF units.
    pub border_width: f64,
}

impl Default for RedactionStyle {
    fn default() -> Self {
        Self {
            fill_color: "#000000".to_string(),
            opacity: 1.0,
            border_color: "#FF0000".to_string(),
            border_width: 1.0,
        }
    }
}

impl RedactionStyle {
    /// Check both colors parse and the opacity and border width are in range.
    pub fn validate(&self) -> Result<()> {
        Rgb::from_hex(&self.fill_color)?;
        Rgb::from_hex(&self.border_color)?;
        check_opacity(self.opacity)?;
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(AnnotError::InvalidAnnotation(format!(
                "border width {} must be finite and >= 0",
                self.border_width
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_opacity(opacity: f64) -> Result<()> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(AnnotError::InvalidOpacity(opacity))
    }
}

/// Style of an annotation; the variant determines its [`AnnotationKind`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum AnnotationStyle {
    Highlight(HighlightStyle),
    Redaction(RedactionStyle),
}

impl AnnotationStyle {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            AnnotationStyle::Highlight(_) => AnnotationKind::Highlight,
            AnnotationStyle::Redaction(_) => AnnotationKind::Redaction,
        }
    }

    /// Opacity of the fill, whichever the kind.
    pub fn opacity(&self) -> f64 {
        match self {
            AnnotationStyle::Highlight(h) => h.opacity,
            AnnotationStyle::Redaction(r) => r.opacity,
        }
    }
}

/// Highlight or redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AnnotationKind {
    Highlight,
    Redaction,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Highlight => "highlight",
            AnnotationKind::Redaction => "redaction",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed highlight or redaction.
///
/// Every field is fixed once the annotation exists; edits are modelled as
/// remove-then-add.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub id: AnnotationId,
    pub document_id: String,
    /// 1-based page index within the document.
    pub page_number: u32,
    /// Rectangle in PDF-space.
    pub coordinates: PdfRect,
    /// Covered text; empty for redactions drawn without a text selection.
    pub text: String,
    pub style: AnnotationStyle,
}

impl Annotation {
    /// Build an annotation, checking the data-model invariants.
    pub fn new(
        id: AnnotationId,
        document_id: impl Into<String>,
        page_number: u32,
        coordinates: PdfRect,
        text: impl Into<String>,
        style: AnnotationStyle,
    ) -> Result<Self> {
        let annotation = Self {
            id,
            document_id: document_id.into(),
            page_number,
            coordinates,
            text: text.into(),
            style,
        };
        annotation.validate()?;
        Ok(annotation)
    }

    pub fn kind(&self) -> AnnotationKind {
        self.style.kind()
    }

    /// True when this annotation sits on `page_number` of `document_id`.
    pub fn is_on_page(&self, document_id: &str, page_number: u32) -> bool {
        self.document_id == document_id && self.page_number == page_number
    }

    /// Check page number, rectangle, and style invariants.
    pub fn validate(&self) -> Result<()> {
        if self.document_id.is_empty() {
            return Err(AnnotError::InvalidAnnotation(
                "document id is empty".to_string(),
            ));
        }
        if self.page_number < 1 {
            return Err(AnnotError::InvalidAnnotation(
                "page number must be >= 1".to_string(),
            ));
        }
        if !self.coordinates.is_well_formed() {
            return Err(AnnotError::InvalidAnnotation(format!(
                "coordinates {:?} must be finite with non-negative size",
                self.coordinates
            )));
        }
        match &self.style {
            AnnotationStyle::Highlight(h) => check_opacity(h.opacity),
            AnnotationStyle::Redaction(r) => r.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yellow() -> AnnotationStyle {
        AnnotationStyle::Highlight(HighlightStyle {
            color_name: "Yellow".to_string(),
            color_rgb: Rgb::new(1.0, 1.0, 0.0),
            color_hex: "#FFFF00".to_string(),
            opacity: 0.3,
        })
    }

    #[test]
    fn rgb_from_hex_normalizes_channels() {
        assert_eq!(Rgb::from_hex("#FFFF00").unwrap(), Rgb::new(1.0, 1.0, 0.0));
        assert_eq!(Rgb::from_hex("00ff00").unwrap(), Rgb::new(0.0, 1.0, 0.0));
        let mid = Rgb::from_hex("#808080").unwrap();
        assert!((mid.r - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn rgb_from_hex_rejects_malformed() {
        for bad in ["", "#FFF", "#FFFF0", "#GGGGGG", "#FFFF000", "#+F+F+F", "#ÿÿÿ"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(AnnotError::InvalidColor(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn rgb_to_hex_uppercase() {
        assert_eq!(Rgb::new(1.0, 0.647, 0.0).to_hex(), "#FFA500");
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_hex(), "#000000");
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = AnnotationId::generate();
        let b = AnnotationId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn annotation_kind_follows_style() {
        let annot = Annotation::new(
            AnnotationId::from("h1"),
            "doc1",
            1,
            PdfRect::new(0.0, 0.0, 10.0, 10.0),
            "text",
            yellow(),
        )
        .unwrap();
        assert_eq!(annot.kind(), AnnotationKind::Highlight);

        let redaction = Annotation::new(
            AnnotationId::from("r1"),
            "doc1",
            1,
            PdfRect::new(0.0, 0.0, 10.0, 10.0),
            "",
            AnnotationStyle::Redaction(RedactionStyle::default()),
        )
        .unwrap();
        assert_eq!(redaction.kind(), AnnotationKind::Redaction);
        assert_eq!(redaction.kind().to_string(), "redaction");
    }

    #[test]
    fn annotation_rejects_page_zero() {
        let result = Annotation::new(
            AnnotationId::from("a"),
            "doc1",
            0,
            PdfRect::new(0.0, 0.0, 1.0, 1.0),
            "",
            yellow(),
        );
        assert!(matches!(result, Err(AnnotError::InvalidAnnotation(_))));
    }

    #[test]
    fn annotation_rejects_negative_size() {
        let result = Annotation::new(
            AnnotationId::from("a"),
            "doc1",
            1,
            PdfRect::new(0.0, 0.0, -1.0, 1.0),
            "",
            yellow(),
        );
        assert!(matches!(result, Err(AnnotError::InvalidAnnotation(_))));
    }

    #[test]
    fn annotation_rejects_bad_redaction_style() {
        let style = RedactionStyle {
            fill_color: "black".to_string(),
            ..RedactionStyle::default()
        };
        let result = Annotation::new(
            AnnotationId::from("a"),
            "doc1",
            1,
            PdfRect::new(0.0, 0.0, 1.0, 1.0),
            "",
            AnnotationStyle::Redaction(style),
        );
        assert!(matches!(result, Err(AnnotError::InvalidColor(_))));
    }

    #[test]
    fn annotation_rejects_opacity_out_of_range() {
        let style = AnnotationStyle::Highlight(HighlightStyle {
            color_name: "Yellow".to_string(),
            color_rgb: Rgb::new(1.0, 1.0, 0.0),
            color_hex: "#FFFF00".to_string(),
            opacity: 1.5,
        });
        let result = Annotation::new(
            AnnotationId::from("a"),
            "doc1",
            1,
            PdfRect::new(0.0, 0.0, 1.0, 1.0),
            "",
            style,
        );
        assert!(matches!(result, Err(AnnotError::InvalidOpacity(_))));
    }

    #[test]
    fn is_on_page_matches_document_and_page() {
        let annot = Annotation::new(
            AnnotationId::from("a"),
            "doc1",
            3,
            PdfRect::new(0.0, 0.0, 1.0, 1.0),
            "",
            yellow(),
        )
        .unwrap();
        assert!(annot.is_on_page("doc1", 3));
        assert!(!annot.is_on_page("doc1", 2));
        assert!(!annot.is_on_page("doc2", 3));
    }
}
