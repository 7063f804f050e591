//! Wire payload and backend seam for persisting annotations.
//!
//! The in-memory store is authoritative for a session; a backend only
//! mirrors it. [`AnnotationRecord`] is the flat shape a REST backend stores:
//! style fields live beside the coordinates instead of in a nested object.

use std::collections::HashMap;

use crate::annotation::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStyle, HighlightStyle, RedactionStyle, Rgb,
};
use crate::error::{AnnotError, Result};
use crate::geometry::PdfRect;

/// Flat persisted form of an [`Annotation`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotationRecord {
    /// Absent on records the backend has not stored yet.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    pub document_id: String,
    pub page_number: u32,
    pub coordinates: PdfRect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    pub kind: AnnotationKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color_rgb: Option<Rgb>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color_hex: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub opacity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub fill_color: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub border_color: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub border_width: Option<f64>,
}

impl From<&Annotation> for AnnotationRecord {
    fn from(annot: &Annotation) -> Self {
        let mut record = AnnotationRecord {
            id: Some(annot.id.to_string()),
            document_id: annot.document_id.clone(),
            page_number: annot.page_number,
            coordinates: annot.coordinates,
            text: annot.text.clone(),
            kind: annot.kind(),
            color_name: None,
            color_rgb: None,
            color_hex: None,
            opacity: Some(annot.style.opacity()),
            fill_color: None,
            border_color: None,
            border_width: None,
        };
        match &annot.style {
            AnnotationStyle::Highlight(h) => {
                record.color_name = Some(h.color_name.clone());
                record.color_rgb = Some(h.color_rgb);
                record.color_hex = Some(h.color_hex.clone());
            }
            AnnotationStyle::Redaction(r) => {
                record.fill_color = Some(r.fill_color.clone());
                record.border_color = Some(r.border_color.clone());
                record.border_width = Some(r.border_width);
            }
        }
        record
    }
}

impl TryFrom<AnnotationRecord> for Annotation {
    type Error = AnnotError;

    fn try_from(record: AnnotationRecord) -> Result<Self> {
        let id = record
            .id
            .ok_or_else(|| AnnotError::InvalidAnnotation("record has no id".to_string()))?;

        let missing =
            |field: &str| AnnotError::InvalidAnnotation(format!("record {id} has no {field}"));
        let opacity = record.opacity.ok_or_else(|| missing("opacity"))?;

        let style = match record.kind {
            AnnotationKind::Highlight => {
                let color_name = record.color_name.ok_or_else(|| missing("color_name"))?;
                let hex = record.color_hex.ok_or_else(|| missing("color_hex"))?;
                let rgb = Rgb::from_hex(&hex)?;
                if let Some(sent) = record.color_rgb {
                    if !rgb.approx_eq(&sent) {
                        return Err(AnnotError::InvalidAnnotation(format!(
                            "record {id}: color_rgb does not match color_hex {hex}"
                        )));
                    }
                }
                AnnotationStyle::Highlight(HighlightStyle {
                    color_name,
                    color_rgb: rgb,
                    color_hex: rgb.to_hex(),
                    opacity,
                })
            }
            AnnotationKind::Redaction => AnnotationStyle::Redaction(RedactionStyle {
                fill_color: record.fill_color.ok_or_else(|| missing("fill_color"))?,
                opacity,
                border_color: record.border_color.ok_or_else(|| missing("border_color"))?,
                border_width: record.border_width.ok_or_else(|| missing("border_width"))?,
            }),
        };

        Annotation::new(
            AnnotationId::from(id),
            record.document_id,
            record.page_number,
            record.coordinates,
            record.text,
            style,
        )
    }
}

/// Remote store of annotations, grouped by bundle.
///
/// Implementations typically wrap an HTTP client; the calls are made outside
/// the core's synchronous event handling.
pub trait AnnotationBackend {
    type Error: std::error::Error;

    /// Store `data` under `bundle_id`, returning the stored record with its id.
    fn create_annotation(
        &mut self,
        bundle_id: &str,
        data: &AnnotationRecord,
    ) -> std::result::Result<AnnotationRecord, Self::Error>;

    fn delete_annotation(&mut self, id: &AnnotationId) -> std::result::Result<(), Self::Error>;

    fn fetch_annotations(
        &mut self,
        bundle_id: &str,
    ) -> std::result::Result<Vec<AnnotationRecord>, Self::Error>;
}

/// In-process backend keyed by bundle id.
///
/// Records sent without an id are assigned the next unused `srv-N`. Deleting
/// an unknown id succeeds.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    bundles: HashMap<String, Vec<AnnotationRecord>>,
    next_id: u64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.bundles
            .values()
            .flatten()
            .any(|r| r.id.as_deref() == Some(id))
    }
}

impl AnnotationBackend for MemoryBackend {
    type Error = AnnotError;

    fn create_annotation(
        &mut self,
        bundle_id: &str,
        data: &AnnotationRecord,
    ) -> Result<AnnotationRecord> {
        let mut stored = data.clone();
        match &stored.id {
            Some(id) if self.id_in_use(id) => {
                return Err(AnnotError::DuplicateId(AnnotationId::from(id.as_str())));
            }
            Some(_) => {}
            None => {
                let id = loop {
                    self.next_id += 1;
                    let candidate = format!("srv-{}", self.next_id);
                    if !self.id_in_use(&candidate) {
                        break candidate;
                    }
                };
                stored.id = Some(id);
            }
        }
        self.bundles
            .entry(bundle_id.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    fn delete_annotation(&mut self, id: &AnnotationId) -> Result<()> {
        for records in self.bundles.values_mut() {
            records.retain(|r| r.id.as_deref() != Some(id.as_str()));
        }
        Ok(())
    }

    fn fetch_annotations(&mut self, bundle_id: &str) -> Result<Vec<AnnotationRecord>> {
        Ok(self.bundles.get(bundle_id).cloned().unwrap_or_default())
    }
}
