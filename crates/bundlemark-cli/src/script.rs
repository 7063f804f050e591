//! Event scripts: a JSON array of editing steps replayed against a session.
//!
//! ```json
//! [
//!   {"type": "select", "document_id": "doc1", "page_number": 2,
//!    "coordinates": {"x": 10, "y": 700, "width": 50, "height": 12}, "text": "Hello"},
//!   {"type": "select", "document_id": "doc1", "page_number": 2,
//!    "rects": [{"x": 10, "y": 700, "width": 300, "height": 12},
//!              {"x": 10, "y": 686, "width": 120, "height": 12}]},
//!   {"type": "highlight", "color": "Yellow"},
//!   {"type": "redact"},
//!   {"type": "cancel"},
//!   {"type": "remove", "id": "annot-1"},
//!   {"type": "clear_page", "document_id": "doc1", "page_number": 2},
//!   {"type": "clear_document", "document_id": "doc1"},
//!   {"type": "clear_all"}
//! ]
//! ```

use std::path::Path;

use bundlemark_core::{
    AnnotError, AnnotationId, Anchor, ColorChoice, EditingSession, PdfRect, PendingSelection,
};
use serde::Deserialize;

/// Default color when a highlight step names none.
const DEFAULT_COLOR: &str = "Yellow";
/// Default opacity for a highlight step with a custom hex color.
const DEFAULT_OPACITY: f64 = 0.3;

/// One step of an event script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// A finished selection. Multi-line selections may list one rectangle per
    /// line in `rects`; they are merged with `coordinates` into one bounding box.
    Select {
        document_id: String,
        page_number: u32,
        #[serde(default)]
        coordinates: Option<PdfRect>,
        #[serde(default)]
        rects: Vec<PdfRect>,
        #[serde(default)]
        text: String,
        #[serde(default)]
        anchor: Option<Anchor>,
    },
    Highlight {
        /// Palette name, or the display name of a custom `hex` color.
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        hex: Option<String>,
        #[serde(default)]
        opacity: Option<f64>,
    },
    Redact,
    Cancel,
    Remove {
        id: String,
    },
    ClearPage {
        document_id: String,
        page_number: u32,
    },
    ClearDocument {
        document_id: String,
    },
    ClearAll,
}

/// Read and parse a script file.
pub fn load(file: &Path) -> Result<Vec<Step>, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    let text = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;
    serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid event script: {e}");
        1
    })
}

/// Apply one step to the session.
pub fn apply(session: &mut EditingSession, step: Step) -> Result<(), AnnotError> {
    match step {
        Step::Select {
            document_id,
            page_number,
            coordinates,
            rects,
            text,
            anchor,
        } => {
            let bounds = coordinates
                .into_iter()
                .chain(rects)
                .reduce(|acc, rect| acc.union(&rect))
                .ok_or_else(|| {
                    AnnotError::InvalidAnnotation(
                        "select step needs coordinates or rects".to_string(),
                    )
                })?;
            let selection = PendingSelection::new(document_id, page_number, bounds, text);
            session.capture_selection(selection, anchor)?;
        }
        Step::Highlight {
            color,
            hex: Some(hex),
            opacity,
        } => {
            let name = color.unwrap_or_else(|| hex.clone());
            session.choose_color(ColorChoice::new(
                name,
                hex,
                opacity.unwrap_or(DEFAULT_OPACITY),
            ))?;
        }
        Step::Highlight {
            color, hex: None, ..
        } => {
            session.choose_palette_color(color.as_deref().unwrap_or(DEFAULT_COLOR))?;
        }
        Step::Redact => {
            session.choose_redaction()?;
        }
        Step::Cancel => {
            session.cancel()?;
        }
        Step::Remove { id } => {
            if session.remove(&AnnotationId::from(id.as_str())).is_none() {
                tracing::debug!(%id, "remove: annotation already gone");
            }
        }
        Step::ClearPage {
            document_id,
            page_number,
        } => {
            session.clear_by_page(&document_id, page_number);
        }
        Step::ClearDocument { document_id } => {
            session.clear_by_document(&document_id);
        }
        Step::ClearAll => {
            session.clear_all();
        }
    }
    Ok(())
}

/// Apply every step in order, stopping at the first rejected one.
pub fn replay(session: &mut EditingSession, steps: Vec<Step>) -> Result<(), i32> {
    for (index, step) in steps.into_iter().enumerate() {
        apply(session, step).map_err(|e| {
            eprintln!("Error: step {}: {e}", index + 1);
            1
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlemark_core::{AnnotationStyle, SequentialIds};

    fn parse(json: &str) -> Vec<Step> {
        serde_json::from_str(json).unwrap()
    }

    fn session() -> EditingSession {
        EditingSession::new().with_id_generator(SequentialIds::new("annot"))
    }

    const SELECT: &str = r#"{"type": "select", "document_id": "doc1", "page_number": 2,
        "coordinates": {"x": 10, "y": 700, "width": 50, "height": 12}, "text": "Hello"}"#;

    #[test]
    fn parses_every_step_kind() {
        let steps = parse(&format!(
            r#"[{SELECT},
            {{"type": "highlight"}},
            {{"type": "redact"}},
            {{"type": "cancel"}},
            {{"type": "remove", "id": "a"}},
            {{"type": "clear_page", "document_id": "d", "page_number": 1}},
            {{"type": "clear_document", "document_id": "d"}},
            {{"type": "clear_all"}}]"#
        ));
        assert_eq!(steps.len(), 8);
        assert!(matches!(steps[0], Step::Select { page_number: 2, .. }));
        assert_eq!(steps[7], Step::ClearAll);
    }

    #[test]
    fn highlight_defaults_to_yellow() {
        let mut s = session();
        replay(&mut s, parse(&format!(r#"[{SELECT}, {{"type": "highlight"}}]"#))).unwrap();
        let annot = s.store().iter().next().unwrap();
        match &annot.style {
            AnnotationStyle::Highlight(h) => assert_eq!(h.color_name, "Yellow"),
            other => panic!("expected highlight, got {other:?}"),
        }
    }

    #[test]
    fn highlight_with_custom_hex() {
        let mut s = session();
        replay(
            &mut s,
            parse(&format!(
                r##"[{SELECT}, {{"type": "highlight", "color": "Mint", "hex": "#98ff98", "opacity": 0.5}}]"##
            )),
        )
        .unwrap();
        match &s.store().iter().next().unwrap().style {
            AnnotationStyle::Highlight(h) => {
                assert_eq!(h.color_name, "Mint");
                assert_eq!(h.color_hex, "#98FF98");
                assert_eq!(h.opacity, 0.5);
            }
            other => panic!("expected highlight, got {other:?}"),
        }
    }

    #[test]
    fn unknown_palette_color_stops_replay() {
        let mut s = session();
        let result = replay(
            &mut s,
            parse(&format!(r#"[{SELECT}, {{"type": "highlight", "color": "Plaid"}}]"#)),
        );
        assert_eq!(result, Err(1));
        assert!(s.pending().is_some());
    }

    #[test]
    fn remove_and_clear_steps() {
        let mut s = session();
        replay(
            &mut s,
            parse(&format!(
                r#"[{SELECT}, {{"type": "redact"}},
                {SELECT}, {{"type": "redact"}},
                {{"type": "remove", "id": "annot-1"}},
                {{"type": "remove", "id": "annot-1"}}]"#
            )),
        )
        .unwrap();
        let ids: Vec<&str> = s.store().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["annot-2"]);

        replay(
            &mut s,
            parse(r#"[{"type": "clear_page", "document_id": "doc1", "page_number": 2}]"#),
        )
        .unwrap();
        assert!(s.store().is_empty());
    }

    #[test]
    fn multi_line_select_uses_bounding_box() {
        let mut s = session();
        replay(
            &mut s,
            parse(
                r#"[{"type": "select", "document_id": "doc1", "page_number": 1,
                    "rects": [{"x": 10, "y": 700, "width": 300, "height": 12},
                              {"x": 10, "y": 686, "width": 120, "height": 12}]},
                   {"type": "redact"}]"#,
            ),
        )
        .unwrap();
        let annot = s.store().iter().next().unwrap();
        assert_eq!(annot.coordinates, PdfRect::new(10.0, 686.0, 300.0, 26.0));
    }

    #[test]
    fn select_without_any_rect_is_rejected() {
        let mut s = session();
        let result = replay(
            &mut s,
            parse(r#"[{"type": "select", "document_id": "doc1", "page_number": 1}]"#),
        );
        assert_eq!(result, Err(1));
        assert!(s.pending().is_none());
    }

    #[test]
    fn load_missing_file() {
        assert_eq!(load(Path::new("/nonexistent/events.json")), Err(1));
    }
}
