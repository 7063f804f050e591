//! Serde serialization/deserialization round-trip tests.
//!
//! These verify the JSON shapes exchanged with hosts and persistence, and
//! that they deserialize back to equal values.

#![cfg(feature = "serde")]

use bundlemark_core::*;

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

fn highlight() -> Annotation {
    Annotation::new(
        AnnotationId::from("h1"),
        "doc1",
        2,
        PdfRect::new(10.0, 700.0, 50.0, 12.0),
        "Hello",
        AnnotationStyle::Highlight(HighlightStyle {
            color_name: "Yellow".to_string(),
            color_rgb: Rgb::new(1.0, 1.0, 0.0),
            color_hex: "#FFFF00".to_string(),
            opacity: 0.3,
        }),
    )
    .unwrap()
}

#[test]
fn annotation_json_shape() {
    let value = serde_json::to_value(highlight()).unwrap();
    assert_eq!(value["id"], "h1");
    assert_eq!(value["document_id"], "doc1");
    assert_eq!(value["page_number"], 2);
    assert_eq!(value["coordinates"]["y"], 700.0);
    assert_eq!(value["style"]["kind"], "highlight");
    assert_eq!(value["style"]["color_rgb"]["g"], 1.0);
    roundtrip(&highlight());
}

#[test]
fn record_json_is_flat_and_skips_empty_fields() {
    let value = serde_json::to_value(AnnotationRecord::from(&highlight())).unwrap();
    assert_eq!(value["kind"], "highlight");
    assert_eq!(value["color_hex"], "#FFFF00");
    assert_eq!(value["color_rgb"]["r"], 1.0);
    assert_eq!(value["opacity"], 0.3);
    assert!(value.get("fill_color").is_none());
    roundtrip(&AnnotationRecord::from(&highlight()));
}

#[test]
fn record_from_backend_json() {
    let json = r##"{
        "id": "srv-12",
        "document_id": "doc9",
        "page_number": 1,
        "coordinates": {"x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0},
        "kind": "redaction",
        "opacity": 1.0,
        "fill_color": "#000000",
        "border_color": "#FF0000",
        "border_width": 1.0
    }"##;
    let record: AnnotationRecord = serde_json::from_str(json).unwrap();
    let annot = Annotation::try_from(record).unwrap();
    assert_eq!(annot.kind(), AnnotationKind::Redaction);
    assert_eq!(annot.text, "");
    assert_eq!(annot.style, AnnotationStyle::Redaction(RedactionStyle::default()));
}

#[test]
fn record_from_backend_json_with_missing_style_fields() {
    let json = r##"{
        "id": "srv-13",
        "document_id": "doc9",
        "page_number": 1,
        "coordinates": {"x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0},
        "kind": "highlight",
        "color_hex": "#FFFF00"
    }"##;
    let record: AnnotationRecord = serde_json::from_str(json).unwrap();
    assert!(matches!(
        Annotation::try_from(record),
        Err(AnnotError::InvalidAnnotation(_))
    ));
}

#[test]
fn selection_event_tags() {
    let event: SelectionEvent = serde_json::from_str(
        r##"{"type": "color_chosen", "choice": {"kind": "highlight", "name": "Yellow", "hex": "#FFFF00", "opacity": 0.3}}"##,
    )
    .unwrap();
    assert_eq!(
        event,
        SelectionEvent::ColorChosen {
            choice: StyleChoice::Highlight(ColorChoice::new("Yellow", "#FFFF00", 0.3)),
        }
    );
    roundtrip(&SelectionEvent::Cancel);
    roundtrip(&SelectionEvent::SelectionCaptured {
        selection: PendingSelection::new("doc1", 1, PdfRect::new(0.0, 0.0, 1.0, 1.0), "x"),
        anchor: Some(Anchor { x: 3.0, y: 4.0 }),
    });
}

#[test]
fn selection_state_and_effects() {
    roundtrip(&SelectionState::Idle);
    roundtrip(&SelectionState::PendingColorChoice {
        pending: PendingSelection::new("doc1", 1, PdfRect::new(0.0, 0.0, 1.0, 1.0), "x"),
        anchor: None,
    });
    roundtrip(&Effect::AddAnnotation {
        annotation: highlight(),
    });
    let committed = serde_json::to_value(Effect::Committed {
        id: AnnotationId::from("h1"),
    })
    .unwrap();
    assert_eq!(committed, serde_json::json!({"effect": "committed", "id": "h1"}));
    roundtrip(&Effect::Warn {
        warning: SessionWarning::new(WarningCode::NoPendingSelection, "nothing pending")
            .on_page("doc1", 1),
    });
}

#[test]
fn session_options_partial_json_uses_defaults() {
    let opts: SessionOptions = serde_json::from_str(r#"{"strict_mode": true}"#).unwrap();
    assert!(opts.strict_mode);
    assert!(opts.collect_warnings);
    assert_eq!(opts.redaction_style, RedactionStyle::default());
    roundtrip(&opts);
}

#[test]
fn overlay_roundtrip() {
    roundtrip(&Overlay {
        id: AnnotationId::from("r"),
        kind: AnnotationKind::Redaction,
        rect: ScreenRect::new(0.0, 10.0, 20.0, 30.0),
        fill: "#000000".to_string(),
        opacity: 1.0,
        border: Some(OverlayBorder {
            color: "#FF0000".to_string(),
            width: 1.5,
        }),
    });
}
