//! Selection-to-annotation state machine.
//!
//! A finished text selection becomes a [`PendingSelection`] awaiting a style
//! choice. Choosing a color (or the redaction style) promotes it to an
//! [`Annotation`]; cancelling drops it. At most one selection is pending at a
//! time and a newer selection always replaces an unresolved one.
//!
//! [`transition`] is a pure function of `(state, event)` returning the next
//! state plus the [`Effect`]s the caller must apply. It never touches the
//! annotation store or the text layer itself.

use crate::annotation::{Annotation, AnnotationId, AnnotationStyle, RedactionStyle};
use crate::error::{SessionWarning, WarningCode};
use crate::geometry::PdfRect;
use crate::palette::ColorChoice;

/// A captured text selection waiting for a style choice. Never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingSelection {
    pub document_id: String,
    /// 1-based page index.
    pub page_number: u32,
    /// Selection bounds in PDF-space.
    pub coordinates: PdfRect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
}

impl PendingSelection {
    pub fn new(
        document_id: impl Into<String>,
        page_number: u32,
        coordinates: PdfRect,
        text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            coordinates,
            text: text.into(),
        }
    }

    /// Describe why this selection cannot become an annotation, if it can't.
    pub fn problem(&self) -> Option<&'static str> {
        if self.document_id.is_empty() {
            Some("selection has no document id")
        } else if self.page_number < 1 {
            Some("selection page number must be >= 1")
        } else if !self.coordinates.is_well_formed() {
            Some("selection rectangle must be finite with non-negative size")
        } else {
            None
        }
    }
}

/// Screen position where the style picker is shown for a pending selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Current state of the machine.
///
/// `Committed` and `Canceled` are per-cycle outcomes rather than resting
/// states: they are reported through [`Effect`]s and the machine is back in
/// [`Idle`](SelectionState::Idle) afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "state", rename_all = "snake_case")
)]
pub enum SelectionState {
    #[default]
    Idle,
    PendingColorChoice {
        pending: PendingSelection,
        anchor: Option<Anchor>,
    },
}

impl SelectionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        match self {
            SelectionState::Idle => None,
            SelectionState::PendingColorChoice { pending, .. } => Some(pending),
        }
    }

    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            SelectionState::Idle => None,
            SelectionState::PendingColorChoice { anchor, .. } => *anchor,
        }
    }
}

/// Style picked for the pending selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum StyleChoice {
    Highlight(ColorChoice),
    Redaction(RedactionStyle),
}

/// Discrete UI events driving the machine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum SelectionEvent {
    /// The text layer reported a finished selection.
    SelectionCaptured {
        selection: PendingSelection,
        anchor: Option<Anchor>,
    },
    /// The user picked a style for the pending selection.
    ColorChosen { choice: StyleChoice },
    /// The user dismissed the picker.
    Cancel,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "effect", rename_all = "snake_case")
)]
pub enum Effect {
    /// Append the new annotation to the store (the commit).
    AddAnnotation { annotation: Annotation },
    /// Clear the browser/text-layer selection.
    ClearTextSelection,
    /// The pending selection became the annotation with this id.
    Committed { id: AnnotationId },
    /// The pending selection was dropped without creating an annotation.
    Canceled { selection: PendingSelection },
    /// An unresolved pending selection was superseded by a newer one.
    PendingReplaced { previous: PendingSelection },
    /// A non-fatal condition to surface as a diagnostic.
    Warn { warning: SessionWarning },
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SelectionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: SelectionState, warning: SessionWarning) -> Self {
        Self {
            state,
            effects: vec![Effect::Warn { warning }],
        }
    }

    /// The annotation this transition commits, if any.
    pub fn committed(&self) -> Option<&Annotation> {
        self.effects.iter().find_map(|e| match e {
            Effect::AddAnnotation { annotation } => Some(annotation),
            _ => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &SessionWarning> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Warn { warning } => Some(warning),
            _ => None,
        })
    }
}

/// Source of fresh annotation ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> AnnotationId;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> AnnotationId {
        AnnotationId::generate()
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> AnnotationId {
        let id = AnnotationId::from(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Compute the next state and the effects for `event`.
pub fn transition(
    state: SelectionState,
    event: SelectionEvent,
    ids: &mut dyn IdGenerator,
) -> Transition {
    match event {
        SelectionEvent::SelectionCaptured { selection, anchor } => {
            capture(state, selection, anchor)
        }
        SelectionEvent::ColorChosen { choice } => commit(state, choice, ids),
        SelectionEvent::Cancel => cancel(state),
    }
}

fn capture(
    state: SelectionState,
    selection: PendingSelection,
    anchor: Option<Anchor>,
) -> Transition {
    if let Some(problem) = selection.problem() {
        let warning = SessionWarning::new(WarningCode::InvalidSelection, problem)
            .on_page(selection.document_id, selection.page_number);
        return Transition::unchanged(state, warning);
    }

    let mut effects = Vec::new();
    if let SelectionState::PendingColorChoice { pending, .. } = state {
        let warning = SessionWarning::new(
            WarningCode::PendingReplaced,
            "unresolved selection replaced by a newer one",
        )
        .on_page(pending.document_id.clone(), pending.page_number);
        effects.push(Effect::PendingReplaced { previous: pending });
        effects.push(Effect::Warn { warning });
    }

    Transition {
        state: SelectionState::PendingColorChoice {
            pending: selection,
            anchor,
        },
        effects,
    }
}

fn commit(state: SelectionState, choice: StyleChoice, ids: &mut dyn IdGenerator) -> Transition {
    let SelectionState::PendingColorChoice { pending, anchor } = state else {
        let warning = SessionWarning::new(
            WarningCode::NoPendingSelection,
            "style chosen with no pending selection",
        );
        return Transition::unchanged(SelectionState::Idle, warning);
    };

    let style = match choice {
        StyleChoice::Highlight(color) => color.to_style().map(AnnotationStyle::Highlight),
        StyleChoice::Redaction(style) => style.validate().map(|()| AnnotationStyle::Redaction(style)),
    };
    let built = style.and_then(|style| {
        Annotation::new(
            ids.next_id(),
            pending.document_id.clone(),
            pending.page_number,
            pending.coordinates,
            pending.text.clone(),
            style,
        )
    });

    match built {
        Ok(annotation) => {
            let id = annotation.id.clone();
            Transition {
                state: SelectionState::Idle,
                effects: vec![
                    Effect::AddAnnotation { annotation },
                    Effect::ClearTextSelection,
                    Effect::Committed { id },
                ],
            }
        }
        Err(err) => {
            let warning = SessionWarning::new(WarningCode::InvalidStyle, err.to_string())
                .on_page(pending.document_id.clone(), pending.page_number);
            Transition::unchanged(
                SelectionState::PendingColorChoice { pending, anchor },
                warning,
            )
        }
    }
}

fn cancel(state: SelectionState) -> Transition {
    match state {
        SelectionState::PendingColorChoice { pending, .. } => Transition {
            state: SelectionState::Idle,
            effects: vec![
                Effect::Canceled { selection: pending },
                Effect::ClearTextSelection,
            ],
        },
        SelectionState::Idle => Transition::unchanged(
            SelectionState::Idle,
            SessionWarning::new(
                WarningCode::NoPendingSelection,
                "cancel with no pending selection",
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Rgb;

    fn hello() -> PendingSelection {
        PendingSelection::new("doc1", 2, PdfRect::new(10.0, 700.0, 50.0, 12.0), "Hello")
    }

    fn captured(selection: PendingSelection) -> SelectionEvent {
        SelectionEvent::SelectionCaptured {
            selection,
            anchor: Some(Anchor { x: 40.0, y: 80.0 }),
        }
    }

    fn yellow() -> SelectionEvent {
        SelectionEvent::ColorChosen {
            choice: StyleChoice::Highlight(ColorChoice::new("Yellow", "#FFFF00", 0.3)),
        }
    }

    fn warning_codes(t: &Transition) -> Vec<WarningCode> {
        t.warnings().map(|w| w.code.clone()).collect()
    }

    #[test]
    fn capture_from_idle_enters_pending() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, captured(hello()), &mut ids);
        assert_eq!(t.state.pending(), Some(&hello()));
        assert_eq!(t.state.anchor(), Some(Anchor { x: 40.0, y: 80.0 }));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn second_capture_replaces_first() {
        let mut ids = SequentialIds::new("h");
        let first = hello();
        let second = PendingSelection::new("doc1", 3, PdfRect::new(1.0, 2.0, 3.0, 4.0), "World");

        let t = transition(SelectionState::Idle, captured(first.clone()), &mut ids);
        let t = transition(t.state, captured(second.clone()), &mut ids);

        assert_eq!(t.state.pending(), Some(&second));
        assert_eq!(t.effects[0], Effect::PendingReplaced { previous: first });
        assert_eq!(warning_codes(&t), vec![WarningCode::PendingReplaced]);
    }

    #[test]
    fn commit_builds_annotation_and_returns_to_idle() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, captured(hello()), &mut ids);
        let t = transition(t.state, yellow(), &mut ids);

        assert!(t.state.is_idle());
        assert!(t.state.anchor().is_none());
        let annot = t.committed().expect("annotation committed");
        assert_eq!(annot.id.as_str(), "h-1");
        assert_eq!(annot.document_id, "doc1");
        assert_eq!(annot.page_number, 2);
        assert_eq!(annot.text, "Hello");
        match &annot.style {
            AnnotationStyle::Highlight(h) => {
                assert_eq!(h.color_hex, "#FFFF00");
                assert_eq!(h.color_rgb, Rgb::new(1.0, 1.0, 0.0));
                assert_eq!(h.opacity, 0.3);
            }
            other => panic!("expected highlight, got {other:?}"),
        }
        assert_eq!(
            t.effects[1..],
            [
                Effect::ClearTextSelection,
                Effect::Committed {
                    id: AnnotationId::from("h-1")
                },
            ]
        );
    }

    #[test]
    fn redaction_choice_commits_redaction() {
        let mut ids = SequentialIds::new("r");
        let t = transition(SelectionState::Idle, captured(hello()), &mut ids);
        let t = transition(
            t.state,
            SelectionEvent::ColorChosen {
                choice: StyleChoice::Redaction(RedactionStyle::default()),
            },
            &mut ids,
        );
        let annot = t.committed().unwrap();
        assert_eq!(annot.kind(), crate::AnnotationKind::Redaction);
    }

    #[test]
    fn color_chosen_while_idle_is_ignored_with_warning() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, yellow(), &mut ids);
        assert!(t.state.is_idle());
        assert!(t.committed().is_none());
        assert_eq!(warning_codes(&t), vec![WarningCode::NoPendingSelection]);
        // no id consumed
        assert_eq!(ids.next_id().as_str(), "h-1");
    }

    #[test]
    fn cancel_drops_pending() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, captured(hello()), &mut ids);
        let t = transition(t.state, SelectionEvent::Cancel, &mut ids);
        assert!(t.state.is_idle());
        assert_eq!(
            t.effects,
            vec![
                Effect::Canceled { selection: hello() },
                Effect::ClearTextSelection
            ]
        );
    }

    #[test]
    fn cancel_while_idle_warns() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, SelectionEvent::Cancel, &mut ids);
        assert!(t.state.is_idle());
        assert_eq!(warning_codes(&t), vec![WarningCode::NoPendingSelection]);
    }

    #[test]
    fn invalid_selection_is_rejected() {
        let mut ids = SequentialIds::new("h");
        let bad = PendingSelection::new("doc1", 0, PdfRect::new(0.0, 0.0, 1.0, 1.0), "x");
        let t = transition(SelectionState::Idle, captured(bad), &mut ids);
        assert!(t.state.is_idle());
        assert_eq!(warning_codes(&t), vec![WarningCode::InvalidSelection]);

        let negative = PendingSelection::new("doc1", 1, PdfRect::new(0.0, 0.0, 1.0, -1.0), "x");
        let t = transition(SelectionState::Idle, captured(negative), &mut ids);
        assert!(t.state.is_idle());
    }

    #[test]
    fn invalid_selection_keeps_existing_pending() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, captured(hello()), &mut ids);
        let bad = PendingSelection::new("", 1, PdfRect::new(0.0, 0.0, 1.0, 1.0), "x");
        let t = transition(t.state, captured(bad), &mut ids);
        assert_eq!(t.state.pending(), Some(&hello()));
    }

    #[test]
    fn invalid_color_keeps_pending() {
        let mut ids = SequentialIds::new("h");
        let t = transition(SelectionState::Idle, captured(hello()), &mut ids);
        let t = transition(
            t.state,
            SelectionEvent::ColorChosen {
                choice: StyleChoice::Highlight(ColorChoice::new("Bad", "not-a-color", 0.3)),
            },
            &mut ids,
        );
        assert_eq!(t.state.pending(), Some(&hello()));
        assert_eq!(warning_codes(&t), vec![WarningCode::InvalidStyle]);
        assert!(t.committed().is_none());
    }

    #[test]
    fn sequential_ids_increment() {
        let mut ids = SequentialIds::new("a");
        assert_eq!(ids.next_id().as_str(), "a-1");
        assert_eq!(ids.next_id().as_str(), "a-2");
    }
}
