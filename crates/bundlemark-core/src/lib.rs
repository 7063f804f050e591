//! bundlemark-core: highlight and redaction state for a PDF bundle editor.
//!
//! This crate provides the coordinate transform between PDF-space and
//! screen-space ([`to_screen`]), the ordered [`AnnotationStore`], the
//! selection-to-annotation state machine ([`transition`]) and the
//! [`EditingSession`] that ties them together. It has no UI or network code;
//! front-ends drive it with discrete events.

/// Highlight and redaction records.
pub mod annotation;
/// Errors, warnings, and session options.
pub mod error;
/// PDF-space and screen-space rectangles.
pub mod geometry;
/// Screen-space overlays for page rendering.
pub mod overlay;
/// Fixed highlight color palette.
pub mod palette;
/// Persisted annotation payloads and the backend trait.
pub mod persistence;
/// Selection-to-annotation state machine.
pub mod selection;
/// Editing session state holder.
pub mod session;
/// Ordered annotation store.
pub mod store;

pub use annotation::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStyle, HighlightStyle, RedactionStyle, Rgb,
};
pub use error::{AnnotError, Result, SessionOptions, SessionWarning, WarningCode};
pub use geometry::{PdfRect, ScreenRect, to_pdf, to_screen};
pub use overlay::{Overlay, OverlayBorder, page_overlays};
pub use palette::{ColorChoice, HIGHLIGHT_PALETTE, PaletteColor};
pub use persistence::{AnnotationBackend, AnnotationRecord, MemoryBackend};
pub use selection::{
    Anchor, Effect, IdGenerator, PendingSelection, SelectionEvent, SelectionState, SequentialIds,
    StyleChoice, Transition, UuidIds, transition,
};
pub use session::EditingSession;
pub use store::AnnotationStore;
