//! Editing session: the explicit owner of annotation and selection state.
//!
//! An [`EditingSession`] is handed by reference to whichever component needs
//! it (the text layer, the color picker, the page renderer). It drives the
//! pure [`transition`] function and applies the resulting effects to its
//! [`AnnotationStore`].

use std::fmt;

use crate::annotation::{Annotation, AnnotationId};
use crate::error::{AnnotError, Result, SessionOptions, SessionWarning, WarningCode};
use crate::overlay::{Overlay, page_overlays};
use crate::palette::{self, ColorChoice};
use crate::selection::{
    Anchor, Effect, IdGenerator, PendingSelection, SelectionEvent, SelectionState, StyleChoice,
    Transition, UuidIds, transition,
};
use crate::store::AnnotationStore;

/// State holder for one user's editing session.
pub struct EditingSession {
    store: AnnotationStore,
    state: SelectionState,
    ids: Box<dyn IdGenerator>,
    options: SessionOptions,
    warnings: Vec<SessionWarning>,
}

impl EditingSession {
    /// Session with default options and random ids.
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            store: AnnotationStore::new(),
            state: SelectionState::Idle,
            ids: Box::new(UuidIds),
            options,
            warnings: Vec::new(),
        }
    }

    /// Replace the id source (builder pattern).
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        self.state.pending()
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.state.anchor()
    }

    /// Process one UI event.
    ///
    /// Returns the effects the host still has to carry out (clearing the text
    /// selection, notifying about a dropped selection). Store additions are
    /// already applied. On error the session keeps its prior state.
    pub fn handle(&mut self, event: SelectionEvent) -> Result<Vec<Effect>> {
        let previous = self.state.clone();
        let Transition { state, effects } =
            transition(std::mem::take(&mut self.state), event, self.ids.as_mut());

        if self.options.strict_mode {
            if let Some(warning) = effects.iter().find_map(|e| match e {
                Effect::Warn { warning } => Some(warning),
                _ => None,
            }) {
                tracing::warn!(%warning, "strict mode: rejecting event");
                self.state = previous;
                return Err(warning.to_error());
            }
        }

        for effect in &effects {
            if let Effect::AddAnnotation { annotation } = effect {
                if let Err(err) = self.store.add(annotation.clone()) {
                    tracing::error!(%err, "commit rejected by annotation store");
                    self.state = previous;
                    return Err(err);
                }
            }
        }

        self.state = state;
        for effect in &effects {
            if let Effect::Warn { warning } = effect {
                self.record(warning.clone());
            }
        }
        tracing::debug!(pending = !self.state.is_idle(), effects = effects.len(), "event handled");
        Ok(effects)
    }

    /// A finished text selection arrived from the text layer.
    pub fn capture_selection(
        &mut self,
        selection: PendingSelection,
        anchor: Option<Anchor>,
    ) -> Result<Vec<Effect>> {
        self.handle(SelectionEvent::SelectionCaptured { selection, anchor })
    }

    /// Commit the pending selection as a highlight.
    pub fn choose_color(&mut self, choice: ColorChoice) -> Result<Vec<Effect>> {
        self.handle(SelectionEvent::ColorChosen {
            choice: StyleChoice::Highlight(choice),
        })
    }

    /// Commit the pending selection as a highlight with a palette color.
    pub fn choose_palette_color(&mut self, name: &str) -> Result<Vec<Effect>> {
        let color = palette::find(name).ok_or_else(|| AnnotError::InvalidColor(name.to_string()))?;
        self.choose_color(color.to_choice())
    }

    /// Commit the pending selection as a redaction using the configured style.
    pub fn choose_redaction(&mut self) -> Result<Vec<Effect>> {
        let style = self.options.redaction_style.clone();
        self.handle(SelectionEvent::ColorChosen {
            choice: StyleChoice::Redaction(style),
        })
    }

    pub fn cancel(&mut self) -> Result<Vec<Effect>> {
        self.handle(SelectionEvent::Cancel)
    }

    /// Delete one annotation. Absent ids are a no-op.
    pub fn remove(&mut self, id: &AnnotationId) -> Option<Annotation> {
        self.store.remove(id)
    }

    pub fn clear_by_document(&mut self, document_id: &str) -> usize {
        self.store.clear_by_document(document_id)
    }

    pub fn clear_by_page(&mut self, document_id: &str, page_number: u32) -> usize {
        self.store.clear_by_page(document_id, page_number)
    }

    pub fn clear_all(&mut self) -> usize {
        self.store.clear_all()
    }

    /// Merge annotations fetched from the persistence layer.
    ///
    /// The in-memory store stays authoritative: unknown ids are appended in
    /// fetch order, ids already present (or repeated within `fetched`) are
    /// skipped with a warning. Returns the number appended.
    ///
    /// In strict mode the first skipped annotation is an error and nothing is
    /// appended.
    pub fn reconcile(&mut self, fetched: impl IntoIterator<Item = Annotation>) -> Result<usize> {
        let mut staged: Vec<Annotation> = Vec::new();
        let mut skipped = Vec::new();
        for annotation in fetched {
            let known = self.store.contains(&annotation.id)
                || staged.iter().any(|a| a.id == annotation.id);
            let warning = if known {
                SessionWarning::new(
                    WarningCode::DuplicateOnReconcile,
                    format!("fetched annotation {} already present", annotation.id),
                )
                .on_page(annotation.document_id.clone(), annotation.page_number)
            } else if let Err(err) = annotation.validate() {
                SessionWarning::new(
                    WarningCode::Other("invalid fetched annotation".to_string()),
                    format!("skipping fetched annotation {}: {err}", annotation.id),
                )
            } else {
                staged.push(annotation);
                continue;
            };
            if self.options.strict_mode {
                tracing::warn!(%warning, "strict mode: rejecting reconcile");
                return Err(warning.to_error());
            }
            skipped.push(warning);
        }

        let added = staged.len();
        for annotation in staged {
            self.store.add(annotation)?;
        }
        for warning in skipped {
            self.record(warning);
        }
        tracing::debug!(added, "reconciled fetched annotations");
        Ok(added)
    }

    /// Screen-space overlays for one page at the current zoom.
    pub fn overlays(
        &self,
        document_id: &str,
        page_number: u32,
        page_height: f64,
        scale: f64,
    ) -> Result<Vec<Overlay>> {
        page_overlays(&self.store, document_id, page_number, page_height, scale).inspect_err(
            |err| tracing::warn!(%err, document_id, page_number, "cannot render overlays"),
        )
    }

    pub fn warnings(&self) -> &[SessionWarning] {
        &self.warnings
    }

    /// Drain collected warnings.
    pub fn take_warnings(&mut self) -> Vec<SessionWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// End the session: drop pending state, annotations, and warnings.
    pub fn end(&mut self) {
        let dropped = self.store.clear_all();
        self.state = SelectionState::Idle;
        self.warnings.clear();
        tracing::debug!(dropped, "session ended");
    }

    fn record(&mut self, warning: SessionWarning) {
        tracing::warn!(code = %warning.code, "{warning}");
        if self.options.collect_warnings {
            self.warnings.push(warning);
        }
    }
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditingSession")
            .field("store", &self.store)
            .field("state", &self.state)
            .field("options", &self.options)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}
