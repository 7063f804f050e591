//! WebAssembly/JavaScript bindings for bundlemark.
//!
//! Wraps an [`EditingSession`] so a browser viewer can drive the
//! selection-to-annotation flow and ask for overlays to draw. Complex types
//! are serialized to JsValue using serde_wasm_bindgen.

use wasm_bindgen::prelude::*;

use bundlemark_core::{
    AnnotError, Anchor, Annotation, AnnotationId, AnnotationRecord, ColorChoice, EditingSession,
    Effect, HIGHLIGHT_PALETTE, PdfRect, PendingSelection, SelectionEvent, SessionOptions,
    to_screen,
};

fn js_err(e: AnnotError) -> JsError {
    JsError::new(&e.to_string())
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Id of the annotation committed by these effects, if any.
fn committed_id(effects: &[Effect]) -> Option<String> {
    effects.iter().find_map(|e| match e {
        Effect::AddAnnotation { annotation } => Some(annotation.id.to_string()),
        _ => None,
    })
}

/// An annotation editing session (WASM binding).
///
/// # JavaScript Usage
///
/// ```js
/// const session = new WasmSession();
/// session.captureSelection(
///   { document_id: "doc1", page_number: 2,
///     coordinates: { x: 10, y: 700, width: 50, height: 12 }, text: "Hello" },
///   35, 80);
/// const id = session.chooseColor("Yellow");
/// for (const o of session.overlays("doc1", 2, 792, 1.5)) draw(o);
///
/// // reopening a bundle
/// session.reconcile(await fetchAnnotations(bundleId));
/// ```
///
/// A choose call that returns an id, or a `cancel` while `isPending`, means
/// the host must clear its browser text selection. `handle` takes a raw event
/// and returns the full effect list (`add_annotation`, `clear_text_selection`,
/// `committed`, `canceled`, `pending_replaced`, `warn`).
#[wasm_bindgen]
pub struct WasmSession {
    inner: EditingSession,
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmSession {
    /// Start a session with default options and random UUID ids.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        WasmSession {
            inner: EditingSession::new(),
        }
    }

    /// Start a session from an options object
    /// (`{ strict_mode, collect_warnings, redaction_style }`, all optional).
    #[wasm_bindgen(js_name = "withOptions")]
    pub fn with_options(options: JsValue) -> Result<WasmSession, JsError> {
        let options: SessionOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&e.to_string()))?;
        options.redaction_style.validate().map_err(js_err)?;
        Ok(WasmSession {
            inner: EditingSession::with_options(options),
        })
    }

    /// Record a text selection and open the style picker at the anchor.
    #[wasm_bindgen(js_name = "captureSelection")]
    pub fn capture_selection(
        &mut self,
        selection: JsValue,
        anchor_x: Option<f64>,
        anchor_y: Option<f64>,
    ) -> Result<(), JsError> {
        let selection: PendingSelection = serde_wasm_bindgen::from_value(selection)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let anchor = match (anchor_x, anchor_y) {
            (Some(x), Some(y)) => Some(Anchor { x, y }),
            _ => None,
        };
        self.inner
            .capture_selection(selection, anchor)
            .map_err(js_err)?;
        Ok(())
    }

    /// Commit the pending selection as a highlight in a palette color.
    ///
    /// Returns the new annotation id, or `undefined` if nothing was pending.
    #[wasm_bindgen(js_name = "chooseColor")]
    pub fn choose_color(&mut self, name: &str) -> Result<Option<String>, JsError> {
        let effects = self.inner.choose_palette_color(name).map_err(js_err)?;
        Ok(committed_id(&effects))
    }

    /// Commit the pending selection as a highlight in a custom color.
    #[wasm_bindgen(js_name = "chooseCustomColor")]
    pub fn choose_custom_color(
        &mut self,
        name: &str,
        hex: &str,
        opacity: f64,
    ) -> Result<Option<String>, JsError> {
        let effects = self
            .inner
            .choose_color(ColorChoice::new(name, hex, opacity))
            .map_err(js_err)?;
        Ok(committed_id(&effects))
    }

    /// Commit the pending selection as a redaction box.
    #[wasm_bindgen(js_name = "chooseRedaction")]
    pub fn choose_redaction(&mut self) -> Result<Option<String>, JsError> {
        let effects = self.inner.choose_redaction().map_err(js_err)?;
        Ok(committed_id(&effects))
    }

    /// Dismiss the picker and drop the pending selection.
    pub fn cancel(&mut self) -> Result<(), JsError> {
        self.inner.cancel().map_err(js_err)?;
        Ok(())
    }

    /// Remove an annotation. Returns false if it was already gone.
    pub fn remove(&mut self, id: &str) -> bool {
        self.inner.remove(&AnnotationId::from(id)).is_some()
    }

    #[wasm_bindgen(js_name = "clearPage")]
    pub fn clear_page(&mut self, document_id: &str, page_number: u32) -> usize {
        self.inner.clear_by_page(document_id, page_number)
    }

    #[wasm_bindgen(js_name = "clearDocument")]
    pub fn clear_document(&mut self, document_id: &str) -> usize {
        self.inner.clear_by_document(document_id)
    }

    #[wasm_bindgen(js_name = "clearAll")]
    pub fn clear_all(&mut self) -> usize {
        self.inner.clear_all()
    }

    /// The selection awaiting a style choice, or `undefined`.
    #[wasm_bindgen(getter)]
    pub fn pending(&self) -> Result<JsValue, JsError> {
        match self.inner.pending() {
            Some(selection) => to_js(selection),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(getter, js_name = "isPending")]
    pub fn is_pending(&self) -> bool {
        self.inner.pending().is_some()
    }

    /// Number of annotations in the session.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.store().len()
    }

    /// Annotations as persistence records, optionally for one document.
    pub fn annotations(&self, document_id: Option<String>) -> Result<JsValue, JsError> {
        let records: Vec<AnnotationRecord> = match document_id {
            Some(doc) => self
                .inner
                .store()
                .filter_by_document(&doc)
                .map(AnnotationRecord::from)
                .collect(),
            None => self.inner.store().iter().map(AnnotationRecord::from).collect(),
        };
        to_js(&records)
    }

    /// Screen-space overlays for one rendered page.
    pub fn overlays(
        &self,
        document_id: &str,
        page_number: u32,
        page_height: f64,
        scale: f64,
    ) -> Result<JsValue, JsError> {
        let overlays = self
            .inner
            .overlays(document_id, page_number, page_height, scale)
            .map_err(js_err)?;
        to_js(&overlays)
    }

    /// Drain buffered warnings.
    #[wasm_bindgen(js_name = "takeWarnings")]
    pub fn take_warnings(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.take_warnings())
    }

    /// Process a raw event object (`{ type: "selection_captured" | "color_chosen"
    /// | "cancel", ... }`) and return the full effect list.
    pub fn handle(&mut self, event: JsValue) -> Result<JsValue, JsError> {
        let event: SelectionEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let effects = self.inner.handle(event).map_err(js_err)?;
        to_js(&effects)
    }

    /// Load records fetched from the backend. Returns how many were added.
    pub fn reconcile(&mut self, records: JsValue) -> Result<usize, JsError> {
        let records: Vec<AnnotationRecord> = serde_wasm_bindgen::from_value(records)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.reconcile_records(records).map_err(js_err)
    }

    /// End the session, dropping annotations, pending selection and warnings.
    pub fn end(&mut self) {
        self.inner.end();
    }
}

impl WasmSession {
    fn reconcile_records(
        &mut self,
        records: Vec<AnnotationRecord>,
    ) -> Result<usize, AnnotError> {
        let fetched = records
            .into_iter()
            .map(Annotation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.inner.reconcile(fetched)
    }
}

/// The highlight palette as an array of `{ name, hex, opacity }` objects.
#[wasm_bindgen]
pub fn palette() -> Result<JsValue, JsError> {
    let choices: Vec<ColorChoice> = HIGHLIGHT_PALETTE.iter().map(|c| c.to_choice()).collect();
    to_js(&choices)
}

/// Convert a PDF-space rectangle to screen-space.
#[wasm_bindgen(js_name = "toScreen")]
pub fn to_screen_rect(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    page_height: f64,
    scale: f64,
) -> Result<JsValue, JsError> {
    let rect = to_screen(&PdfRect::new(x, y, width, height), page_height, scale).map_err(js_err)?;
    to_js(&rect)
}
