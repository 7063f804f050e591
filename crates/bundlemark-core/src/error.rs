//! Error, warning, and option types for annotation editing.
//!
//! Provides [`AnnotError`] for conditions that reject an operation outright,
//! [`SessionWarning`] for non-fatal conditions that leave the session
//! unchanged (a stale color-picker callback, a replaced pending selection),
//! and [`SessionOptions`] for configuring how warnings are handled.

use std::fmt;

use thiserror::Error;

use crate::annotation::{AnnotationId, RedactionStyle};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnnotError>;

/// Errors that reject an operation.
///
/// When one of these is returned the store and selection state are left as
/// they were before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotError {
    /// An annotation with this id is already in the store. Indicates an id
    /// generation bug; retrying with the same id will fail again.
    #[error("duplicate annotation id: {0}")]
    DuplicateId(AnnotationId),
    /// Zoom scale was zero, negative, or not finite.
    #[error("invalid scale: {0} (must be finite and > 0)")]
    InvalidScale(f64),
    /// Page height was zero, negative, or not finite.
    #[error("invalid page height: {0} (must be finite and > 0)")]
    InvalidPageHeight(f64),
    /// A color string could not be parsed as `#RRGGBB`.
    #[error("invalid color: '{0}'")]
    InvalidColor(String),
    /// Opacity outside `[0, 1]`.
    #[error("invalid opacity: {0} (must be within 0..=1)")]
    InvalidOpacity(f64),
    /// An annotation or payload violated a data-model invariant.
    #[error("invalid annotation: {0}")]
    InvalidAnnotation(String),
    /// A warning escalated to an error by [`SessionOptions::strict_mode`].
    #[error("{0}")]
    Escalated(SessionWarning),
}

/// Machine-readable warning code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum WarningCode {
    /// Commit or cancel arrived with nothing pending.
    NoPendingSelection,
    /// A new selection superseded an unresolved pending selection.
    PendingReplaced,
    /// A captured selection was rejected (page 0, negative size, no document).
    InvalidSelection,
    /// The chosen style could not be turned into an annotation style.
    InvalidStyle,
    /// A fetched annotation was already present in the store.
    DuplicateOnReconcile,
    /// Any other warning.
    Other(String),
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::NoPendingSelection => "NO_PENDING_SELECTION",
            WarningCode::PendingReplaced => "PENDING_REPLACED",
            WarningCode::InvalidSelection => "INVALID_SELECTION",
            WarningCode::InvalidStyle => "INVALID_STYLE",
            WarningCode::DuplicateOnReconcile => "DUPLICATE_ON_RECONCILE",
            WarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal condition raised while handling an editing event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description.
    pub description: String,
    /// Document the warning concerns, if any.
    pub document_id: Option<String>,
    /// 1-based page the warning concerns, if any.
    pub page_number: Option<u32>,
}

impl SessionWarning {
    /// Create a warning with a code and description.
    pub fn new(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            document_id: None,
            page_number: None,
        }
    }

    /// Attach document and page context (builder pattern).
    pub fn on_page(mut self, document_id: impl Into<String>, page_number: u32) -> Self {
        self.document_id = Some(document_id.into());
        self.page_number = Some(page_number);
        self
    }

    /// Convert this warning into an [`AnnotError`].
    ///
    /// Used by strict mode.
    pub fn to_error(&self) -> AnnotError {
        AnnotError::Escalated(self.clone())
    }
}

impl fmt::Display for SessionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        match (&self.document_id, self.page_number) {
            (Some(doc), Some(page)) => write!(f, " (doc {doc}, page {page})")?,
            (Some(doc), None) => write!(f, " (doc {doc})")?,
            _ => {}
        }
        Ok(())
    }
}

/// Options controlling an editing session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SessionOptions {
    /// Buffer warnings for [`take_warnings`](crate::EditingSession::take_warnings) (default: true).
    pub collect_warnings: bool,
    /// When true, any warning is escalated to an error (default: false).
    pub strict_mode: bool,
    /// Style applied by [`choose_redaction`](crate::EditingSession::choose_redaction).
    pub redaction_style: RedactionStyle,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            collect_warnings: true,
            strict_mode: false,
            redaction_style: RedactionStyle::default(),
        }
    }
}
