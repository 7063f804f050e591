//! In-memory ordered collection of committed annotations.

use crate::annotation::{Annotation, AnnotationId};
use crate::error::{AnnotError, Result};

/// Ordered annotation collection owned by one editing session.
///
/// Insertion order is preserved and never re-sorted. Every mutation is
/// synchronous and immediately visible to subsequent reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation.
    ///
    /// Fails with [`AnnotError::DuplicateId`] if the id is already present; the
    /// store is unchanged in that case.
    pub fn add(&mut self, annotation: Annotation) -> Result<()> {
        if self.contains(&annotation.id) {
            return Err(AnnotError::DuplicateId(annotation.id));
        }
        tracing::debug!(
            id = %annotation.id,
            document_id = %annotation.document_id,
            page = annotation.page_number,
            kind = %annotation.kind(),
            "annotation added"
        );
        self.annotations.push(annotation);
        Ok(())
    }

    /// Remove the annotation with `id`, returning it if it was present.
    ///
    /// Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| &a.id == id)?;
        tracing::debug!(id = %id, "annotation removed");
        Some(self.annotations.remove(index))
    }

    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// All annotations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    /// Annotations of one document, in store order.
    ///
    /// The iterator is lazy and `Clone`, so it can be restarted.
    pub fn filter_by_document<'a>(
        &'a self,
        document_id: &'a str,
    ) -> impl Iterator<Item = &'a Annotation> + Clone + 'a {
        self.annotations
            .iter()
            .filter(move |a| a.document_id == document_id)
    }

    /// Annotations of one page of one document, in store order.
    pub fn filter_by_page<'a>(
        &'a self,
        document_id: &'a str,
        page_number: u32,
    ) -> impl Iterator<Item = &'a Annotation> + Clone + 'a {
        self.annotations
            .iter()
            .filter(move |a| a.is_on_page(document_id, page_number))
    }

    /// Remove every annotation of `document_id`. Returns how many were removed.
    pub fn clear_by_document(&mut self, document_id: &str) -> usize {
        self.retain_counting(|a| a.document_id != document_id)
    }

    /// Remove every annotation on one page. Returns how many were removed.
    pub fn clear_by_page(&mut self, document_id: &str, page_number: u32) -> usize {
        self.retain_counting(|a| !a.is_on_page(document_id, page_number))
    }

    /// Remove everything. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.annotations.len();
        self.annotations.clear();
        removed
    }

    fn retain_counting(&mut self, keep: impl FnMut(&Annotation) -> bool) -> usize {
        let before = self.annotations.len();
        self.annotations.retain(keep);
        let removed = before - self.annotations.len();
        if removed > 0 {
            tracing::debug!(removed, "annotations cleared");
        }
        removed
    }
}

impl<'a> IntoIterator for &'a AnnotationStore {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
