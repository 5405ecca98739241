//! Drag-to-resize containers for wide numeric columns.
//!
//! A field is wrapped once in a [`ResizeContainer`] with a trailing handle.
//! Dragging is modelled as an explicit session: pressing a handle begins it,
//! pointer moves update the container width, and a release anywhere ends it.
//! At most one session exists per [`ResizeSessionManager`].

use crate::document::{ContainerId, FieldId, FormDocument, ResizeContainer};
use blend_core::{FieldError, MIN_RESIZE_WIDTH};
use tracing::debug;

/// Wrap `field` in a resizable container unless it already has one.
///
/// Returns the field's container either way; a second call creates nothing.
pub fn make_resizable(
    doc: &mut FormDocument,
    field: FieldId,
    initial_width: f64,
) -> Result<ContainerId, FieldError> {
    let existing = doc
        .field(field)
        .ok_or(FieldError::UnknownField { id: field.0 })?
        .container;
    if let Some(container) = existing {
        return Ok(container);
    }
    let container = doc.push_container(ResizeContainer {
        field,
        width: initial_width,
    });
    if let Some(f) = doc.field_mut(field) {
        f.container = Some(container);
    }
    Ok(container)
}

/// Width a drag to `pointer_x` proposes, or `None` when it falls under the floor.
pub fn proposed_width(start_width: f64, start_x: f64, pointer_x: f64) -> Option<f64> {
    let width = start_width + (pointer_x - start_x);
    (width >= MIN_RESIZE_WIDTH).then_some(width)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub container: ContainerId,
    pub start_x: f64,
    pub start_width: f64,
}

#[derive(Debug, Default, Clone)]
pub struct ResizeSessionManager {
    session: Option<ResizeSession>,
}

impl ResizeSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    pub fn active(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Handle press. Replaces any session still open (single pointer).
    pub fn begin(&mut self, container: ContainerId, pointer_x: f64, start_width: f64) {
        debug!(container = container.0, pointer_x, start_width, "resize session started");
        self.session = Some(ResizeSession {
            container,
            start_x: pointer_x,
            start_width,
        });
    }

    /// Pointer move. Yields the container and its new width when one applies.
    pub fn update(&self, pointer_x: f64) -> Option<(ContainerId, f64)> {
        let session = self.session.as_ref()?;
        let width = proposed_width(session.start_width, session.start_x, pointer_x)?;
        Some((session.container, width))
    }

    /// Pointer release anywhere. Always clears the session.
    pub fn end(&mut self) -> Option<ResizeSession> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            debug!(container = session.container.0, "resize session ended");
        }
        ended
    }

    /// Press a container's handle, reading its current width from the document.
    pub fn press(&mut self, doc: &FormDocument, container: ContainerId, pointer_x: f64) -> bool {
        match doc.container_width(container) {
            Some(width) => {
                self.begin(container, pointer_x, width);
                true
            }
            None => false,
        }
    }

    /// Apply a pointer move to the document. Returns the width applied, if any.
    pub fn drag(&self, doc: &mut FormDocument, pointer_x: f64) -> Option<f64> {
        let (container, width) = self.update(pointer_x)?;
        doc.set_container_width(container, width).then_some(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Field, FieldKind};

    fn doc_with_field() -> (FormDocument, FieldId) {
        let mut doc = FormDocument::new("/run_lp");
        let id = doc.insert_field(Field::new("component_NC1_cost", "25.00", FieldKind::Numeric));
        (doc, id)
    }

    #[test]
    fn test_make_resizable_is_idempotent() {
        let (mut doc, id) = doc_with_field();
        let first = make_resizable(&mut doc, id, 80.0).unwrap();
        let second = make_resizable(&mut doc, id, 120.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.containers_for(id), 1);
        assert_eq!(doc.container_width(first), Some(80.0));
    }

    #[test]
    fn test_make_resizable_unknown_field() {
        let mut doc = FormDocument::new("/run_lp");
        assert!(make_resizable(&mut doc, FieldId(9), 80.0).is_err());
    }

    #[test]
    fn test_drag_applies_delta() {
        let (mut doc, id) = doc_with_field();
        let container = make_resizable(&mut doc, id, 80.0).unwrap();
        let mut manager = ResizeSessionManager::new();
        assert!(manager.press(&doc, container, 100.0));
        assert_eq!(manager.drag(&mut doc, 140.0), Some(120.0));
        assert_eq!(doc.container_width(container), Some(120.0));
        // Deltas are measured from the press, not the previous move.
        assert_eq!(manager.drag(&mut doc, 90.0), Some(70.0));
    }

    #[test]
    fn test_drag_below_floor_is_ignored() {
        let (mut doc, id) = doc_with_field();
        let container = make_resizable(&mut doc, id, 80.0).unwrap();
        let mut manager = ResizeSessionManager::new();
        manager.press(&doc, container, 100.0);
        manager.drag(&mut doc, 110.0);
        assert_eq!(manager.drag(&mut doc, 50.0), None);
        assert_eq!(doc.container_width(container), Some(90.0));
        assert_eq!(manager.drag(&mut doc, 80.0), Some(60.0));
    }

    #[test]
    fn test_move_without_session_is_noop() {
        let (mut doc, id) = doc_with_field();
        let container = make_resizable(&mut doc, id, 80.0).unwrap();
        let manager = ResizeSessionManager::new();
        assert_eq!(manager.drag(&mut doc, 500.0), None);
        assert_eq!(doc.container_width(container), Some(80.0));
    }

    #[test]
    fn test_end_clears_unconditionally() {
        let mut manager = ResizeSessionManager::new();
        assert!(manager.end().is_none());
        manager.begin(ContainerId(0), 1.0, 80.0);
        assert!(manager.is_resizing());
        assert!(manager.end().is_some());
        assert!(!manager.is_resizing());
        assert_eq!(manager.update(300.0), None);
    }

    #[test]
    fn test_proposed_width_floor() {
        assert_eq!(proposed_width(80.0, 0.0, -20.0), Some(60.0));
        assert_eq!(proposed_width(80.0, 0.0, -20.5), None);
    }
}
