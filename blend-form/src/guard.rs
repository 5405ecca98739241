//! Value-restore guard: a guarded field is never left blank once filled.

use crate::document::{FieldId, FormDocument};
use blend_core::FieldError;

/// Last non-blank value committed to a guarded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGuard {
    last_known: String,
}

/// What a blur did to a guarded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Field was blank and now holds the last known value again.
    Restored { value: String },
    /// Field was non-blank; its trimmed value became the last known value.
    Committed,
}

impl ValueGuard {
    pub fn new(initial: &str) -> Self {
        Self {
            last_known: initial.to_string(),
        }
    }

    pub fn last_known(&self) -> &str {
        &self.last_known
    }

    /// Decide the blur outcome for `current`. Does not touch the field.
    pub fn on_blur(&mut self, current: &str) -> GuardOutcome {
        let trimmed = current.trim();
        if trimmed.is_empty() {
            GuardOutcome::Restored {
                value: self.last_known.clone(),
            }
        } else {
            self.last_known = trimmed.to_string();
            GuardOutcome::Committed
        }
    }
}

/// Attach a guard capturing the field's current value.
pub fn guard(doc: &mut FormDocument, id: FieldId) -> Result<(), FieldError> {
    let field = doc
        .field_mut(id)
        .ok_or(FieldError::UnknownField { id: id.0 })?;
    field.guard = Some(ValueGuard::new(&field.value));
    Ok(())
}

/// Run the blur policy of a guarded field. Unguarded fields yield `None`.
pub fn blur(doc: &mut FormDocument, id: FieldId) -> Option<GuardOutcome> {
    let field = doc.field_mut(id)?;
    let current = field.value.clone();
    let outcome = field.guard.as_mut()?.on_blur(&current);
    if let GuardOutcome::Restored { value } = &outcome {
        field.value = value.clone();
    }
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Field, FieldKind};

    fn guarded(initial: &str) -> (FormDocument, FieldId) {
        let mut doc = FormDocument::new("/run_lp");
        let id = doc.insert_field(Field::new("f", initial, FieldKind::Numeric));
        guard(&mut doc, id).unwrap();
        (doc, id)
    }

    #[test]
    fn test_blank_blur_restores_initial() {
        let (mut doc, id) = guarded("25.00");
        doc.set_value(id, "   ").unwrap();
        let outcome = blur(&mut doc, id);
        assert_eq!(
            outcome,
            Some(GuardOutcome::Restored {
                value: "25.00".to_string()
            })
        );
        assert_eq!(doc.value(id), Some("25.00"));
    }

    #[test]
    fn test_non_blank_blur_commits_trimmed() {
        let (mut doc, id) = guarded("1");
        doc.set_value(id, " 1.5 ").unwrap();
        assert_eq!(blur(&mut doc, id), Some(GuardOutcome::Committed));
        assert_eq!(doc.value(id), Some(" 1.5 "));

        doc.set_value(id, "").unwrap();
        blur(&mut doc, id);
        assert_eq!(doc.value(id), Some("1.5"));
    }

    #[test]
    fn test_initially_empty_field_may_stay_empty() {
        let (mut doc, id) = guarded("");
        blur(&mut doc, id);
        assert_eq!(doc.value(id), Some(""));
    }

    #[test]
    fn test_unguarded_field_untouched() {
        let mut doc = FormDocument::new("/run_lp");
        let id = doc.insert_field(Field::new("name", "", FieldKind::Text));
        assert_eq!(blur(&mut doc, id), None);
    }
}
