//! Form controller: owns the document and routes user events to the engine.
//!
//! Startup order is fixed: read the property schema, apply field rules, then
//! restore the persisted snapshot. After that every event handler keeps the
//! stored snapshot current and turns failures into notifications.

use crate::document::{ContainerId, FieldId, FormDocument};
use crate::guard::{self, GuardOutcome};
use crate::notifications::{NotificationLevel, NotificationQueue};
use crate::persistence::{KeyValueStore, PersistenceStore, RestoreOutcome, SaveOutcome};
use crate::resize::ResizeSessionManager;
use crate::rows::{self, AddedRow};
use crate::rules::{self, RuleReport};
use crate::schema::{PropertySchema, SchemaSource};
use blend_core::{FieldError, RowError, SchemaError};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Initial width of new resizable containers.
    pub field_width: f64,
    pub notification_ttl: chrono::Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            field_width: 80.0,
            notification_ttl: chrono::Duration::seconds(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub schema: Result<usize, SchemaError>,
    pub rules: RuleReport,
    pub restore: RestoreOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurResult {
    pub guard: Option<GuardOutcome>,
    pub saved: Option<SaveOutcome>,
}

pub struct FormController<S: KeyValueStore> {
    document: FormDocument,
    store: PersistenceStore<S>,
    resize: ResizeSessionManager,
    schema: Option<PropertySchema>,
    notifications: NotificationQueue,
    options: ControllerOptions,
}

impl<S: KeyValueStore> FormController<S> {
    pub fn new(document: FormDocument, store: PersistenceStore<S>, options: ControllerOptions) -> Self {
        Self {
            document,
            store,
            resize: ResizeSessionManager::new(),
            schema: None,
            notifications: NotificationQueue::new(options.notification_ttl),
            options,
        }
    }

    pub fn initialize(&mut self) -> StartupReport {
        let schema = self.load_schema().map(|s| s.len());
        let rules = rules::apply_all(&mut self.document);
        let restore = self.store.restore(&mut self.document);
        match &restore {
            RestoreOutcome::DiscardedCorrupt { .. } => {
                self.notifications
                    .push(NotificationLevel::Warning, "Saved form data was unreadable and has been cleared");
            }
            RestoreOutcome::Restored { applied, skipped } => {
                info!(applied, skipped = skipped.len(), "form values restored");
            }
            RestoreOutcome::NoSnapshot | RestoreOutcome::Unavailable { .. } => {}
        }
        StartupReport {
            schema,
            rules,
            restore,
        }
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn schema(&self) -> Option<&PropertySchema> {
        self.schema.as_ref()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub fn store(&self) -> &PersistenceStore<S> {
        &self.store
    }

    pub fn resize_session(&self) -> &ResizeSessionManager {
        &self.resize
    }

    /// Derive the schema once; later calls reuse it.
    fn load_schema(&mut self) -> Result<&PropertySchema, SchemaError> {
        if self.schema.is_none() {
            let schema = self.document.components.load_schema().inspect_err(|err| {
                error!(error = %err, "component table header does not match the form contract");
            })?;
            self.schema = Some(schema);
        }
        self.schema.as_ref().ok_or(SchemaError::MissingHeader)
    }

    /// User typed into a field.
    pub fn input(&mut self, id: FieldId, value: impl Into<String>) -> Result<SaveOutcome, FieldError> {
        self.document.set_value(id, value)?;
        Ok(self.save())
    }

    /// Field lost focus.
    pub fn blur(&mut self, id: FieldId) -> BlurResult {
        let guard = guard::blur(&mut self.document, id);
        let restored = matches!(guard, Some(GuardOutcome::Restored { .. }));
        let persist = self
            .document
            .field(id)
            .is_some_and(|f| f.persist_on_blur);
        let saved = (persist || restored).then(|| self.save());
        BlurResult { guard, saved }
    }

    /// Save and return the submission payload.
    pub fn submit(&mut self) -> Vec<(String, String)> {
        self.save();
        self.document.form_pairs()
    }

    pub fn save(&self) -> SaveOutcome {
        self.store.save(&self.document)
    }

    pub fn add_row(&mut self) -> Result<AddedRow, RowError> {
        let width = self.options.field_width;
        let result = match self.load_schema() {
            Ok(schema) => {
                let schema = schema.clone();
                rows::add_row(&mut self.document, &schema, width)
            }
            Err(err) => Err(RowError::from(err)),
        };
        match &result {
            Ok(added) => self
                .notifications
                .push(NotificationLevel::Success, format!("Added component {}", added.tag)),
            Err(err) => {
                error!(error = %err, "component row not added");
                self.notifications
                    .push(NotificationLevel::Error, format!("Cannot add component: {}", err));
            }
        }
        result
    }

    pub fn remove_row(&mut self, tag: &str) -> Result<usize, RowError> {
        let result = rows::remove_row(&mut self.document, tag);
        match &result {
            Ok(_) => self
                .notifications
                .push(NotificationLevel::Info, format!("Removed component {}", tag)),
            Err(err) => warn!(error = %err, "component row not removed"),
        }
        result
    }

    pub fn press_handle(&mut self, container: ContainerId, pointer_x: f64) -> bool {
        self.resize.press(&self.document, container, pointer_x)
    }

    pub fn pointer_move(&mut self, pointer_x: f64) -> Option<f64> {
        self.resize.drag(&mut self.document, pointer_x)
    }

    pub fn pointer_release(&mut self) {
        self.resize.end();
    }

    /// Resize by a fixed delta through a complete press/move/release session.
    pub fn resize_by(&mut self, container: ContainerId, delta: f64) -> Option<f64> {
        if !self.press_handle(container, 0.0) {
            return None;
        }
        let applied = self.pointer_move(delta);
        self.pointer_release();
        applied
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(level, message);
    }
}
