//! Blend Form - Dynamic Tabular Form Engine
//!
//! Builds and maintains the blending input form: component rows that follow
//! the live property schema, load-time field rules, drag-resizable numeric
//! fields, blank-on-blur protection and best-effort local persistence.

pub mod controller;
pub mod document;
pub mod guard;
pub mod notifications;
pub mod persistence;
pub mod resize;
pub mod rows;
pub mod rules;
pub mod schema;
pub mod template;

pub use controller::{BlurResult, ControllerOptions, FormController, StartupReport};
pub use document::{
    ComponentRow, ComponentTable, ContainerId, Field, FieldId, FieldKind, FormDocument, GradeRow,
    ResizeContainer, SpecBoundCells, SpecRow,
};
pub use guard::{GuardOutcome, ValueGuard};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use persistence::{KeyValueStore, MemoryStore, PersistenceStore, RestoreOutcome, SaveOutcome};
pub use resize::{make_resizable, ResizeSession, ResizeSessionManager};
pub use rows::{AddedRow, RowPlan};
pub use rules::{FieldRule, RuleReport};
pub use schema::{read_property_schema, PropertySchema, SchemaSource};
pub use template::render_document;
