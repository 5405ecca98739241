//! Best-effort persistence of every named form field.
//!
//! The whole form is stored as one JSON object under a single key. Saving and
//! restoring never fail the caller: storage problems are logged and reported
//! through [`SaveOutcome`] / [`RestoreOutcome`] so the UI can decide whether to
//! show anything.

use crate::document::FormDocument;
use blend_core::{FormSnapshot, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Durable string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store with an optional byte quota, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse writes whose value exceeds `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Io {
            reason: "store lock poisoned".to_string(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.quota.is_some_and(|limit| value.len() > limit) {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { fields: usize },
    Failed { error: StoreError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing stored under the key.
    NoSnapshot,
    /// Stored data did not parse; it was purged and nothing was applied.
    DiscardedCorrupt { reason: String },
    /// The store could not be read; nothing was applied.
    Unavailable { error: StoreError },
    /// Values written into matching fields; names with no field are listed.
    Restored { applied: usize, skipped: Vec<String> },
}

pub struct PersistenceStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Replace the stored snapshot with the document's current field values.
    pub fn save(&self, doc: &FormDocument) -> SaveOutcome {
        let snapshot = doc.snapshot();
        let encoded = match serde_json::to_string(&snapshot) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "form snapshot encoding failed");
                return SaveOutcome::Failed {
                    error: StoreError::Corrupt {
                        reason: err.to_string(),
                    },
                };
            }
        };
        match self.store.set(&self.key, &encoded) {
            Ok(()) => {
                debug!(fields = snapshot.len(), "form snapshot saved");
                SaveOutcome::Saved {
                    fields: snapshot.len(),
                }
            }
            Err(error) => {
                warn!(error = %error, key = %self.key, "form snapshot not saved");
                SaveOutcome::Failed { error }
            }
        }
    }

    /// Write stored values back into fields that exist in `doc`.
    pub fn restore(&self, doc: &mut FormDocument) -> RestoreOutcome {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RestoreOutcome::NoSnapshot,
            Err(StoreError::Corrupt { reason }) => return self.purge(reason),
            Err(error) => {
                warn!(error = %error, key = %self.key, "form snapshot unreadable");
                return RestoreOutcome::Unavailable { error };
            }
        };

        let snapshot: FormSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => return self.purge(err.to_string()),
        };

        let mut applied = 0;
        let mut skipped = Vec::new();
        for (name, value) in snapshot {
            let written = doc
                .find_by_name(&name)
                .is_some_and(|id| doc.force_value(id, value).is_ok());
            if written {
                applied += 1;
            } else {
                skipped.push(name);
            }
        }
        if !skipped.is_empty() {
            debug!(count = skipped.len(), "snapshot entries without a matching field");
        }
        RestoreOutcome::Restored { applied, skipped }
    }

    /// Drop damaged stored data so the next start does not trip over it.
    fn purge(&self, reason: String) -> RestoreOutcome {
        warn!(reason = %reason, key = %self.key, "corrupt form snapshot purged");
        if let Err(remove_err) = self.store.remove(&self.key) {
            warn!(error = %remove_err, "corrupt form snapshot could not be purged");
        }
        RestoreOutcome::DiscardedCorrupt { reason }
    }
}
