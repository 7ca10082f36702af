use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{plan_write, validate_key, DraftStore, Envelope, StorageError, WritePlan};

/// In-process store for tests.
#[derive(Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, Envelope>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .len()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, key: &str) -> Result<Option<Envelope>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn save(
        &self,
        key: &str,
        data: Value,
        expected_revision: Option<u64>,
    ) -> Result<u64, StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        match plan_write(key, entries.get(key), data, expected_revision)? {
            WritePlan::Unchanged(revision) => Ok(revision),
            WritePlan::Write(envelope) => {
                let revision = envelope.revision;
                entries.insert(key.to_string(), envelope);
                Ok(revision)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_revisions_increase_per_change() {
        let store = MemoryDraftStore::new();
        assert_eq!(store.save("k", json!(1), None).unwrap(), 1);
        assert_eq!(store.save("k", json!(2), Some(1)).unwrap(), 2);
        assert_eq!(store.save("k", json!(2), Some(2)).unwrap(), 2);
    }

    #[test]
    fn test_conflict_leaves_value_in_place() {
        let store = MemoryDraftStore::new();
        store.save("k", json!("v"), None).unwrap();
        let err = store.save("k", json!("w"), Some(0)).unwrap_err();
        assert!(matches!(err, StorageError::Conflict { found: 1, .. }));
        assert_eq!(store.load("k").unwrap().unwrap().data, json!("v"));
        assert_eq!(store.len(), 1);
    }
}
