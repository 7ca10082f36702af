//! Draft storage: the local key/value persistence behind the wizard.
//!
//! Every key holds one JSON value wrapped in an [`Envelope`] carrying a schema
//! version and a monotonically increasing revision. Writers pass the revision
//! they last saw; a store that has moved on rejects the write with
//! [`StorageError::Conflict`] instead of clobbering it.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod file;
#[cfg(test)]
pub mod memory;

pub use file::FileDraftStore;
#[cfg(test)]
pub use memory::MemoryDraftStore;

/// Full resume document.
pub const DATA_KEY: &str = "resumeBuilder_data";
/// Skills snapshot, rewritten whenever the skills slice changes.
pub const SKILLS_KEY: &str = "resumeSkills";
/// Selected template id.
pub const TEMPLATE_KEY: &str = "resume_template";
/// Reserved for an admin session. Nothing writes it.
#[allow(dead_code)]
pub const ADMIN_KEY: &str = "admin";
/// Reserved for a user token. Nothing writes it.
#[allow(dead_code)]
pub const AUTH_TOKEN_KEY: &str = "authToken";

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{key}' was modified elsewhere (expected revision {expected}, found {found})")]
    Conflict {
        key: String,
        expected: u64,
        found: u64,
    },

    #[error("'{key}' uses schema version {version}, newer than supported {max}", max = SCHEMA_VERSION)]
    UnsupportedSchema { key: String, version: u32 },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub schema_version: u32,
    pub revision: u64,
    pub saved_at: DateTime<Utc>,
    pub data: Value,
}

impl Envelope {
    /// Interprets a stored value. Bare values written before envelopes existed
    /// load as schema 0, revision 0.
    pub fn from_stored(key: &str, raw: Value) -> Result<Self, StorageError> {
        let is_envelope = raw.get("schemaVersion").is_some()
            && raw.get("revision").is_some()
            && raw.get("data").is_some();

        if !is_envelope {
            return Ok(Envelope {
                schema_version: 0,
                revision: 0,
                saved_at: Utc::now(),
                data: raw,
            });
        }

        let envelope: Envelope = serde_json::from_value(raw)?;
        if envelope.schema_version > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema {
                key: key.to_string(),
                version: envelope.schema_version,
            });
        }
        Ok(envelope)
    }
}

/// Key/value persistence for drafts. Implementations must be safe to share
/// across request handlers.
pub trait DraftStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Envelope>, StorageError>;

    /// Stores `data` under `key` and returns the resulting revision.
    ///
    /// `expected_revision` of `None` writes unconditionally; `Some(r)` requires
    /// the stored revision to equal `r` (0 when the key is absent).
    /// Writing a value equal to the stored one is skipped.
    fn save(
        &self,
        key: &str,
        data: Value,
        expected_revision: Option<u64>,
    ) -> Result<u64, StorageError>;

}

/// Outcome of checking a write against the currently stored envelope.
pub(crate) enum WritePlan {
    Unchanged(u64),
    Write(Envelope),
}

/// Shared revision/diff logic for store implementations.
pub(crate) fn plan_write(
    key: &str,
    current: Option<&Envelope>,
    data: Value,
    expected_revision: Option<u64>,
) -> Result<WritePlan, StorageError> {
    let found = current.map(|e| e.revision).unwrap_or(0);

    if let Some(expected) = expected_revision {
        if expected != found {
            return Err(StorageError::Conflict {
                key: key.to_string(),
                expected,
                found,
            });
        }
    }

    if let Some(existing) = current {
        if existing.data == data && existing.schema_version == SCHEMA_VERSION {
            return Ok(WritePlan::Unchanged(found));
        }
    }

    Ok(WritePlan::Write(Envelope {
        schema_version: SCHEMA_VERSION,
        revision: found + 1,
        saved_at: Utc::now(),
        data,
    }))
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Loads and deserializes a typed value, returning it with its revision.
pub fn load_typed<T: DeserializeOwned>(
    store: &dyn DraftStore,
    key: &str,
) -> Result<Option<(T, u64)>, StorageError> {
    match store.load(key)? {
        Some(envelope) => {
            let value = serde_json::from_value(envelope.data)?;
            Ok(Some((value, envelope.revision)))
        }
        None => Ok(None),
    }
}

/// Serializes and stores a typed value.
pub fn save_typed<T: Serialize>(
    store: &dyn DraftStore,
    key: &str,
    value: &T,
    expected_revision: Option<u64>,
) -> Result<u64, StorageError> {
    store.save(key, serde_json::to_value(value)?, expected_revision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_value_loads_as_legacy_envelope() {
        let env = Envelope::from_stored(DATA_KEY, json!({"objective": "x"})).unwrap();
        assert_eq!(env.schema_version, 0);
        assert_eq!(env.revision, 0);
        assert_eq!(env.data["objective"], "x");
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let raw = json!({
            "schemaVersion": SCHEMA_VERSION + 1,
            "revision": 3,
            "savedAt": "2024-01-01T00:00:00Z",
            "data": {}
        });
        let err = Envelope::from_stored(DATA_KEY, raw).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedSchema { .. }));
    }

    #[test]
    fn test_plan_write_rejects_stale_revision() {
        let current = Envelope {
            schema_version: SCHEMA_VERSION,
            revision: 4,
            saved_at: Utc::now(),
            data: json!(1),
        };
        let err = plan_write("k", Some(&current), json!(2), Some(3))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StorageError::Conflict {
                expected: 3,
                found: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_plan_write_skips_identical_value() {
        let current = Envelope {
            schema_version: SCHEMA_VERSION,
            revision: 2,
            saved_at: Utc::now(),
            data: json!({"a": 1}),
        };
        match plan_write("k", Some(&current), json!({"a": 1}), Some(2)).unwrap() {
            WritePlan::Unchanged(rev) => assert_eq!(rev, 2),
            WritePlan::Write(_) => panic!("identical value should not be rewritten"),
        }
    }

    #[test]
    fn test_key_validation() {
        assert!(validate_key(DATA_KEY).is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("").is_err());
    }
}
