use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{plan_write, validate_key, DraftStore, Envelope, StorageError, WritePlan};

/// Stores each key as `<dir>/<key>.json`. Writes go to a temp file in the same
/// directory and are renamed into place, so readers never see a partial file.
pub struct FileDraftStore {
    dir: PathBuf,
    // Serializes read-check-write within this process.
    write_lock: Mutex<()>,
}

impl FileDraftStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Draft store at {}", dir.display());
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn read(&self, key: &str) -> Result<Option<Envelope>, StorageError> {
        let path = self.path_for(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let raw: Value = serde_json::from_str(&text)?;
        Envelope::from_stored(key, raw).map(Some)
    }

    /// Current envelope for a write. An unreadable file is moved aside to
    /// `<key>.corrupt.json` and the key is treated as absent.
    fn read_for_write(&self, key: &str, path: &Path) -> Result<Option<Envelope>, StorageError> {
        match self.read(key) {
            Err(e @ (StorageError::Json(_) | StorageError::UnsupportedSchema { .. })) => {
                let aside = self.dir.join(format!("{key}.corrupt.json"));
                warn!("Unreadable '{key}' ({e}), moving it to {}", aside.display());
                fs::rename(path, &aside)?;
                Ok(None)
            }
            other => other,
        }
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &str) -> Result<Option<Envelope>, StorageError> {
        self.read(key)
    }

    fn save(
        &self,
        key: &str,
        data: Value,
        expected_revision: Option<u64>,
    ) -> Result<u64, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let current = self.read_for_write(key, &path)?;
        let envelope = match plan_write(key, current.as_ref(), data, expected_revision)? {
            WritePlan::Unchanged(revision) => {
                debug!("'{key}' unchanged at revision {revision}, skipping write");
                return Ok(revision);
            }
            WritePlan::Write(envelope) => envelope,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, &envelope)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StorageError::Io(e.error))?;

        debug!("Saved '{key}' at revision {}", envelope.revision);
        Ok(envelope.revision)
    }
}
