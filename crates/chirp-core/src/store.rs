use crate::error::{ChirpError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

/// Key-value store for small JSON state documents.
///
/// One logical document per key; the only operations are whole-document read
/// and whole-document overwrite. There is no versioning or conditional write:
/// the trigger scheduler is assumed to never overlap invocations of the same
/// bot (see DESIGN.md).
pub trait StateStore: Send + Sync {
    /// Read the whole document for `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the whole document for `key`.
    fn write(&self, key: &str, data: &[u8]) -> Result<()>;
}

/// Read and deserialize the document for `key`, if present.
pub fn read_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Result<Option<T>> {
    match store.read(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and overwrite the document for `key`.
pub fn write_json<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    store.write(key, &data)
}

// ---------------------------------------------------------------------------
// FsStore
// ---------------------------------------------------------------------------

/// Directory-backed store: one file per key under `root`.
///
/// The directory is created on first write, mirroring a lazily created
/// storage container.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StateStore for FsStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ChirpError::StoreRead {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        crate::io::atomic_write(&self.path_for(key), data).map_err(|e| ChirpError::StoreWrite {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
