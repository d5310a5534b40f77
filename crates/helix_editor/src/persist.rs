//! State persistence
//!
//! State is read once at startup and written back after changes settle.
//! Storage backends only see opaque strings under a key.

use crate::error::PersistError;
use crate::state::EditorState;
use helix_core::Timestamp;
use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A key-value store for serialized state
pub trait Storage {
    /// The value stored under `key`, or `None` if nothing is
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-process storage, mostly for tests and dry runs
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: FxHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(PersistError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}

/// Read the initial editor state.
///
/// Anything short of a valid stored state yields the default state, so a
/// broken store never blocks startup.
pub fn load_state(storage: &dyn Storage, key: &str) -> EditorState {
    let stored = match storage.get_item(key) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            tracing::debug!(key, "no stored state, starting fresh");
            return EditorState::default();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored state, starting fresh");
            return EditorState::default();
        }
    };

    match serde_json::from_str::<EditorState>(&stored) {
        Ok(state) => {
            let state = state.normalized();
            tracing::info!(key, animations = state.animations.len(), "loaded stored state");
            state
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored state is malformed, starting fresh");
            EditorState::default()
        }
    }
}

/// A serialized state ready to be written
#[derive(Clone, Debug, PartialEq)]
pub struct PersistRequest {
    pub key: String,
    pub serialized: String,
}

impl PersistRequest {
    pub fn write_to(&self, storage: &mut dyn Storage) -> Result<(), PersistError> {
        storage.set_item(&self.key, &self.serialized)
    }
}

/// Coalesces bursts of state changes into one write.
///
/// A write becomes due once `debounce` has passed since the most recent
/// change; every change in between pushes it back. The pending state is
/// kept until a write of it succeeds, so a failed write is retried on the
/// next poll.
#[derive(Clone, Debug)]
pub struct DebouncedWriter {
    key: String,
    debounce: Timestamp,
    pending: Option<(Arc<EditorState>, Timestamp)>,
}

impl DebouncedWriter {
    pub fn new(key: impl Into<String>, debounce: Timestamp) -> Self {
        Self {
            key: key.into(),
            debounce,
            pending: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record that `state` became current at `time`
    pub fn note(&mut self, state: Arc<EditorState>, time: Timestamp) {
        self.pending = Some((state, time));
    }

    /// The write due at `now`, if any.
    ///
    /// The state stays pending until [`DebouncedWriter::mark_written`].
    pub fn poll(&self, now: Timestamp) -> Result<Option<PersistRequest>, PersistError> {
        match &self.pending {
            Some((_, changed)) if now.elapsed_since(*changed) >= self.debounce => self.flush(),
            _ => Ok(None),
        }
    }

    /// The pending write regardless of the debounce
    pub fn flush(&self) -> Result<Option<PersistRequest>, PersistError> {
        let Some((state, _)) = &self.pending else {
            return Ok(None);
        };

        Ok(Some(PersistRequest {
            key: self.key.clone(),
            serialized: serde_json::to_string(&**state)?,
        }))
    }

    /// Forget the pending state once the request for it has been written
    pub fn mark_written(&mut self) {
        self.pending = None;
    }

    /// Write the state due at `now` to `storage`.
    ///
    /// Returns whether anything was written. On error the state stays
    /// pending.
    pub fn write_due(&mut self, now: Timestamp, storage: &mut dyn Storage) -> Result<bool, PersistError> {
        let request = self.poll(now)?;
        self.write(request, storage)
    }

    /// Write the pending state to `storage` regardless of the debounce
    pub fn write_pending(&mut self, storage: &mut dyn Storage) -> Result<bool, PersistError> {
        let request = self.flush()?;
        self.write(request, storage)
    }

    fn write(&mut self, request: Option<PersistRequest>, storage: &mut dyn Storage) -> Result<bool, PersistError> {
        let Some(request) = request else {
            return Ok(false);
        };

        request.write_to(storage)?;
        self.mark_written();
        tracing::debug!(key = %request.key, "editor state saved");
        Ok(true)
    }
}
