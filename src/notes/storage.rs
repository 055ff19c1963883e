//! Notes Storage Layer
//!
//! JSON-file persistence for the note list. Writes go through [`SaveQueue`],
//! a single-slot background writer: bursts of saves coalesce into the latest
//! snapshot and at most one write touches the file at a time.

use parking_lot::{Condvar, Mutex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

use super::model::Note;
use crate::error::{PersistenceError, ResultExt};

/// The notes file on disk: a JSON array of `{id, name, content}`.
#[derive(Debug, Clone)]
pub struct NotesFile {
    path: PathBuf,
}

impl NotesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all notes. A missing file is an empty list, not an error.
    pub fn load(&self) -> Result<Vec<Note>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let notes: Vec<Note> = serde_json::from_str(&content)?;
        Ok(notes)
    }

    /// Load, logging and falling back to an empty list on any failure.
    pub fn load_or_empty(&self) -> Vec<Note> {
        match self.load() {
            Ok(notes) => {
                info!(path = %self.path.display(), count = notes.len(), "Loaded notes");
                notes
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load notes, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the whole list atomically (temp file in the same directory, then rename).
    pub fn write(&self, notes: &[Note]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(notes)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[derive(Default)]
struct SaveState {
    pending: Option<Vec<Note>>,
    in_flight: bool,
    shutdown: bool,
    writes: u64,
}

struct SaveInner {
    state: Mutex<SaveState>,
    cv: Condvar,
}

/// Background writer owning one pending snapshot.
pub struct SaveQueue {
    file: NotesFile,
    inner: Arc<SaveInner>,
    worker: Option<JoinHandle<()>>,
}

impl SaveQueue {
    /// Start the writer thread. If the thread cannot be spawned, saves are
    /// written synchronously on the caller's thread instead.
    pub fn start(file: NotesFile) -> Self {
        let inner = Arc::new(SaveInner {
            state: Mutex::new(SaveState::default()),
            cv: Condvar::new(),
        });

        let worker = std::thread::Builder::new()
            .name("comfy-notes-save".to_owned())
            .spawn({
                let inner = inner.clone();
                let file = file.clone();
                move || run_worker(inner, file)
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "Failed to spawn save worker");
                None
            }
        };

        Self {
            file,
            inner,
            worker,
        }
    }

    /// Replace the pending snapshot and return immediately.
    pub fn save(&self, notes: Vec<Note>) {
        if self.worker.is_none() {
            self.file.write(&notes).log_err();
            return;
        }
        let mut state = self.inner.state.lock();
        if state.pending.replace(notes).is_some() {
            debug!("Coalesced pending notes save");
        }
        self.inner.cv.notify_all();
    }

    /// Block until nothing is pending or being written.
    pub fn flush(&self) {
        if self.worker.is_none() {
            return;
        }
        let mut state = self.inner.state.lock();
        while state.pending.is_some() || state.in_flight {
            self.inner.cv.wait(&mut state);
        }
    }

    /// Number of completed file writes (successful or not).
    pub fn writes(&self) -> u64 {
        self.inner.state.lock().writes
    }
}

impl Drop for SaveQueue {
    fn drop(&mut self) {
        self.flush();
        {
            let mut state = self.inner.state.lock();
            state.shutdown = true;
            self.inner.cv.notify_all();
        }
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                error!("Save worker panicked");
            }
        }
    }
}

fn run_worker(inner: Arc<SaveInner>, file: NotesFile) {
    loop {
        let snapshot = {
            let mut state = inner.state.lock();
            loop {
                if let Some(notes) = state.pending.take() {
                    state.in_flight = true;
                    break notes;
                }
                if state.shutdown {
                    return;
                }
                inner.cv.wait(&mut state);
            }
        };

        match file.write(&snapshot) {
            Ok(()) => debug!(path = %file.path().display(), count = snapshot.len(), "Saved notes"),
            Err(e) => error!(path = %file.path().display(), error = %e, "Failed to save notes"),
        }

        let mut state = inner.state.lock();
        state.in_flight = false;
        state.writes += 1;
        inner.cv.notify_all();
    }
}
