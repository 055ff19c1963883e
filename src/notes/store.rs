//! The single in-process note collection.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

use super::model::{sample_notes, Note, NoteId};
use super::storage::{NotesFile, SaveQueue};

/// Handle shared by the panel controller, search session and editor sessions.
///
/// Everything that touches notes runs on the UI thread, so a `RefCell` is enough.
pub type SharedNoteStore = Rc<RefCell<NoteStore>>;

/// Ordered list of notes plus the persistence behind it.
pub struct NoteStore {
    notes: Vec<Note>,
    loaded: bool,
    seed_samples: bool,
    file: Option<NotesFile>,
    queue: Option<SaveQueue>,
}

impl NoteStore {
    /// Store without a backing file; `save` is a no-op.
    pub fn in_memory(notes: Vec<Note>) -> Self {
        Self {
            notes,
            loaded: true,
            seed_samples: false,
            file: None,
            queue: None,
        }
    }

    /// Store backed by a JSON file. Nothing is read until `ensure_loaded`.
    pub fn with_file(file: NotesFile) -> Self {
        let queue = SaveQueue::start(file.clone());
        Self {
            notes: Vec::new(),
            loaded: false,
            seed_samples: false,
            file: Some(file),
            queue: Some(queue),
        }
    }

    /// Fill an empty collection with the sample notes on first load.
    pub fn seed_samples_when_empty(mut self, seed: bool) -> Self {
        self.seed_samples = seed;
        self
    }

    pub fn into_shared(self) -> SharedNoteStore {
        Rc::new(RefCell::new(self))
    }

    /// Load once; later calls do nothing.
    pub fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load();
        }
    }

    /// (Re)read the backing file. Missing or corrupt files give an empty list.
    pub fn load(&mut self) {
        if let Some(file) = &self.file {
            self.notes = file.load_or_empty();
        }
        self.loaded = true;

        if self.notes.is_empty() && self.seed_samples {
            info!("Notes store is empty, adding sample notes");
            self.notes = sample_notes();
            self.save();
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Live notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Returns `false` if no note has this id.
    pub fn update_content(&mut self, id: NoteId, content: &str) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.content = content.to_string();
                true
            }
            None => false,
        }
    }

    /// Returns `false` if no note has this id.
    pub fn rename(&mut self, id: NoteId, name: &str) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Append a new note and return its id.
    pub fn create(&mut self, name: &str, content: &str) -> NoteId {
        let note = Note::new(name, content);
        let id = note.id;
        debug!(note_id = %id, name = name, "Created note");
        self.notes.push(note);
        id
    }

    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == id)?;
        Some(self.notes.remove(index))
    }

    /// Queue the current list for writing. Fire-and-forget.
    pub fn save(&self) {
        if let Some(queue) = &self.queue {
            queue.save(self.notes.clone());
        }
    }

    /// Wait for queued writes to reach disk.
    pub fn flush(&self) {
        if let Some(queue) = &self.queue {
            queue.flush();
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn ensure_loaded_reads_once() {
        let dir = tempdir().unwrap();
        let file = NotesFile::new(dir.path().join("notes.json"));
        file.write(&[Note::new("On disk", "")]).unwrap();

        let mut store = NoteStore::with_file(file.clone());
        assert!(!store.is_loaded());
        store.ensure_loaded();
        assert_eq!(store.len(), 1);

        // A second ensure_loaded must not clobber in-memory edits
        store.create("In memory", "");
        store.ensure_loaded();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "not json").unwrap();

        let mut store = NoteStore::with_file(NotesFile::new(&path));
        store.ensure_loaded();
        assert!(store.is_empty());
    }

    #[test]
    fn seeds_samples_only_when_enabled() {
        let dir = tempdir().unwrap();

        let mut plain = NoteStore::with_file(NotesFile::new(dir.path().join("a.json")));
        plain.ensure_loaded();
        assert!(plain.is_empty());

        let file = NotesFile::new(dir.path().join("b.json"));
        let mut seeded = NoteStore::with_file(file.clone()).seed_samples_when_empty(true);
        seeded.ensure_loaded();
        assert_eq!(seeded.len(), 4);
        assert_eq!(seeded.notes()[0].name, "Build ComfyNotes MVP");

        seeded.flush();
        assert_eq!(file.load().unwrap().len(), 4);
    }

    #[test]
    fn mutations_by_id() {
        let mut store = NoteStore::in_memory(Vec::new());
        let a = store.create("A", "");
        let b = store.create("B", "");

        assert!(store.update_content(a, "alpha"));
        assert!(store.rename(b, "Bee"));
        assert_eq!(store.get(a).unwrap().content, "alpha");
        assert_eq!(store.get(b).unwrap().name, "Bee");

        assert_eq!(store.remove(a).map(|n| n.name), Some("A".to_string()));
        assert!(!store.update_content(a, "gone"));
        assert!(!store.contains(a));
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn ids_survive_persistence() {
        let dir = tempdir().unwrap();
        let file = NotesFile::new(dir.path().join("notes.json"));

        let id = {
            let mut store = NoteStore::with_file(file.clone());
            store.ensure_loaded();
            let id = store.create("Persisted", "body");
            store.save();
            store.flush();
            id
        };

        let mut reopened = NoteStore::with_file(file);
        reopened.ensure_loaded();
        assert_eq!(reopened.get(id).map(|n| n.content.as_str()), Some("body"));
    }
}
