use tracing::debug;

use super::model::NoteId;
use super::store::SharedNoteStore;

/// Binds one note panel to one note in the shared store.
///
/// Holds only the id; every read and write goes through the store so all
/// open panels observe the same note.
pub struct NoteEditorSession {
    note_id: NoteId,
    store: SharedNoteStore,
}

impl NoteEditorSession {
    pub fn new(note_id: NoteId, store: SharedNoteStore) -> Self {
        Self { note_id, store }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Write through to the store and queue a save.
    ///
    /// Returns `false` when the bound note no longer exists.
    pub fn update_content(&self, text: &str) -> bool {
        let mut store = self.store.borrow_mut();
        if !store.update_content(self.note_id, text) {
            return false;
        }
        debug!(note_id = %self.note_id, len = text.len(), "Note content updated");
        store.save();
        true
    }

    pub fn rename(&self, name: &str) -> bool {
        let mut store = self.store.borrow_mut();
        if !store.rename(self.note_id, name) {
            return false;
        }
        store.save();
        true
    }

    pub fn content(&self) -> Option<String> {
        self.store
            .borrow()
            .get(self.note_id)
            .map(|note| note.content.clone())
    }

    pub fn name(&self) -> Option<String> {
        self.store
            .borrow()
            .get(self.note_id)
            .map(|note| note.name.clone())
    }
}
