//! Notes
//!
//! ## Architecture
//! - `model` - `Note` and `NoteId`
//! - `storage` - JSON file plus the background `SaveQueue`
//! - `store` - `NoteStore`, the one ordered collection, shared as `SharedNoteStore`
//! - `editor` - `NoteEditorSession`, a note panel's binding into the store
//!
//! ## Usage
//! ```ignore
//! use comfy_notes::notes::{NoteStore, NotesFile};
//!
//! let store = NoteStore::with_file(NotesFile::new(path)).into_shared();
//! store.borrow_mut().ensure_loaded();
//! ```

mod editor;
mod model;
mod storage;
mod store;

pub use editor::NoteEditorSession;
pub use model::{sample_notes, Note, NoteId};
pub use storage::{NotesFile, SaveQueue};
pub use store::{NoteStore, SharedNoteStore};
