//! Search session model for the launcher panel.
//!
//! Owns the query text, the filtered view of the store and a bounded
//! selection. Nothing here knows about windows; the panel controller decides
//! whether a session is still live before calling `commit`.

use tracing::debug;

use crate::notes::{Note, NoteId, SharedNoteStore};

/// Selection movement forwarded by the text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What pressing Enter should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitIntent {
    /// Nothing matched: create a note from the query.
    CreateNote,
    OpenNote(NoteId),
    /// Matches exist but none is selected.
    NoOp,
}

/// Ids of notes whose name contains `query` case-insensitively, in store order.
///
/// An empty query matches every note.
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<NoteId> {
    if query.is_empty() {
        return notes.iter().map(|note| note.id).collect();
    }
    let needle = fold_case(query);
    notes
        .iter()
        .filter(|note| fold_case(&note.name).contains(&needle))
        .map(|note| note.id)
        .collect()
}

/// Lowercase one char at a time. `str::to_lowercase` maps a final sigma
/// differently from a medial one, so a query could stop matching as it grows.
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

pub struct SearchSession {
    store: SharedNoteStore,
    query: String,
    filtered: Vec<NoteId>,
    /// `None` means no selection. With an empty list `Some(0)` is the
    /// "create note" row.
    selected: Option<usize>,
}

impl SearchSession {
    /// Fresh session with an empty query showing every note.
    pub fn new(store: SharedNoteStore) -> Self {
        let filtered = filter_notes(store.borrow().notes(), "");
        Self {
            store,
            query: String::new(),
            filtered,
            selected: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered(&self) -> &[NoteId] {
        &self.filtered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highest selectable index; `0` even when empty (the create row).
    fn max_selectable(&self) -> usize {
        self.filtered.len().saturating_sub(1)
    }

    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        let filtered = filter_notes(self.store.borrow().notes(), &self.query);
        if filtered != self.filtered {
            self.filtered = filtered;
            self.selected = None;
        }
        debug!(
            query = %self.query,
            matches = self.filtered.len(),
            "Search query updated"
        );
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selected = match (direction, self.selected) {
            (Direction::Up, None) | (Direction::Up, Some(0)) => None,
            (Direction::Up, Some(i)) => Some(i - 1),
            (Direction::Down, None) => Some(0),
            (Direction::Down, Some(i)) => Some((i + 1).min(self.max_selectable())),
        };
    }

    pub fn commit(&self) -> CommitIntent {
        if self.filtered.is_empty() {
            return CommitIntent::CreateNote;
        }
        match self.selected.and_then(|i| self.filtered.get(i)) {
            Some(id) => CommitIntent::OpenNote(*id),
            None => CommitIntent::NoOp,
        }
    }

    /// Recompute against the current store contents, keeping the selection in range.
    pub fn refresh(&mut self) {
        self.filtered = filter_notes(self.store.borrow().notes(), &self.query);
        let max = self.max_selectable();
        if let Some(i) = self.selected {
            self.selected = Some(i.min(max));
        }
    }

    /// Display names of the filtered notes, in order.
    pub fn filtered_names(&self) -> Vec<String> {
        let store = self.store.borrow();
        self.filtered
            .iter()
            .filter_map(|id| store.get(*id).map(|note| note.name.clone()))
            .collect()
    }
}
