//! Note data model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a note.
///
/// Serialized as a bare UUID string so the notes file stays `{"id": "...", ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note: stable identity, display name, mutable plain-text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl Note {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Starter notes used to fill an empty store when `seedSampleNotes` is on.
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note::new("Build ComfyNotes MVP", "Finish the basic structure 🛸"),
        Note::new("Workout Routine", "Pushups, Pullups, Squats"),
        Note::new("Ideas", "Build Raycast clone one day"),
        Note::new("Daily Log", "Today I fought the persistence layer and won 😂"),
    ]
}
