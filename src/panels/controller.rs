//! Lifecycle of the search panel and the per-note panels.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use super::host::{PanelBounds, PanelHost, PanelKind, WindowId, WindowSpec};
use super::state::{PanelEvent, PanelState};
use super::PanelId;
use crate::config::{Config, NotePanelConfig, SearchPanelConfig};
use crate::error::PanelError;
use crate::input::{single_line_paste, WidgetEvent};
use crate::logging;
use crate::notes::{NoteEditorSession, NoteId, SharedNoteStore};
use crate::search::{CommitIntent, SearchSession};

/// Name given to notes created from a blank query.
pub const UNTITLED_NOTE_NAME: &str = "Untitled Note";

/// Panel geometry taken from config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelLayout {
    pub search: SearchPanelConfig,
    pub note: NotePanelConfig,
}

impl PanelLayout {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search: config.get_search_panel(),
            note: config.get_note_panel(),
        }
    }

    /// Natural search panel size for `results` rows (at least one, at most `max_rows`).
    pub fn search_size(&self, results: usize) -> (f64, f64) {
        let rows = results.clamp(1, self.search.max_rows.max(1));
        (
            self.search.width,
            self.search.base_height + rows as f64 * self.search.row_height,
        )
    }

    fn note_bounds(&self) -> PanelBounds {
        PanelBounds {
            x: self.note.x,
            y: self.note.y,
            width: self.note.width,
            height: self.note.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Explicit,
    Escape,
    FocusLost,
}

/// Which panel an interaction toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget {
    Search,
    Note(PanelId),
    /// Whichever open panel was raised most recently.
    Frontmost,
}

/// Result of routing one text-widget event to the search panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Moved { selected: Option<usize> },
    QueryChanged { matches: usize },
    Committed {
        intent: CommitIntent,
        opened: Option<PanelId>,
    },
    Closed,
    /// Passthrough panels do not take keystrokes.
    Ignored,
}

/// Snapshot of one open panel, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelInfo {
    pub panel: PanelId,
    pub kind: &'static str,
    pub state: PanelState,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<NoteId>,
}

struct SearchPanel {
    window: WindowId,
    state: PanelState,
    session: SearchSession,
}

struct NotePanel {
    window: WindowId,
    state: PanelState,
    editor: NoteEditorSession,
}

pub struct PanelController<H: PanelHost> {
    host: H,
    store: SharedNoteStore,
    layout: PanelLayout,
    /// `None` is the closed state: no window, no session.
    search: Option<SearchPanel>,
    notes: BTreeMap<PanelId, NotePanel>,
    next_note_panel: u64,
    /// Open panels, back to front.
    z_order: Vec<PanelId>,
}

impl<H: PanelHost> PanelController<H> {
    pub fn new(host: H, store: SharedNoteStore, layout: PanelLayout) -> Self {
        Self {
            host,
            store,
            layout,
            search: None,
            notes: BTreeMap::new(),
            next_note_panel: 0,
            z_order: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn store(&self) -> &SharedNoteStore {
        &self.store
    }

    pub fn search_state(&self) -> PanelState {
        self.search
            .as_ref()
            .map(|search| search.state)
            .unwrap_or(PanelState::Closed)
    }

    pub fn panel_state(&self, panel: PanelId) -> PanelState {
        if panel == PanelId::SEARCH {
            return self.search_state();
        }
        self.notes
            .get(&panel)
            .map(|note| note.state)
            .unwrap_or(PanelState::Closed)
    }

    pub fn search_session(&self) -> Option<&SearchSession> {
        self.search.as_ref().map(|search| &search.session)
    }

    pub fn search_window(&self) -> Option<WindowId> {
        self.search.as_ref().map(|search| search.window)
    }

    pub fn note_window(&self, panel: PanelId) -> Option<WindowId> {
        self.notes.get(&panel).map(|note| note.window)
    }

    pub fn note_session(&self, panel: PanelId) -> Option<&NoteEditorSession> {
        self.notes.get(&panel).map(|note| &note.editor)
    }

    pub fn note_panels(&self) -> Vec<PanelId> {
        self.notes.keys().copied().collect()
    }

    pub fn frontmost(&self) -> Option<PanelId> {
        self.z_order.last().copied()
    }

    fn bring_to_front(&mut self, panel: PanelId) {
        self.z_order.retain(|p| *p != panel);
        self.z_order.push(panel);
    }

    fn forget(&mut self, panel: PanelId) {
        self.z_order.retain(|p| *p != panel);
    }

    /// Show the launcher. Creates it if closed, otherwise only raises it.
    #[instrument(skip(self))]
    pub fn open_search_panel(&mut self) -> Result<(), PanelError> {
        self.store.borrow_mut().ensure_loaded();

        if let Some(search) = &self.search {
            let window = search.window;
            let take_focus = search.state.can_become_key();
            self.host.raise(window, take_focus);
            self.bring_to_front(PanelId::SEARCH);
            logging::log_panel_event("search", "raised", None);
            return Ok(());
        }

        let session = SearchSession::new(self.store.clone());
        let (width, height) = self.layout.search_size(session.filtered().len());
        let display = self.host.primary_display();
        let spec = WindowSpec {
            kind: PanelKind::Search,
            title: "Search Notes".to_string(),
            bounds: PanelBounds::centered(&display, width, height),
        };
        let window = self.host.create(&spec)?;
        self.host.raise(window, true);

        self.search = Some(SearchPanel {
            window,
            state: PanelState::Closed.transition(PanelEvent::Open),
            session,
        });
        self.bring_to_front(PanelId::SEARCH);
        logging::log_panel_event("search", "opened", None);
        Ok(())
    }

    /// Close the launcher. Returns whether it was closed by this call.
    ///
    /// `FocusLost` is a no-op while the panel is in passthrough.
    pub fn close_search_panel(&mut self, reason: CloseReason) -> bool {
        let Some(search) = &self.search else {
            return false;
        };
        let event = match reason {
            CloseReason::FocusLost => PanelEvent::FocusLost,
            CloseReason::Explicit | CloseReason::Escape => PanelEvent::Close,
        };
        let next = search.state.transition(event);
        if next.is_open() {
            debug!(?reason, state = ?search.state, "Search panel close ignored");
            return false;
        }

        let window = search.window;
        self.search = None;
        self.host.destroy(window);
        self.forget(PanelId::SEARCH);
        logging::log_panel_event("search", "closed", Some(&format!("{:?}", reason)));
        true
    }

    /// Flip interactive and passthrough. Returns the new state, or `None`
    /// when the target is not open.
    pub fn toggle_interaction(&mut self, target: PanelTarget) -> Option<PanelState> {
        let panel = match target {
            PanelTarget::Search => PanelId::SEARCH,
            PanelTarget::Note(panel) => panel,
            PanelTarget::Frontmost => self.frontmost()?,
        };

        let (window, state) = if panel == PanelId::SEARCH {
            let search = self.search.as_mut()?;
            (search.window, &mut search.state)
        } else {
            let note = self.notes.get_mut(&panel)?;
            (note.window, &mut note.state)
        };

        let next = state.transition(PanelEvent::ToggleInteraction);
        *state = next;
        self.host.set_passthrough(window, next.is_passthrough());
        logging::log_panel_event(
            &panel.to_string(),
            "interaction toggled",
            Some(&format!("{:?}", next)),
        );
        Some(next)
    }

    /// Open a new panel bound to `note_id` at the configured fixed origin.
    #[instrument(skip_all, fields(note_id = %note_id))]
    pub fn open_note_panel(&mut self, note_id: NoteId) -> Result<PanelId, PanelError> {
        let title = self
            .store
            .borrow()
            .get(note_id)
            .map(|note| note.name.clone())
            .ok_or(PanelError::NoteNotFound(note_id))?;

        let spec = WindowSpec {
            kind: PanelKind::Note,
            title,
            bounds: self.layout.note_bounds(),
        };
        let window = self.host.create(&spec)?;
        self.host.raise(window, true);

        self.next_note_panel += 1;
        let panel = PanelId(self.next_note_panel);
        self.notes.insert(
            panel,
            NotePanel {
                window,
                state: PanelState::Closed.transition(PanelEvent::Open),
                editor: NoteEditorSession::new(note_id, self.store.clone()),
            },
        );
        self.bring_to_front(panel);
        logging::log_panel_event(&panel.to_string(), "opened", Some(&spec.title));
        Ok(panel)
    }

    pub fn close_note_panel(&mut self, panel: PanelId) -> Result<(), PanelError> {
        let note = self
            .notes
            .remove(&panel)
            .ok_or(PanelError::PanelClosed(panel))?;
        self.host.destroy(note.window);
        self.forget(panel);
        logging::log_panel_event(&panel.to_string(), "closed", None);
        Ok(())
    }

    /// Window lost key status. Only an interactive search panel closes.
    pub fn handle_focus_lost(&mut self, panel: PanelId) -> bool {
        if panel == PanelId::SEARCH {
            return self.close_search_panel(CloseReason::FocusLost);
        }
        debug!(panel = %panel, "Focus lost on note panel, keeping it open");
        false
    }

    /// Route one event from the query field.
    pub fn handle_search_key(&mut self, event: WidgetEvent) -> Result<KeyOutcome, PanelError> {
        let search = self.search.as_mut().ok_or(PanelError::SearchPanelClosed)?;
        if search.state.is_passthrough() {
            debug!(?event, "Search panel is passthrough, key ignored");
            return Ok(KeyOutcome::Ignored);
        }

        let session = &mut search.session;
        match event {
            WidgetEvent::Move(direction) => {
                session.move_selection(direction);
                Ok(KeyOutcome::Moved {
                    selected: session.selected(),
                })
            }
            WidgetEvent::SetQuery(text) => {
                session.set_query(&text);
                Ok(KeyOutcome::QueryChanged {
                    matches: session.filtered().len(),
                })
            }
            WidgetEvent::Paste(text) => {
                let query = format!("{}{}", session.query(), single_line_paste(&text));
                session.set_query(&query);
                Ok(KeyOutcome::QueryChanged {
                    matches: session.filtered().len(),
                })
            }
            WidgetEvent::Escape => {
                self.close_search_panel(CloseReason::Escape);
                Ok(KeyOutcome::Closed)
            }
            WidgetEvent::Commit => {
                let intent = session.commit();
                let query = session.query().trim().to_string();
                self.apply_commit(intent, &query)
            }
        }
    }

    fn apply_commit(&mut self, intent: CommitIntent, query: &str) -> Result<KeyOutcome, PanelError> {
        let note_id = match intent {
            CommitIntent::NoOp => {
                return Ok(KeyOutcome::Committed {
                    intent,
                    opened: None,
                })
            }
            CommitIntent::OpenNote(note_id) => note_id,
            CommitIntent::CreateNote => {
                let name = if query.is_empty() {
                    UNTITLED_NOTE_NAME
                } else {
                    query
                };
                let mut store = self.store.borrow_mut();
                let note_id = store.create(name, "");
                store.save();
                info!(note_id = %note_id, name = name, "Created note from search");
                note_id
            }
        };

        self.close_search_panel(CloseReason::Explicit);
        let opened = self.open_note_panel(note_id)?;
        Ok(KeyOutcome::Committed {
            intent,
            opened: Some(opened),
        })
    }

    /// Replace a note panel's content. `Ok(false)` if its note was deleted.
    pub fn update_note(&mut self, panel: PanelId, text: &str) -> Result<bool, PanelError> {
        let note = self.notes.get(&panel).ok_or(PanelError::PanelClosed(panel))?;
        let updated = note.editor.update_content(text);
        if !updated {
            warn!(panel = %panel, "Note panel is bound to a deleted note");
        }
        Ok(updated)
    }

    pub fn describe(&self) -> Vec<PanelInfo> {
        let mut panels = Vec::new();
        if let Some(search) = &self.search {
            panels.push(PanelInfo {
                panel: PanelId::SEARCH,
                kind: "search",
                state: search.state,
                title: format!("query: {:?}", search.session.query()),
                note_id: None,
            });
        }
        for (panel, note) in &self.notes {
            panels.push(PanelInfo {
                panel: *panel,
                kind: "note",
                state: note.state,
                title: note.editor.name().unwrap_or_default(),
                note_id: Some(note.editor.note_id()),
            });
        }
        panels
    }

    /// Destroy every open window.
    pub fn close_all(&mut self) {
        self.close_search_panel(CloseReason::Explicit);
        for panel in self.note_panels() {
            let _ = self.close_note_panel(panel);
        }
    }
}
