use super::*;
use crate::error::PanelError;
use crate::input::WidgetEvent;
use crate::notes::{Note, NoteId, NoteStore, SharedNoteStore};
use crate::search::{CommitIntent, Direction};

fn controller_with(names: &[&str]) -> (PanelController<HeadlessHost>, Vec<NoteId>) {
    let notes: Vec<Note> = names.iter().map(|name| Note::new(*name, "")).collect();
    let ids = notes.iter().map(|note| note.id).collect();
    let store: SharedNoteStore = NoteStore::in_memory(notes).into_shared();
    let controller = PanelController::new(HeadlessHost::new(), store, PanelLayout::default());
    (controller, ids)
}

#[test]
fn opening_twice_keeps_one_window() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    panels.open_search_panel().unwrap();

    assert_eq!(panels.search_state(), PanelState::OpenInteractive);
    assert_eq!(panels.host().created(), 1);
    assert_eq!(panels.host().live_windows(), 1);

    let window = panels.search_window().unwrap();
    assert_eq!(panels.host().window(window).unwrap().raise_count, 2);
}

#[test]
fn search_panel_is_centered_at_natural_size() {
    let (mut panels, _) = controller_with(&["A", "B", "C"]);
    panels.open_search_panel().unwrap();

    let window = panels.search_window().unwrap();
    let bounds = panels.host().window(window).unwrap().spec.bounds;
    let (width, height) = PanelLayout::default().search_size(3);
    let display = DisplayBounds::default();

    assert_eq!((bounds.width, bounds.height), (width, height));
    assert_eq!(bounds.x, (display.width - width) / 2.0);
    assert_eq!(bounds.y, (display.height - height) / 2.0);
}

#[test]
fn natural_size_clamps_rows() {
    let layout = PanelLayout::default();
    assert_eq!(layout.search_size(0), layout.search_size(1));
    assert_eq!(
        layout.search_size(500),
        layout.search_size(layout.search.max_rows)
    );
}

#[test]
fn reopening_starts_a_fresh_session() {
    let (mut panels, _) = controller_with(&["Groceries", "Workout"]);
    panels.open_search_panel().unwrap();
    panels
        .handle_search_key(WidgetEvent::SetQuery("gro".into()))
        .unwrap();
    assert!(panels.close_search_panel(CloseReason::Explicit));
    assert_eq!(panels.host().live_windows(), 0);
    assert!(panels.search_session().is_none());

    panels.open_search_panel().unwrap();
    let session = panels.search_session().unwrap();
    assert_eq!(session.query(), "");
    assert_eq!(session.filtered().len(), 2);
    assert_eq!(panels.host().created(), 2);
}

#[test]
fn toggle_twice_restores_state() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    let window = panels.search_window().unwrap();

    assert_eq!(
        panels.toggle_interaction(PanelTarget::Search),
        Some(PanelState::OpenPassthrough)
    );
    assert!(panels.host().window(window).unwrap().passthrough);

    assert_eq!(
        panels.toggle_interaction(PanelTarget::Search),
        Some(PanelState::OpenInteractive)
    );
    assert!(!panels.host().window(window).unwrap().passthrough);
}

#[test]
fn toggle_on_closed_panel_does_nothing() {
    let (mut panels, _) = controller_with(&["A"]);
    assert_eq!(panels.toggle_interaction(PanelTarget::Search), None);
    assert_eq!(panels.toggle_interaction(PanelTarget::Frontmost), None);
    assert_eq!(panels.search_state(), PanelState::Closed);
}

#[test]
fn passthrough_survives_raise() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    panels.toggle_interaction(PanelTarget::Search);
    panels.open_search_panel().unwrap();

    assert_eq!(panels.search_state(), PanelState::OpenPassthrough);
    let window = panels.host().window(panels.search_window().unwrap()).unwrap();
    assert!(!window.key_window);
}

#[test]
fn focus_loss_closes_only_interactive_search() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    panels.toggle_interaction(PanelTarget::Search);

    assert!(!panels.handle_focus_lost(PanelId::SEARCH));
    assert_eq!(panels.search_state(), PanelState::OpenPassthrough);

    panels.toggle_interaction(PanelTarget::Search);
    assert!(panels.handle_focus_lost(PanelId::SEARCH));
    assert_eq!(panels.search_state(), PanelState::Closed);
    assert_eq!(panels.host().live_windows(), 0);
}

#[test]
fn escape_closes_search() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    assert_eq!(
        panels.handle_search_key(WidgetEvent::Escape),
        Ok(KeyOutcome::Closed)
    );
    assert_eq!(panels.search_state(), PanelState::Closed);
}

#[test]
fn keys_on_closed_search_are_rejected() {
    let (mut panels, _) = controller_with(&["A"]);
    assert_eq!(
        panels.handle_search_key(WidgetEvent::Commit),
        Err(PanelError::SearchPanelClosed)
    );
}

#[test]
fn passthrough_search_ignores_keys() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    panels.toggle_interaction(PanelTarget::Search);
    assert_eq!(
        panels.handle_search_key(WidgetEvent::Move(Direction::Down)),
        Ok(KeyOutcome::Ignored)
    );
    assert_eq!(panels.search_session().unwrap().selected(), None);
}

#[test]
fn commit_opens_selected_note_and_closes_search() {
    let (mut panels, ids) = controller_with(&["Groceries", "Workout", "Grocery List"]);
    panels.open_search_panel().unwrap();
    panels
        .handle_search_key(WidgetEvent::SetQuery("gro".into()))
        .unwrap();
    panels
        .handle_search_key(WidgetEvent::Move(Direction::Down))
        .unwrap();

    let outcome = panels.handle_search_key(WidgetEvent::Commit).unwrap();
    let KeyOutcome::Committed {
        intent,
        opened: Some(panel),
    } = outcome
    else {
        panic!("expected an opened note panel, got {:?}", outcome);
    };

    assert_eq!(intent, CommitIntent::OpenNote(ids[0]));
    assert_eq!(panels.search_state(), PanelState::Closed);
    assert_eq!(panels.panel_state(panel), PanelState::OpenInteractive);
    assert_eq!(panels.note_session(panel).unwrap().note_id(), ids[0]);
    assert_eq!(panels.frontmost(), Some(panel));
}

#[test]
fn commit_without_selection_is_noop() {
    let (mut panels, _) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    assert_eq!(
        panels.handle_search_key(WidgetEvent::Commit),
        Ok(KeyOutcome::Committed {
            intent: CommitIntent::NoOp,
            opened: None
        })
    );
    assert_eq!(panels.search_state(), PanelState::OpenInteractive);
}

#[test]
fn commit_on_empty_results_creates_named_note() {
    let (mut panels, _) = controller_with(&["Ideas"]);
    panels.open_search_panel().unwrap();
    panels
        .handle_search_key(WidgetEvent::SetQuery("  Packing list ".into()))
        .unwrap();

    let outcome = panels.handle_search_key(WidgetEvent::Commit).unwrap();
    let KeyOutcome::Committed {
        intent: CommitIntent::CreateNote,
        opened: Some(panel),
    } = outcome
    else {
        panic!("expected a created note, got {:?}", outcome);
    };

    let store = panels.store().borrow();
    assert_eq!(store.len(), 2);
    assert_eq!(store.notes()[1].name, "Packing list");
    drop(store);
    assert_eq!(
        panels.note_session(panel).unwrap().name().as_deref(),
        Some("Packing list")
    );
}

#[test]
fn commit_on_empty_store_creates_untitled_note() {
    let (mut panels, _) = controller_with(&[]);
    panels.open_search_panel().unwrap();
    panels.handle_search_key(WidgetEvent::Commit).unwrap();

    assert_eq!(panels.store().borrow().notes()[0].name, UNTITLED_NOTE_NAME);
    assert_eq!(panels.note_panels().len(), 1);
}

#[test]
fn paste_appends_single_line() {
    let (mut panels, _) = controller_with(&["Grocery List"]);
    panels.open_search_panel().unwrap();
    panels
        .handle_search_key(WidgetEvent::SetQuery("gro".into()))
        .unwrap();
    let outcome = panels
        .handle_search_key(WidgetEvent::Paste("cery\nlist".into()))
        .unwrap();

    assert_eq!(outcome, KeyOutcome::QueryChanged { matches: 1 });
    assert_eq!(panels.search_session().unwrap().query(), "grocery list");
}

#[test]
fn note_panels_are_independent_at_fixed_origin() {
    let (mut panels, ids) = controller_with(&["A", "B"]);
    let first = panels.open_note_panel(ids[0]).unwrap();
    let second = panels.open_note_panel(ids[1]).unwrap();
    assert_ne!(first, second);

    let layout = PanelLayout::default();
    for panel in [first, second] {
        let window = panels.note_window(panel).unwrap();
        let bounds = panels.host().window(window).unwrap().spec.bounds;
        assert_eq!((bounds.x, bounds.y), (layout.note.x, layout.note.y));
    }

    // focus loss never closes note panels
    assert!(!panels.handle_focus_lost(first));
    assert_eq!(panels.panel_state(first), PanelState::OpenInteractive);

    panels.close_note_panel(first).unwrap();
    assert_eq!(panels.panel_state(first), PanelState::Closed);
    assert_eq!(
        panels.close_note_panel(first),
        Err(PanelError::PanelClosed(first))
    );
}

#[test]
fn unknown_note_is_rejected() {
    let (mut panels, _) = controller_with(&["A"]);
    let missing = NoteId::new();
    assert_eq!(
        panels.open_note_panel(missing),
        Err(PanelError::NoteNotFound(missing))
    );
    assert_eq!(panels.host().live_windows(), 0);
}

#[test]
fn frontmost_toggle_targets_latest_panel() {
    let (mut panels, ids) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    let note = panels.open_note_panel(ids[0]).unwrap();

    assert_eq!(
        panels.toggle_interaction(PanelTarget::Frontmost),
        Some(PanelState::OpenPassthrough)
    );
    assert_eq!(panels.panel_state(note), PanelState::OpenPassthrough);
    assert_eq!(panels.search_state(), PanelState::OpenInteractive);

    // raising the launcher makes it the target again
    panels.open_search_panel().unwrap();
    panels.toggle_interaction(PanelTarget::Frontmost);
    assert_eq!(panels.search_state(), PanelState::OpenPassthrough);
}

#[test]
fn note_edits_reach_the_store() {
    let (mut panels, ids) = controller_with(&["A"]);
    let panel = panels.open_note_panel(ids[0]).unwrap();

    assert_eq!(panels.update_note(panel, "hello"), Ok(true));
    assert_eq!(panels.store().borrow().get(ids[0]).unwrap().content, "hello");

    panels.store().borrow_mut().remove(ids[0]);
    assert_eq!(panels.update_note(panel, "gone"), Ok(false));
}

#[test]
fn host_failure_leaves_panel_closed() {
    let notes = vec![Note::new("A", "")];
    let store = NoteStore::in_memory(notes).into_shared();
    let mut host = HeadlessHost::new();
    host.fail_next_create("display unavailable");
    let mut panels = PanelController::new(host, store, PanelLayout::default());

    assert_eq!(
        panels.open_search_panel(),
        Err(PanelError::Host("display unavailable".into()))
    );
    assert_eq!(panels.search_state(), PanelState::Closed);
    assert!(panels.open_search_panel().is_ok());
}

#[test]
fn describe_lists_open_panels() {
    let (mut panels, ids) = controller_with(&["A"]);
    panels.open_search_panel().unwrap();
    panels.open_note_panel(ids[0]).unwrap();

    let info = panels.describe();
    assert_eq!(info.len(), 2);
    assert_eq!(info[0].kind, "search");
    assert_eq!(info[1].title, "A");

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json[1]["state"], "openInteractive");
    assert_eq!(json[1]["noteId"], serde_json::json!(ids[0].to_string()));

    panels.close_all();
    assert_eq!(panels.host().live_windows(), 0);
}
