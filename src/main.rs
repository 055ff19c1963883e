use anyhow::Context;
use tracing::{info, warn};

use comfy_notes::app::{App, AppEvent};
use comfy_notes::config;
use comfy_notes::error::ResultExt;
use comfy_notes::hotkeys::{self, GlobalHotkeyBackend, HotkeyRegistry};
use comfy_notes::logging;
use comfy_notes::notes::{NoteStore, NotesFile};
use comfy_notes::panels::{HeadlessHost, PanelController, PanelLayout};
use comfy_notes::stdin_commands;

/// Queue depth for events coming from feeder threads.
const EVENT_QUEUE_CAPACITY: usize = 100;
/// Queue depth for actions posted by hotkey dispatch.
const ACTION_QUEUE_CAPACITY: usize = 16;

fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init();

    let config = config::load_config();
    logging::log(
        "APP",
        &format!(
            "Loaded config: launcher={}, toggle={}, notes={}",
            config.launcher_hotkey.to_shortcut_string(),
            config.toggle_interaction_hotkey.to_shortcut_string(),
            config.get_notes_path().display()
        ),
    );

    let store = NoteStore::with_file(NotesFile::new(config.get_notes_path()))
        .seed_samples_when_empty(config.get_seed_sample_notes())
        .into_shared();
    let panels = PanelController::new(
        HeadlessHost::new(),
        store,
        PanelLayout::from_config(&config),
    );

    let (event_tx, event_rx) = async_channel::bounded::<AppEvent>(EVENT_QUEUE_CAPACITY);
    let (action_tx, action_rx) = async_channel::bounded(ACTION_QUEUE_CAPACITY);

    // Without an OS hotkey manager the app still runs on stdin commands alone
    let backend = GlobalHotkeyBackend::new().log_err();
    let has_backend = backend.is_some();
    let mut registry = HotkeyRegistry::new(backend, action_tx);
    let failed = registry.register_defaults(&config);
    if !failed.is_empty() {
        warn!(count = failed.len(), "Some hotkeys could not be registered");
    }

    if has_backend {
        let hotkey_tx = event_tx.clone();
        hotkeys::start_event_forwarder(move |event| hotkeys::forward_event(&hotkey_tx, event))
            .log_err();
    }

    stdin_commands::start_stdin_listener(event_tx).context("stdin commands unavailable")?;

    info!(
        event_type = "app_lifecycle",
        action = "ready",
        "comfy-notes ready"
    );
    let mut app = App::new(panels, registry, action_rx);
    app.run(event_rx);

    info!(event_type = "app_lifecycle", action = "stopped", "comfy-notes stopped");
    Ok(())
}
