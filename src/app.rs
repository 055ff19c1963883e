//! UI-thread event loop.
//!
//! Feeder threads (OS hotkeys, stdin) only send [`AppEvent`]s; everything
//! that touches panels, sessions or the store happens here, one event at a time.

use async_channel::Receiver;
use tracing::{debug, info, info_span, warn};

use crate::error::ResultExt;
use crate::hotkeys::{HotkeyAction, HotkeyBackend, HotkeyEvent, HotkeyRegistry};
use crate::input::WidgetEvent;
use crate::logging;
use crate::panels::{CloseReason, PanelController, PanelHost, PanelId, PanelTarget};
use crate::shortcuts::Shortcut;
use crate::stdin_commands::ExternalCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Hotkey(HotkeyEvent),
    Command(ExternalCommand),
    Shutdown,
}

impl From<ExternalCommand> for AppEvent {
    fn from(cmd: ExternalCommand) -> Self {
        AppEvent::Command(cmd)
    }
}

impl From<HotkeyEvent> for AppEvent {
    fn from(event: HotkeyEvent) -> Self {
        AppEvent::Hotkey(event)
    }
}

/// Log lines included in a `listPanels` snapshot.
const RECENT_LOG_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<H: PanelHost, B: HotkeyBackend> {
    panels: PanelController<H>,
    hotkeys: HotkeyRegistry<B>,
    /// Actions posted by hotkey dispatch, drained after every event.
    actions: Receiver<HotkeyAction>,
}

impl<H: PanelHost, B: HotkeyBackend> App<H, B> {
    pub fn new(
        panels: PanelController<H>,
        hotkeys: HotkeyRegistry<B>,
        actions: Receiver<HotkeyAction>,
    ) -> Self {
        Self {
            panels,
            hotkeys,
            actions,
        }
    }

    pub fn panels(&self) -> &PanelController<H> {
        &self.panels
    }

    pub fn hotkeys(&self) -> &HotkeyRegistry<B> {
        &self.hotkeys
    }

    /// Process events until `Quit`, `Shutdown` or every sender is gone.
    pub fn run(&mut self, events: Receiver<AppEvent>) {
        info!("Event loop started");
        while let Ok(event) = events.recv_blocking() {
            if self.handle_event(event) == Flow::Quit {
                break;
            }
        }
        self.shutdown();
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        let flow = match event {
            AppEvent::Hotkey(event) => {
                self.hotkeys.dispatch(event);
                Flow::Continue
            }
            AppEvent::Command(cmd) => self.handle_command(cmd),
            AppEvent::Shutdown => Flow::Quit,
        };
        self.drain_actions();
        flow
    }

    /// Run every queued hotkey action.
    pub fn drain_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.perform(action);
        }
    }

    pub fn perform(&mut self, action: HotkeyAction) {
        debug!(?action, "Performing hotkey action");
        match action {
            HotkeyAction::OpenLauncher => {
                self.panels.open_search_panel().log_err();
            }
            HotkeyAction::ToggleInteraction => {
                if self
                    .panels
                    .toggle_interaction(PanelTarget::Frontmost)
                    .is_none()
                {
                    debug!("No open panel to toggle");
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: ExternalCommand) -> Flow {
        let span = info_span!("command", request_id = cmd.request_id().unwrap_or(""));
        let _guard = span.enter();

        match cmd {
            ExternalCommand::OpenSearch { .. } => {
                self.panels.open_search_panel().log_err();
            }
            ExternalCommand::CloseSearch { .. } => {
                self.panels.close_search_panel(CloseReason::Explicit);
            }
            ExternalCommand::SetQuery { text, .. } => {
                self.panels
                    .handle_search_key(WidgetEvent::SetQuery(text))
                    .warn_on_err();
            }
            ExternalCommand::Paste { text, .. } => {
                self.panels
                    .handle_search_key(WidgetEvent::Paste(text))
                    .warn_on_err();
            }
            ExternalCommand::SimulateKey { key, modifiers, .. } => {
                self.simulate_key(&key, &modifiers);
            }
            ExternalCommand::FocusLost { panel, .. } => {
                self.panels
                    .handle_focus_lost(panel.unwrap_or(PanelId::SEARCH));
            }
            ExternalCommand::ToggleInteraction { panel, .. } => {
                let target = match panel {
                    None => PanelTarget::Frontmost,
                    Some(PanelId::SEARCH) => PanelTarget::Search,
                    Some(panel) => PanelTarget::Note(panel),
                };
                if self.panels.toggle_interaction(target).is_none() {
                    warn!(?target, "Toggle ignored, panel is not open");
                }
            }
            ExternalCommand::Hotkey { action, .. } => self.perform(action),
            ExternalCommand::UpdateNote { panel, text, .. } => {
                self.panels.update_note(panel, &text).warn_on_err();
            }
            ExternalCommand::CloseNote { panel, .. } => {
                self.panels.close_note_panel(panel).warn_on_err();
            }
            ExternalCommand::ListPanels { .. } => self.list_panels(),
            ExternalCommand::Quit { .. } => {
                info!("Quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn simulate_key(&mut self, key: &str, modifiers: &[String]) {
        if !modifiers.is_empty() {
            let combo = format!("{}+{}", modifiers.join("+"), key);
            match Shortcut::parse(&combo) {
                Ok(shortcut) => {
                    if self.hotkeys.dispatch_keystroke(&shortcut).is_none() {
                        debug!(shortcut = %shortcut.to_canonical_string(), "No in-app shortcut bound");
                    }
                }
                Err(e) => warn!(error = %e, combo = %combo, "Unparseable key combination"),
            }
            return;
        }

        match WidgetEvent::from_key_name(key) {
            Some(event) => {
                self.panels.handle_search_key(event).warn_on_err();
            }
            None => debug!(key = key, "Plain key left to the text field"),
        }
    }

    /// Open panels, active bindings and the most recent log lines.
    pub fn snapshot(&self) -> serde_json::Value {
        let bindings: Vec<String> = self
            .hotkeys
            .bindings()
            .iter()
            .map(|(_, binding)| {
                format!(
                    "{:?} {} -> {:?}",
                    binding.scope,
                    binding.shortcut.to_canonical_string(),
                    binding.action
                )
            })
            .collect();
        serde_json::json!({
            "panels": self.panels.describe(),
            "bindings": bindings,
            "recentLogs": logging::recent_logs(RECENT_LOG_LINES),
        })
    }

    fn list_panels(&self) {
        let json = self.snapshot().to_string();
        info!(snapshot = %json, "Panel snapshot");
        logging::log("PANELS", &json);
    }

    /// Close every window and wait for pending note writes.
    pub fn shutdown(&mut self) {
        self.panels.close_all();
        self.panels.store().borrow().flush();
        info!("Event loop stopped");
    }
}
