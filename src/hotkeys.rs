//! Hotkey registration and dispatch.
//!
//! `Global` bindings are registered with the OS through a [`HotkeyBackend`];
//! `App` bindings are matched against in-app keystrokes only. Firing a
//! binding never touches UI state: the action is posted into a bounded
//! channel that the UI loop drains.

use async_channel::{Sender, TrySendError};
use global_hotkey::{
    hotkey::HotKey, Error as GlobalHotkeyError, GlobalHotKeyEvent, GlobalHotKeyManager,
    HotKeyState,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::HotkeyError;
use crate::logging;
use crate::shortcuts::{self, Shortcut};

// =============================================================================
// Types
// =============================================================================

/// Who delivers the key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyScope {
    /// Administered by the OS; fires even when the app has no window.
    Global,
    /// Matched by the app while it has a window.
    App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HotkeyAction {
    OpenLauncher,
    ToggleInteraction,
}

/// Opaque token returned by `register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub shortcut: Shortcut,
    pub scope: HotkeyScope,
    pub action: HotkeyAction,
    /// OS hotkey id; `None` for `App` bindings.
    pub hotkey_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One OS hotkey delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyEvent {
    pub id: u32,
    pub state: KeyState,
}

impl HotkeyEvent {
    pub fn pressed(id: u32) -> Self {
        Self {
            id,
            state: KeyState::Pressed,
        }
    }

    pub fn released(id: u32) -> Self {
        Self {
            id,
            state: KeyState::Released,
        }
    }
}

impl From<GlobalHotKeyEvent> for HotkeyEvent {
    fn from(event: GlobalHotKeyEvent) -> Self {
        let state = match event.state {
            HotKeyState::Pressed => KeyState::Pressed,
            HotKeyState::Released => KeyState::Released,
        };
        Self {
            id: event.id,
            state,
        }
    }
}

// =============================================================================
// OS backend
// =============================================================================

/// OS-level registration. Implementations return the id that later
/// [`HotkeyEvent`]s carry.
pub trait HotkeyBackend {
    fn register(&mut self, shortcut: &Shortcut) -> Result<u32, HotkeyError>;
    fn unregister(&mut self, hotkey_id: u32) -> Result<(), HotkeyError>;
}

/// Backend over `global_hotkey::GlobalHotKeyManager`.
///
/// Must be created on the main thread.
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    registered: HashMap<u32, HotKey>,
}

impl GlobalHotkeyBackend {
    pub fn new() -> Result<Self, HotkeyError> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| HotkeyError::InstallFailed(e.to_string()))?;
        Ok(Self {
            manager,
            registered: HashMap::new(),
        })
    }
}

fn map_register_error(e: GlobalHotkeyError, shortcut: &Shortcut) -> HotkeyError {
    match e {
        GlobalHotkeyError::AlreadyRegistered(_) | GlobalHotkeyError::FailedToRegister(_) => {
            HotkeyError::AlreadyBoundElsewhere {
                shortcut: shortcut.to_canonical_string(),
            }
        }
        other => HotkeyError::InstallFailed(other.to_string()),
    }
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn register(&mut self, shortcut: &Shortcut) -> Result<u32, HotkeyError> {
        let hotkey = shortcuts::to_global_hotkey(shortcut)
            .ok_or_else(|| HotkeyError::Unsupported(shortcut.to_canonical_string()))?;
        self.manager
            .register(hotkey)
            .map_err(|e| map_register_error(e, shortcut))?;
        let id = hotkey.id();
        self.registered.insert(id, hotkey);
        Ok(id)
    }

    fn unregister(&mut self, hotkey_id: u32) -> Result<(), HotkeyError> {
        match self.registered.remove(&hotkey_id) {
            Some(hotkey) => self
                .manager
                .unregister(hotkey)
                .map_err(|e| HotkeyError::InstallFailed(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Forward OS hotkey events from a background thread.
///
/// `forward` runs on that thread; returning `false` stops forwarding (for
/// example when the receiving channel is closed).
pub fn start_event_forwarder<F>(forward: F) -> Result<(), HotkeyError>
where
    F: Fn(HotkeyEvent) -> bool + Send + 'static,
{
    std::thread::Builder::new()
        .name("hotkey-events".to_owned())
        .spawn(move || {
            let receiver = GlobalHotKeyEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if !forward(event.into()) {
                    logging::log("HOTKEY", "Event channel closed, stopping hotkey forwarder");
                    break;
                }
            }
        })
        .map(|_| ())
        .map_err(|e| HotkeyError::InstallFailed(e.to_string()))
}

/// Hand one OS event to the UI thread's queue.
///
/// Presses are dropped when the queue is full. Releases always wait for room:
/// a lost release would leave the id held and swallow every later press.
/// Returns `false` once the queue is closed.
pub fn forward_event<T: From<HotkeyEvent>>(tx: &Sender<T>, event: HotkeyEvent) -> bool {
    match event.state {
        KeyState::Released => tx.send_blocking(T::from(event)).is_ok(),
        KeyState::Pressed => match tx.try_send(T::from(event)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(hotkey_id = event.id, "Event queue full, dropping hotkey press");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        },
    }
}

// =============================================================================
// Registry
// =============================================================================

pub struct HotkeyRegistry<B: HotkeyBackend> {
    /// `None` when the OS manager could not be created; global registration then fails.
    backend: Option<B>,
    bindings: HashMap<RegistrationHandle, HotkeyBinding>,
    by_shortcut: HashMap<(Shortcut, HotkeyScope), RegistrationHandle>,
    by_hotkey_id: HashMap<u32, RegistrationHandle>,
    /// OS ids currently held down; further presses are auto-repeat.
    held: HashSet<u32>,
    next_handle: u64,
    actions: Sender<HotkeyAction>,
}

impl<B: HotkeyBackend> HotkeyRegistry<B> {
    pub fn new(backend: Option<B>, actions: Sender<HotkeyAction>) -> Self {
        Self {
            backend,
            bindings: HashMap::new(),
            by_shortcut: HashMap::new(),
            by_hotkey_id: HashMap::new(),
            held: HashSet::new(),
            next_handle: 0,
            actions,
        }
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Bind `shortcut` in `scope` to `action`.
    ///
    /// Registering a (shortcut, scope) pair again replaces the action and
    /// returns the existing handle without another OS registration.
    pub fn register(
        &mut self,
        shortcut: Shortcut,
        scope: HotkeyScope,
        action: HotkeyAction,
    ) -> Result<RegistrationHandle, HotkeyError> {
        let key = (shortcut.clone(), scope);
        if let Some(handle) = self.by_shortcut.get(&key).copied() {
            if let Some(binding) = self.bindings.get_mut(&handle) {
                info!(
                    shortcut = %shortcut.to_canonical_string(),
                    ?scope,
                    old = ?binding.action,
                    new = ?action,
                    "Replacing hotkey action"
                );
                binding.action = action;
            }
            return Ok(handle);
        }

        let hotkey_id = match scope {
            HotkeyScope::Global => {
                let backend = self.backend.as_mut().ok_or_else(|| {
                    HotkeyError::InstallFailed("global hotkey manager unavailable".to_string())
                })?;
                Some(backend.register(&shortcut)?)
            }
            HotkeyScope::App => None,
        };

        self.next_handle += 1;
        let handle = RegistrationHandle(self.next_handle);
        if let Some(id) = hotkey_id {
            self.by_hotkey_id.insert(id, handle);
        }
        self.by_shortcut.insert(key, handle);
        logging::log_hotkey_event(
            &shortcut.to_canonical_string(),
            &format!("registered {:?} {:?}", scope, action),
            hotkey_id.unwrap_or(0),
        );
        self.bindings.insert(
            handle,
            HotkeyBinding {
                shortcut,
                scope,
                action,
                hotkey_id,
            },
        );
        Ok(handle)
    }

    /// Release a binding. Unknown or already released handles are ignored.
    pub fn unregister(&mut self, handle: RegistrationHandle) {
        let Some(binding) = self.bindings.remove(&handle) else {
            return;
        };
        self.by_shortcut
            .remove(&(binding.shortcut.clone(), binding.scope));

        if let Some(id) = binding.hotkey_id {
            self.by_hotkey_id.remove(&id);
            self.held.remove(&id);
            if let Some(backend) = self.backend.as_mut() {
                if let Err(e) = backend.unregister(id) {
                    warn!(error = %e, hotkey_id = id, "Failed to release OS hotkey");
                }
            }
        }
        logging::log_hotkey_event(
            &binding.shortcut.to_canonical_string(),
            "unregistered",
            binding.hotkey_id.unwrap_or(0),
        );
    }

    /// Handle one OS delivery. Posts and returns the action once per
    /// physical press; repeats, releases and unknown ids yield `None`.
    pub fn dispatch(&mut self, event: HotkeyEvent) -> Option<HotkeyAction> {
        if event.state == KeyState::Released {
            self.held.remove(&event.id);
            return None;
        }

        let Some(handle) = self.by_hotkey_id.get(&event.id) else {
            debug!(hotkey_id = event.id, "Ignoring unknown hotkey id");
            return None;
        };
        let action = self.bindings.get(handle)?.action;

        if !self.held.insert(event.id) {
            debug!(hotkey_id = event.id, "Ignoring hotkey auto-repeat");
            return None;
        }

        self.post(action);
        Some(action)
    }

    /// Match an in-app keystroke against `App` bindings.
    pub fn dispatch_keystroke(&mut self, shortcut: &Shortcut) -> Option<HotkeyAction> {
        let handle = self
            .by_shortcut
            .get(&(shortcut.clone(), HotkeyScope::App))?;
        let action = self.bindings.get(handle)?.action;
        self.post(action);
        Some(action)
    }

    fn post(&self, action: HotkeyAction) {
        match self.actions.try_send(action) {
            Ok(()) => debug!(?action, "Posted hotkey action"),
            Err(TrySendError::Full(_)) => {
                warn!(?action, "Action queue full, dropping hotkey action")
            }
            Err(TrySendError::Closed(_)) => {
                warn!(?action, "Action queue closed, dropping hotkey action")
            }
        }
    }

    /// Active bindings in registration order.
    pub fn bindings(&self) -> Vec<(RegistrationHandle, &HotkeyBinding)> {
        let mut bindings: Vec<_> = self.bindings.iter().map(|(h, b)| (*h, b)).collect();
        bindings.sort_by_key(|(handle, _)| *handle);
        bindings
    }

    /// Register the configured launcher (global) and toggle (in-app) shortcuts.
    ///
    /// Failures are logged once and returned; startup continues without them.
    pub fn register_defaults(&mut self, config: &Config) -> Vec<HotkeyError> {
        let wanted = [
            (
                &config.launcher_hotkey,
                HotkeyScope::Global,
                HotkeyAction::OpenLauncher,
            ),
            (
                &config.toggle_interaction_hotkey,
                HotkeyScope::App,
                HotkeyAction::ToggleInteraction,
            ),
        ];

        let mut errors = Vec::new();
        for (hotkey, scope, action) in wanted {
            let result = hotkey
                .to_shortcut()
                .map_err(HotkeyError::from)
                .and_then(|shortcut| self.register(shortcut, scope, action));
            if let Err(e) = result {
                warn!(
                    error = %e,
                    shortcut = %hotkey.to_shortcut_string(),
                    ?action,
                    "Hotkey unavailable, continuing without it"
                );
                errors.push(e);
            }
        }
        errors
    }
}
