//! External command handling via stdin.
//!
//! Stands in for the text widget and window system when the app runs
//! headless: each JSONL line is one command. Used for testing and automation.
//!
//! # Protocol
//!
//! ```json
//! {"type": "openSearch"}
//! {"type": "setQuery", "text": "gro"}
//! {"type": "simulateKey", "key": "down"}
//! {"type": "simulateKey", "key": "1", "modifiers": ["cmd", "shift"]}
//! {"type": "paste", "text": "multi\nline"}
//! {"type": "updateNote", "panel": 1, "text": "new content"}
//! {"type": "listPanels", "requestId": "req-7"}
//! {"type": "quit"}
//! ```
//!
//! # Example Usage
//!
//! ```bash
//! printf '%s\n' '{"type":"openSearch"}' '{"type":"setQuery","text":"ideas"}' | ./comfy-notes
//! ```

use std::io::BufRead;

use anyhow::Context;
use async_channel::Sender;
use serde::Deserialize;

use crate::hotkeys::HotkeyAction;
use crate::logging;
use crate::panels::PanelId;

/// External commands that can be sent to the app via stdin
///
/// All commands accept an optional `requestId`, logged with the operations it
/// triggers so a driver can correlate its requests with the log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// Open (or raise) the search panel
    OpenSearch {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    CloseSearch {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Replace the query text, as if typed
    SetQuery {
        text: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Paste into the query field; line breaks become spaces
    Paste {
        text: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Key press. With modifiers it is matched against in-app shortcuts,
    /// otherwise it goes to the query field.
    SimulateKey {
        key: String,
        #[serde(default)]
        modifiers: Vec<String>,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// A panel lost key focus (defaults to the search panel)
    FocusLost {
        #[serde(default)]
        panel: Option<PanelId>,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Flip interactive/passthrough (defaults to the frontmost panel)
    ToggleInteraction {
        #[serde(default)]
        panel: Option<PanelId>,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Act as if a bound hotkey fired
    Hotkey {
        action: HotkeyAction,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Replace a note panel's content
    UpdateNote {
        panel: PanelId,
        text: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    CloseNote {
        panel: PanelId,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Log open panels and hotkey bindings as JSON
    ListPanels {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    Quit {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
}

impl ExternalCommand {
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ExternalCommand::OpenSearch { request_id }
            | ExternalCommand::CloseSearch { request_id }
            | ExternalCommand::SetQuery { request_id, .. }
            | ExternalCommand::Paste { request_id, .. }
            | ExternalCommand::SimulateKey { request_id, .. }
            | ExternalCommand::FocusLost { request_id, .. }
            | ExternalCommand::ToggleInteraction { request_id, .. }
            | ExternalCommand::Hotkey { request_id, .. }
            | ExternalCommand::UpdateNote { request_id, .. }
            | ExternalCommand::CloseNote { request_id, .. }
            | ExternalCommand::ListPanels { request_id }
            | ExternalCommand::Quit { request_id } => request_id.as_deref(),
        }
    }
}

/// Parse one JSONL line.
pub fn parse_command(line: &str) -> anyhow::Result<ExternalCommand> {
    serde_json::from_str(line.trim())
        .with_context(|| format!("invalid command line: {}", line.trim()))
}

/// Start a thread that listens on stdin for external JSONL commands.
///
/// See [`forward_commands`] for how lines are handled.
pub fn start_stdin_listener<T>(tx: Sender<T>) -> anyhow::Result<()>
where
    T: From<ExternalCommand> + Send + 'static,
{
    std::thread::Builder::new()
        .name("stdin-commands".to_owned())
        .spawn(move || {
            logging::log("STDIN", "External command listener started");
            let stdin = std::io::stdin();
            forward_commands(stdin.lock(), &tx);
            logging::log("STDIN", "External command listener exiting");
        })
        .context("failed to spawn stdin listener")?;
    Ok(())
}

/// Read JSONL commands from `reader` and send them on `tx` until input ends.
///
/// Unparseable lines are logged and skipped. End of input (or a read error)
/// sends a final `Quit` so the app stops even while other senders, such as
/// the hotkey forwarder, are still alive. Returns early if `tx` is closed.
pub fn forward_commands<R, T>(reader: R, tx: &Sender<T>)
where
    R: BufRead,
    T: From<ExternalCommand>,
{
    for line in reader.lines() {
        match line {
            Ok(line) if !line.trim().is_empty() => match parse_command(&line) {
                Ok(cmd) => {
                    logging::log("STDIN", &format!("Parsed command: {:?}", cmd));
                    // blocking send: this thread has nothing else to do
                    if tx.send_blocking(T::from(cmd)).is_err() {
                        logging::log("STDIN", "Command channel closed, exiting");
                        return;
                    }
                }
                Err(e) => {
                    logging::log("STDIN", &format!("Failed to parse command: {:#}", e));
                }
            },
            Ok(_) => {}
            Err(e) => {
                logging::log("STDIN", &format!("Error reading stdin: {}", e));
                break;
            }
        }
    }
    logging::log("STDIN", "End of input, requesting quit");
    let _ = tx.send_blocking(T::from(ExternalCommand::Quit { request_id: None }));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_search_deserialization() {
        let cmd = parse_command(r#"{"type": "openSearch"}"#).unwrap();
        assert_eq!(cmd, ExternalCommand::OpenSearch { request_id: None });
    }

    #[test]
    fn request_id_is_optional_everywhere() {
        let cmd = parse_command(r#"{"type": "setQuery", "text": "gro", "requestId": "req-1"}"#)
            .unwrap();
        assert_eq!(cmd.request_id(), Some("req-1"));
        match cmd {
            ExternalCommand::SetQuery { text, .. } => assert_eq!(text, "gro"),
            other => panic!("Expected SetQuery, got {:?}", other),
        }
    }

    #[test]
    fn simulate_key_modifiers_default_empty() {
        let cmd = parse_command(r#"{"type": "simulateKey", "key": "enter"}"#).unwrap();
        match cmd {
            ExternalCommand::SimulateKey { key, modifiers, .. } => {
                assert_eq!(key, "enter");
                assert!(modifiers.is_empty());
            }
            other => panic!("Expected SimulateKey, got {:?}", other),
        }
    }

    #[test]
    fn panel_targets_parse_as_numbers() {
        let cmd = parse_command(r#"{"type": "updateNote", "panel": 2, "text": "x"}"#).unwrap();
        assert_eq!(
            cmd,
            ExternalCommand::UpdateNote {
                panel: PanelId(2),
                text: "x".into(),
                request_id: None
            }
        );

        let cmd = parse_command(r#"{"type": "focusLost"}"#).unwrap();
        assert_eq!(
            cmd,
            ExternalCommand::FocusLost {
                panel: None,
                request_id: None
            }
        );
    }

    #[test]
    fn hotkey_action_names() {
        let cmd = parse_command(r#"{"type": "hotkey", "action": "toggleInteraction"}"#).unwrap();
        assert_eq!(
            cmd,
            ExternalCommand::Hotkey {
                action: HotkeyAction::ToggleInteraction,
                request_id: None
            }
        );
    }

    #[test]
    fn invalid_json_fails_with_context() {
        let err = parse_command("not json").unwrap_err();
        assert!(format!("{:#}", err).contains("invalid command line"));
    }

    #[test]
    fn missing_required_field_fails() {
        assert!(parse_command(r#"{"type": "paste"}"#).is_err());
        assert!(parse_command(r#"{"type": "closeNote"}"#).is_err());
    }

    #[test]
    fn end_of_input_sends_quit() {
        let input = "{\"type\": \"openSearch\"}\n\nnot json\n{\"type\": \"closeSearch\"}\n";
        let (tx, rx) = async_channel::bounded::<ExternalCommand>(8);
        forward_commands(std::io::Cursor::new(input), &tx);

        let received: Vec<ExternalCommand> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                ExternalCommand::OpenSearch { request_id: None },
                ExternalCommand::CloseSearch { request_id: None },
                ExternalCommand::Quit { request_id: None },
            ]
        );
    }

    #[test]
    fn closed_channel_stops_reading() {
        let (tx, rx) = async_channel::bounded::<ExternalCommand>(8);
        rx.close();
        forward_commands(std::io::Cursor::new("{\"type\": \"openSearch\"}\n"), &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unknown_type_fails() {
        assert!(parse_command(r#"{"type": "run", "path": "/x"}"#).is_err());
    }
}
