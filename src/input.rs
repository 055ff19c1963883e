//! Events the query text field forwards to the search panel.
//!
//! Arrow keys, Enter and Escape are intercepted instead of being treated as
//! text; everything else arrives as a whole-query edit.

use crate::search::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    Move(Direction),
    Commit,
    Escape,
    /// The field's full text after an ordinary edit.
    SetQuery(String),
    /// Pasted text; clamped to one line and appended to the query.
    Paste(String),
}

impl WidgetEvent {
    /// Map a key name (as sent by `simulateKey`) to an intercepted event.
    ///
    /// Returns `None` for keys the field handles itself.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "up" | "arrowup" => Some(WidgetEvent::Move(Direction::Up)),
            "down" | "arrowdown" => Some(WidgetEvent::Move(Direction::Down)),
            "enter" | "return" | "numpadenter" | "kpenter" => Some(WidgetEvent::Commit),
            "escape" | "esc" => Some(WidgetEvent::Escape),
            _ => None,
        }
    }
}

/// Replace every line break (`\r\n`, `\n`, `\r`) with a single space.
pub fn single_line_paste(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_map_to_events() {
        assert_eq!(
            WidgetEvent::from_key_name("ArrowUp"),
            Some(WidgetEvent::Move(Direction::Up))
        );
        assert_eq!(
            WidgetEvent::from_key_name("down"),
            Some(WidgetEvent::Move(Direction::Down))
        );
        assert_eq!(WidgetEvent::from_key_name("Return"), Some(WidgetEvent::Commit));
        assert_eq!(WidgetEvent::from_key_name("NumpadEnter"), Some(WidgetEvent::Commit));
        assert_eq!(WidgetEvent::from_key_name("esc"), Some(WidgetEvent::Escape));
        assert_eq!(WidgetEvent::from_key_name("a"), None);
    }

    #[test]
    fn paste_is_clamped_to_one_line() {
        assert_eq!(single_line_paste("a\nb"), "a b");
        assert_eq!(single_line_paste("a\r\nb"), "a b");
        assert_eq!(single_line_paste("a\rb\n"), "a b ");
        assert_eq!(single_line_paste("plain"), "plain");
    }
}
