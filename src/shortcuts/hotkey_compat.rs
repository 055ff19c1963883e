//! Bridge between `Shortcut` and the `global_hotkey` crate's `HotKey`.

use global_hotkey::hotkey::{Code, HotKey, Modifiers as HotkeyModifiers};

use super::types::Shortcut;

/// Convert a canonical shortcut to a registrable `HotKey`.
///
/// Returns `None` for keys the OS hotkey layer cannot express.
pub fn to_global_hotkey(shortcut: &Shortcut) -> Option<HotKey> {
    let code = key_to_code(&shortcut.key)?;
    Some(HotKey::new(Some(to_hotkey_modifiers(shortcut)), code))
}

fn to_hotkey_modifiers(shortcut: &Shortcut) -> HotkeyModifiers {
    let mut mods = HotkeyModifiers::empty();
    if shortcut.modifiers.cmd {
        mods |= HotkeyModifiers::META;
    }
    if shortcut.modifiers.ctrl {
        mods |= HotkeyModifiers::CONTROL;
    }
    if shortcut.modifiers.alt {
        mods |= HotkeyModifiers::ALT;
    }
    if shortcut.modifiers.shift {
        mods |= HotkeyModifiers::SHIFT;
    }
    mods
}

fn key_to_code(key: &str) -> Option<Code> {
    let code = match key {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" => Code::Enter,
        "tab" => Code::Tab,
        "escape" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" => Code::Delete,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "semicolon" => Code::Semicolon,
        "quote" => Code::Quote,
        "comma" => Code::Comma,
        "period" => Code::Period,
        "slash" => Code::Slash,
        "backslash" => Code::Backslash,
        "bracketleft" => Code::BracketLeft,
        "bracketright" => Code::BracketRight,
        "minus" => Code::Minus,
        "equal" => Code::Equal,
        "backquote" => Code::Backquote,
        _ => return None,
    };
    Some(code)
}
