use super::*;

#[test]
fn parse_launcher_default() {
    let shortcut = Shortcut::parse("ctrl+shift+space").unwrap();
    assert_eq!(shortcut.key, "space");
    assert_eq!(shortcut.modifiers, Modifiers::ctrl_shift());
}

#[test]
fn parse_accepts_whitespace_and_aliases() {
    let shortcut = Shortcut::parse("  Command Shift 1 ").unwrap();
    assert_eq!(shortcut.key, "1");
    assert_eq!(shortcut.modifiers, Modifiers::cmd_shift());

    let alt = Shortcut::parse("opt+KeyK").unwrap();
    assert!(alt.modifiers.alt);
    assert_eq!(alt.key, "k");
}

#[test]
fn parse_errors() {
    assert_eq!(Shortcut::parse(""), Err(ShortcutParseError::Empty));
    assert_eq!(
        Shortcut::parse("ctrl+shift"),
        Err(ShortcutParseError::MissingKey)
    );
    assert_eq!(
        Shortcut::parse("ctrl+a+b"),
        Err(ShortcutParseError::UnknownToken("b".to_string()))
    );
    assert_eq!(
        Shortcut::parse("ctrl+banana"),
        Err(ShortcutParseError::UnknownKey("banana".to_string()))
    );
}

#[test]
fn canonical_string_has_stable_modifier_order() {
    let a = Shortcut::parse("shift+ctrl+space").unwrap();
    let b = Shortcut::parse("ctrl+shift+space").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_canonical_string(), "ctrl+shift+space");
}

#[test]
fn canonicalize_dom_codes() {
    assert_eq!(canonicalize_key("KeyN"), "n");
    assert_eq!(canonicalize_key("Digit1"), "1");
    assert_eq!(canonicalize_key("ArrowDown"), "down");
    assert_eq!(canonicalize_key("Return"), "enter");
    assert_eq!(canonicalize_key("NumpadEnter"), "enter");
    assert_eq!(canonicalize_key("Esc"), "escape");
}

#[test]
fn known_keys() {
    assert!(is_known_key("a"));
    assert!(is_known_key("9"));
    assert!(is_known_key("f12"));
    assert!(is_known_key("f24"));
    assert!(!is_known_key("f25"));
    assert!(!is_known_key("banana"));
}

#[test]
fn display_per_platform() {
    let shortcut = Shortcut::parse("ctrl+shift+space").unwrap();
    assert_eq!(shortcut.display_for_platform(Platform::MacOS), "⌃⇧␣");
    assert_eq!(
        shortcut.display_for_platform(Platform::Linux),
        "Ctrl+Shift+Space"
    );

    let toggle = Shortcut::parse("cmd+shift+1").unwrap();
    assert_eq!(toggle.display_for_platform(Platform::MacOS), "⇧⌘1");
    assert_eq!(
        toggle.display_for_platform(Platform::Windows),
        "Shift+Super+1"
    );
}

#[test]
fn converts_to_global_hotkey() {
    let launcher = Shortcut::parse("ctrl+shift+space").unwrap();
    let a = to_global_hotkey(&launcher).expect("space is registrable");
    let b = to_global_hotkey(&Shortcut::parse("shift+ctrl+space").unwrap()).unwrap();
    assert_eq!(a.id(), b.id());

    let other = to_global_hotkey(&Shortcut::parse("cmd+shift+1").unwrap()).unwrap();
    assert_ne!(a.id(), other.id());

    assert!(to_global_hotkey(&Shortcut::parse("ctrl+f20").unwrap()).is_none());
}
