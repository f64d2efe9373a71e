/// Named keys and their Windows virtual key codes. Names are matched
/// case-insensitively; aliases share a code.
const NAMED_KEYS: &[(&str, u32)] = &[
    // Navigation block, used by the default zone bindings
    ("INSERT", 0x2D),
    ("INS", 0x2D),
    ("DELETE", 0x2E),
    ("DEL", 0x2E),
    ("HOME", 0x24),
    ("END", 0x23),
    ("PAGEUP", 0x21),
    ("PGUP", 0x21),
    ("PRIOR", 0x21),
    ("PAGEDOWN", 0x22),
    ("PGDN", 0x22),
    ("NEXT", 0x22),
    // Arrows
    ("LEFT", 0x25),
    ("UP", 0x26),
    ("RIGHT", 0x27),
    ("DOWN", 0x28),
    // Editing
    ("ENTER", 0x0D),
    ("RETURN", 0x0D),
    ("TAB", 0x09),
    ("ESCAPE", 0x1B),
    ("ESC", 0x1B),
    ("SPACE", 0x20),
    ("BACKSPACE", 0x08),
    // Numeric keypad
    ("NUMPAD0", 0x60),
    ("NUMPAD1", 0x61),
    ("NUMPAD2", 0x62),
    ("NUMPAD3", 0x63),
    ("NUMPAD4", 0x64),
    ("NUMPAD5", 0x65),
    ("NUMPAD6", 0x66),
    ("NUMPAD7", 0x67),
    ("NUMPAD8", 0x68),
    ("NUMPAD9", 0x69),
    // OEM punctuation
    ("MINUS", 0xBD),
    ("PLUS", 0xBB),
    ("EQUALS", 0xBB),
    ("COMMA", 0xBC),
    ("PERIOD", 0xBE),
    ("SLASH", 0xBF),
    ("SEMICOLON", 0xBA),
    ("BACKSLASH", 0xDC),
    ("LBRACKET", 0xDB),
    ("RBRACKET", 0xDD),
    ("QUOTE", 0xDE),
    ("BACKTICK", 0xC0),
];

/// Converts a key name to a Windows virtual key code.
///
/// Supports letters (A-Z), digits (0-9), function keys (F1-F24) and
/// the names in the navigation, arrow, editing, keypad and punctuation
/// groups. Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.to_ascii_uppercase();

    if let [ch] = upper.as_bytes()
        && (ch.is_ascii_uppercase() || ch.is_ascii_digit())
    {
        return Some(u32::from(*ch));
    }

    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(0x70 + n - 1); // VK_F1 = 0x70
    }

    NAMED_KEYS
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|&(_, vk)| vk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map_to_ascii() {
        // Assert
        assert_eq!(vk_from_name("t"), Some(0x54));
        assert_eq!(vk_from_name("T"), Some(0x54));
        assert_eq!(vk_from_name("7"), Some(0x37));
    }

    #[test]
    fn navigation_block_and_aliases() {
        // Assert
        assert_eq!(vk_from_name("Insert"), Some(0x2D));
        assert_eq!(vk_from_name("PageUp"), vk_from_name("pgup"));
        assert_eq!(vk_from_name("PageDown"), Some(0x22));
        assert_eq!(vk_from_name("home"), Some(0x24));
        assert_eq!(vk_from_name("End"), Some(0x23));
        assert_eq!(vk_from_name("Delete"), Some(0x2E));
    }

    #[test]
    fn function_keys_up_to_f24() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
        assert_eq!(vk_from_name("F0"), None);
    }

    #[test]
    fn every_default_binding_key_resolves() {
        // Arrange
        let bindings = sizeguard_core::config::keybinding::defaults();

        // Assert
        for binding in bindings {
            assert!(
                vk_from_name(&binding.key).is_some(),
                "unresolved key {:?}",
                binding.key
            );
        }
    }

    #[test]
    fn unknown_returns_none() {
        // Assert
        assert_eq!(vk_from_name("INVALID"), None);
        assert_eq!(vk_from_name(""), None);
    }
}
