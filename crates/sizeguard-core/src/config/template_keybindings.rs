use super::super::keybinding::{self, Modifier};

const HEADER: &str = r##"# SizeGuard keybindings
# Location: ~/.config/sizeguard/keybindings.toml
#
# Each [[keybinding]] entry maps a key combination to an action.
#
# Available actions:
#   zone-right, zone-left, zone-top, zone-bottom,
#   zone-top-left, zone-top-right, zone-bottom-left, zone-bottom-right,
#   zone-center, zone-fake-maximized
#     Pressing a zone key repeatedly cycles through its sizes.
#     Append -N (e.g. zone-right-0) to jump to a specific size.
#   maximize, minimize, toggle-always-on-top, realign
#
# Available modifiers: alt, shift, ctrl, win
#
# Key names: A-Z, 0-9, F1-F24, Enter, Space, Tab, Escape, Left, Right,
#            Up, Down, Insert, Delete, Home, End, PageUp, PageDown
"##;

/// Generates the default `keybindings.toml` contents with explanatory comments.
///
/// This is used by `sizeguard init` to create a starter keybindings file.
/// The entries are rendered from [`keybinding::defaults`] so the file and
/// the built-in fallback never drift apart.
pub fn generate_keybindings() -> String {
    let mut content = String::from(HEADER);
    for binding in keybinding::defaults() {
        let modifiers: Vec<String> = binding
            .modifiers
            .iter()
            .map(|m| format!("\"{}\"", modifier_name(*m)))
            .collect();
        content.push_str(&format!(
            "\n[[keybinding]]\naction = \"{}\"\nkey = \"{}\"\nmodifiers = [{}]\n",
            binding.action,
            binding.key,
            modifiers.join(", ")
        ));
    }
    content
}

fn modifier_name(modifier: Modifier) -> &'static str {
    match modifier {
        Modifier::Alt => "alt",
        Modifier::Shift => "shift",
        Modifier::Ctrl => "ctrl",
        Modifier::Win => "win",
    }
}
