use serde::{Deserialize, Serialize};

use crate::{Action, Zone};

/// A user-configured keybinding that maps a key combination to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinding {
    /// The action to trigger.
    pub action: Action,
    /// Key name (e.g. "Right", "PageDown", "Insert", "T").
    pub key: String,
    /// Modifier keys (e.g. ["win", "alt"]).
    pub modifiers: Vec<Modifier>,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

/// Returns the default keybindings.
///
/// Halves: Win + arrows (also Win + PageDown/Delete/Home/End)
/// Corners and center: Win + Alt + PageUp/PageDown/Home/End/Insert
/// Maximize: Win + Insert, minimize: Win + PageUp, topmost: Win + T
///
/// Adding Ctrl to a zone binding jumps straight to the zone's first
/// rectangle instead of cycling, except on the arrow keys where
/// Win+Ctrl+Left/Right belong to the virtual desktop switcher.
pub fn defaults() -> Vec<Keybinding> {
    use Modifier::{Alt, Win};

    let zones: [(Zone, &str, &[Modifier]); 13] = [
        (Zone::Right, "Right", &[Win]),
        (Zone::Right, "PageDown", &[Win]),
        (Zone::Left, "Left", &[Win]),
        (Zone::Left, "Delete", &[Win]),
        (Zone::Top, "Up", &[Win]),
        (Zone::Top, "Home", &[Win]),
        (Zone::Bottom, "Down", &[Win]),
        (Zone::Bottom, "End", &[Win]),
        (Zone::TopRight, "PageUp", &[Win, Alt]),
        (Zone::BottomRight, "PageDown", &[Win, Alt]),
        (Zone::BottomLeft, "End", &[Win, Alt]),
        (Zone::TopLeft, "Home", &[Win, Alt]),
        (Zone::Center, "Insert", &[Win, Alt]),
    ];

    let mut bindings = Vec::with_capacity(zones.len() * 2 + 3);
    for (zone, key, modifiers) in zones {
        bindings.push(bind(Action::Zone { zone, index: None }, key, modifiers));
    }
    for (zone, key, modifiers) in zones {
        // Win+Ctrl+Left/Right switch virtual desktops.
        if matches!(key, "Left" | "Right") {
            continue;
        }
        let mut with_ctrl = modifiers.to_vec();
        with_ctrl.push(Modifier::Ctrl);
        bindings.push(bind(Action::Zone { zone, index: Some(0) }, key, &with_ctrl));
    }

    bindings.push(bind(Action::Maximize, "Insert", &[Win]));
    bindings.push(bind(Action::Minimize, "PageUp", &[Win]));
    bindings.push(bind(Action::ToggleAlwaysOnTop, "T", &[Win]));

    bindings
}

fn bind(action: Action, key: &str, modifiers: &[Modifier]) -> Keybinding {
    Keybinding {
        action,
        key: key.into(),
        modifiers: modifiers.to_vec(),
    }
}
