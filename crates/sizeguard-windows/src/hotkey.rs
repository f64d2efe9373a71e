use std::sync::mpsc::Sender;

use sizeguard_core::config::{Keybinding, Modifier};
use sizeguard_core::{Action, log_debug, log_warn};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};

use crate::keys;

/// A registered global hotkey.
struct Hotkey {
    id: i32,
    action: Action,
}

/// Owns the process's global hotkey registrations.
///
/// Hotkeys are registered on the current thread's message queue and
/// `WM_HOTKEY` arrives through the message pump on the same thread.
/// Every registration is released when the manager is dropped, which
/// must also happen on that thread.
pub struct HotkeyManager {
    hotkeys: Vec<Hotkey>,
    sender: Sender<Action>,
}

impl HotkeyManager {
    /// Creates a manager that sends triggered actions through `sender`.
    pub fn new(sender: Sender<Action>) -> Self {
        Self {
            hotkeys: Vec::new(),
            sender,
        }
    }

    /// Registers keybindings from configuration.
    ///
    /// Unknown key names and combinations already taken by another
    /// program are logged and skipped; the rest still register.
    pub fn register_from_config(&mut self, bindings: &[Keybinding]) {
        for (i, binding) in bindings.iter().enumerate() {
            let id = (i + 1) as i32;

            let Some(vk) = keys::vk_from_name(&binding.key) else {
                log_warn!("unknown key name {:?} for {}", binding.key, binding.action);
                continue;
            };

            let modifiers = binding
                .modifiers
                .iter()
                .fold(MOD_NOREPEAT, |flags, m| flags | modifier_to_flag(*m));

            self.register(id, modifiers, vk, binding);
        }
        log_debug!("{} of {} hotkeys registered", self.hotkeys.len(), bindings.len());
    }

    /// Dispatches a `WM_HOTKEY` message by hotkey ID.
    pub fn dispatch(&self, hotkey_id: i32) {
        if let Some(hotkey) = self.hotkeys.iter().find(|h| h.id == hotkey_id) {
            let _ = self.sender.send(hotkey.action);
        }
    }

    fn register(&mut self, id: i32, modifiers: HOT_KEY_MODIFIERS, vk: u32, binding: &Keybinding) {
        // SAFETY: RegisterHotKey registers a system-wide hotkey on the
        // current thread's message queue. IDs are unique per manager.
        let result = unsafe { RegisterHotKey(None, id, modifiers, vk) };

        if let Err(e) = result {
            log_warn!(
                "could not register {:?}+{} for {}: {}",
                binding.modifiers,
                binding.key,
                binding.action,
                e.message()
            );
            return;
        }

        self.hotkeys.push(Hotkey {
            id,
            action: binding.action,
        });
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for hotkey in &self.hotkeys {
            // SAFETY: UnregisterHotKey removes a registration made by
            // this manager on this thread.
            unsafe {
                let _ = UnregisterHotKey(None, hotkey.id);
            }
        }
    }
}

/// Converts a platform-agnostic modifier to a Win32 hotkey flag.
fn modifier_to_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Shift => MOD_SHIFT,
        Modifier::Ctrl => MOD_CONTROL,
        Modifier::Win => MOD_WIN,
    }
}
