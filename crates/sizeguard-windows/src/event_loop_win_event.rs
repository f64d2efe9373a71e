use sizeguard_core::WindowResult;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS};

use crate::event::{self, EVENT_MAX, EVENT_MIN};

use super::emit;

/// A system-wide WinEvent hook, removed on drop.
///
/// Must be installed and dropped on the thread that runs the message
/// pump; out-of-context callbacks are delivered through its queue.
pub(crate) struct WinEventHook(HWINEVENTHOOK);

impl WinEventHook {
    pub(crate) fn install() -> WindowResult<Self> {
        // SAFETY: SetWinEventHook registers our callback for system-wide
        // window events. WINEVENT_OUTOFCONTEXT means the callback runs in
        // our process. WINEVENT_SKIPOWNPROCESS ignores our own windows.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_MIN,
                EVENT_MAX,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };

        if hook.is_invalid() {
            return Err("Failed to set WinEvent hook".into());
        }
        Ok(Self(hook))
    }
}

impl Drop for WinEventHook {
    fn drop(&mut self) {
        // SAFETY: the hook was returned by SetWinEventHook on this thread.
        unsafe {
            let _ = UnhookWinEvent(self.0);
        }
    }
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if let Some(window_event) = event::translate(event, hwnd, id_object) {
        emit(window_event);
    }
}
