use sizeguard_core::log_trace;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, TranslateMessage, WM_HOTKEY,
};

use crate::hotkey::HotkeyManager;

/// Pumps the event loop thread's queue until `WM_QUIT`.
///
/// Thread-level `WM_HOTKEY` messages have no target window and are
/// handed to `hotkeys`; everything else goes to the window procedures
/// (the sink window) and keeps out-of-context WinEvents flowing.
pub(crate) fn run(hotkeys: &HotkeyManager) {
    let mut msg = MSG::default();

    // SAFETY: GetMessageW fills a MSG we own; it returns FALSE on WM_QUIT.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if msg.message == WM_HOTKEY && msg.hwnd.is_invalid() {
            let id = msg.wParam.0 as i32;
            log_trace!("hotkey {id} pressed");
            hotkeys.dispatch(id);
            continue;
        }

        // SAFETY: dispatching a message received from our own queue.
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
