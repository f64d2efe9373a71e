use std::sync::atomic::{AtomicU32, Ordering};

use sizeguard_core::{WindowEvent, WindowResult, log_warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DeregisterShellHookWindow, DestroyWindow, RegisterClassW,
    RegisterShellHookWindow, RegisterWindowMessageW, SPI_SETWORKAREA, WM_DISPLAYCHANGE,
    WM_SETTINGCHANGE, WNDCLASSW, WS_EX_TOOLWINDOW,
};
use windows::core::w;

use crate::os::OsResultExt;

use super::emit;

/// `wParam` of a shell hook message announcing a new top-level window.
const HSHELL_WINDOWCREATED: usize = 1;

/// Message ID the shell uses for hook notifications, from
/// `RegisterWindowMessageW("SHELLHOOK")`. Zero until the sink exists.
static SHELL_HOOK_MSG: AtomicU32 = AtomicU32::new(0);

/// A hidden window that receives broadcast and shell hook messages.
///
/// It reports `WM_SETTINGCHANGE(SPI_SETWORKAREA)` as a work-area change,
/// `WM_DISPLAYCHANGE` as a display change and `HSHELL_WINDOWCREATED` as
/// an opened window. The shell hook is deregistered and the window
/// destroyed on drop.
///
/// Must NOT be a message-only window (`HWND_MESSAGE` parent) because those
/// do not receive broadcast messages. Instead we create a regular hidden
/// window with `WS_EX_TOOLWINDOW` to keep it out of the taskbar.
pub(crate) struct EventSink {
    hwnd: HWND,
    shell_hook: bool,
}

impl EventSink {
    pub(crate) fn create() -> WindowResult<Self> {
        let class_name = w!("SizeGuardEventSink");

        // SAFETY: the class and window are registered and created on the
        // event loop thread, which also destroys the window on drop.
        let hwnd = unsafe {
            let wc = WNDCLASSW {
                lpfnWndProc: Some(event_sink_proc),
                lpszClassName: class_name,
                ..Default::default()
            };

            if RegisterClassW(&wc) == 0 {
                return Err("Failed to register SizeGuardEventSink class".into());
            }

            // WS_EX_TOOLWINDOW: no taskbar entry.
            // No WS_VISIBLE: window stays hidden.
            // No HWND_MESSAGE parent: window receives broadcast messages.
            CreateWindowExW(
                WS_EX_TOOLWINDOW,
                class_name,
                w!("SizeGuardEventSink"),
                Default::default(),
                0,
                0,
                0,
                0,
                None,
                None,
                None,
                None,
            )
            .os()?
        };

        // SAFETY: both calls only take the window we just created.
        let shell_hook = unsafe {
            SHELL_HOOK_MSG.store(RegisterWindowMessageW(w!("SHELLHOOK")), Ordering::Relaxed);
            RegisterShellHookWindow(hwnd).as_bool()
        };
        if !shell_hook {
            log_warn!("could not register shell hook, relying on WinEvents for new windows");
        }

        Ok(Self { hwnd, shell_hook })
    }
}

impl Drop for EventSink {
    fn drop(&mut self) {
        // SAFETY: the window is ours and still alive.
        unsafe {
            if self.shell_hook {
                let _ = DeregisterShellHookWindow(self.hwnd);
            }
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// WNDPROC for the event sink window.
unsafe extern "system" fn event_sink_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let shell_hook_msg = SHELL_HOOK_MSG.load(Ordering::Relaxed);

    if msg == WM_DISPLAYCHANGE {
        emit(WindowEvent::DisplayChanged);
    } else if msg == WM_SETTINGCHANGE && wparam.0 == SPI_SETWORKAREA.0 as usize {
        emit(WindowEvent::WorkAreaChanged);
    } else if shell_hook_msg != 0
        && msg == shell_hook_msg
        && (wparam.0 & 0x7FFF) == HSHELL_WINDOWCREATED
        && lparam.0 != 0
    {
        emit(WindowEvent::Opened {
            hwnd: lparam.0 as usize,
        });
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}
