use std::mem;
use std::path::Path;

use sizeguard_core::{Rect, VisualState, WindowResult, log_debug};
use windows::Win32::Foundation::{CloseHandle, HWND};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GWL_STYLE, GetWindowLongPtrW, GetWindowPlacement, GetWindowTextLengthW,
    GetWindowTextW, GetWindowThreadProcessId, HWND_NOTOPMOST, HWND_TOPMOST, IsIconic,
    IsWindowVisible, IsZoomed, RealGetWindowClassW, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SetWindowPlacement, SetWindowPos, ShowWindow,
    WINDOWPLACEMENT, WS_EX_TOPMOST, WS_THICKFRAME,
};
use windows::core::PWSTR;

use crate::frame;
use crate::os::{OsResultExt, ensure_window};

/// A window on the Windows platform, identified by its `HWND`.
///
/// `HWND` is an opaque handle: a number that identifies a window to the OS.
/// The handle is stored as a plain integer so the wrapper can cross
/// threads; every attribute is queried from the OS on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    handle: usize,
}

impl Window {
    /// Creates a new `Window` from an `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self {
            handle: hwnd.0 as usize,
        }
    }

    /// Creates a new `Window` from a raw handle value (pointer-sized integer).
    ///
    /// This allows callers to construct a `Window` without depending on the
    /// `windows` crate directly.
    pub fn from_raw(handle: usize) -> Self {
        Self { handle }
    }

    /// Returns the window handle.
    pub fn hwnd(&self) -> HWND {
        HWND(self.handle as *mut _)
    }

    /// Returns the ID of the process that created the window, or 0 if
    /// the window is gone.
    pub fn process_id(&self) -> u32 {
        let mut pid = 0u32;
        // SAFETY: GetWindowThreadProcessId only writes the PID out-param.
        unsafe { GetWindowThreadProcessId(self.hwnd(), Some(&mut pid)) };
        pid
    }

    fn style(&self) -> u32 {
        // SAFETY: reading window longs has no side effects.
        unsafe { GetWindowLongPtrW(self.hwnd(), GWL_STYLE) as u32 }
    }

    fn ex_style(&self) -> u32 {
        // SAFETY: reading window longs has no side effects.
        unsafe { GetWindowLongPtrW(self.hwnd(), GWL_EXSTYLE) as u32 }
    }

    fn placement(&self) -> WindowResult<WINDOWPLACEMENT> {
        let mut placement = WINDOWPLACEMENT {
            length: mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };

        // SAFETY: `length` is set as the API requires.
        unsafe { GetWindowPlacement(self.hwnd(), &mut placement) }.for_window(self.hwnd())?;
        Ok(placement)
    }
}

impl sizeguard_core::Window for Window {
    fn handle(&self) -> usize {
        self.handle
    }

    fn title(&self) -> WindowResult<String> {
        ensure_window(self.hwnd())?;

        // SAFETY: GetWindowTextLengthW and GetWindowTextW read window text
        // into a buffer we own without modifying window state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd());
            if length == 0 {
                return Ok(String::new());
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd(), &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..copied as usize]))
        }
    }

    fn class(&self) -> WindowResult<String> {
        ensure_window(self.hwnd())?;

        // SAFETY: RealGetWindowClassW reads the window class name.
        // 256 is the maximum class name length in Win32.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd(), &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..length as usize]))
        }
    }

    fn executable_name(&self) -> WindowResult<String> {
        let pid = self.process_id();
        if pid == 0 {
            ensure_window(self.hwnd())?;
            return Err(format!("no process for window 0x{:X}", self.handle).into());
        }

        // SAFETY: the process handle is closed before returning on every
        // path; the name buffer outlives the query.
        let path = unsafe {
            let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid).os()?;
            let mut buffer = [0u16; 1024];
            let mut size = buffer.len() as u32;
            let result = QueryFullProcessImageNameW(
                process,
                PROCESS_NAME_WIN32,
                PWSTR(buffer.as_mut_ptr()),
                &mut size,
            );
            let _ = CloseHandle(process);
            result.os()?;
            String::from_utf16_lossy(&buffer[..size as usize])
        };

        Ok(Path::new(&path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(path))
    }

    fn is_resizable(&self) -> WindowResult<bool> {
        ensure_window(self.hwnd())?;
        Ok(self.style() & WS_THICKFRAME.0 != 0)
    }

    fn is_visible(&self) -> WindowResult<bool> {
        ensure_window(self.hwnd())?;
        // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
        Ok(unsafe { IsWindowVisible(self.hwnd()).as_bool() })
    }

    fn visual_state(&self) -> WindowResult<VisualState> {
        ensure_window(self.hwnd())?;

        // SAFETY: IsIconic and IsZoomed are simple state queries.
        let state = unsafe {
            if IsIconic(self.hwnd()).as_bool() {
                VisualState::Minimized
            } else if IsZoomed(self.hwnd()).as_bool() {
                VisualState::Maximized
            } else {
                VisualState::Normal
            }
        };
        Ok(state)
    }

    fn set_visual_state(&self, state: VisualState) -> WindowResult<()> {
        ensure_window(self.hwnd())?;

        let command = match state {
            VisualState::Normal => SW_RESTORE,
            VisualState::Minimized => SW_MINIMIZE,
            VisualState::Maximized => SW_MAXIMIZE,
        };

        // SAFETY: ShowWindow returns the previous visibility, not an
        // error, so its result is ignored.
        unsafe {
            let _ = ShowWindow(self.hwnd(), command);
        }
        Ok(())
    }

    fn window_rect(&self) -> WindowResult<Rect> {
        frame::window_rect(self.hwnd())
    }

    fn frame_bounds(&self) -> WindowResult<Rect> {
        frame::extended_frame_bounds(self.hwnd())
    }

    fn position(&self) -> WindowResult<Rect> {
        Ok(frame::to_rect(&self.placement()?.rcNormalPosition))
    }

    fn set_position(&self, rect: &Rect) -> WindowResult<()> {
        let mut placement = self.placement()?;
        placement.rcNormalPosition = frame::to_win32(rect);

        log_debug!("set_position 0x{:X}: {rect}", self.handle);

        // SAFETY: the placement was filled by GetWindowPlacement, only the
        // normal position changed.
        unsafe { SetWindowPlacement(self.hwnd(), &placement) }.for_window(self.hwnd())
    }

    fn is_topmost(&self) -> WindowResult<bool> {
        ensure_window(self.hwnd())?;
        Ok(self.ex_style() & WS_EX_TOPMOST.0 != 0)
    }

    fn set_topmost(&self, topmost: bool) -> WindowResult<()> {
        let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };

        // SAFETY: SetWindowPos with NOMOVE | NOSIZE only changes Z order.
        unsafe {
            SetWindowPos(
                self.hwnd(),
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        }
        .for_window(self.hwnd())
    }
}
