use sizeguard_core::{Error, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::IsWindow;

/// Converts `windows` crate results into the engine's [`WindowResult`].
pub(crate) trait OsResultExt<T> {
    /// Maps any failure to [`Error::Os`].
    fn os(self) -> WindowResult<T>;

    /// Maps a failure to [`Error::WindowGone`] if `hwnd` has been
    /// destroyed, otherwise to [`Error::Os`].
    fn for_window(self, hwnd: HWND) -> WindowResult<T>;
}

impl<T> OsResultExt<T> for windows::core::Result<T> {
    fn os(self) -> WindowResult<T> {
        self.map_err(|e| Error::Os(e.message().to_string()))
    }

    fn for_window(self, hwnd: HWND) -> WindowResult<T> {
        self.map_err(|e| {
            if is_window(hwnd) {
                Error::Os(e.message().to_string())
            } else {
                Error::WindowGone(hwnd.0 as usize)
            }
        })
    }
}

/// Returns whether `hwnd` still identifies an existing window.
pub(crate) fn is_window(hwnd: HWND) -> bool {
    // SAFETY: IsWindow accepts any handle value, including stale ones.
    unsafe { IsWindow(Some(hwnd)).as_bool() }
}

/// Fails with [`Error::WindowGone`] if `hwnd` has been destroyed.
///
/// Used before Win32 queries that report failure as an empty value
/// instead of an error code.
pub(crate) fn ensure_window(hwnd: HWND) -> WindowResult<()> {
    if is_window(hwnd) {
        Ok(())
    } else {
        Err(Error::WindowGone(hwnd.0 as usize))
    }
}
