use sizeguard_core::WindowResult;

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumChildWindows, EnumWindows, GA_PARENT, GetAncestor,
};
use windows::core::BOOL;

use crate::os::{OsResultExt, ensure_window};
use crate::window::Window;

/// Enumerates every top-level window, in Z order.
///
/// No filtering happens here: visibility, visual state and resizability
/// are decided by the engine's resizer.
pub fn top_level_windows() -> WindowResult<Vec<Window>> {
    let mut windows: Vec<Window> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<Window> to collect results. This is safe
    // because EnumWindows runs synchronously: the Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(collect_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )
        .os()?;
    }

    Ok(windows)
}

/// Enumerates the direct children of `parent`.
///
/// `EnumChildWindows` walks all descendants, so grandchildren are
/// dropped by comparing each window's parent.
pub fn child_windows(parent: &Window) -> WindowResult<Vec<Window>> {
    ensure_window(parent.hwnd())?;

    let mut descendants: Vec<Window> = Vec::new();

    // SAFETY: same LPARAM contract as in `top_level_windows`. The BOOL
    // result of EnumChildWindows carries no error information.
    unsafe {
        let _ = EnumChildWindows(
            Some(parent.hwnd()),
            Some(collect_window_callback),
            LPARAM(&mut descendants as *mut _ as isize),
        );
    }

    Ok(descendants
        .into_iter()
        // SAFETY: GetAncestor is a simple query.
        .filter(|child| unsafe { GetAncestor(child.hwnd(), GA_PARENT) } == parent.hwnd())
        .collect())
}

/// Callback shared by both enumerations: pushes every window into the
/// `Vec<Window>` passed through `lparam`.
///
/// Returns `TRUE` to continue enumeration.
///
/// # How Win32 callbacks work
///
/// Win32 can't call Rust closures directly. Instead, we use `extern "system"`
/// (the Windows calling convention) and pass data through an `LPARAM`, a
/// pointer-sized integer used as "user data".
unsafe extern "system" fn collect_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to the caller's Vec<Window>.
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<Window>) };
    windows.push(Window::new(hwnd));

    BOOL(1)
}
