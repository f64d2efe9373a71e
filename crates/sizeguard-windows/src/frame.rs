use std::mem;

use sizeguard_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

use crate::os::OsResultExt;

/// Returns the legacy window rectangle, which on Windows 10/11 includes
/// the invisible resize borders around the visible frame.
pub fn window_rect(hwnd: HWND) -> WindowResult<Rect> {
    let mut rect = RECT::default();

    // SAFETY: GetWindowRect writes into a stack RECT we own.
    unsafe { GetWindowRect(hwnd, &mut rect) }.for_window(hwnd)?;

    Ok(to_rect(&rect))
}

/// Returns the visible bounds of a window using DWM extended frame bounds.
///
/// Fails when DWM composition is unavailable. The resizer substitutes
/// its fallback padding in that case.
pub fn extended_frame_bounds(hwnd: HWND) -> WindowResult<Rect> {
    let mut frame = RECT::default();

    // SAFETY: DwmGetWindowAttribute writes at most size_of::<RECT>()
    // bytes into `frame`.
    unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    }
    .for_window(hwnd)?;

    Ok(to_rect(&frame))
}

pub(crate) fn to_rect(rect: &RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

pub(crate) fn to_win32(rect: &Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}
