use std::mem;

use sizeguard_core::{Rect, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, HMONITOR, MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MonitorFromWindow,
};

use crate::frame;

/// Returns the work area of the primary monitor in screen coordinates.
///
/// The work area excludes the taskbar and any docked toolbars.
pub fn primary_work_area() -> WindowResult<Rect> {
    // MonitorFromWindow with a null HWND and MONITOR_DEFAULTTOPRIMARY
    // returns the primary monitor handle.
    let monitor = unsafe { MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY) };
    work_area_for_monitor(monitor)
}

/// Queries the work area for a given monitor handle.
fn work_area_for_monitor(monitor: HMONITOR) -> WindowResult<Rect> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct with
    // monitor dimensions. We set cbSize as required by the API.
    let success = unsafe { GetMonitorInfoW(monitor, &mut info) };

    if !success.as_bool() {
        return Err("Failed to get monitor info".into());
    }

    Ok(frame::to_rect(&info.rcWork))
}
