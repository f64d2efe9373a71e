use sizeguard_core::log_debug;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows virtualizes coordinates of windows on scaled
/// monitors, and the padding measured between the window rectangle
/// and the DWM frame bounds (which are never virtualized) comes out
/// wrong. Must be called once at startup, before any window query.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    if let Err(e) = unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        // Already set, e.g. by an application manifest.
        log_debug!("DPI awareness not changed: {}", e.message());
    }
}
