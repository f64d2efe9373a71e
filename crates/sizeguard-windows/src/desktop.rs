use sizeguard_core::{Rect, WindowResult};
use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;

use crate::window::Window;
use crate::{enumerate, monitor};

/// The interactive Win32 desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Desktop;

impl sizeguard_core::Desktop for Desktop {
    type Window = Window;

    fn top_level_windows(&self) -> WindowResult<Vec<Window>> {
        enumerate::top_level_windows()
    }

    fn child_windows(&self, parent: &Window) -> WindowResult<Vec<Window>> {
        enumerate::child_windows(parent)
    }

    fn primary_work_area(&self) -> WindowResult<Rect> {
        monitor::primary_work_area()
    }

    fn foreground_window(&self) -> Option<Window> {
        // SAFETY: GetForegroundWindow takes no arguments.
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then(|| Window::new(hwnd))
    }

    fn window(&self, handle: usize) -> Window {
        Window::from_raw(handle)
    }
}
