use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Rect, WindowResult};

/// The OS-level visual state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    Normal,
    Minimized,
    Maximized,
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
        })
    }
}

/// Platform-agnostic window trait.
///
/// Each platform crate (e.g. `sizeguard-windows`) provides its own
/// implementation. The engine never owns a window: it only reads
/// attributes and writes position and state. Any call may fail with
/// [`Error::WindowGone`](crate::Error::WindowGone) if the window closed
/// in the meantime.
pub trait Window {
    /// Returns the raw, pointer-sized window handle.
    fn handle(&self) -> usize;

    /// Returns the window title.
    fn title(&self) -> WindowResult<String>;

    /// Returns the window class name.
    fn class(&self) -> WindowResult<String>;

    /// Returns the owning process's executable basename without the
    /// `.exe` extension (e.g. `devenv`).
    fn executable_name(&self) -> WindowResult<String>;

    /// Returns whether the user can resize the window by its frame.
    fn is_resizable(&self) -> WindowResult<bool>;

    /// Returns the window's visibility flag.
    fn is_visible(&self) -> WindowResult<bool>;

    fn visual_state(&self) -> WindowResult<VisualState>;

    fn set_visual_state(&self, state: VisualState) -> WindowResult<()>;

    /// Returns the legacy bounding rectangle in screen coordinates,
    /// including any invisible resize borders.
    fn window_rect(&self) -> WindowResult<Rect>;

    /// Returns the compositor's extended frame bounds in screen
    /// coordinates: the pixels the user actually sees.
    fn frame_bounds(&self) -> WindowResult<Rect>;

    /// Returns the window's normal (restored) position in workspace
    /// coordinates, i.e. relative to the working area's origin.
    fn position(&self) -> WindowResult<Rect>;

    /// Moves the window to a normal position in workspace coordinates.
    fn set_position(&self, rect: &Rect) -> WindowResult<()>;

    fn is_topmost(&self) -> WindowResult<bool>;

    fn set_topmost(&self, topmost: bool) -> WindowResult<()>;
}

/// Access to the desktop's windows and the primary working area.
pub trait Desktop: Send + Sync {
    type Window: Window + Clone + Send + Sync + 'static;

    /// Returns every top-level window, in Z order.
    fn top_level_windows(&self) -> WindowResult<Vec<Self::Window>>;

    /// Returns the direct children of `parent`.
    fn child_windows(&self, parent: &Self::Window) -> WindowResult<Vec<Self::Window>>;

    /// Returns the primary monitor's working area (excluding the
    /// taskbar and docked toolbars) in screen coordinates.
    fn primary_work_area(&self) -> WindowResult<Rect>;

    /// Returns the window that currently has keyboard focus.
    fn foreground_window(&self) -> Option<Self::Window>;

    /// Wraps a raw handle received from an event source.
    fn window(&self, handle: usize) -> Self::Window;
}
