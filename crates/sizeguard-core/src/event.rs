/// A platform-agnostic desktop event.
///
/// These represent the state changes the size guard reacts to.
/// Platform crates translate raw OS notifications into these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// A new top-level window was created or shown. May be reported
    /// more than once for the same window.
    Opened { hwnd: usize },

    /// A window was destroyed.
    Closed { hwnd: usize },

    /// A window was minimized, maximized, or restored.
    VisualStateChanged { hwnd: usize },

    /// The primary working area changed: a toolbar was docked, shown,
    /// hidden, or the taskbar moved.
    WorkAreaChanged,

    /// The display resolution or monitor arrangement changed.
    DisplayChanged,
}

impl WindowEvent {
    /// Returns the window handle associated with this event, if any.
    pub fn hwnd(&self) -> Option<usize> {
        match self {
            Self::Opened { hwnd } | Self::Closed { hwnd } | Self::VisualStateChanged { hwnd } => {
                Some(*hwnd)
            }
            Self::WorkAreaChanged | Self::DisplayChanged => None,
        }
    }
}
