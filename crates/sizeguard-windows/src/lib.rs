//! Win32 backend for SizeGuard. Empty on other platforms.
#![cfg(windows)]

/// Ctrl+C handling for foreground debug commands.
pub mod ctrl_c;

/// Daemon main loop.
pub mod daemon;

/// The `Desktop` implementation over the interactive Win32 desktop.
pub mod desktop;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Win32 window enumeration.
pub mod enumerate;

/// WinEvent to `WindowEvent` translation.
pub mod event;

/// Win32 message loop: WinEvent hook, shell hook and hotkeys.
pub mod event_loop;

/// DWM frame bounds and legacy window rectangles.
pub mod frame;

/// Global hotkey registration.
pub mod hotkey;

/// IPC via Named Pipes.
pub mod ipc;

/// Key name to virtual key code mapping.
pub mod keys;

/// Primary monitor work area.
pub mod monitor;

mod os;

/// Process utilities (alive check, kill).
pub mod process;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use desktop::Desktop;
pub use window::Window;
