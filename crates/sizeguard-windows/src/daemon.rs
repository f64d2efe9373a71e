use sizeguard_core::pid;
use sizeguard_core::{WindowResult, log_error};

#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_loop_handlers.rs"]
mod daemon_loop_handlers;
#[path = "daemon_threads.rs"]
mod daemon_threads;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Runs the SizeGuard daemon until a `stop` command arrives.
///
/// Starts background threads for the Win32 event loop (which also
/// handles global hotkeys), the IPC listener and the closed-window
/// rescan. The main thread owns the message loop that feeds the guard.
pub fn run() -> WindowResult<()> {
    pid::write_pid_file()?;
    eprintln!("SizeGuard daemon started.");

    let result = daemon_loop::daemon_loop();
    if let Err(e) = &result {
        log_error!("daemon stopped with error: {e}");
    }

    let _ = pid::remove_pid_file();

    result
}
