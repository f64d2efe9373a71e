/// Runs the daemon in the foreground. `start` launches this detached.
pub fn execute() {
    // A second daemon would compete for the pipe name and hotkeys.
    if sizeguard_windows::ipc::is_daemon_running() {
        eprintln!("Error: another SizeGuard daemon is already running.");
        std::process::exit(1);
    }

    if let Err(e) = sizeguard_windows::daemon::run() {
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}
