use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};

use sizeguard_core::{config, pid};
use sizeguard_windows::{ipc, process};

/// Windows process creation flags for launching a fully detached daemon.
///
/// `CREATE_NEW_PROCESS_GROUP` (0x200): the daemon gets its own process
/// group, so Ctrl+C in the CLI terminal won't kill it.
///
/// `CREATE_NO_WINDOW` (0x08000000): the daemon doesn't get a console
/// window and doesn't inherit the parent's console handles.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

pub fn execute() {
    if ipc::is_daemon_running() {
        println!("SizeGuard is already running.");
        return;
    }

    // Clean up stale PID file from a previous unclean shutdown
    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("SizeGuard process exists (PID: {pid}) but is not responding.");
            println!("Run 'sizeguard stop' to terminate it.");
            return;
        }
        let _ = pid::remove_pid_file();
    }

    // Surface config mistakes here; the detached daemon has no console.
    if let Err(e) = config::try_load() {
        eprintln!("Warning: {e}");
        eprintln!("The daemon will start with default settings.");
    }

    let child = std::env::current_exe().and_then(|exe| {
        // Re-run ourselves with the hidden `daemon` subcommand.
        Command::new(exe)
            .arg("daemon")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .creation_flags(DETACH_FLAGS)
            .spawn()
    });

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    };

    // Acknowledge the child without blocking so it outlives the CLI.
    let _ = child.try_wait();

    println!("SizeGuard started (PID: {}).", child.id());
    if let Some(dir) = config::config_dir() {
        println!("Config: {}", dir.display());
    }
}
