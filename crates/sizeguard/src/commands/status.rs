use sizeguard_core::Command;
use sizeguard_core::ipc::ResponseStatus;
use sizeguard_core::pid;
use sizeguard_windows::{ipc, process};

pub fn execute() {
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Status) {
            Ok(response) if response.status == ResponseStatus::Ok => {
                println!("SizeGuard is running.");
                if let Some(message) = response.message {
                    println!("{message}");
                }
            }
            Ok(response) => println!(
                "SizeGuard is running but reported an error: {}",
                response.message.unwrap_or_default()
            ),
            Err(e) => println!("SizeGuard is running but did not answer: {e}"),
        }
        return;
    }

    // Pipe isn't responding: check for a PID file left behind by a
    // daemon that was killed without a clean shutdown.
    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => {
            println!("SizeGuard process exists (PID: {pid}) but is not responding.");
        }
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("SizeGuard is not running (cleaned up stale PID file).");
        }
        _ => println!("SizeGuard is not running."),
    }
}
