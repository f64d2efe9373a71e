use sizeguard_core::Command;
use sizeguard_core::ipc::ResponseStatus;
use sizeguard_core::pid;
use sizeguard_windows::{ipc, process};

pub fn execute() {
    // Try graceful shutdown via IPC first.
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Stop) {
            Ok(response) if response.status == ResponseStatus::Ok => {
                println!("SizeGuard stopped. {}", response.message.unwrap_or_default());
                let _ = pid::remove_pid_file();
                return;
            }
            Ok(response) => {
                eprintln!(
                    "Error: {}",
                    response.message.unwrap_or_else(|| "unknown error".into())
                );
                std::process::exit(1);
            }
            Err(e) => eprintln!("IPC failed: {e}"),
        }
    }

    // Fallback: the pipe is gone but the process may still be alive.
    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => {
            if process::kill_process(pid) {
                let _ = pid::remove_pid_file();
                println!("SizeGuard stopped (killed PID {pid}).");
            } else {
                eprintln!("Failed to kill process {pid}.");
                std::process::exit(1);
            }
        }
        _ => println!("SizeGuard is not running."),
    }
}
