use sizeguard_core::ipc::ResponseStatus;
use sizeguard_core::{Action, Command, Error, Zone};
use sizeguard_windows::ipc;

/// Sends a zone action, rejecting an out-of-range index before it
/// reaches the daemon.
pub fn execute_zone(zone: Zone, index: Option<usize>) {
    let count = zone.rectangles().len();
    if let Some(index) = index
        && index >= count
    {
        eprintln!("Error: {}", Error::ZoneIndexOutOfRange { zone, index, count });
        std::process::exit(1);
    }

    execute(Action::Zone { zone, index });
}

/// Sends an action to the running daemon via IPC.
pub fn execute(action: Action) {
    if !ipc::is_daemon_running() {
        eprintln!("SizeGuard is not running. Start it with 'sizeguard start'.");
        std::process::exit(1);
    }

    match ipc::send_command(&Command::Action { action }) {
        Ok(response) if response.status == ResponseStatus::Ok => {
            if let Some(msg) = response.message {
                println!("{msg}");
            }
        }
        Ok(response) => {
            eprintln!(
                "Error: {}",
                response.message.unwrap_or_else(|| "unknown error".into()),
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to send {action}: {e}");
            std::process::exit(1);
        }
    }
}
