use std::sync::mpsc;

use sizeguard_core::ipc::Command;
use sizeguard_core::{log_error, log_warn};

use crate::ipc::PipeServer;

use super::daemon_types::{DaemonMsg, ResponseSender};

/// Accepts IPC connections in a loop and forwards commands to the
/// main daemon thread. Runs on a dedicated thread and returns after
/// answering `stop`, or when the daemon channel closes.
pub(super) fn ipc_loop(tx: mpsc::Sender<DaemonMsg>) {
    loop {
        let server = match PipeServer::create() {
            Ok(s) => s,
            Err(e) => {
                log_error!("Failed to create pipe: {e}");
                return;
            }
        };

        let command = match server.accept_command() {
            Ok(cmd) => cmd,
            Err(e) => {
                log_warn!("Error reading command: {e}");
                continue;
            }
        };

        let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
        let is_stop = command == Command::Stop;

        if tx.send(DaemonMsg::Command(command, reply_tx)).is_err() {
            return;
        }

        if let Ok(response) = reply_rx.recv()
            && let Err(e) = server.send_response(&response)
        {
            log_warn!("Error sending response: {e}");
        }

        if is_stop {
            return;
        }
    }
}
