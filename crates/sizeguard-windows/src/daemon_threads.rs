use std::sync::{Arc, mpsc};
use std::thread;

use sizeguard_core::{Action, Throttle, Window, WindowEvent, log_debug};

use crate::window::Window as WinWindow;

use super::daemon_ipc;
use super::daemon_types::{DaemonMsg, Guard};

/// Bridges window events into the daemon message channel.
pub(super) fn spawn_event_bridge(
    event_rx: mpsc::Receiver<WindowEvent>,
    tx: mpsc::Sender<DaemonMsg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in event_rx {
            if tx.send(DaemonMsg::Event(event)).is_err() {
                break;
            }
        }
    })
}

/// Bridges hotkey actions into the daemon message channel.
pub(super) fn spawn_action_bridge(
    action_rx: mpsc::Receiver<Action>,
    tx: mpsc::Sender<DaemonMsg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for action in action_rx {
            if tx.send(DaemonMsg::Action(action)).is_err() {
                break;
            }
        }
    })
}

/// Spawns the IPC listener thread.
pub(super) fn spawn_ipc_listener(tx: mpsc::Sender<DaemonMsg>) -> thread::JoinHandle<()> {
    thread::spawn(move || daemon_ipc::ipc_loop(tx))
}

/// Settles a freshly opened window on a detached worker thread.
///
/// Settling sleeps between attempts while the application finishes
/// its own startup layout, so it must not block the main loop.
pub(super) fn spawn_settle(guard: Arc<Guard>, window: WinWindow) {
    thread::spawn(move || {
        if guard.settle_opened_window(&window) {
            log_debug!("settled new window 0x{:X}", window.handle());
        }
    });
}

/// Creates the throttled rescan that runs after windows close.
///
/// Bursts of close events (an application shutting down several
/// windows) collapse into at most one rescan per interval.
pub(super) fn rescan_throttle(guard: &Arc<Guard>) -> Throttle {
    let guard = Arc::clone(guard);
    let interval = guard.config().closed_rescan_interval();
    Throttle::new(interval, move || rescan(&guard))
}

/// Rescans top-level windows and settles companions that appeared
/// since the last scan.
///
/// Companions bypass the opened-window dedup: they are often created
/// hidden and reused, so their first report may already be consumed.
pub(super) fn rescan(guard: &Arc<Guard>) {
    match guard.rescan() {
        Ok(new) => {
            for window in new {
                spawn_settle(Arc::clone(guard), window);
            }
        }
        Err(e) => log_debug!("rescan failed: {e}"),
    }
}
