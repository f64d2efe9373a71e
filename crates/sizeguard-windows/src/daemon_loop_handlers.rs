use std::sync::Arc;

use sizeguard_core::ipc::{Command, Response};
use sizeguard_core::{
    Action, Desktop as _, Throttle, WindowEvent, WindowResult, log_debug, log_info, log_trace,
    log_warn,
};

use super::daemon_threads;
use super::daemon_types::Guard;

pub(super) fn handle_event(event: WindowEvent, guard: &Arc<Guard>, rescan: &Throttle) {
    match event {
        WindowEvent::Opened { hwnd } => {
            let window = guard.manager().desktop().window(hwnd);
            if guard.claim_opened(&window) {
                log_trace!("window opened 0x{hwnd:X}");
                daemon_threads::spawn_settle(Arc::clone(guard), window);
            }
        }
        WindowEvent::Closed { .. } => rescan.trigger(),
        WindowEvent::VisualStateChanged { hwnd } => {
            let window = guard.manager().desktop().window(hwnd);
            log_outcome("visual state change", hwnd, guard.handle_visual_state_changed(&window));
        }
        WindowEvent::WorkAreaChanged | WindowEvent::DisplayChanged => {
            match guard.handle_work_area_changed() {
                Ok(true) => {}
                Ok(false) => log_debug!("{event:?} without a work area change"),
                Err(e) => log_warn!("could not read work area: {e}"),
            }
        }
    }
}

pub(super) fn handle_action(action: Action, guard: &Guard) {
    log_debug!("hotkey action {action}");
    if let Err(e) = guard.execute(action) {
        log_warn!("{action} failed: {e}");
    }
}

pub(super) fn handle_command(command: &Command, guard: &Guard) -> Response {
    match command {
        Command::Stop => {
            log_info!("Stop command received, shutting down");
            Response::ok_with_message("Daemon stopping")
        }
        Command::Status => Response::ok_with_message(format!(
            "Daemon is running, work area {}, toolbar {}, {} companion windows",
            guard.work_area(),
            if guard.is_toolbar_visible() {
                "visible"
            } else {
                "hidden"
            },
            guard.companions().len()
        )),
        Command::Action { action } => match guard.execute(*action) {
            Ok(true) => Response::ok(),
            Ok(false) => Response::ok_with_message(format!("{action}: nothing to do")),
            Err(e) => Response::error(format!("{action} failed: {e}")),
        },
    }
}

/// Logs the result of a guard reaction at a level matching its cause.
fn log_outcome(what: &str, hwnd: usize, result: WindowResult<bool>) {
    match result {
        Ok(true) => log_debug!("{what} 0x{hwnd:X}: resized"),
        Ok(false) => {}
        Err(e) if e.is_window_gone() => log_trace!("{what} 0x{hwnd:X}: {e}"),
        Err(e) => log_warn!("{what} 0x{hwnd:X}: {e}"),
    }
}
