use std::sync::mpsc;
use std::time::Duration;

use sizeguard_core::Window;
use sizeguard_windows::Window as WinWindow;

/// Watches window events in real time. Press Ctrl+C to stop.
pub fn execute() {
    println!("Watching window events (press Ctrl+C to stop)...\n");

    let (tx, rx) = mpsc::channel();
    // No hotkeys in debug mode, so the action channel stays silent.
    let (action_tx, _action_rx) = mpsc::channel();

    let event_loop = match sizeguard_windows::event_loop::start(tx, action_tx, Vec::new()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start event loop: {e}");
            std::process::exit(1);
        }
    };

    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = sizeguard_windows::ctrl_c::set_handler(stop_tx) {
        eprintln!("Warning: {e}");
    }

    while stop_rx.try_recv().is_err() {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => match event.hwnd() {
                Some(hwnd) => {
                    let window = WinWindow::from_raw(hwnd);
                    let title = window.title().unwrap_or_default();
                    let state = window
                        .visual_state()
                        .map_or_else(|e| e.to_string(), |s| s.to_string());
                    println!("{event:?} [{state}] \"{title}\"");
                }
                None => println!("{event:?}"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    event_loop.stop();
}
