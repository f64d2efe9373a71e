use std::sync::{Arc, mpsc};

use sizeguard_core::config;
use sizeguard_core::ipc::Command;
use sizeguard_core::{SizeGuard, WindowResult, log_info};

use crate::desktop::Desktop;
use crate::{dpi, event_loop};

use super::daemon_loop_handlers;
use super::daemon_threads;
use super::daemon_types::DaemonMsg;

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop() -> WindowResult<()> {
    let config = config::load();
    sizeguard_core::log::init(&config.logging);
    dpi::enable_dpi_awareness();

    let keybindings = config::load_keybindings();

    log_info!("Daemon started (PID: {})", std::process::id());
    log_info!(
        "Config: zones(same={}, close={}), toolbar height {}, {} companion selectors, {} keybindings",
        config.zones.same_distance,
        config.zones.close_distance,
        config.guard.estimated_toolbar_height,
        config.companion.len(),
        keybindings.len()
    );

    let guard = Arc::new(SizeGuard::from_config(Arc::new(Desktop), &config)?);

    // Pick up companions that were already open before the daemon.
    daemon_threads::rescan(&guard);
    let rescan = daemon_threads::rescan_throttle(&guard);

    let (tx, rx) = mpsc::channel::<DaemonMsg>();

    // Start the Win32 event loop + hotkeys on its own thread.
    let (event_channel_tx, event_channel_rx) = mpsc::channel();
    let (action_channel_tx, action_channel_rx) = mpsc::channel();
    let event_loop = event_loop::start(event_channel_tx, action_channel_tx, keybindings)?;

    let event_bridge = daemon_threads::spawn_event_bridge(event_channel_rx, tx.clone());
    let action_bridge = daemon_threads::spawn_action_bridge(action_channel_rx, tx.clone());
    let ipc_thread = daemon_threads::spawn_ipc_listener(tx.clone());

    // Main processing loop: blocks until a message arrives.
    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Event(event) => daemon_loop_handlers::handle_event(event, &guard, &rescan),
            DaemonMsg::Action(action) => daemon_loop_handlers::handle_action(action, &guard),
            DaemonMsg::Command(command, reply_tx) => {
                let response = daemon_loop_handlers::handle_command(&command, &guard);
                let _ = reply_tx.send(response);
                if command == Command::Stop {
                    break;
                }
            }
        }
    }

    event_loop.stop();
    drop(rescan);
    drop(tx);
    let _ = event_bridge.join();
    let _ = action_bridge.join();
    let _ = ipc_thread.join();
    log_info!("Daemon stopped");

    Ok(())
}
