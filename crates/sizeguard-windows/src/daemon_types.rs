use std::sync::mpsc;

use sizeguard_core::ipc::{Command, Response};
use sizeguard_core::{Action, SizeGuard, WindowEvent};

use crate::desktop::Desktop;

/// The guard as shared between the main loop and worker threads.
pub(super) type Guard = SizeGuard<Desktop>;

/// Internal message type for the main daemon thread.
pub(super) enum DaemonMsg {
    /// A window event from the event loop.
    Event(WindowEvent),
    /// A user action from a hotkey.
    Action(Action),
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;
