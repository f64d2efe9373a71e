use std::sync::mpsc::{self, Sender};
use std::thread;

use sizeguard_core::config::Keybinding;
use sizeguard_core::{Action, WindowEvent, WindowResult, log_debug};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_QUIT};

use crate::hotkey::HotkeyManager;

#[path = "event_loop_event_sink.rs"]
mod event_sink;
#[path = "event_loop_message_pump.rs"]
mod message_pump;
#[path = "event_loop_win_event.rs"]
mod win_event;

// Thread-local sender shared by the WinEvent callback and the sink
// window procedure. Both run on the event loop thread.
thread_local! {
    static EVENT_SENDER: std::cell::RefCell<Option<Sender<WindowEvent>>> =
        const { std::cell::RefCell::new(None) };
}

/// Forwards an event to the daemon, if a sender is installed on this thread.
fn emit(event: WindowEvent) {
    EVENT_SENDER.with(|cell| {
        if let Some(sender) = cell.borrow().as_ref() {
            let _ = sender.send(event);
        }
    });
}

/// Starts the Win32 event loop on a new thread.
///
/// Installs the WinEvent hook, the shell hook sink window and the global
/// hotkeys from `keybindings`. Window events and hotkey actions are sent
/// through the provided channels. Returns once every listener is
/// registered, or with the first registration error.
pub fn start(
    event_tx: Sender<WindowEvent>,
    action_tx: Sender<Action>,
    keybindings: Vec<Keybinding>,
) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        EVENT_SENDER.with(|cell| {
            *cell.borrow_mut() = Some(event_tx);
        });

        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };

        let hook = match win_event::WinEventHook::install() {
            Ok(hook) => hook,
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        let sink = match event_sink::EventSink::create() {
            Ok(sink) => sink,
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        // Register hotkeys on this thread's message queue.
        let mut hotkeys = HotkeyManager::new(action_tx);
        hotkeys.register_from_config(&keybindings);

        let _ = ready_tx.send(Ok(thread_id));

        message_pump::run(&hotkeys);

        // Listeners are released in reverse registration order.
        drop(hotkeys);
        drop(sink);
        drop(hook);
        log_debug!("event loop stopped");
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| "event loop thread exited unexpectedly")?
        .map_err(sizeguard_core::Error::Os)?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for controlling the event loop from the daemon.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        // SAFETY: posting WM_QUIT to our own event loop thread.
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}
