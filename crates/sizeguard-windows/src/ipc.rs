use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sizeguard_core::ipc::{Command, PIPE_NAME, Response};
use sizeguard_core::{WindowResult, log_trace};
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

use crate::os::OsResultExt;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;

/// How long the client waits for a busy daemon to free a pipe instance.
const CONNECT_TIMEOUT_MS: u32 = 2000;

/// A Named Pipe server that the daemon uses to accept CLI connections.
///
/// Each instance serves one connection: the daemon reads a single JSON
/// line, answers with a single JSON line, and creates a new instance
/// for the next client.
pub struct PipeServer {
    handle: HANDLE,
}

impl PipeServer {
    /// Creates a new Named Pipe instance without waiting for a client.
    pub fn create() -> WindowResult<Self> {
        let pipe_name = HSTRING::from(PIPE_NAME);

        // SAFETY: CreateNamedPipeW creates a new named pipe instance.
        // We pass valid parameters and check for INVALID_HANDLE_VALUE.
        let handle = unsafe {
            CreateNamedPipeW(
                &pipe_name,
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                512, // output buffer size
                512, // input buffer size
                0,   // default timeout
                None,
            )
        };

        if handle == INVALID_HANDLE_VALUE {
            return Err("Failed to create named pipe".into());
        }

        Ok(Self { handle })
    }

    /// Blocks until a client connects, then reads its command.
    pub fn accept_command(&self) -> WindowResult<Command> {
        // SAFETY: ConnectNamedPipe blocks until a client connects.
        unsafe { ConnectNamedPipe(self.handle, None) }.os()?;

        read_line(self.handle)
    }

    /// Sends a response to the connected client and disconnects it.
    pub fn send_response(&self, response: &Response) -> WindowResult<()> {
        write_line(self.handle, response)?;

        // SAFETY: FlushFileBuffers blocks until the client has read all
        // data from the pipe. Without this, DisconnectNamedPipe would
        // discard unread data, causing the client to get error 233.
        unsafe {
            let _ = FlushFileBuffers(self.handle);
        }

        // SAFETY: frees the instance for the drop that follows.
        unsafe { DisconnectNamedPipe(self.handle) }.os()
    }
}

impl Drop for PipeServer {
    fn drop(&mut self) {
        // SAFETY: the server exclusively owns its pipe handle.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

/// RAII guard that closes a HANDLE on drop.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        // SAFETY: the guard owns this handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Sends a command to the daemon and returns its response.
///
/// Used by the CLI. Waits briefly if every pipe instance is busy.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: WaitNamedPipeW only blocks; a FALSE result surfaces as a
    // CreateFileW error below.
    unsafe {
        let _ = WaitNamedPipeW(&pipe_name, CONNECT_TIMEOUT_MS);
    }

    // SAFETY: CreateFileW opens an existing named pipe as a client.
    let handle = unsafe {
        CreateFileW(
            &pipe_name,
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )
    }
    .os()?;

    let _guard = HandleGuard(handle);

    log_trace!("ipc request {command:?}");
    write_line(handle, command)?;
    read_line(handle)
}

/// Checks if the daemon's named pipe exists (i.e. the daemon is running).
///
/// Uses `WaitNamedPipeW` with a 1 ms timeout instead of `CreateFileW`,
/// so the check does not consume a pipe connection.
pub fn is_daemon_running() -> bool {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: WaitNamedPipeW checks whether a pipe instance is available.
    unsafe { WaitNamedPipeW(&pipe_name, 1).as_bool() }
}

/// Serializes `value` as one JSON line into the pipe.
fn write_line<T: Serialize>(handle: HANDLE, value: &T) -> WindowResult<()> {
    let mut writer = duplicate_handle_as_file(handle)?;
    let json = serde_json::to_string(value)?;
    writeln!(writer, "{json}")?;
    writer.flush()?;
    Ok(())
}

/// Reads one JSON line from the pipe.
fn read_line<T: DeserializeOwned>(handle: HANDLE) -> WindowResult<T> {
    let mut reader = BufReader::new(duplicate_handle_as_file(handle)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(serde_json::from_str(line.trim())?)
}

/// Duplicates a HANDLE and wraps it as a `std::fs::File`.
///
/// The duplicate lets the original handle and the File be closed
/// independently.
fn duplicate_handle_as_file(handle: HANDLE) -> WindowResult<File> {
    let mut dup = HANDLE::default();

    // SAFETY: DuplicateHandle creates a copy of the handle. The duplicate
    // will be owned by the returned File and closed when it's dropped.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )
        .os()?;

        Ok(File::from_raw_handle(dup.0))
    }
}
