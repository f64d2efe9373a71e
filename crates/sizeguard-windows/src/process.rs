use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_ACCESS_RIGHTS, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_TERMINATE,
    TerminateProcess,
};

/// An open process handle, closed on drop.
struct ProcessHandle(HANDLE);

impl ProcessHandle {
    fn open(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> Option<Self> {
        // SAFETY: OpenProcess either fails or returns a handle we own.
        unsafe { OpenProcess(access, false, pid) }.ok().map(Self)
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from OpenProcess and is closed once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Checks whether a process with the given PID is still alive.
///
/// Used to detect stale PID files left behind when the daemon was
/// killed without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    ProcessHandle::open(pid, PROCESS_QUERY_LIMITED_INFORMATION).is_some()
}

/// Forcibly terminates a process. Returns `true` on success.
///
/// Last resort for a daemon whose IPC thread no longer answers.
pub fn kill_process(pid: u32) -> bool {
    let Some(process) = ProcessHandle::open(pid, PROCESS_TERMINATE) else {
        return false;
    };

    // SAFETY: the handle was opened with PROCESS_TERMINATE.
    unsafe { TerminateProcess(process.0, 1) }.is_ok()
}
