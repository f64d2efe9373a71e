//! Per-window state shared between event handler threads.

use dashmap::{DashMap, DashSet};

use crate::VisualState;

/// Last observed visual state of each window.
#[derive(Debug, Default)]
pub struct VisualStateCache {
    states: DashMap<usize, VisualState>,
}

impl VisualStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `state` and returns the previous value, atomically per handle.
    pub fn exchange(&self, handle: usize, state: VisualState) -> Option<VisualState> {
        self.states.insert(handle, state)
    }

    pub fn get(&self, handle: usize) -> Option<VisualState> {
        self.states.get(&handle).map(|s| *s)
    }

    /// Drops every handle for which `alive` returns `false`.
    pub fn retain(&self, alive: impl Fn(usize) -> bool) {
        self.states.retain(|handle, _| alive(*handle));
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Handles that have already been reported as opened.
///
/// The shell hook and WinEvents both report new windows, often more
/// than once; only the first report is acted on.
#[derive(Debug, Default)]
pub struct OpenedWindows {
    seen: DashSet<usize>,
}

impl OpenedWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a handle is reported.
    pub fn first_seen(&self, handle: usize) -> bool {
        self.seen.insert(handle)
    }

    /// Drops every handle for which `alive` returns `false`, so that a
    /// recycled handle counts as new again.
    pub fn retain(&self, alive: impl Fn(usize) -> bool) {
        self.seen.retain(|handle| alive(*handle));
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
