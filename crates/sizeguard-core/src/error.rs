use thiserror::Error;

/// Result type used by every window query and mutation.
pub type WindowResult<T> = Result<T, Error>;

/// Errors produced by the zone engine and its platform backends.
#[derive(Debug, Error)]
pub enum Error {
    /// The window was destroyed between being observed and being used.
    ///
    /// Closing is a race, not a failure: callers skip the window.
    #[error("window 0x{0:X} no longer exists")]
    WindowGone(usize),

    /// A zone name outside the closed set of zones.
    #[error("unknown zone {0:?}")]
    UnknownZone(String),

    /// An action name that is neither a zone nor a window command.
    #[error("unknown action {0:?}")]
    UnknownAction(String),

    /// An explicit rectangle index past the end of a zone's cycle.
    #[error("zone {zone} has {count} rectangles, index {index} is out of range")]
    ZoneIndexOutOfRange {
        zone: crate::Zone,
        index: usize,
        count: usize,
    },

    /// A selector was built without any constraint.
    #[error("a window selector needs at least one of class, executable, or title")]
    EmptySelector,

    /// A selector was given both an exact title and a title pattern.
    #[error("specify at most one of title and title_pattern")]
    ConflictingTitle,

    /// The title pattern of a selector is not a valid regular expression.
    #[error("invalid title pattern: {0}")]
    InvalidTitlePattern(#[from] regex::Error),

    /// An OS call failed for a reason other than the window disappearing.
    #[error("{0}")]
    Os(String),
}

impl Error {
    /// Returns `true` for the transient "window closed mid-operation" case.
    pub fn is_window_gone(&self) -> bool {
        matches!(self, Self::WindowGone(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Os(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Os(e.to_string())
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::Os(message.to_string())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::Os(message)
    }
}
