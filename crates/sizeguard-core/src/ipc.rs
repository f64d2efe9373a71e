use serde::{Deserialize, Serialize};

use crate::Action;

/// The named pipe path used for IPC between CLI and daemon.
pub const PIPE_NAME: &str = r"\\.\pipe\sizeguard";

/// A command sent from the CLI to the daemon.
///
/// These are serialized as JSON and sent over the named pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// Request the daemon to stop.
    Stop,
    /// Request the daemon's current status.
    Status,
    /// Execute an action on the foreground window (or all windows for
    /// `realign`).
    Action { action: Action },
}

/// A response sent from the daemon back to the CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status of a daemon response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: Some(message.into()),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Zone;

    #[test]
    fn action_command_wire_format() {
        // Arrange
        let command = Command::Action {
            action: Action::Zone {
                zone: Zone::Left,
                index: Some(1),
            },
        };

        // Act
        let json = serde_json::to_string(&command).unwrap();

        // Assert
        assert_eq!(json, r#"{"command":"Action","action":"zone-left-1"}"#);
        assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), command);
    }

    #[test]
    fn response_omits_empty_message() {
        // Act
        let json = serde_json::to_string(&Response::ok()).unwrap();

        // Assert
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn malformed_action_is_rejected() {
        // Act
        let result = serde_json::from_str::<Command>(r#"{"command":"Action","action":"zone-up"}"#);

        // Assert
        assert!(result.is_err());
    }
}
