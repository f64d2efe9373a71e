use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Zone};

/// An action that can be triggered by a hotkey or CLI command.
///
/// Actions apply to the foreground window, except [`Action::Realign`]
/// which re-snaps every window. They are distinct from window events
/// (which come from the OS).
///
/// Actions are written as kebab-case strings in keybinding files and
/// IPC messages: `zone-right`, `zone-right-0`, `maximize`, `minimize`,
/// `toggle-always-on-top`, `realign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Cycle through a zone's rectangles, or jump to one when `index` is set.
    Zone { zone: Zone, index: Option<usize> },
    /// Maximize, or fill the working area if already maximized.
    Maximize,
    Minimize,
    ToggleAlwaysOnTop,
    /// Re-snap every window that sits near a zone rectangle.
    Realign,
}

const ZONE_PREFIX: &str = "zone-";

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zone { zone, index: None } => write!(f, "{ZONE_PREFIX}{zone}"),
            Self::Zone {
                zone,
                index: Some(index),
            } => write!(f, "{ZONE_PREFIX}{zone}-{index}"),
            Self::Maximize => f.write_str("maximize"),
            Self::Minimize => f.write_str("minimize"),
            Self::ToggleAlwaysOnTop => f.write_str("toggle-always-on-top"),
            Self::Realign => f.write_str("realign"),
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "maximize" => return Ok(Self::Maximize),
            "minimize" => return Ok(Self::Minimize),
            "toggle-always-on-top" => return Ok(Self::ToggleAlwaysOnTop),
            "realign" => return Ok(Self::Realign),
            _ => {}
        }

        let Some(rest) = s.strip_prefix(ZONE_PREFIX) else {
            return Err(Error::UnknownAction(s.to_string()));
        };

        // A trailing number selects a rectangle: "zone-top-left-2".
        if let Some((name, index)) = rest.rsplit_once('-')
            && let Ok(index) = index.parse::<usize>()
        {
            let zone: Zone = name.parse()?;
            let count = zone.rectangles().len();
            if index >= count {
                return Err(Error::ZoneIndexOutOfRange { zone, index, count });
            }
            return Ok(Self::Zone {
                zone,
                index: Some(index),
            });
        }

        Ok(Self::Zone {
            zone: rest.parse()?,
            index: None,
        })
    }
}

impl TryFrom<String> for Action {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zone_without_index() {
        // Act
        let action: Action = "zone-top-left".parse().unwrap();

        // Assert
        assert_eq!(
            action,
            Action::Zone {
                zone: Zone::TopLeft,
                index: None
            }
        );
    }

    #[test]
    fn parses_zone_with_index() {
        // Act
        let action: Action = "zone-right-0".parse().unwrap();

        // Assert
        assert_eq!(
            action,
            Action::Zone {
                zone: Zone::Right,
                index: Some(0)
            }
        );
    }

    #[test]
    fn parses_simple_actions() {
        assert_eq!("maximize".parse::<Action>().unwrap(), Action::Maximize);
        assert_eq!("Minimize".parse::<Action>().unwrap(), Action::Minimize);
        assert_eq!(
            "toggle-always-on-top".parse::<Action>().unwrap(),
            Action::ToggleAlwaysOnTop
        );
        assert_eq!("realign".parse::<Action>().unwrap(), Action::Realign);
    }

    #[test]
    fn unknown_zone_is_rejected() {
        // Act
        let result = "zone-middle".parse::<Action>();

        // Assert
        assert!(matches!(result, Err(Error::UnknownZone(_))));
    }

    #[test]
    fn index_past_cycle_is_rejected() {
        // Act
        let result = "zone-top-2".parse::<Action>();

        // Assert
        assert!(matches!(result, Err(Error::ZoneIndexOutOfRange { .. })));
    }

    #[test]
    fn unknown_action_is_rejected() {
        // Act
        let result = "focus-left".parse::<Action>();

        // Assert
        assert!(matches!(result, Err(Error::UnknownAction(name)) if name == "focus-left"));
    }

    #[test]
    fn display_round_trips() {
        // Arrange
        let actions = [
            Action::Zone {
                zone: Zone::FakeMaximized,
                index: Some(0),
            },
            Action::Zone {
                zone: Zone::BottomRight,
                index: None,
            },
            Action::ToggleAlwaysOnTop,
        ];

        // Act / Assert
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn serializes_as_string() {
        // Arrange
        let action = Action::Zone {
            zone: Zone::Center,
            index: None,
        };

        // Act
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(json, "\"zone-center\"");
        assert_eq!(back, action);
    }
}
