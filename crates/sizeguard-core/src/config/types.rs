//! Section types for SizeGuard configuration.
//!
//! Contains the zone, guard, and padding settings referenced by
//! [`Config`](super::Config).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Padding;
use crate::resizer::DEFAULT_FALLBACK_PADDING;
use crate::selector::SelectorConfig;

/// Zone cycling thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonesConfig {
    /// Distance at or below which a window counts as already occupying
    /// a zone rectangle, so the next one in the cycle is chosen.
    pub same_distance: f64,
    /// Distance at or below which a window snaps to the nearest
    /// rectangle without advancing the cycle.
    pub close_distance: f64,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            same_distance: 1.0,
            close_distance: 5.0,
        }
    }
}

/// Settings for the automatic resizing of opened, restored, and
/// toolbar-displaced windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Typical height in pixels of a desktop toolbar docked to the top
    /// edge.
    pub estimated_toolbar_height: i32,
    /// Horizontal slack in pixels when deciding that a window was
    /// snapped before the working area changed.
    pub horizontal_edge_tolerance: i32,
    /// Vertical slack in pixels, on top of the toolbar height.
    pub vertical_edge_tolerance: i32,
    /// How many times a newly opened window is checked before giving up.
    pub max_open_attempts: u32,
    /// Delay between checks of a newly opened window.
    pub open_retry_delay_ms: u64,
    /// Minimum interval between rescans triggered by closed windows.
    pub closed_rescan_interval_ms: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            estimated_toolbar_height: 25,
            horizontal_edge_tolerance: 3,
            vertical_edge_tolerance: 16,
            max_open_attempts: 20,
            open_retry_delay_ms: 100,
            closed_rescan_interval_ms: 2000,
        }
    }
}

impl GuardConfig {
    /// Largest distance from a zone rectangle at which a window is still
    /// re-snapped after the working area changes: every edge may have
    /// moved by a toolbar height plus the tolerances.
    pub fn max_realign_distance(&self) -> f64 {
        let vertical = f64::from(self.estimated_toolbar_height + self.vertical_edge_tolerance);
        let horizontal = f64::from(self.horizontal_edge_tolerance);
        (2.0 * (vertical.powi(2) + horizontal.powi(2))).sqrt()
    }

    pub fn open_retry_delay(&self) -> Duration {
        Duration::from_millis(self.open_retry_delay_ms)
    }

    pub fn closed_rescan_interval(&self) -> Duration {
        Duration::from_millis(self.closed_rescan_interval_ms)
    }
}

/// Invisible-border handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    /// Overlap neighbouring windows by their 1 px border line so no gap
    /// shows between them.
    pub gapless: bool,
    /// Padding used when the compositor cannot report a window's frame.
    pub fallback: Padding,
    /// Windows that draw flush with their bounds, in addition to the
    /// built-in list.
    pub no_padding: Vec<SelectorConfig>,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            gapless: true,
            fallback: DEFAULT_FALLBACK_PADDING,
            no_padding: Vec::new(),
        }
    }
}

/// Windows tracked outside the top-level realign pass: the Git
/// Extensions commit dialog.
pub fn default_companions() -> Vec<SelectorConfig> {
    vec![SelectorConfig {
        class: Some("WindowsForms10.Window.8.app.0.2bf8098_r7_ad1".into()),
        title_pattern: Some("^Commit to ".into()),
        ..Default::default()
    }]
}
