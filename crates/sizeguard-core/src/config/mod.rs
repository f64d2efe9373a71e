pub mod keybinding;
mod loader;
pub mod template;
mod types;

use serde::{Deserialize, Serialize};

use crate::WindowResult;
use crate::log::LogConfig;
use crate::selector::{SelectorConfig, WindowSelector};

pub use keybinding::{Keybinding, Modifier};
pub use loader::{
    config_dir, config_path, keybindings_path, load, load_keybindings, try_load,
    try_load_keybindings,
};
pub use types::{GuardConfig, PaddingConfig, ZonesConfig, default_companions};

/// Top-level configuration for SizeGuard.
///
/// Loaded from `~/.config/sizeguard/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zone cycling thresholds.
    pub zones: ZonesConfig,
    /// Automatic resize settings.
    pub guard: GuardConfig,
    /// Invisible-border handling.
    pub padding: PaddingConfig,
    /// Companion windows, always included when realigning.
    pub companion: Vec<SelectorConfig>,
    /// File logging.
    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zones: ZonesConfig::default(),
            guard: GuardConfig::default(),
            padding: PaddingConfig::default(),
            companion: default_companions(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Keeps `close_distance` at or above `same_distance`, guarantees at
    /// least one open attempt, and bounds delays so a typo cannot stall
    /// the daemon.
    pub fn validate(&mut self) {
        let zones = &mut self.zones;
        zones.same_distance = zones.same_distance.clamp(0.0, 50.0);
        zones.close_distance = zones.close_distance.clamp(zones.same_distance, 100.0);

        let guard = &mut self.guard;
        guard.estimated_toolbar_height = guard.estimated_toolbar_height.clamp(0, 200);
        guard.horizontal_edge_tolerance = guard.horizontal_edge_tolerance.clamp(0, 100);
        guard.vertical_edge_tolerance = guard.vertical_edge_tolerance.clamp(0, 100);
        guard.max_open_attempts = guard.max_open_attempts.clamp(1, 100);
        guard.open_retry_delay_ms = guard.open_retry_delay_ms.clamp(10, 5_000);
        guard.closed_rescan_interval_ms = guard.closed_rescan_interval_ms.clamp(100, 60_000);

        let fallback = &mut self.padding.fallback;
        fallback.left = fallback.left.clamp(-50, 50);
        fallback.top = fallback.top.clamp(-50, 50);
        fallback.right = fallback.right.clamp(-50, 50);
        fallback.bottom = fallback.bottom.clamp(-50, 50);
    }

    /// Builds the companion selectors.
    pub fn companion_selectors(&self) -> WindowResult<Vec<WindowSelector>> {
        self.companion.iter().map(WindowSelector::try_from).collect()
    }
}

/// Wrapper for deserializing the keybindings file.
///
/// The file contains a top-level `[[keybinding]]` array of tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct KeybindingsFile {
    #[serde(default = "keybinding::defaults")]
    pub(crate) keybinding: Vec<Keybinding>,
}
