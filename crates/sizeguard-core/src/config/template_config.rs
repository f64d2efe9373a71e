/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `sizeguard init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# SizeGuard configuration
# Location: ~/.config/sizeguard/config.toml

[zones]
# A window this close (in pixels of edge distance) to a zone rectangle is
# already in it: pressing the zone hotkey again moves to the next rectangle.
same_distance = 1.0
# A window this close snaps to the nearest rectangle without advancing.
close_distance = 5.0

[guard]
# Height of a desktop toolbar docked to the top of the screen.
estimated_toolbar_height = 25
# Slack used to decide whether a window was snapped before the working
# area changed.
horizontal_edge_tolerance = 3
vertical_edge_tolerance = 16
# How often, and how far apart, a newly opened window is checked.
max_open_attempts = 20
open_retry_delay_ms = 100
# Minimum interval between rescans after windows close.
closed_rescan_interval_ms = 2000

[padding]
# Overlap neighbouring windows by their 1 px border line.
gapless = true
# Used when the compositor cannot report a window's visible frame.
fallback = { left = 8, top = 1, right = 8, bottom = 8 }

# Windows that draw flush with their bounds, in addition to the built-in
# list (Office, Chromium, Firefox, Visual Studio, ...). Each entry takes
# any of: class, executable, title (exact), title_pattern (regex).
# [[padding.no_padding]]
# executable = "Code.exe"

# Companion windows are tracked separately and always re-snapped when the
# working area changes.
[[companion]]
class = "WindowsForms10.Window.8.app.0.2bf8098_r7_ad1"
title_pattern = "^Commit to "

[logging]
# Enable file logging to ~/.config/sizeguard/logs/sizeguard.log.
enabled = false
# Minimum log level: "trace", "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
