use std::path::PathBuf;

use super::keybinding;
use super::{Config, Keybinding, KeybindingsFile};

/// Returns the config directory: `~/.config/sizeguard/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("sizeguard"))
}

/// Returns the config file path: `~/.config/sizeguard/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the keybindings file path: `~/.config/sizeguard/keybindings.toml`.
pub fn keybindings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("keybindings.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, invalid selector).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = read(&path)?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();

    // Surface bad selectors here rather than at daemon startup.
    config
        .companion_selectors()
        .map_err(|e| format!("{}: companion: {e}", path.display()))?;
    crate::WindowResizer::from_config(&config.padding)
        .map_err(|e| format!("{}: padding.no_padding: {e}", path.display()))?;

    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// Non-existent files silently return defaults; other errors are reported.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// Tries to load and parse `keybindings.toml`.
///
/// Returns the parsed keybindings or an error string.
pub fn try_load_keybindings() -> Result<Vec<Keybinding>, String> {
    let path = keybindings_path().ok_or("could not determine keybindings path")?;
    let content = read(&path)?;
    let file: KeybindingsFile =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(file.keybinding)
}

/// Loads keybindings from `~/.config/sizeguard/keybindings.toml`.
///
/// Falls back to the built-in defaults if the file is missing or invalid.
pub fn load_keybindings() -> Vec<Keybinding> {
    load_or_default(try_load_keybindings, keybinding::defaults)
}

/// Error prefix marking a missing file, so that callers can fall back
/// to defaults without a warning.
const NOT_FOUND: &str = "not found: ";

fn read(path: &std::path::Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("{NOT_FOUND}{}", path.display()),
        _ => format!("{}: {e}", path.display()),
    })
}

/// Loads a config value from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are logged.
fn load_or_default<T>(try_load: impl FnOnce() -> Result<T, String>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if e.starts_with(NOT_FOUND) => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            crate::log_warn!("{e}");
            default()
        }
    }
}
