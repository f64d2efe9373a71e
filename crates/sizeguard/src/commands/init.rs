use std::path::Path;

use sizeguard_core::config;

/// Creates the default configuration files at `~/.config/sizeguard/`.
///
/// Generates `config.toml` and `keybindings.toml` with comments
/// explaining every option. Existing files are not overwritten.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    let results = [
        write_if_missing(&dir.join("config.toml"), &config::template::generate_config()),
        write_if_missing(
            &dir.join("keybindings.toml"),
            &config::template::generate_keybindings(),
        ),
    ];

    println!("\nEdit these files to tune zone snapping, padding, companion windows, and hotkeys.");
    println!("Restart the daemon ('sizeguard stop', then 'sizeguard start') to apply changes.");

    if results.contains(&false) {
        std::process::exit(1);
    }
}

/// Writes content to a file only if it doesn't already exist.
///
/// Returns `false` if the file had to be written and could not be.
fn write_if_missing(path: &Path, content: &str) -> bool {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return true;
    }

    match std::fs::write(path, content) {
        Ok(()) => {
            println!("Created {}", path.display());
            true
        }
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            false
        }
    }
}
