#[cfg(windows)]
mod commands;

use clap::{Parser, Subcommand};

use sizeguard_core::Zone;

#[derive(Parser)]
#[command(
    name = "sizeguard",
    version,
    about = "Snaps and resizes windows into proportional screen zones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg_attr(not(windows), allow(dead_code))]
enum Commands {
    /// Create the default configuration files
    Init,
    /// Start the size guard daemon
    Start,
    /// Stop the size guard daemon
    Stop,
    /// Show whether the daemon is running
    Status,
    /// Snap the focused window into a zone, cycling on repeat
    Zone {
        /// right, left, top, bottom, top-left, top-right, bottom-left,
        /// bottom-right, center or fake-maximized
        zone: Zone,
        /// Jump to this rectangle of the zone instead of cycling
        #[arg(long)]
        index: Option<usize>,
    },
    /// Maximize the focused window (fills the work area if already maximized)
    Maximize,
    /// Minimize the focused window
    Minimize,
    /// Toggle always-on-top for the focused window
    Topmost,
    /// Re-snap every window that sits close to a zone
    Realign,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
    /// Run the daemon (internal, not for direct use)
    #[command(hide = true)]
    Daemon,
}

#[derive(Subcommand)]
#[cfg_attr(not(windows), allow(dead_code))]
enum DebugCommands {
    /// List visible top-level windows and whether they can be resized
    List,
    /// Watch window events in real time
    Events,
    /// Show the geometry, padding and nearest zone of a window
    Inspect {
        /// Window handle, in hex (0x1A2B) or decimal
        #[arg(long, value_parser = parse_handle)]
        hwnd: usize,
    },
}

fn parse_handle(value: &str) -> Result<usize, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid window handle {value:?}: {e}"))
}

#[cfg(windows)]
fn main() {
    use sizeguard_core::Action;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Zone { zone, index } => commands::action::execute_zone(zone, index),
        Commands::Maximize => commands::action::execute(Action::Maximize),
        Commands::Minimize => commands::action::execute(Action::Minimize),
        Commands::Topmost => commands::action::execute(Action::ToggleAlwaysOnTop),
        Commands::Realign => commands::action::execute(Action::Realign),
        Commands::Debug { command } => match command {
            DebugCommands::List => commands::debug::list::execute(),
            DebugCommands::Events => commands::debug::events::execute(),
            DebugCommands::Inspect { hwnd } => commands::debug::inspect::execute(hwnd),
        },
    }
}

#[cfg(not(windows))]
fn main() {
    let _ = Cli::parse();
    eprintln!("Error: sizeguard manages Win32 windows and only runs on Windows.");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_handle_accepts_hex_and_decimal() {
        // Assert
        assert_eq!(parse_handle("0x1A2B"), Ok(0x1A2B));
        assert_eq!(parse_handle("0X10"), Ok(16));
        assert_eq!(parse_handle("4242"), Ok(4242));
    }

    #[test]
    fn parse_handle_rejects_garbage() {
        // Assert
        assert!(parse_handle("0xZZ").is_err());
        assert!(parse_handle("window").is_err());
    }

    #[test]
    fn zone_command_parses_name_and_index() {
        // Act
        let cli = Cli::try_parse_from(["sizeguard", "zone", "top-left", "--index", "2"]).unwrap();

        // Assert
        match cli.command {
            Commands::Zone { zone, index } => {
                assert_eq!(zone, Zone::TopLeft);
                assert_eq!(index, Some(2));
            }
            _ => panic!("expected zone command"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        // Assert
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
