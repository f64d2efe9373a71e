use std::fmt::Display;
use std::sync::Arc;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use sizeguard_core::{Window, WindowResizer, ZoneManager, ZoneThresholds, config};
use sizeguard_windows::{Desktop, Window as WinWindow};

/// Prints everything the guard knows about one window: identity,
/// geometry, measured padding and the nearest zone rectangle.
pub fn execute(hwnd: usize) {
    let config = config::load();
    let resizer = match WindowResizer::from_config(&config.padding) {
        Ok(resizer) => resizer,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let manager = ZoneManager::new(Arc::new(Desktop), resizer, ZoneThresholds::from(&config.zones));
    let window = WinWindow::from_raw(hwnd);

    if let Err(e) = window.class() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Property"), Cell::new("Value")]);

    let mut row = |name: &str, value: String| {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    };

    row("HWND", format!("0x{hwnd:X}"));
    row("Title", show(window.title()));
    row("Class", show(window.class()));
    row("Executable", show(window.executable_name()));
    row("State", show(window.visual_state()));
    row("Visible", show(window.is_visible()));
    row("Resizable", show(window.is_resizable()));
    row("Topmost", show(window.is_topmost()));
    row(
        "Auto-resize",
        manager.resizer().can_be_auto_resized(&window).to_string(),
    );
    row("Window rect", show(window.window_rect()));
    row("Frame bounds", show(window.frame_bounds()));
    row("Position", show(window.position()));

    let padding = manager.resizer().padding(&window);
    row("Padding", show(padding.as_ref()));

    let max_distance = config.guard.max_realign_distance();
    match (window.position(), padding, manager.work_area()) {
        (Ok(position), Ok(padding), Ok(work_area)) => {
            let nearest =
                manager.find_closest_zone_rectangle(&position.shrink(&padding), &work_area);
            row("Work area", work_area.to_string());
            row(
                "Nearest zone",
                format!("{}[{}] at {}", nearest.zone, nearest.index, nearest.rect),
            );
            row(
                "Distance",
                format!(
                    "{:.2} (realigns within {max_distance:.2}: {})",
                    nearest.distance,
                    nearest.distance <= max_distance
                ),
            );
        }
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            row("Nearest zone", format!("unavailable: {e}"));
        }
    }

    println!("{table}");
}

fn show<T: Display, E: Display>(result: Result<T, E>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("error: {e}"),
    }
}
