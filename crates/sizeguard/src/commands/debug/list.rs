use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use sizeguard_core::{Desktop as _, Window, WindowResizer, config};
use sizeguard_windows::Desktop;

/// Lists visible, titled top-level windows and whether the guard would
/// resize them automatically.
pub fn execute() {
    let windows = match Desktop.top_level_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Error: failed to enumerate windows: {e}");
            std::process::exit(1);
        }
    };

    let resizer = WindowResizer::from_config(&config::load().padding).unwrap_or_default();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("Executable"),
            Cell::new("Class"),
            Cell::new("State"),
            Cell::new("Auto"),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
        ]);

    let mut count = 0;
    for window in &windows {
        if !window.is_visible().unwrap_or(false) {
            continue;
        }
        let title = window.title().unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let state = window
            .visual_state()
            .map_or_else(|_| "?".to_string(), |s| s.to_string());
        let auto = if resizer.can_be_auto_resized(window) { "yes" } else { "no" };
        let rect = window.frame_bounds().or_else(|_| window.window_rect()).unwrap_or_default();

        table.add_row(vec![
            Cell::new(format!("0x{:X}", window.handle())),
            Cell::new(title),
            Cell::new(window.executable_name().unwrap_or_default()),
            Cell::new(window.class().unwrap_or_default()),
            Cell::new(state),
            Cell::new(auto),
            Cell::new(rect.width()).set_alignment(CellAlignment::Right),
            Cell::new(rect.height()).set_alignment(CellAlignment::Right),
        ]);
        count += 1;
    }

    println!("{table}");
    println!("\n{count} windows found");
}
