pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod guard;
pub mod ipc;
pub mod log;
pub mod pid;
pub mod rect;
pub mod resizer;
pub mod selector;
pub mod state_cache;
pub mod throttle;
pub mod window;
pub mod zone;
pub mod zone_manager;

#[cfg(test)]
pub(crate) mod testing;

pub use action::Action;
pub use config::Config;
pub use error::{Error, WindowResult};
pub use event::WindowEvent;
pub use guard::SizeGuard;
pub use ipc::{Command, PIPE_NAME, Response};
pub use rect::{Padding, Point, Rect};
pub use resizer::WindowResizer;
pub use selector::{SelectorConfig, WindowSelector};
pub use throttle::Throttle;
pub use window::{Desktop, VisualState, Window};
pub use zone::{ProportionalRect, Zone, ZoneSearchResult};
pub use zone_manager::{ZoneManager, ZoneThresholds};
