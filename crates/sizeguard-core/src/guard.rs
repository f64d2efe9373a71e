//! Keeps windows snapped to their zones as the desktop changes.
//!
//! The guard re-snaps windows when a toolbar appears or disappears,
//! when a window opens, and when a window is restored. Handlers are
//! called from arbitrary threads; all shared state is either
//! concurrent ([`VisualStateCache`], [`OpenedWindows`]) or behind a lock.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread;

use crate::config::{Config, GuardConfig};
use crate::selector::WindowSelector;
use crate::state_cache::{OpenedWindows, VisualStateCache};
use crate::zone_manager::{ZoneManager, ZoneThresholds};
use crate::{
    Action, Desktop, Error, Rect, Window, WindowResizer, WindowResult, log_debug, log_info,
    log_trace, log_warn,
};

pub struct SizeGuard<D: Desktop> {
    manager: ZoneManager<D>,
    config: GuardConfig,
    work_area: RwLock<Rect>,
    states: VisualStateCache,
    opened: OpenedWindows,
    companion_selectors: Vec<WindowSelector>,
    companions: Mutex<Vec<D::Window>>,
}

impl<D: Desktop> SizeGuard<D> {
    /// Creates a guard and seeds the visual-state cache with every
    /// top-level window.
    pub fn new(
        manager: ZoneManager<D>,
        config: GuardConfig,
        companion_selectors: Vec<WindowSelector>,
    ) -> WindowResult<Self> {
        let work_area = manager.work_area()?;
        let guard = Self {
            manager,
            config,
            work_area: RwLock::new(work_area),
            states: VisualStateCache::new(),
            opened: OpenedWindows::new(),
            companion_selectors,
            companions: Mutex::new(Vec::new()),
        };

        for window in guard.manager.desktop().top_level_windows()? {
            if let Ok(state) = window.visual_state() {
                guard.states.exchange(window.handle(), state);
            }
        }

        log_info!(
            "guarding work area {work_area}, {} windows cached",
            guard.states.len()
        );
        Ok(guard)
    }

    /// Builds the full engine from a loaded [`Config`].
    pub fn from_config(desktop: Arc<D>, config: &Config) -> WindowResult<Self> {
        let resizer = WindowResizer::from_config(&config.padding)?;
        let manager = ZoneManager::new(desktop, resizer, ZoneThresholds::from(&config.zones));
        Self::new(manager, config.guard.clone(), config.companion_selectors()?)
    }

    pub fn manager(&self) -> &ZoneManager<D> {
        &self.manager
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// The working area as of the last change notification.
    pub fn work_area(&self) -> Rect {
        *self.work_area.read().unwrap_or_else(|e| e.into_inner())
    }

    /// A desktop toolbar is docked to the top edge.
    pub fn is_toolbar_visible(&self) -> bool {
        self.work_area().top != 0
    }

    /// Currently tracked companion windows.
    pub fn companions(&self) -> Vec<D::Window> {
        self.lock_companions().clone()
    }

    fn lock_companions(&self) -> MutexGuard<'_, Vec<D::Window>> {
        self.companions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Re-reads the working area and realigns every window if it moved.
    ///
    /// Returns `true` if the working area changed.
    pub fn handle_work_area_changed(&self) -> WindowResult<bool> {
        let current = self.manager.work_area()?;
        {
            let mut cached = self.work_area.write().unwrap_or_else(|e| e.into_inner());
            if *cached == current {
                return Ok(false);
            }
            *cached = current;
        }

        log_info!(
            "work area changed to {current}, toolbar {}",
            if current.top != 0 { "visible" } else { "hidden" }
        );
        self.realign_all();
        Ok(true)
    }

    /// Re-snaps every top-level window and companion that sits close to
    /// a zone rectangle. Returns how many windows were moved.
    pub fn realign_all(&self) -> usize {
        let started = std::time::Instant::now();
        let desktop = self.manager.desktop();
        let resizer = self.manager.resizer();

        let mut seen = HashSet::new();
        let mut windows: Vec<D::Window> = resizer
            .find_resizable_windows(desktop, None, 1)
            .inspect(|w| {
                seen.insert(w.handle());
            })
            .collect();
        windows.extend(
            self.companions()
                .into_iter()
                .filter(|w| !seen.contains(&w.handle()) && resizer.can_be_auto_resized(w)),
        );

        let mut resized = 0;
        for window in &windows {
            match self.resize_if_necessary(window) {
                Ok(true) => resized += 1,
                Ok(false) => {}
                Err(e) if e.is_window_gone() => log_trace!("{e}"),
                Err(e) => log_warn!("realign 0x{:X}: {e}", window.handle()),
            }
        }

        log_debug!(
            "realigned {resized} of {} windows in {} ms",
            windows.len(),
            started.elapsed().as_millis()
        );
        resized
    }

    /// Snaps `window` to the nearest zone rectangle if it is within the
    /// realign distance of one.
    pub fn resize_if_necessary<W: Window + ?Sized>(&self, window: &W) -> WindowResult<bool> {
        let padding = self.manager.resizer().padding(window)?;
        let position = window.position()?.shrink(&padding);
        let nearest = self
            .manager
            .find_closest_zone_rectangle(&position, &self.work_area());
        let max_distance = self.config.max_realign_distance();

        if nearest.distance <= max_distance {
            log_trace!(
                "resizing 0x{:X} to {}[{}]",
                window.handle(),
                nearest.zone,
                nearest.index
            );
            return self
                .manager
                .resize_to_zone(window, nearest.zone, Some(nearest.index));
        }

        if crate::log::enabled(crate::log::Level::Trace) {
            log_trace!(
                "not resizing 0x{:X} ({}): distance {:.2} to {} exceeds {max_distance:.2}, window {position}, zone {}",
                window.handle(),
                window.class().unwrap_or_default(),
                nearest.distance,
                nearest.zone,
                nearest.rect
            );
        }
        Ok(false)
    }

    /// Records the first report of an opened window.
    ///
    /// Returns `false` for repeated reports of the same handle, which
    /// the caller should ignore. Windows matching a companion selector
    /// start being tracked.
    pub fn claim_opened(&self, window: &D::Window) -> bool {
        if !self.opened.first_seen(window.handle()) {
            return false;
        }
        if self.companion_selectors.iter().any(|s| s.matches(window)) {
            let mut companions = self.lock_companions();
            if !companions.iter().any(|c| c.handle() == window.handle()) {
                log_debug!("tracking companion 0x{:X}", window.handle());
                companions.push(window.clone());
            }
        }
        true
    }

    /// Repeatedly tries to snap a freshly opened window until one attempt
    /// moves it or the attempts run out.
    ///
    /// Blocks for up to `max_open_attempts × open_retry_delay`; run it on
    /// its own thread. Returns `true` if the window was moved.
    pub fn settle_opened_window<W: Window + ?Sized>(&self, window: &W) -> bool {
        let resizer = self.manager.resizer();
        let attempts = self.config.max_open_attempts;

        for attempt in 1..=attempts {
            let resized = if resizer.can_be_auto_resized(window) {
                log_trace!("attempt {attempt} to resize new window 0x{:X}", window.handle());
                match self.resize_if_necessary(window) {
                    Ok(resized) => resized,
                    Err(e) if e.is_window_gone() => return false,
                    Err(e) => {
                        log_debug!("resize new window 0x{:X}: {e}", window.handle());
                        false
                    }
                }
            } else {
                false
            };

            match window.visual_state() {
                Ok(state) => {
                    self.states.exchange(window.handle(), state);
                }
                Err(_) => return false,
            }

            if resized {
                return true;
            }
            if attempt < attempts {
                thread::sleep(self.config.open_retry_delay());
            }
        }

        log_trace!(
            "gave up on new window 0x{:X} after {attempts} attempts",
            window.handle()
        );
        false
    }

    /// Claims and settles an opened window on the calling thread.
    pub fn handle_window_opened(&self, window: &D::Window) -> bool {
        self.claim_opened(window) && self.settle_opened_window(window)
    }

    /// Reacts to a minimize, maximize, or restore.
    ///
    /// Resizes only when the state actually changed and the window is now
    /// a normal, visible, resizable window. The first observation of a
    /// handle only records its state.
    pub fn handle_visual_state_changed<W: Window + ?Sized>(&self, window: &W) -> WindowResult<bool> {
        let state = window.visual_state()?;
        let previous = self.states.exchange(window.handle(), state);

        if previous.is_none_or(|p| p == state) || !self.manager.resizer().can_be_auto_resized(window)
        {
            return Ok(false);
        }
        log_trace!(
            "0x{:X} changed from {previous:?} to {state}",
            window.handle()
        );
        self.resize_if_necessary(window)
    }

    /// Rescans top-level windows: refreshes the companion list and
    /// forgets handles that no longer exist.
    ///
    /// Returns companions that were not tracked before, so the caller can
    /// settle them like newly opened windows.
    pub fn rescan(&self) -> WindowResult<Vec<D::Window>> {
        let windows = self.manager.desktop().top_level_windows()?;
        let alive: HashSet<usize> = windows.iter().map(|w| w.handle()).collect();

        let found: Vec<D::Window> = windows
            .into_iter()
            .filter(|w| self.companion_selectors.iter().any(|s| s.matches(w)))
            .collect();

        let new = {
            let mut companions = self.lock_companions();
            let known: HashSet<usize> = companions.iter().map(|c| c.handle()).collect();
            let new: Vec<D::Window> = found
                .iter()
                .filter(|w| !known.contains(&w.handle()))
                .cloned()
                .collect();
            *companions = found;
            new
        };

        self.states.retain(|h| alive.contains(&h));
        self.opened.retain(|h| alive.contains(&h));

        log_trace!(
            "rescan: {} windows, {} companions ({} new)",
            alive.len(),
            self.lock_companions().len(),
            new.len()
        );
        Ok(new)
    }

    /// Runs a user action against the foreground window.
    pub fn execute(&self, action: Action) -> WindowResult<bool> {
        if action == Action::Realign {
            return Ok(self.realign_all() > 0);
        }

        let window = self
            .manager
            .desktop()
            .foreground_window()
            .ok_or_else(|| Error::Os("no foreground window".into()))?;

        match action {
            Action::Zone { zone, index } => self.manager.resize_to_zone(&window, zone, index),
            Action::Maximize => self.manager.maximize(&window),
            Action::Minimize => self.manager.minimize(&window),
            Action::ToggleAlwaysOnTop => self.manager.toggle_always_on_top(&window),
            Action::Realign => Ok(self.realign_all() > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resizer::DEFAULT_FALLBACK_PADDING;
    use crate::testing::{FakeDesktop, FakeWindow};
    use crate::{VisualState, Zone};

    const AREA: Rect = Rect::new(0, 0, 1000, 800);

    fn fast_config() -> GuardConfig {
        GuardConfig {
            max_open_attempts: 5,
            open_retry_delay_ms: 1,
            ..Default::default()
        }
    }

    fn guard_with(desktop: Arc<FakeDesktop>, companions: Vec<WindowSelector>) -> SizeGuard<FakeDesktop> {
        let manager = ZoneManager::new(
            desktop,
            WindowResizer::new(Vec::new(), false, DEFAULT_FALLBACK_PADDING),
            ZoneThresholds::default(),
        );
        SizeGuard::new(manager, fast_config(), companions).unwrap()
    }

    fn guard(desktop: Arc<FakeDesktop>) -> SizeGuard<FakeDesktop> {
        guard_with(desktop, Vec::new())
    }

    #[test]
    fn toolbar_appearing_realigns_snapped_windows() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let left = FakeWindow::builder().position(Rect::new(0, 0, 500, 800)).build();
        let loose = FakeWindow::builder().position(Rect::new(120, 130, 470, 390)).build();
        desktop.add(&left);
        desktop.add(&loose);
        let guard = guard(Arc::clone(&desktop));

        // Act
        desktop.set_work_area(Rect::new(0, 25, 1000, 800));
        let changed = guard.handle_work_area_changed().unwrap();

        // Assert
        assert!(changed);
        assert!(guard.is_toolbar_visible());
        assert_eq!(left.current_position(), Rect::new(0, 0, 500, 775));
        assert!(loose.moves().is_empty());
    }

    #[test]
    fn unchanged_work_area_does_nothing() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let left = FakeWindow::builder().position(Rect::new(0, 0, 500, 800)).build();
        desktop.add(&left);
        let guard = guard(Arc::clone(&desktop));

        // Act
        let changed = guard.handle_work_area_changed().unwrap();

        // Assert
        assert!(!changed);
        assert!(left.moves().is_empty());
    }

    #[test]
    fn realign_skips_closed_windows_and_continues() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let first = FakeWindow::builder().position(Rect::new(0, 0, 500, 800)).build();
        let second = FakeWindow::builder().position(Rect::new(500, 0, 1000, 800)).build();
        desktop.add(&first);
        desktop.add(&second);
        let guard = guard(Arc::clone(&desktop));
        first.close();

        // Act
        desktop.set_work_area(Rect::new(0, 0, 1000, 760));
        guard.handle_work_area_changed().unwrap();

        // Assert
        assert_eq!(second.current_position(), Rect::new(500, 0, 1000, 760));
    }

    #[test]
    fn resize_if_necessary_respects_max_distance() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(Arc::clone(&desktop));
        let near = FakeWindow::builder().position(Rect::new(3, 40, 503, 800)).build();
        let far = FakeWindow::builder().position(Rect::new(0, 100, 500, 800)).build();

        // Act
        let near_resized = guard.resize_if_necessary(&near).unwrap();
        let far_resized = guard.resize_if_necessary(&far).unwrap();

        // Assert
        assert!(near_resized);
        assert_eq!(near.current_position(), Rect::new(0, 0, 500, 800));
        assert!(!far_resized);
        assert!(far.moves().is_empty());
    }

    #[test]
    fn opened_window_is_resized_once_ready() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(Arc::clone(&desktop));
        let window = FakeWindow::builder()
            .position(Rect::new(498, 2, 1000, 797))
            .not_ready_for(2)
            .build();
        desktop.add(&window);

        // Act
        let resized = guard.handle_window_opened(&window);

        // Assert
        assert!(resized);
        assert_eq!(window.current_position(), Rect::new(500, 0, 1000, 800));
        assert_eq!(window.moves().len(), 1);
    }

    #[test]
    fn duplicate_open_notification_is_ignored() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(Arc::clone(&desktop));
        let window = FakeWindow::builder().position(Rect::new(0, 2, 500, 800)).build();
        desktop.add(&window);

        // Act
        let first = guard.claim_opened(&window);
        let second = guard.claim_opened(&window);

        // Assert
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn opened_window_far_from_zones_gives_up_after_attempts() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(Arc::clone(&desktop));
        let window = FakeWindow::builder().position(Rect::new(150, 150, 450, 350)).build();
        desktop.add(&window);

        // Act
        let resized = guard.handle_window_opened(&window);

        // Assert
        assert!(!resized);
        assert!(window.moves().is_empty());
    }

    #[test]
    fn opened_window_that_closes_stops_retrying() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(Arc::clone(&desktop));
        let window = FakeWindow::builder().build();
        window.close();

        // Act
        let resized = guard.settle_opened_window(&window);

        // Assert
        assert!(!resized);
    }

    #[test]
    fn restore_triggers_resize_but_repeat_state_does_not() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let window = FakeWindow::builder()
            .position(Rect::new(0, 3, 500, 800))
            .state(VisualState::Minimized)
            .build();
        desktop.add(&window);
        let guard = guard(Arc::clone(&desktop));

        // Act
        window.set_state(VisualState::Normal);
        let restored = guard.handle_visual_state_changed(&window).unwrap();
        window.place(Rect::new(0, 3, 500, 800));
        let repeated = guard.handle_visual_state_changed(&window).unwrap();

        // Assert
        assert!(restored);
        assert!(!repeated);
        assert_eq!(window.moves(), vec![Rect::new(0, 0, 500, 800)]);
    }

    #[test]
    fn first_observation_only_records_state() {
        // Arrange: the window appears after the cache was seeded
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(Arc::clone(&desktop));
        let window = FakeWindow::builder().position(Rect::new(0, 3, 500, 800)).build();
        desktop.add(&window);

        // Act
        let resized = guard.handle_visual_state_changed(&window).unwrap();

        // Assert
        assert!(!resized);
        assert!(window.moves().is_empty());
        assert_eq!(guard.states.get(window.handle()), Some(VisualState::Normal));
    }

    #[test]
    fn minimize_is_recorded_without_resizing() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let window = FakeWindow::builder().position(Rect::new(0, 3, 500, 800)).build();
        desktop.add(&window);
        let guard = guard(Arc::clone(&desktop));

        // Act
        window.set_state(VisualState::Minimized);
        let resized = guard.handle_visual_state_changed(&window).unwrap();

        // Assert
        assert!(!resized);
        assert!(window.moves().is_empty());
    }

    #[test]
    fn rescan_tracks_companions_and_reports_new_ones() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let selector = WindowSelector::with_title_pattern(None, None, "^Commit to ").unwrap();
        let guard = guard_with(Arc::clone(&desktop), vec![selector]);
        let commit = FakeWindow::builder().title("Commit to main").build();
        desktop.add(&commit);
        desktop.add(&FakeWindow::builder().title("Other").build());

        // Act
        let first = guard.rescan().unwrap();
        let second = guard.rescan().unwrap();

        // Assert
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].handle(), commit.handle());
        assert!(second.is_empty());
        assert_eq!(guard.companions().len(), 1);
    }

    #[test]
    fn rescan_forgets_closed_windows() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let window = FakeWindow::builder().build();
        desktop.add(&window);
        let guard = guard(Arc::clone(&desktop));
        guard.claim_opened(&window);

        // Act
        window.close();
        guard.rescan().unwrap();

        // Assert
        assert!(guard.claim_opened(&window));
    }

    #[test]
    fn opened_companion_is_tracked_and_realigned() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let selector = WindowSelector::new(None, None, Some("Commit to main")).unwrap();
        let guard = guard_with(Arc::clone(&desktop), vec![selector]);
        let commit = FakeWindow::builder()
            .title("Commit to main")
            .position(Rect::new(500, 400, 1000, 800))
            .build();

        // Act
        guard.claim_opened(&commit);
        desktop.set_work_area(Rect::new(0, 30, 1000, 800));
        guard.handle_work_area_changed().unwrap();

        // Assert
        assert_eq!(guard.companions().len(), 1);
        assert_eq!(commit.current_position(), Rect::new(500, 385, 1000, 770));
    }

    #[test]
    fn execute_targets_foreground_window() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let window = FakeWindow::builder().build();
        desktop.add(&window);
        desktop.focus(&window);
        let guard = guard(Arc::clone(&desktop));

        // Act
        guard
            .execute(Action::Zone {
                zone: Zone::Center,
                index: None,
            })
            .unwrap();

        // Assert
        assert_eq!(window.current_position(), Rect::new(250, 0, 750, 800));
    }

    #[test]
    fn execute_without_foreground_window_fails() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));
        let guard = guard(desktop);

        // Act
        let result = guard.execute(Action::Minimize);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn from_config_uses_default_companions() {
        // Arrange
        let desktop = Arc::new(FakeDesktop::new(AREA));

        // Act
        let guard = SizeGuard::from_config(desktop, &Config::default()).unwrap();

        // Assert
        assert_eq!(guard.config().max_open_attempts, 20);
        assert!(!guard.is_toolbar_visible());
    }
}
