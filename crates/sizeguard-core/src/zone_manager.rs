use std::sync::Arc;

use crate::config::ZonesConfig;
use crate::resizer::WindowResizer;
use crate::zone::{self, Zone, ZoneSearchResult};
use crate::{Desktop, Error, Rect, VisualState, Window, WindowResult, log_debug};

/// Distances that decide how a repeated zone activation cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneThresholds {
    /// At or below this distance the window is already in the nearest
    /// rectangle, so the next one in the cycle is chosen.
    pub same: f64,
    /// At or below this distance the window is snapped to the nearest
    /// rectangle without advancing.
    pub close: f64,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            same: 1.0,
            close: 5.0,
        }
    }
}

impl From<&ZonesConfig> for ZoneThresholds {
    fn from(config: &ZonesConfig) -> Self {
        Self {
            same: config.same_distance,
            close: config.close_distance,
        }
    }
}

impl ZoneThresholds {
    /// Picks the cycle index given the nearest rectangle in the zone.
    pub fn select_index(&self, nearest: &ZoneSearchResult, count: usize) -> usize {
        if nearest.distance <= self.same {
            (nearest.index + 1) % count
        } else if nearest.distance <= self.close {
            nearest.index
        } else {
            0
        }
    }
}

/// Moves windows into zones.
pub struct ZoneManager<D: Desktop> {
    desktop: Arc<D>,
    resizer: WindowResizer,
    thresholds: ZoneThresholds,
}

impl<D: Desktop> ZoneManager<D> {
    pub fn new(desktop: Arc<D>, resizer: WindowResizer, thresholds: ZoneThresholds) -> Self {
        Self {
            desktop,
            resizer,
            thresholds,
        }
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    pub fn resizer(&self) -> &WindowResizer {
        &self.resizer
    }

    /// Returns the primary monitor's working area.
    pub fn work_area(&self) -> WindowResult<Rect> {
        self.desktop.primary_work_area()
    }

    /// Resizes `window` into one of `zone`'s rectangles.
    ///
    /// With an explicit `index` that rectangle is used. Otherwise the
    /// rectangle nearest to the window's current position is found: a
    /// window already there advances to the next rectangle in the cycle,
    /// a window close to it snaps without advancing, and anything else
    /// goes to the first rectangle. Maximized windows are restored first
    /// and always go to the first rectangle.
    ///
    /// Returns `Ok(false)` without touching the window when it is neither
    /// resizable nor maximized.
    pub fn resize_to_zone<W: Window + ?Sized>(
        &self,
        window: &W,
        zone: Zone,
        index: Option<usize>,
    ) -> WindowResult<bool> {
        let rectangles = zone.rectangles();
        if let Some(index) = index
            && index >= rectangles.len()
        {
            return Err(Error::ZoneIndexOutOfRange {
                zone,
                index,
                count: rectangles.len(),
            });
        }

        let maximized = window.visual_state()? == VisualState::Maximized;
        if !maximized && !window.is_resizable()? {
            return Ok(false);
        }

        let mut index = index;
        if maximized {
            // Restore before measuring: some apps report odd frames while maximized.
            index = Some(0);
            window.set_visual_state(VisualState::Normal)?;
        }

        let padding = self.resizer.padding(window)?;
        let work_area = self.work_area()?;

        let index = match index {
            Some(index) => index,
            None => {
                let position = window.position()?.shrink(&padding);
                let nearest = zone::closest_in_zone(&position, &work_area, zone);
                self.thresholds.select_index(&nearest, rectangles.len())
            }
        };

        let target = zone::zone_rect(&rectangles[index], &work_area).enlarge(&padding);
        log_debug!(
            "resize 0x{:X} to {zone}[{index}] at {target} (padding {padding})",
            window.handle()
        );
        self.resizer.move_window(window, &target)?;
        Ok(true)
    }

    /// Finds the zone rectangle nearest to `position` across every zone.
    pub fn find_closest_zone_rectangle(&self, position: &Rect, work_area: &Rect) -> ZoneSearchResult {
        zone::closest_zone_rectangle(position, work_area)
    }

    /// Maximizes the window, or if it is already maximized, fills the
    /// working area as a normal window instead.
    pub fn maximize<W: Window + ?Sized>(&self, window: &W) -> WindowResult<bool> {
        if window.visual_state()? == VisualState::Maximized {
            self.resize_to_zone(window, Zone::FakeMaximized, Some(0))
        } else {
            window.set_visual_state(VisualState::Maximized)?;
            Ok(true)
        }
    }

    pub fn minimize<W: Window + ?Sized>(&self, window: &W) -> WindowResult<bool> {
        window.set_visual_state(VisualState::Minimized)?;
        Ok(true)
    }

    /// Flips the window's always-on-top flag.
    pub fn toggle_always_on_top<W: Window + ?Sized>(&self, window: &W) -> WindowResult<bool> {
        let topmost = !window.is_topmost()?;
        window.set_topmost(topmost)?;
        log_debug!("0x{:X} topmost = {topmost}", window.handle());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resizer::DEFAULT_FALLBACK_PADDING;
    use crate::testing::{FakeDesktop, FakeWindow};
    use crate::{Padding, Point};

    fn manager(work_area: Rect) -> ZoneManager<FakeDesktop> {
        ZoneManager::new(
            Arc::new(FakeDesktop::new(work_area)),
            WindowResizer::new(Vec::new(), false, DEFAULT_FALLBACK_PADDING),
            ZoneThresholds::default(),
        )
    }

    #[test]
    fn repeated_right_cycles_from_half_to_two_thirds() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder()
            .position(Rect::new(500, 0, 1000, 800))
            .build();

        // Act
        let resized = manager.resize_to_zone(&window, Zone::Right, None).unwrap();

        // Assert
        assert!(resized);
        assert_eq!(window.current_position(), Rect::new(333, 0, 1000, 800));
    }

    #[test]
    fn right_from_elsewhere_goes_to_first_rectangle() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder()
            .position(Rect::new(100, 100, 400, 400))
            .build();

        // Act
        manager.resize_to_zone(&window, Zone::Right, None).unwrap();

        // Assert
        assert_eq!(window.current_position(), Rect::new(500, 0, 1000, 800));
    }

    #[test]
    fn full_cycle_wraps_to_first_rectangle() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1200, 800));
        let window = FakeWindow::builder().build();
        let count = Zone::Right.rectangles().len();

        // Act
        for _ in 0..=count {
            manager.resize_to_zone(&window, Zone::Right, None).unwrap();
        }

        // Assert
        let moves = window.moves();
        assert_eq!(moves.len(), count + 1);
        assert_eq!(moves[0], Rect::new(600, 0, 1200, 800));
        assert_eq!(moves[count], moves[0]);
    }

    #[test]
    fn close_window_snaps_without_advancing() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder()
            .position(Rect::new(2, 1, 501, 402))
            .build();

        // Act
        manager.resize_to_zone(&window, Zone::TopLeft, None).unwrap();

        // Assert
        assert_eq!(window.current_position(), Rect::new(0, 0, 500, 400));
    }

    #[test]
    fn explicit_index_is_used_directly() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1200, 800));
        let window = FakeWindow::builder().build();

        // Act
        manager.resize_to_zone(&window, Zone::Left, Some(2)).unwrap();

        // Assert
        assert_eq!(window.current_position(), Rect::new(0, 0, 400, 800));
    }

    #[test]
    fn explicit_index_out_of_range_fails_without_side_effects() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1200, 800));
        let window = FakeWindow::builder()
            .state(VisualState::Maximized)
            .build();

        // Act
        let result = manager.resize_to_zone(&window, Zone::Top, Some(2));

        // Assert
        assert!(matches!(
            result,
            Err(Error::ZoneIndexOutOfRange {
                zone: Zone::Top,
                index: 2,
                count: 2
            })
        ));
        assert_eq!(window.visual_state().unwrap(), VisualState::Maximized);
        assert!(window.moves().is_empty());
    }

    #[test]
    fn maximized_window_is_restored_to_first_rectangle() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder()
            .position(Rect::new(500, 0, 1000, 800))
            .state(VisualState::Maximized)
            .resizable(false)
            .build();

        // Act
        let resized = manager.resize_to_zone(&window, Zone::Right, None).unwrap();

        // Assert
        assert!(resized);
        assert_eq!(window.visual_state().unwrap(), VisualState::Normal);
        assert_eq!(window.current_position(), Rect::new(500, 0, 1000, 800));
    }

    #[test]
    fn fixed_size_window_is_left_alone() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder().resizable(false).build();

        // Act
        let resized = manager.resize_to_zone(&window, Zone::Left, None).unwrap();

        // Assert
        assert!(!resized);
        assert!(window.moves().is_empty());
    }

    #[test]
    fn padding_is_added_around_target_and_removed_before_search() {
        // Arrange
        let manager = ZoneManager::new(
            Arc::new(FakeDesktop::new(Rect::new(0, 0, 1000, 800))),
            WindowResizer::default(),
            ZoneThresholds::default(),
        );
        let window = FakeWindow::builder()
            .border(Padding::new(7, 0, 7, 7))
            .position(Rect::new(-8, -1, 508, 808))
            .build();

        // Act
        manager.resize_to_zone(&window, Zone::Left, None).unwrap();

        // Assert
        assert_eq!(window.current_position(), Rect::new(-8, -1, 674, 808));
    }

    #[test]
    fn target_is_relative_to_work_area_origin() {
        // Arrange
        let manager = manager(Rect::new(0, 40, 1000, 840));
        let window = FakeWindow::builder()
            .screen_origin(Point { x: 0, y: 40 })
            .build();

        // Act
        manager.resize_to_zone(&window, Zone::Bottom, Some(0)).unwrap();

        // Assert
        assert_eq!(window.current_position(), Rect::new(0, 400, 1000, 800));
    }

    #[test]
    fn closed_window_reports_window_gone() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder().build();
        window.close();

        // Act
        let result = manager.resize_to_zone(&window, Zone::Left, None);

        // Assert
        assert!(result.is_err_and(|e| e.is_window_gone()));
    }

    #[test]
    fn maximize_then_maximize_again_fills_work_area_as_normal_window() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder().build();

        // Act
        manager.maximize(&window).unwrap();
        let first = window.visual_state().unwrap();
        manager.maximize(&window).unwrap();

        // Assert
        assert_eq!(first, VisualState::Maximized);
        assert_eq!(window.visual_state().unwrap(), VisualState::Normal);
        assert_eq!(window.current_position(), Rect::new(0, 0, 1000, 800));
    }

    #[test]
    fn minimize_sets_minimized_state() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder().build();

        // Act
        manager.minimize(&window).unwrap();

        // Assert
        assert_eq!(window.visual_state().unwrap(), VisualState::Minimized);
    }

    #[test]
    fn toggle_always_on_top_flips_flag() {
        // Arrange
        let manager = manager(Rect::new(0, 0, 1000, 800));
        let window = FakeWindow::builder().build();

        // Act
        manager.toggle_always_on_top(&window).unwrap();
        let after_first = window.is_topmost().unwrap();
        manager.toggle_always_on_top(&window).unwrap();

        // Assert
        assert!(after_first);
        assert!(!window.is_topmost().unwrap());
    }

    #[test]
    fn select_index_policy() {
        // Arrange
        let thresholds = ZoneThresholds::default();
        let nearest = |distance: f64| ZoneSearchResult {
            proportional: Zone::Right.rectangles()[2],
            rect: Rect::default(),
            distance,
            zone: Zone::Right,
            index: 2,
        };

        // Act / Assert
        assert_eq!(thresholds.select_index(&nearest(0.0), 6), 3);
        assert_eq!(thresholds.select_index(&nearest(1.0), 6), 3);
        assert_eq!(thresholds.select_index(&nearest(1.5), 6), 2);
        assert_eq!(thresholds.select_index(&nearest(5.0), 6), 2);
        assert_eq!(thresholds.select_index(&nearest(5.1), 6), 0);
        assert_eq!(thresholds.select_index(&nearest(0.0), 3), 0);
    }
}
