use std::collections::VecDeque;

use crate::config::PaddingConfig;
use crate::selector::WindowSelector;
use crate::{Desktop, Padding, Rect, VisualState, Window, WindowResult, log_debug};

/// Padding used when the compositor cannot report a window's visible
/// frame: 7 px of invisible border on the left, right, and bottom edges
/// plus the 1 px border line.
pub const DEFAULT_FALLBACK_PADDING: Padding = Padding::new(8, 1, 8, 8);

/// Windows that draw their own frame flush with their reported bounds.
///
/// Class names and executables are case-sensitive.
pub fn no_padding_defaults() -> Vec<WindowSelector> {
    let mut selectors: Vec<WindowSelector> = [
        "XLMAIN",                         // Excel
        "OpusApp",                        // Word
        "rctrl_renwnd32",                 // Outlook
        "PPTFrameClass",                  // PowerPoint
        "Chrome_WidgetWin_1",             // Chromium programs
        "vguiPopupWindow",                // Steam
        "Photoshop",                      // Photoshop
        "illustrator",                    // Illustrator
        "indesign",                       // InDesign
        "_macr_dreamweaver_frame_window_", // Dreamweaver
        "ESET Main Frame",                // ESET NOD32
        "MozillaWindowClass",             // Firefox
    ]
    .into_iter()
    .map(WindowSelector::class)
    .collect();

    selectors.push(WindowSelector::executable("devenv.exe"));
    selectors.extend(
        ["Epic Games Launcher", "TagScanner"]
            .into_iter()
            .filter_map(|title| WindowSelector::new(None, None, Some(title)).ok()),
    );
    selectors
}

/// Computes window padding, decides which windows may be moved, and
/// applies positions.
#[derive(Debug, Clone)]
pub struct WindowResizer {
    no_padding: Vec<WindowSelector>,
    gapless: bool,
    fallback: Padding,
}

impl Default for WindowResizer {
    fn default() -> Self {
        Self::new(no_padding_defaults(), true, DEFAULT_FALLBACK_PADDING)
    }
}

impl WindowResizer {
    pub fn new(no_padding: Vec<WindowSelector>, gapless: bool, fallback: Padding) -> Self {
        Self {
            no_padding,
            gapless,
            fallback,
        }
    }

    /// Builds a resizer from the `[padding]` config section.
    ///
    /// User selectors are appended to the built-in no-padding list.
    pub fn from_config(config: &PaddingConfig) -> WindowResult<Self> {
        let mut no_padding = no_padding_defaults();
        for selector in &config.no_padding {
            no_padding.push(WindowSelector::try_from(selector)?);
        }
        Ok(Self::new(no_padding, config.gapless, config.fallback))
    }

    /// Returns the invisible border around `window`.
    ///
    /// Zero for windows on the no-padding list. Otherwise the difference
    /// between the legacy window rect and the visible frame, widened by
    /// the 1 px border line when windows are gapless.
    pub fn padding<W: Window + ?Sized>(&self, window: &W) -> WindowResult<Padding> {
        if self.no_padding.iter().any(|s| s.matches(window)) {
            return Ok(Padding::ZERO);
        }

        let outer = window.window_rect()?;
        let padding = match window.frame_bounds() {
            Ok(inner) => Padding::between(&outer, &inner),
            Err(e) if e.is_window_gone() => return Err(e),
            Err(e) => {
                log_debug!(
                    "frame bounds unavailable for 0x{:X} ({e}), using fallback padding",
                    window.handle()
                );
                return Ok(self.fallback);
            }
        };

        Ok(if self.gapless {
            padding.grow(1)
        } else {
            padding
        })
    }

    /// Returns `true` if the window is resizable, visible, and neither
    /// minimized nor maximized. Query failures count as `false`.
    pub fn can_be_auto_resized<W: Window + ?Sized>(&self, window: &W) -> bool {
        let check = || -> WindowResult<bool> {
            Ok(window.is_resizable()?
                && window.is_visible()?
                && window.visual_state()? == VisualState::Normal)
        };
        check().unwrap_or(false)
    }

    /// Lazily walks the window tree breadth-first, yielding windows that
    /// can be auto-resized.
    ///
    /// With `parent` of `None` the first level is the top-level windows.
    /// `depth` bounds how many levels are visited; `0` yields nothing.
    pub fn find_resizable_windows<'a, D: Desktop>(
        &'a self,
        desktop: &'a D,
        parent: Option<D::Window>,
        depth: usize,
    ) -> ResizableWindows<'a, D> {
        let mut pending = VecDeque::new();
        if depth > 0 {
            pending.push_back((parent, depth));
        }
        ResizableWindows {
            resizer: self,
            desktop,
            pending,
            level: Vec::new().into_iter(),
            level_depth: 0,
        }
    }

    /// Sets the window's normal position, in workspace coordinates.
    pub fn move_window<W: Window + ?Sized>(&self, window: &W, rect: &Rect) -> WindowResult<()> {
        window.set_position(rect)
    }
}

/// Iterator returned by [`WindowResizer::find_resizable_windows`].
pub struct ResizableWindows<'a, D: Desktop> {
    resizer: &'a WindowResizer,
    desktop: &'a D,
    pending: VecDeque<(Option<D::Window>, usize)>,
    level: std::vec::IntoIter<D::Window>,
    level_depth: usize,
}

impl<D: Desktop> Iterator for ResizableWindows<'_, D> {
    type Item = D::Window;

    fn next(&mut self) -> Option<D::Window> {
        loop {
            if let Some(window) = self.level.next() {
                if self.level_depth > 1 {
                    self.pending
                        .push_back((Some(window.clone()), self.level_depth - 1));
                }
                return Some(window);
            }

            let (parent, depth) = self.pending.pop_front()?;
            let windows = match &parent {
                None => self.desktop.top_level_windows(),
                Some(p) => self.desktop.child_windows(p),
            };
            let windows = match windows {
                Ok(windows) => windows,
                Err(e) => {
                    log_debug!("skipping window level: {e}");
                    continue;
                }
            };

            self.level = windows
                .into_iter()
                .filter(|w| self.resizer.can_be_auto_resized(w))
                .collect::<Vec<_>>()
                .into_iter();
            self.level_depth = depth;
        }
    }
}
